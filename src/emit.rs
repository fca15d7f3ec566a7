//! Rust source emission for planned error messages.
//!
//! Everything emitted uses fully qualified std paths, so the artifact can be
//! `include!`d next to the prost output of its package.
pub mod leaf;
pub mod sum;

use crate::plan::ErrorPlan;
use crate::schema::SchemaUnit;

pub const TOOL_NAME: &str = "proto-errgen";

const FMT_RESULT: &str = "::std::fmt::Result";
const FORMATTER: &str = "::std::fmt::Formatter<'_>";
const DYN_ERROR: &str = "(dyn ::std::error::Error + 'static)";

pub fn header(unit: &SchemaUnit) -> String {
    let mut out = format!("// Code generated by {TOOL_NAME}. DO NOT EDIT.\n// source: {}\n", unit.file);
    if !unit.package.is_empty() {
        out.push_str(&format!("// package: {}\n", unit.package));
    }
    out
}

pub fn plan(out: &mut String, plan: &ErrorPlan) {
    match plan {
        ErrorPlan::Leaf(leaf) => leaf::emit(out, leaf),
        ErrorPlan::Sum(sum) => sum::emit(out, sum),
    }
}

/// A Rust string literal holding `text`.
fn string_literal(text: &str) -> String {
    format!("{text:?}")
}

fn open_display(out: &mut String, rust_type: &str) {
    out.push_str(&format!("\nimpl ::std::fmt::Display for {rust_type} {{\n"));
    out.push_str(&format!("    fn fmt(&self, f: &mut {FORMATTER}) -> {FMT_RESULT} {{\n"));
}

fn open_error(out: &mut String, rust_type: &str) {
    out.push_str(&format!("\nimpl ::std::error::Error for {rust_type} {{\n"));
    out.push_str(&format!(
        "    fn source(&self) -> ::std::option::Option<&{DYN_ERROR}> {{\n"
    ));
}

fn close_impl_fn(out: &mut String) {
    out.push_str("    }\n}\n");
}
