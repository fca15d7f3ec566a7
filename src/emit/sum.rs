use super::{close_impl_fn, open_display, open_error, string_literal, DYN_ERROR};
use crate::plan::{MemberType, SumMember, SumPlan};

/// Rendered when no member is set, or the set member has no error type.
pub const FALLBACK: &str = "unknown error";

/// Dispatch on the oneof for `Display` and `source()`, plus one constructor
/// and `From` impl per message-typed member.
pub fn emit(out: &mut String, sum: &SumPlan) {
    let typed: Vec<(&SumMember, &MemberType)> = sum
        .members
        .iter()
        .filter_map(|m| m.message_type.as_ref().map(|t| (m, t)))
        .collect();

    open_display(out, &sum.rust_type);
    out.push_str(&format!("        match &self.{} {{\n", sum.union_field));
    for (member, _) in &typed {
        out.push_str(&format!(
            "            {} => ::std::fmt::Display::fmt(v, f),\n",
            arm(sum, member)
        ));
    }
    out.push_str(&format!("            _ => f.write_str({}),\n", string_literal(FALLBACK)));
    out.push_str("        }\n");
    close_impl_fn(out);

    open_error(out, &sum.rust_type);
    out.push_str(&format!("        match &self.{} {{\n", sum.union_field));
    for (member, _) in &typed {
        out.push_str(&format!(
            "            {} => ::std::option::Option::Some(v as &{DYN_ERROR}),\n",
            arm(sum, member)
        ));
    }
    out.push_str("            _ => ::std::option::Option::None,\n");
    out.push_str("        }\n");
    close_impl_fn(out);

    if typed.is_empty() {
        return;
    }

    let rest = if sum.has_other_fields { "            ..::std::default::Default::default()\n" } else { "" };
    out.push_str(&format!("\nimpl {} {{\n", sum.rust_type));
    for (i, (member, ty)) in typed.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("    pub fn {}(leaf: {}) -> Self {{\n", ty.constructor, ty.rust_type));
        out.push_str("        Self {\n");
        out.push_str(&format!(
            "            {}: ::std::option::Option::Some({}::{}(leaf)),\n",
            sum.union_field, sum.union_enum, member.variant
        ));
        out.push_str(rest);
        out.push_str("        }\n");
        out.push_str("    }\n");
    }
    out.push_str("}\n");

    for (_, ty) in &typed {
        out.push_str(&format!(
            "\nimpl ::std::convert::From<{}> for {} {{\n",
            ty.rust_type, sum.rust_type
        ));
        out.push_str(&format!("    fn from(leaf: {}) -> Self {{\n", ty.rust_type));
        out.push_str(&format!("        Self::{}(leaf)\n", ty.constructor));
        close_impl_fn(out);
    }
}

fn arm(sum: &SumPlan, member: &SumMember) -> String {
    format!("::std::option::Option::Some({}::{}(v))", sum.union_enum, member.variant)
}
