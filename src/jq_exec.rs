//! jq pre-filter over schema documents, e.g. `.units[]` or
//! `map(select(.package == "example.app"))`.
use jaq_core::{compile::Undefined, load, Compiler, Ctx, RcIter};
use jaq_json::Val;
use serde_json::Value;

use crate::error::JqError;

type LoadFile<'s> = load::File<&'s str, ()>;

/// Compile `filter` with the jq standard definitions and collect every value
/// it yields for `document`.
pub fn run_jaq(filter: &str, document: &Value) -> Result<Vec<Value>, JqError> {
    let arena = load::Arena::default();
    let loader = load::Loader::new(jaq_std::defs().chain(jaq_json::defs()));
    let modules = loader
        .load(&arena, load::File { code: filter, path: () })
        .map_err(|errs| parse_error(filter, errs))?;
    let compiled = Compiler::default()
        .with_funs(jaq_std::funs().chain(jaq_json::funs()))
        .compile(modules)
        .map_err(|errs| undefined_error(filter, errs))?;

    let inputs = RcIter::new(core::iter::empty());
    let mut values = Vec::new();
    for output in compiled.run((Ctx::new([], &inputs), Val::from(document.clone()))) {
        let val = output.map_err(|e| JqError::Runtime(format!("{e:?}")))?;
        // Val displays as JSON text
        values.push(serde_json::from_str(&val.to_string())?);
    }
    Ok(values)
}

fn parse_error(filter: &str, errs: Vec<(LoadFile<'_>, load::Error<&str>)>) -> JqError {
    let detail: Vec<String> = errs.iter().map(|(_, err)| format!("{err:?}")).collect();
    JqError::Parse { filter: filter.to_string(), detail: detail.join("; ") }
}

fn undefined_error(filter: &str, errs: Vec<(LoadFile<'_>, Vec<(&str, Undefined)>)>) -> JqError {
    let names = errs
        .into_iter()
        .flat_map(|(_, list)| list)
        .map(|(name, undef)| format!("{name} ({undef:?})"))
        .collect();
    JqError::Undefined { filter: filter.to_string(), names }
}
