//! Decode schema units from JSON documents, keeping the JSON path of any
//! failure in the error.
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::SchemaUnit;
use crate::error::LoadError;

pub fn units_from_str(src: &str, origin: &str) -> Result<Vec<SchemaUnit>, LoadError> {
    let de = &mut serde_json::Deserializer::from_str(src);
    decode(de, origin)
}

pub fn units_from_value(value: Value, origin: &str) -> Result<Vec<SchemaUnit>, LoadError> {
    decode(value, origin)
}

/// A document holds either one unit or a list of them.
fn decode<'de, D>(de: D, origin: &str) -> Result<Vec<SchemaUnit>, LoadError>
where
    D: serde::Deserializer<'de>,
{
    // An untagged enum would swallow the inner path, so sniff the shape first.
    let value: Value = match serde_path_to_error::deserialize(de) {
        Ok(v) => v,
        Err(err) => {
            let path = err.path().to_string();
            return Err(LoadError::Decode {
                origin: origin.to_string(),
                path,
                message: err.into_inner().to_string(),
            });
        }
    };
    let decoded = if value.is_array() {
        serde_path_to_error::deserialize::<_, Vec<SchemaUnit>>(value)
    } else {
        serde_path_to_error::deserialize::<_, SchemaUnit>(value).map(|unit| vec![unit])
    };
    match decoded {
        Ok(units) => Ok(units),
        Err(err) => {
            let path = err.path().to_string();
            Err(LoadError::Decode {
                origin: origin.to_string(),
                path,
                message: err.into_inner().to_string(),
            })
        }
    }
}

/// Read one file and decode its units, optionally piping the document
/// through a jq filter first.
pub fn load_path(path: &Path, jq_expr: Option<&str>) -> Result<Vec<SchemaUnit>, LoadError> {
    let origin = path.to_string_lossy().to_string();
    let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let Some(jq_expr) = jq_expr else {
        return units_from_str(&source, &origin);
    };
    let document = units_json(&source, &origin)?;
    let outputs = crate::jq_exec::run_jaq(jq_expr, &document).map_err(|source| LoadError::Jq {
        origin: origin.clone(),
        source,
    })?;
    let mut units = Vec::new();
    for output in outputs {
        units.extend(units_from_value(output, &origin)?);
    }
    Ok(units)
}

fn units_json(source: &str, origin: &str) -> Result<Value, LoadError> {
    serde_json::from_str(source).map_err(|error| LoadError::Decode {
        origin: origin.to_string(),
        path: ".".to_string(),
        message: error.to_string(),
    })
}

/// Expand literal paths and glob patterns. A glob that matches nothing is an
/// error.
pub fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>, LoadError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'['))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            let entries = glob::glob(pattern).map_err(|e| LoadError::Pattern(format!("{pattern}: {e}")))?;
            for entry in entries {
                let path = entry.map_err(|e| LoadError::Pattern(e.to_string()))?;
                matched_any = true;
                out.push(path);
            }
            if !matched_any {
                return Err(LoadError::Pattern(format!("glob pattern matched no files: {pattern}")));
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

/// Load every unit named by `patterns`, in pattern order.
pub fn load_all<I>(patterns: I, jq_expr: Option<&str>) -> Result<Vec<SchemaUnit>, LoadError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut units = Vec::new();
    for path in resolve_file_path_patterns(patterns)? {
        tracing::debug!(path = %path.display(), "loading schema");
        units.extend(load_path(&path, jq_expr)?);
    }
    Ok(units)
}
