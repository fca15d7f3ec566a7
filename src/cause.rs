//! Unwrap-target selection for leaf errors.
use crate::error::SchemaError;
use crate::references::References;
use crate::schema::{Field, Message, SchemaIndex};

/// Pick the field `source()` returns: the single referenced, singular,
/// message-typed field whose message carries a display format itself.
pub fn resolve_cause<'m>(
    message: &'m Message,
    refs: &References<'_>,
    index: &SchemaIndex<'_>,
    package: &str,
    display_key: &str,
) -> Result<Option<&'m Field>, SchemaError> {
    let mut candidates: Vec<&'m Field> = Vec::new();
    for field in &message.fields {
        if !refs.contains(&field.name) {
            continue;
        }
        let Some(type_name) = field.message_type() else { continue };
        match index.resolve(type_name, package) {
            Some(entry) if entry.message.annotation(display_key).is_some() => candidates.push(field),
            Some(_) => {}
            None => tracing::warn!(
                error_message = %message.name,
                field = %field.name,
                type_name,
                "referenced message is not in the schema snapshot; not treated as a cause"
            ),
        }
    }

    match candidates.len() {
        0 => Ok(None),
        1 => Ok(candidates.pop()),
        _ => Err(SchemaError::AmbiguousCause {
            message: message.name.clone(),
            candidates: candidates.iter().map(|f| f.name.clone()).collect(),
        }),
    }
}
