use crate::error::SchemaError;
use crate::schema::{Message, TaggedUnion};

/// Leaf errors render from their own fields; sum errors delegate to the
/// active member of their single oneof.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind<'a> {
    Leaf,
    Sum(TaggedUnion<'a>),
}

pub fn classify(message: &Message) -> Result<ErrorKind<'_>, SchemaError> {
    let mut unions = message.unions();
    match unions.len() {
        0 => Ok(ErrorKind::Leaf),
        1 => Ok(ErrorKind::Sum(unions.remove(0))),
        _ => Err(SchemaError::MultipleUnions {
            message: message.name.clone(),
            unions: unions.iter().map(|u| u.name.to_string()).collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message(value: serde_json::Value) -> Message {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn no_oneof_members_is_leaf() {
        let msg = message(json!({
            "name": "ConfigError",
            "fields": [
                {"name": "Key", "type": "string"},
                {"name": "Cause", "type": {"message": "x.NotFoundError"}, "label": "optional"}
            ]
        }));
        assert_eq!(classify(&msg).unwrap(), ErrorKind::Leaf);
    }

    #[test]
    fn one_oneof_is_sum() {
        let msg = message(json!({
            "name": "ApplicationError",
            "fields": [
                {"name": "trace_id", "type": "string"},
                {"name": "config_error", "type": {"message": "x.ConfigError"}, "oneof": "kind"},
                {"name": "io_error", "type": {"message": "x.IOError"}, "oneof": "kind"}
            ]
        }));
        let ErrorKind::Sum(union) = classify(&msg).unwrap() else {
            panic!("expected a sum error");
        };
        assert_eq!(union.name, "kind");
        assert_eq!(union.members.len(), 2);
    }

    #[test]
    fn two_oneofs_are_fatal() {
        let msg = message(json!({
            "name": "MixedError",
            "fields": [
                {"name": "a", "type": "string", "oneof": "first"},
                {"name": "b", "type": "string", "oneof": "second"}
            ]
        }));
        let err = classify(&msg).unwrap_err();
        assert_eq!(
            err,
            SchemaError::MultipleUnions {
                message: "MixedError".into(),
                unions: vec!["first".into(), "second".into()],
            }
        );
        assert_eq!(
            err.to_string(),
            r#"multiple oneofs not allowed in message MixedError, found 2: ["first", "second"]"#
        );
    }
}
