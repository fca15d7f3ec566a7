//! In-memory schema handed to the generator by the front end.
//!
//! One [`SchemaUnit`] per `.proto` file. Everything here is read-only for the
//! duration of a run; cross-message questions go through [`SchemaIndex`].
pub mod index;
pub mod load;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use index::{MessageEntry, SchemaIndex};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaUnit {
    /// Source path of the unit, e.g. `app/errors.proto`.
    pub file: String,
    /// Dotted protobuf package. Empty for the root package.
    #[serde(default)]
    pub package: String,
    #[serde(default)]
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    /// String annotations keyed by option name (`errors.display`, ...).
    #[serde(default)]
    pub options: IndexMap<String, String>,
    #[serde(default)]
    pub nested: Vec<Message>,
    /// Synthetic `map<K, V>` entry messages. Never treated as errors.
    #[serde(default)]
    pub map_entry: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: FieldType,
    #[serde(default)]
    pub label: Label,
    /// Name of the oneof this field is a member of.
    #[serde(default)]
    pub oneof: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Double,
    Float,
    Int32,
    Int64,
    Uint32,
    Uint64,
    Sint32,
    Sint64,
    Fixed32,
    Fixed64,
    Sfixed32,
    Sfixed64,
    Bool,
    String,
    Bytes,
    /// Fully qualified enum name.
    Enum(String),
    /// Fully qualified message name.
    Message(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    #[default]
    Singular,
    /// proto2 `optional` / proto3 explicit presence.
    Optional,
    Repeated,
}

/// A oneof group, derived from the member fields of a message.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedUnion<'a> {
    pub name: &'a str,
    pub members: Vec<&'a Field>,
}

impl Message {
    /// Annotation value under `key`. Empty values count as absent.
    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Oneofs in order of first appearance among the fields.
    pub fn unions(&self) -> Vec<TaggedUnion<'_>> {
        let mut out: Vec<TaggedUnion<'_>> = Vec::new();
        for field in &self.fields {
            let Some(name) = field.oneof.as_deref() else { continue };
            match out.iter_mut().find(|u| u.name == name) {
                Some(union) => union.members.push(field),
                None => out.push(TaggedUnion { name, members: vec![field] }),
            }
        }
        out
    }
}

impl Field {
    /// Referenced message name for singular (non-repeated) message fields.
    pub fn message_type(&self) -> Option<&str> {
        match (&self.ty, self.label) {
            (FieldType::Message(name), Label::Singular | Label::Optional) => Some(name),
            _ => None,
        }
    }
}

impl SchemaUnit {
    /// Every message of the unit, depth-first in declaration order, with the
    /// names of its enclosing messages.
    pub fn all_messages(&self) -> Vec<(Vec<&str>, &Message)> {
        fn walk<'a>(
            parents: &mut Vec<&'a str>,
            messages: &'a [Message],
            out: &mut Vec<(Vec<&'a str>, &'a Message)>,
        ) {
            for message in messages {
                out.push((parents.clone(), message));
                parents.push(&message.name);
                walk(parents, &message.nested, out);
                parents.pop();
            }
        }
        let mut out = Vec::new();
        walk(&mut Vec::new(), &self.messages, &mut out);
        out
    }
}

// ------------------------------- Tests ------------------------------------ //
