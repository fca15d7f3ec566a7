//! Per-message generation plan: classification, compiled display format,
//! cause and union layout, with every Rust name already resolved.
//!
//! Plans are plain data (serializable for `proto-errgen plan`); the emitters
//! only print them.
use serde::Serialize;

use crate::cause::resolve_cause;
use crate::classify::{classify, ErrorKind};
use crate::error::SchemaError;
use crate::format::{self, CompiledFormat};
use crate::generate::GeneratorOptions;
use crate::naming::{snake_ident, to_snake, type_ident, type_path};
use crate::references::References;
use crate::schema::{Field, FieldType, Label, Message, SchemaIndex, TaggedUnion};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ErrorPlan {
    Leaf(LeafPlan),
    Sum(SumPlan),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeafPlan {
    pub message: String,
    /// Path of the prost struct relative to the package module.
    pub rust_type: String,
    pub format: CompiledFormat<Accessor>,
    pub cause: Option<CauseField>,
}

/// Rust expression producing a `Display` value for one placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Accessor {
    pub field: String,
    pub expr: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CauseField {
    pub field: String,
    pub ident: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SumPlan {
    pub message: String,
    pub rust_type: String,
    pub union: String,
    /// Struct field holding the oneof (`kind`).
    pub union_field: String,
    /// Path of the prost oneof enum (`application_error::Kind`).
    pub union_enum: String,
    /// The struct has fields outside the oneof; constructors fill them from
    /// `Default`.
    pub has_other_fields: bool,
    pub members: Vec<SumMember>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SumMember {
    pub field: String,
    pub variant: String,
    /// Set for message-typed members only.
    pub message_type: Option<MemberType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberType {
    /// Full schema name (`example.app.ConfigError`).
    pub name: String,
    pub rust_type: String,
    pub constructor: String,
}

impl ErrorPlan {
    pub fn message(&self) -> &str {
        match self {
            Self::Leaf(leaf) => &leaf.message,
            Self::Sum(sum) => &sum.message,
        }
    }
}

/// Where a message sits and what the run looks like around it.
pub struct PlanContext<'a> {
    pub index: &'a SchemaIndex<'a>,
    pub package: &'a str,
    pub parents: &'a [&'a str],
    pub options: &'a GeneratorOptions,
}

impl PlanContext<'_> {
    /// Whether the message named `type_name` gets a generated `Display` in
    /// this run.
    fn renders(&self, type_name: &str) -> bool {
        self.index
            .resolve(type_name, self.package)
            .is_some_and(|entry| self.options.qualifies(entry.message))
    }

    fn rust_type_of(&self, type_name: &str) -> (String, String) {
        match self.index.resolve(type_name, self.package) {
            Some(entry) => (
                entry.message.name.clone(),
                type_path(self.package, &entry.unit.package, &entry.parents, &entry.message.name),
            ),
            None => {
                tracing::warn!(type_name, "message type not in schema snapshot; guessing its path");
                self.guess_path(type_name)
            }
        }
    }

    /// Name and Rust path of a type without a message entry: enums, and
    /// messages outside the snapshot. The package is the longest loaded one
    /// prefixing the name, else everything before the first capitalized
    /// segment.
    fn guess_path(&self, type_name: &str) -> (String, String) {
        let name = type_name.strip_prefix('.').unwrap_or(type_name);
        let (package, path): (String, Vec<&str>) = match self.index.split_package(name) {
            Some((package, inner)) => (package.to_string(), inner.split('.').collect()),
            None => {
                let segments: Vec<&str> = name.split('.').collect();
                let last = segments.len().saturating_sub(1);
                let split = segments[..last]
                    .iter()
                    .position(|s| s.starts_with(char::is_uppercase))
                    .unwrap_or(last);
                (segments[..split].join("."), segments[split..].to_vec())
            }
        };
        let (last, parents) = path.split_last().unwrap_or((&name, &[][..]));
        (last.to_string(), type_path(self.package, &package, parents, last))
    }
}

pub fn plan_message(message: &Message, ctx: &PlanContext<'_>) -> Result<ErrorPlan, SchemaError> {
    match classify(message)? {
        ErrorKind::Leaf => plan_leaf(message, ctx).map(ErrorPlan::Leaf),
        ErrorKind::Sum(union) => plan_sum(message, &union, ctx).map(ErrorPlan::Sum),
    }
}

fn plan_leaf(message: &Message, ctx: &PlanContext<'_>) -> Result<LeafPlan, SchemaError> {
    let key = &ctx.options.display_key;
    let display = message
        .annotation(key)
        .ok_or_else(|| SchemaError::MissingDisplayFormat {
            message: message.name.clone(),
            key: key.clone(),
        })?;

    let format = format::compile(display, |name| message.field(name))
        .map_err(|unknown| SchemaError::UnknownFieldReference {
            message: message.name.clone(),
            field: unknown.0,
            key: key.clone(),
        })?
        .map_accessors(|field| accessor(field, ctx));

    let refs = References::scan(display);
    let cause = resolve_cause(message, &refs, ctx.index, ctx.package, key)?.map(|field| CauseField {
        field: field.name.clone(),
        ident: snake_ident(&field.name),
    });

    Ok(LeafPlan {
        message: message.name.clone(),
        rust_type: type_path(ctx.package, ctx.package, ctx.parents, &message.name),
        format,
        cause,
    })
}

fn accessor(field: &Field, ctx: &PlanContext<'_>) -> Accessor {
    let ident = snake_ident(&field.name);
    let debug = || format!("::std::format_args!(\"{{:?}}\", self.{ident})");
    let expr = match (&field.ty, field.label) {
        (_, Label::Repeated) => debug(),
        (FieldType::Message(name), _) if ctx.renders(name) => format!(
            "self.{ident}.as_ref().map_or(&\"\" as &dyn ::std::fmt::Display, |v| v as &dyn ::std::fmt::Display)"
        ),
        (FieldType::Message(_), _) => debug(),
        (FieldType::Bytes, Label::Optional) => format!(
            "::std::string::String::from_utf8_lossy(self.{ident}.as_deref().unwrap_or_default())"
        ),
        (FieldType::Bytes, _) => format!("::std::string::String::from_utf8_lossy(&self.{ident})"),
        (FieldType::String, Label::Optional) => format!("self.{ident}.as_deref().unwrap_or_default()"),
        (FieldType::Enum(name), label) => {
            let value = match label {
                Label::Optional => format!("self.{ident}.unwrap_or_default()"),
                _ => format!("self.{ident}"),
            };
            enum_name(&ctx.guess_path(name).1, &value)
        }
        (_, Label::Optional) => format!("self.{ident}.unwrap_or_default()"),
        _ => format!("self.{ident}"),
    };
    Accessor { field: field.name.clone(), expr }
}

/// Value name of a prost enum, or the raw number when it is not a known
/// value.
fn enum_name(path: &str, value: &str) -> String {
    format!(
        "match <{path} as ::std::convert::TryFrom<i32>>::try_from({value}) {{ \
         ::std::result::Result::Ok(v) => ::std::borrow::Cow::Borrowed(v.as_str_name()), \
         ::std::result::Result::Err(_) => ::std::borrow::Cow::Owned(::std::string::ToString::to_string(&{value})) }}"
    )
}

fn plan_sum(message: &Message, union: &TaggedUnion<'_>, ctx: &PlanContext<'_>) -> Result<SumPlan, SchemaError> {
    let mut members: Vec<SumMember> = Vec::with_capacity(union.members.len());
    for field in &union.members {
        let message_type = field.message_type().map(|type_name| {
            let (name, rust_type) = ctx.rust_type_of(type_name);
            MemberType {
                constructor: format!("from_{}", to_snake(&name)),
                name: type_name.strip_prefix('.').unwrap_or(type_name).to_string(),
                rust_type,
            }
        });
        members.push(SumMember {
            field: field.name.clone(),
            variant: type_ident(&field.name),
            message_type,
        });
    }

    // Two members of the same type would produce the same constructor.
    for (i, member) in members.iter().enumerate() {
        let Some(ty) = &member.message_type else { continue };
        let same: Vec<String> = members[i..]
            .iter()
            .filter(|m| m.message_type.as_ref().is_some_and(|t| t.constructor == ty.constructor))
            .map(|m| m.field.clone())
            .collect();
        if same.len() > 1 {
            return Err(SchemaError::DuplicateConstructor {
                message: message.name.clone(),
                union: union.name.to_string(),
                message_type: ty.name.clone(),
                fields: same,
            });
        }
    }

    let mut module: Vec<String> = ctx.parents.iter().map(|p| snake_ident(p)).collect();
    module.push(snake_ident(&message.name));
    module.push(type_ident(union.name));

    Ok(SumPlan {
        message: message.name.clone(),
        rust_type: type_path(ctx.package, ctx.package, ctx.parents, &message.name),
        union: union.name.to_string(),
        union_field: snake_ident(union.name),
        union_enum: module.join("::"),
        has_other_fields: message.fields.iter().any(|f| f.oneof.as_deref() != Some(union.name)),
        members,
    })
}
