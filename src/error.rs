//! Error types for loading schemas and generating error impls.
use std::path::PathBuf;

/// Structural problems in an (already parsed) schema. All of them are
/// authoring mistakes and abort the unit the message belongs to.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("field {{{field}}} in ({key}) not found in message {message}")]
    UnknownFieldReference {
        message: String,
        field: String,
        key: String,
    },

    #[error("missing ({key}) option in message {message}")]
    MissingDisplayFormat { message: String, key: String },

    #[error("multiple oneofs not allowed in message {message}, found {}: {unions:?}", .unions.len())]
    MultipleUnions { message: String, unions: Vec<String> },

    #[error("only one unwrappable field allowed in message {message}, found: {candidates:?}")]
    AmbiguousCause {
        message: String,
        candidates: Vec<String>,
    },

    #[error("oneof {union} in message {message} holds {message_type} more than once: {fields:?}")]
    DuplicateConstructor {
        message: String,
        union: String,
        message_type: String,
        fields: Vec<String>,
    },
}

impl SchemaError {
    /// Name of the offending message.
    pub fn message(&self) -> &str {
        match self {
            Self::UnknownFieldReference { message, .. }
            | Self::MissingDisplayFormat { message, .. }
            | Self::MultipleUnions { message, .. }
            | Self::AmbiguousCause { message, .. }
            | Self::DuplicateConstructor { message, .. } => message,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PostProcessError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
    #[error("{program} produced non UTF-8 output")]
    Utf8 { program: String },
}

/// A unit-level failure. The unit produced no artifact.
#[derive(Debug, thiserror::Error)]
pub enum UnitError {
    #[error("{unit}: {source}")]
    Schema {
        unit: String,
        #[source]
        source: SchemaError,
    },
    #[error("{unit}: post-processing failed: {source}")]
    PostProcess {
        unit: String,
        #[source]
        source: PostProcessError,
    },
}

impl UnitError {
    pub fn unit(&self) -> &str {
        match self {
            Self::Schema { unit, .. } | Self::PostProcess { unit, .. } => unit,
        }
    }
}

/// Failures of the schema front end. These pass through as-is.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{origin}: at JSON path {path} → {message}")]
    Decode {
        origin: String,
        path: String,
        message: String,
    },
    #[error("{origin}: jq filter failed: {source}")]
    Jq {
        origin: String,
        #[source]
        source: JqError,
    },
    #[error("bad input pattern: {0}")]
    Pattern(String),
}

/// Failures of the jq pre-filter.
#[derive(Debug, thiserror::Error)]
pub enum JqError {
    #[error("parse error in `{filter}`: {detail}")]
    Parse { filter: String, detail: String },
    #[error("undefined in `{filter}`: {}", .names.join(", "))]
    Undefined { filter: String, names: Vec<String> },
    #[error("{0}")]
    Runtime(String),
    #[error("output is not JSON: {0}")]
    Output(#[from] serde_json::Error),
}
