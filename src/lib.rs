//! Generate `Display` / `std::error::Error` impls for prost messages from a
//! schema-level error taxonomy.
//!
//! Messages whose name ends with `Error` are either *leaf* errors (rendered
//! from their own fields through an `(errors.display)` format, optionally
//! wrapping one cause) or *sum* errors (a single oneof over other errors,
//! delegating to whichever member is set).
//!
//! ```no_run
//! use proto_errgen::{schema::load, Generator};
//!
//! let units = load::load_all(["schema/*.json"], None)?;
//! for artifact in Generator::default().generate(&units)? {
//!     println!("{}:\n{}", artifact.name, artifact.content);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod cause;
pub mod classify;
pub mod cli;
pub mod emit;
pub mod error;
pub mod format;
pub mod generate;
pub mod jq_exec;
pub mod naming;
pub mod plan;
pub mod postprocess;
pub mod references;
pub mod schema;

pub use error::{JqError, LoadError, SchemaError, UnitError};
pub use generate::{Artifact, Generator, GeneratorOptions};
pub use schema::{SchemaIndex, SchemaUnit};
