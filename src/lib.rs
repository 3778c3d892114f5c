//! validgen - Valid() method generator for Go structs
//!
//! Reads the struct declarations of a Go source file, interprets a
//! comma-separated constraint list in one struct-tag key (`arg` by default),
//! and generates a `Valid() error` method per selected struct that applies
//! defaults and rejects out-of-range values.

pub mod assembler;
pub mod compiler;
pub mod config;
pub mod emitter;
pub mod error;
pub mod escaping;
pub mod format;
pub mod generator;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod source;
pub mod tag;
pub mod types;

// Re-exports for convenience
pub use assembler::{assemble, Procedure};
pub use config::Config;
pub use emitter::CheckOutcome;
pub use error::{ValidgenError, ValidgenResult};
pub use generator::{generate, select_entities};
pub use models::{Constraint, ConstraintKind, EntityDecl, FieldDecl, PackageDecl};
pub use pipeline::{run, GenerateRequest, OutputMode, RunOutcome};
pub use render::RenderConfig;
pub use source::{parse_source, read_file};
pub use tag::parse_tag;
pub use types::{classify, zero_value, GoType, TypeCategory};
