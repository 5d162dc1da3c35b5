#![deny(missing_docs)]

//! # typed-openapi Core
//!
//! Core library for the typed OpenAPI call-wrapper generator: schema
//! ingestion, path template matching, and generation of statically typed
//! one-shot and reactive call surfaces.

/// Shared error types.
pub mod error;

/// Schema source loading (URL, inline document, byte stream).
pub mod source;

/// OpenAPI parsing (shims, IR, document lowering).
pub mod oas;

/// Path template exactification and reverse lookup.
pub mod matcher;

/// Schema-to-Rust type mapping.
pub mod resolver;

/// Generation of the typed wrapper sources.
pub mod codegen;

/// Host registration surface and the setup pipeline.
pub mod host;

/// The fetch primitive the generated wrappers delegate to.
#[cfg(feature = "client")]
pub mod fetch;

pub use codegen::ConvertOptions;
pub use error::{AppError, AppResult};
pub use host::{setup, HostContext, ModuleOptions, GENERATED_DIR};
pub use matcher::{ExactForm, PathIndex};
pub use oas::{parse_document, ApiDocument, Method, Operation, PathTemplate};
pub use source::SchemaSource;
