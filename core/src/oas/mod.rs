#![deny(missing_docs)]

//! # OpenAPI Parsing Module
//!
//! - **shims**: Intermediate Deserialization Layer mapping YAML objects.
//! - **models**: Intermediate Representation definitions.
//! - **document**: Lowering from shims into the IR.

pub mod document;
pub mod models;
pub mod shims;

// Re-export public API to keep call sites short
pub use document::parse_document;
pub use models::{
    ApiDocument, Method, Operation, OperationParam, ParamSource, ParamWidening, PathTemplate,
    RequestBodyDefinition, TemplateParam,
};
