#![deny(missing_docs)]

//! # Code Generation
//!
//! Produces the generated module sources from a parsed document:
//! - **entities**: `types.rs` — schema entities plus per-operation aliases.
//! - **client**: `client.rs` — the one-shot calling convention.
//! - **watch**: `watch.rs` — the reactive calling convention.
//! - **server**: `server.rs` — the server-side utility surface.
//!
//! Instead of computing types on the fly, generation pre-expands one concrete
//! operation signature per declared (path, method) pair; the host compiler
//! then enforces method, parameter, body and response shapes statically.

pub mod client;
pub mod entities;
pub mod server;
pub mod watch;

use crate::oas::models::{ApiDocument, Operation, PathTemplate};
use crate::resolver::field_ident;
use heck::ToUpperCamelCase;

/// Pass-through options forwarded to schema-to-type conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Extra derive names appended to every generated type.
    pub extra_derives: Vec<String>,
    /// Emit `#[serde(deny_unknown_fields)]` on generated structs.
    pub deny_unknown_fields: bool,
}

/// Writes the shared file banner.
pub(crate) fn push_banner(code: &mut String, doc: &ApiDocument, what: &str) {
    code.push_str(&format!(
        "//! {} generated from `{} {}`. Do not edit.\n\n",
        what, doc.title, doc.version
    ));
}

/// Writes a doc comment, one line per source line.
pub(crate) fn push_doc(code: &mut String, text: &str, indent: &str) {
    for line in text.lines() {
        code.push_str(&format!("{}/// {}\n", indent, line));
    }
}

/// A pre-expanded wrapper signature for one declared operation.
pub(crate) struct WrapperSignature {
    /// Wrapper function name.
    pub name: String,
    /// Arguments after `&self`: path parameters in template order, then
    /// `body`, then `query`.
    pub args: Vec<(String, String)>,
    /// Declared response type; `None` collapses to the unit type.
    pub ret: Option<String>,
}

impl WrapperSignature {
    /// `name(&self, a: T, b: U)` declaration fragment.
    pub fn declaration(&self) -> String {
        let args: Vec<String> = self
            .args
            .iter()
            .map(|(name, ty)| format!("{}: {}", name, ty))
            .collect();
        if args.is_empty() {
            format!("{}(&self)", self.name)
        } else {
            format!("{}(&self, {})", self.name, args.join(", "))
        }
    }

    /// Argument names for a delegating call.
    pub fn forward_args(&self) -> String {
        self.args
            .iter()
            .map(|(name, _)| name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// The `Ok` type of the wrapper.
    pub fn ok_type(&self) -> &str {
        self.ret.as_deref().unwrap_or("()")
    }
}

/// Derives the wrapper signature for one (template, operation) pair.
pub(crate) fn signature_of(template: &PathTemplate, op: &Operation) -> WrapperSignature {
    let mut args = Vec::new();

    for param in &template.params {
        let ty = op
            .path_params()
            .find(|p| p.name == param.name)
            .map(|p| p.ty.clone())
            .unwrap_or_else(|| param.ty.clone());
        args.push((field_ident(&param.name), ty));
    }

    if let Some(body) = &op.request_body {
        args.push(("body".to_string(), format!("&{}", body.ty)));
    }

    if op.query_params().next().is_some() {
        args.push(("query".to_string(), format!("&{}", query_struct_name(op))));
    }

    WrapperSignature {
        name: op.handler_name.clone(),
        args,
        ret: op.response_type.clone(),
    }
}

/// Name of the generated query struct for an operation.
pub(crate) fn query_struct_name(op: &Operation) -> String {
    format!("{}Query", op.handler_name.to_upper_camel_case())
}

/// Name of the generated response alias for an operation.
pub(crate) fn response_alias_name(op: &Operation) -> String {
    format!("{}Response", op.handler_name.to_upper_camel_case())
}

/// Name of the generated body alias for an operation.
pub(crate) fn body_alias_name(op: &Operation) -> String {
    format!("{}Body", op.handler_name.to_upper_camel_case())
}
