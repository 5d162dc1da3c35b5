#![deny(missing_docs)]

//! # Server Utility Generation
//!
//! Produces `server.rs`: the server-side surface registered under a module
//! alias — one-shot wrappers plus the schema type exports, without the
//! reactive layer.

use crate::codegen::{push_banner, push_doc};
use crate::oas::models::ApiDocument;

/// The alias under which the server utilities are registered.
pub const SERVER_ALIAS: &str = "server_api";

/// Generates the complete `server.rs` source.
pub fn generate_server(doc: &ApiDocument) -> String {
    let mut code = String::new();
    push_banner(&mut code, doc, "Server-side utilities");

    code.push_str("pub use super::client::Client;\n");
    code.push_str("pub use super::types::*;\n\n");

    push_doc(
        &mut code,
        &format!(
            "Creates the one-shot client for server-side callers of `{}`.",
            doc.title
        ),
        "",
    );
    code.push_str("pub fn client(base_url: impl Into<String>) -> Client {\n");
    code.push_str("    Client::new(base_url)\n}\n");
    code
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::document::parse_document;

    #[test]
    fn test_server_surface_reexports() {
        let doc = parse_document(
            "openapi: 3.0.2\ninfo: { title: fixture, version: \"1\" }\npaths: {}",
        )
        .unwrap();
        let code = generate_server(&doc);

        assert!(code.contains("pub use super::client::Client;"));
        assert!(code.contains("pub use super::types::*;"));
        assert!(code.contains("pub fn client(base_url: impl Into<String>) -> Client {"));
    }
}
