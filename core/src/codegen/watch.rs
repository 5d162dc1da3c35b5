#![deny(missing_docs)]

//! # Reactive Wrapper Generation
//!
//! Produces `watch.rs`: a `WatchClient` mirroring every one-shot wrapper but
//! returning `Deferred<T>` — the nullable data/error slot pair for callers
//! that observe the value after the fact.

use crate::codegen::{push_banner, push_doc, signature_of};
use crate::oas::models::ApiDocument;

/// Generates the complete `watch.rs` source.
pub fn generate_watch(doc: &ApiDocument) -> String {
    let mut code = String::new();
    push_banner(&mut code, doc, "Reactive call wrappers");

    code.push_str("use super::client::Client;\n");
    code.push_str("use super::types::*;\n");
    code.push_str("use typed_openapi_core::fetch::Deferred;\n\n");

    push_doc(
        &mut code,
        &format!(
            "Subscribable call surface for `{}`; results arrive in deferred slots.",
            doc.title
        ),
        "",
    );
    code.push_str("pub struct WatchClient {\n    client: Client,\n}\n\n");
    code.push_str("impl WatchClient {\n");
    code.push_str("    /// Creates a watch client rooted at `base_url`.\n");
    code.push_str("    pub fn new(base_url: impl Into<String>) -> WatchClient {\n");
    code.push_str("        WatchClient { client: Client::new(base_url) }\n    }\n");

    for (template, op) in doc.operations() {
        let sig = signature_of(template, op);
        code.push('\n');
        push_doc(
            &mut code,
            &format!("`{} {}`", op.method.verb(), template.path),
            "    ",
        );
        if op.deprecated {
            code.push_str("    #[deprecated]\n");
        }
        code.push_str(&format!(
            "    pub fn {} -> Deferred<{}> {{\n",
            sig.declaration(),
            sig.ok_type()
        ));
        code.push_str(&format!(
            "        Deferred::from_result(self.client.{}({}))\n    }}\n",
            sig.name,
            sig.forward_args()
        ));
    }

    code.push_str("}\n");
    code
}
