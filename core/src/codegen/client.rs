#![deny(missing_docs)]

//! # One-Shot Wrapper Generation
//!
//! Produces `client.rs`: a `Client` with one method per declared
//! (path template, method) pair, plus the untyped raw surface whose response
//! kind fixes the result type.

use crate::codegen::{push_banner, push_doc, signature_of};
use crate::oas::models::{ApiDocument, Operation, PathTemplate};
use crate::resolver::field_ident;

/// Generates the complete `client.rs` source.
pub fn generate_client(doc: &ApiDocument) -> String {
    let mut code = String::new();
    push_banner(&mut code, doc, "One-shot call wrappers");

    let has_path_params = doc.operations().any(|(t, _)| !t.params.is_empty());
    code.push_str("use super::types::*;\n");
    if has_path_params {
        code.push_str("use typed_openapi_core::fetch::encode_segment;\n");
    }
    code.push_str("use typed_openapi_core::fetch::{FetchClient, FetchError, RawOptions};\n");
    code.push_str("use typed_openapi_core::Method;\n");
    code.push_str("use std::io::Read;\n\n");

    push_doc(
        &mut code,
        &format!("Typed one-shot call surface for `{}`.", doc.title),
        "",
    );
    code.push_str("pub struct Client {\n    fetch: FetchClient,\n}\n\n");
    code.push_str("impl Client {\n");
    code.push_str("    /// Creates a client rooted at `base_url`.\n");
    code.push_str("    pub fn new(base_url: impl Into<String>) -> Client {\n");
    code.push_str("        Client { fetch: FetchClient::new(base_url) }\n    }\n");

    for (template, op) in doc.operations() {
        code.push('\n');
        generate_wrapper(&mut code, template, op);
    }

    code.push('\n');
    generate_raw_surface(&mut code);
    code.push_str("}\n");
    code
}

fn generate_wrapper(code: &mut String, template: &PathTemplate, op: &Operation) {
    let sig = signature_of(template, op);

    if let Some(summary) = &op.summary {
        push_doc(code, summary, "    ");
        code.push_str("    ///\n");
    }
    push_doc(
        code,
        &format!("`{} {}`", op.method.verb(), template.path),
        "    ",
    );
    if op.deprecated {
        code.push_str("    #[deprecated]\n");
    }
    code.push_str(&format!(
        "    pub fn {} -> Result<{}, FetchError> {{\n",
        sig.declaration(),
        sig.ok_type()
    ));

    // Path substitution, placeholders in template order.
    let path_expr = if template.params.is_empty() {
        format!("\"{}\"", template.path)
    } else {
        let mut format_str = template.path.clone();
        let mut format_args = Vec::new();
        for param in &template.params {
            format_str = format_str.replace(&format!("{{{}}}", param.name), "{}");
            format_args.push(format!(
                "encode_segment(&{}.to_string())",
                field_ident(&param.name)
            ));
        }
        code.push_str(&format!(
            "        let path = format!(\"{}\", {});\n",
            format_str,
            format_args.join(", ")
        ));
        "&path".to_string()
    };

    let query_expr = if op.query_params().next().is_some() {
        code.push_str("        let query = query.to_pairs();\n");
        "&query"
    } else {
        "&[]"
    };

    let body_expr = if op.request_body.is_some() {
        code.push_str("        let body = serde_json::to_value(body)?;\n");
        "Some(&body)"
    } else {
        "None"
    };

    let call = match op.response_type {
        Some(_) => "request_json",
        None => "request_unit",
    };
    code.push_str(&format!(
        "        self.fetch.{}(Method::{}, {}, {}, {})\n    }}\n",
        call,
        op.method.variant(),
        path_expr,
        query_expr,
        body_expr
    ));
}

fn generate_raw_surface(code: &mut String) {
    code.push_str(
        "    /// Raw call: the response body as bytes, declared schema ignored.\n    pub fn fetch_blob(&self, path: &str, options: &RawOptions) -> Result<Vec<u8>, FetchError> {\n        self.fetch.fetch_blob(path, options)\n    }\n\n",
    );
    code.push_str(
        "    /// Raw call: the response body as text, declared schema ignored.\n    pub fn fetch_text(&self, path: &str, options: &RawOptions) -> Result<String, FetchError> {\n        self.fetch.fetch_text(path, options)\n    }\n\n",
    );
    code.push_str(
        "    /// Raw call: the response body as a buffer, declared schema ignored.\n    pub fn fetch_array_buffer(&self, path: &str, options: &RawOptions) -> Result<Vec<u8>, FetchError> {\n        self.fetch.fetch_array_buffer(path, options)\n    }\n\n",
    );
    code.push_str(
        "    /// Raw call: the response body as a stream, declared schema ignored.\n    pub fn fetch_stream(&self, path: &str, options: &RawOptions) -> Result<Box<dyn Read + Send>, FetchError> {\n        self.fetch.fetch_stream(path, options)\n    }\n",
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::document::parse_document;

    const FIXTURE: &str = r#"
openapi: 3.0.2
info: { title: Swagger Petstore, version: "1.0.17" }
paths:
  /pet/{petId}:
    parameters:
      - name: petId
        in: path
        required: true
        schema: { type: integer, format: int64 }
    get:
      operationId: getPetById
      summary: Find pet by ID
      responses:
        "200":
          description: ok
          content:
            application/json:
              schema: { $ref: '#/components/schemas/Pet' }
    delete:
      operationId: deletePet
      responses:
        "400": { description: bad }
  /pet/findByStatus:
    get:
      operationId: findPetsByStatus
      parameters:
        - name: status
          in: query
          schema: { type: string }
      responses:
        "200":
          description: ok
          content:
            application/json:
              schema:
                type: array
                items: { $ref: '#/components/schemas/Pet' }
  /store/order:
    post:
      operationId: placeOrder
      requestBody:
        content:
          application/json:
            schema: { $ref: '#/components/schemas/Order' }
      responses:
        "200":
          description: ok
          content:
            application/json:
              schema: { $ref: '#/components/schemas/Order' }
components:
  schemas:
    Pet:
      type: object
      properties:
        name: { type: string }
    Order:
      type: object
      properties:
        id: { type: integer, format: int64 }
"#;

    fn generated() -> String {
        let doc = parse_document(FIXTURE).unwrap();
        generate_client(&doc)
    }

    #[test]
    fn test_typed_path_parameter_wrapper() {
        let code = generated();
        assert!(code.contains(
            "    pub fn get_pet_by_id(&self, pet_id: i64) -> Result<Pet, FetchError> {"
        ));
        assert!(code.contains("let path = format!(\"/pet/{}\", encode_segment(&pet_id.to_string()));"));
        assert!(code.contains("self.fetch.request_json(Method::Get, &path, &[], None)"));
        // The summary and the route line both land in the doc comment.
        assert!(code.contains("    /// Find pet by ID"));
        assert!(code.contains("    /// `GET /pet/{petId}`"));
    }

    #[test]
    fn test_unit_response_wrapper() {
        let code = generated();
        assert!(code.contains(
            "    pub fn delete_pet(&self, pet_id: i64) -> Result<(), FetchError> {"
        ));
        assert!(code.contains("self.fetch.request_unit(Method::Delete, &path, &[], None)"));
    }

    #[test]
    fn test_body_wrapper() {
        let code = generated();
        assert!(code.contains(
            "    pub fn place_order(&self, body: &Order) -> Result<Order, FetchError> {"
        ));
        assert!(code.contains("let body = serde_json::to_value(body)?;"));
        assert!(code.contains(
            "self.fetch.request_json(Method::Post, \"/store/order\", &[], Some(&body))"
        ));
    }

    #[test]
    fn test_query_wrapper() {
        let code = generated();
        assert!(code.contains("    pub fn find_pets_by_status(&self, query: &FindPetsByStatusQuery) -> Result<Vec<Pet>, FetchError> {"));
        assert!(code.contains("let query = query.to_pairs();"));
        assert!(code.contains(
            "self.fetch.request_json(Method::Get, \"/pet/findByStatus\", &query, None)"
        ));
    }

    #[test]
    fn test_raw_surface_is_schema_independent() {
        let code = generated();
        assert!(code.contains("pub fn fetch_blob(&self, path: &str, options: &RawOptions) -> Result<Vec<u8>, FetchError>"));
        assert!(code.contains("pub fn fetch_text(&self, path: &str, options: &RawOptions) -> Result<String, FetchError>"));
        assert!(code.contains("pub fn fetch_array_buffer(&self, path: &str, options: &RawOptions) -> Result<Vec<u8>, FetchError>"));
        assert!(code.contains("pub fn fetch_stream(&self, path: &str, options: &RawOptions) -> Result<Box<dyn Read + Send>, FetchError>"));
    }

    #[test]
    fn test_no_wrapper_for_undeclared_method() {
        let code = generated();
        // No patch operation is declared anywhere in the fixture.
        assert!(!code.contains("Method::Patch"));
    }
}
