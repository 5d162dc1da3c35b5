#![deny(missing_docs)]

//! # Entity Generation
//!
//! Produces `types.rs`: schema entities (structs, string enums, aliases),
//! per-operation response/body aliases, and the query structs backing the
//! one-shot wrappers. Required imports are aggregated per file.

use crate::codegen::{
    body_alias_name, push_banner, push_doc, query_struct_name, response_alias_name, ConvertOptions,
};
use crate::oas::models::{ApiDocument, EntityEnum, EntityModel, EntityStruct, Operation};
use std::collections::BTreeSet;

/// Generates the complete `types.rs` source.
pub fn generate_types(doc: &ApiDocument, options: &ConvertOptions) -> String {
    let mut code = String::new();
    push_banner(&mut code, doc, "Schema types");

    // 1. Aggregate imports across everything the file will contain.
    let mut imports = BTreeSet::new();
    imports.insert("use serde::{Deserialize, Serialize};".to_string());
    for entity in &doc.entities {
        match entity {
            EntityModel::Struct(s) => {
                for field in &s.fields {
                    collect_imports(&field.ty, &mut imports);
                }
            }
            EntityModel::Alias(_, ty) => collect_imports(ty, &mut imports),
            EntityModel::Enum(_) => {}
        }
    }
    for (_, op) in doc.operations() {
        for param in op.query_params() {
            collect_imports(&param.ty, &mut imports);
        }
    }

    for import in imports {
        code.push_str(&import);
        code.push('\n');
    }
    code.push('\n');

    // 2. Entities.
    for entity in &doc.entities {
        match entity {
            EntityModel::Struct(s) => generate_struct(&mut code, s, options),
            EntityModel::Enum(e) => generate_enum(&mut code, e, options),
            EntityModel::Alias(name, ty) => {
                code.push_str(&format!("pub type {} = {};\n", name, ty));
            }
        }
        code.push('\n');
    }

    // 3. Per-operation aliases and query structs.
    for (template, op) in doc.operations() {
        if let Some(response) = &op.response_type {
            push_doc(
                &mut code,
                &format!(
                    "Response payload of `{} {}`.",
                    op.method.verb(),
                    template.path
                ),
                "",
            );
            code.push_str(&format!(
                "pub type {} = {};\n\n",
                response_alias_name(op),
                response
            ));
        }
        if let Some(body) = &op.request_body {
            push_doc(
                &mut code,
                &format!(
                    "Request body of `{} {}`.",
                    op.method.verb(),
                    template.path
                ),
                "",
            );
            code.push_str(&format!("pub type {} = {};\n\n", body_alias_name(op), body.ty));
        }
        if op.query_params().next().is_some() {
            generate_query_struct(&mut code, template.path.as_str(), op, options);
        }
    }

    code
}

fn derive_line(base: &[&str], options: &ConvertOptions) -> String {
    let mut derives: Vec<String> = base.iter().map(|d| d.to_string()).collect();
    for extra in &options.extra_derives {
        if !derives.iter().any(|d| d == extra) {
            derives.push(extra.clone());
        }
    }
    format!("#[derive({})]\n", derives.join(", "))
}

fn generate_struct(code: &mut String, def: &EntityStruct, options: &ConvertOptions) {
    if let Some(desc) = &def.description {
        push_doc(code, desc, "");
    }
    code.push_str(&derive_line(
        &["Debug", "Clone", "Serialize", "Deserialize"],
        options,
    ));
    if options.deny_unknown_fields {
        code.push_str("#[serde(deny_unknown_fields)]\n");
    }
    code.push_str(&format!("pub struct {} {{\n", def.name));

    for field in &def.fields {
        if let Some(desc) = &field.description {
            push_doc(code, desc, "    ");
        }
        let mut attrs = Vec::new();
        if field.rust_name != field.name {
            attrs.push(format!("rename = \"{}\"", field.name));
        }
        if field.ty.starts_with("Option<") {
            attrs.push("skip_serializing_if = \"Option::is_none\"".to_string());
        }
        if !attrs.is_empty() {
            code.push_str(&format!("    #[serde({})]\n", attrs.join(", ")));
        }
        code.push_str(&format!("    pub {}: {},\n", field.rust_name, field.ty));
    }

    code.push_str("}\n");
}

fn generate_enum(code: &mut String, def: &EntityEnum, options: &ConvertOptions) {
    if let Some(desc) = &def.description {
        push_doc(code, desc, "");
    }
    code.push_str(&derive_line(
        &["Debug", "Clone", "Copy", "PartialEq", "Eq", "Serialize", "Deserialize"],
        options,
    ));
    code.push_str(&format!("pub enum {} {{\n", def.name));

    for variant in &def.variants {
        if variant.rust_name != variant.wire {
            code.push_str(&format!("    #[serde(rename = \"{}\")]\n", variant.wire));
        }
        code.push_str(&format!("    {},\n", variant.rust_name));
    }

    code.push_str("}\n");
}

fn generate_query_struct(code: &mut String, path: &str, op: &Operation, options: &ConvertOptions) {
    let name = query_struct_name(op);
    push_doc(
        code,
        &format!(
            "Declared query parameters of `{} {}`.",
            op.method.verb(),
            path
        ),
        "",
    );
    code.push_str(&derive_line(&["Debug", "Clone", "Serialize"], options));
    code.push_str(&format!("pub struct {} {{\n", name));

    for param in op.query_params() {
        if let Some(desc) = &param.description {
            push_doc(code, desc, "    ");
        }
        let rust_name = crate::resolver::field_ident(&param.name);
        if rust_name != param.name {
            code.push_str(&format!("    #[serde(rename = \"{}\")]\n", param.name));
        }
        code.push_str(&format!("    pub {}: {},\n", rust_name, param.ty));
    }
    code.push_str("}\n\n");

    // Pair rendering for the fetch primitive's open query surface.
    code.push_str(&format!("impl {} {{\n", name));
    code.push_str("    /// Renders the declared parameters as query pairs.\n");
    code.push_str("    pub fn to_pairs(&self) -> Vec<(String, String)> {\n");
    code.push_str("        let mut pairs = Vec::new();\n");
    for param in op.query_params() {
        let rust_name = crate::resolver::field_ident(&param.name);
        push_pair_rendering(code, &param.name, &rust_name, &param.ty);
    }
    code.push_str("        pairs\n    }\n}\n\n");
}

fn push_pair_rendering(code: &mut String, wire: &str, rust_name: &str, ty: &str) {
    if let Some(inner) = ty.strip_prefix("Option<").and_then(|t| t.strip_suffix('>')) {
        if inner.starts_with("Vec<") {
            code.push_str(&format!(
                "        if let Some(values) = &self.{} {{\n            for value in values {{\n                pairs.push((\"{}\".to_string(), value.to_string()));\n            }}\n        }}\n",
                rust_name, wire
            ));
        } else {
            code.push_str(&format!(
                "        if let Some(value) = &self.{} {{\n            pairs.push((\"{}\".to_string(), value.to_string()));\n        }}\n",
                rust_name, wire
            ));
        }
    } else if ty.starts_with("Vec<") {
        code.push_str(&format!(
            "        for value in &self.{} {{\n            pairs.push((\"{}\".to_string(), value.to_string()));\n        }}\n",
            rust_name, wire
        ));
    } else {
        code.push_str(&format!(
            "        pairs.push((\"{}\".to_string(), self.{}.to_string()));\n",
            wire, rust_name
        ));
    }
}

fn collect_imports(ty: &str, imports: &mut BTreeSet<String>) {
    if ty.contains("Uuid") {
        imports.insert("use uuid::Uuid;".to_string());
    }
    if ty.contains("DateTime") {
        imports.insert("use chrono::{DateTime, Utc};".to_string());
    }
    if ty.contains("NaiveDate") {
        imports.insert("use chrono::NaiveDate;".to_string());
    }
    if ty.contains("HashMap") {
        imports.insert("use std::collections::HashMap;".to_string());
    }
}
