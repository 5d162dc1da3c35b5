#![deny(missing_docs)]

//! # Type Mapping
//!
//! Logic for mapping OpenAPI Schema definitions to Rust type strings.
//!
//! Covers the format registry cases the generator emits:
//! - `format: int64` -> `i64`
//! - `format: float` / `double` -> `f32` / `f64`
//! - `format: uuid` -> `Uuid`
//! - `format: date-time` / `date` -> `DateTime<Utc>` / `NaiveDate`
//! - binary content -> `Vec<u8>`

use crate::oas::shims::ShimSchema;
use heck::{ToSnakeCase, ToUpperCamelCase};

/// Maps an OpenAPI Schema definition to a Rust type string.
///
/// # Arguments
///
/// * `schema` - The schema definition.
/// * `is_required` - Whether the value is mandatory (wraps in `Option` if false).
pub fn map_schema_to_rust_type(schema: &ShimSchema, is_required: bool) -> String {
    let type_str = base_type(schema);

    if is_required && !schema.nullable {
        type_str
    } else {
        format!("Option<{}>", type_str)
    }
}

fn base_type(schema: &ShimSchema) -> String {
    if let Some(reference) = &schema.reference {
        return entity_ident(component_name(reference));
    }

    if is_binary_schema(schema) {
        return "Vec<u8>".to_string();
    }

    // Polymorphic schemas map to generic JSON values; a discriminator
    // strategy is not modeled at the parameter/body level.
    if schema.one_of.is_some() || schema.any_of.is_some() || schema.all_of.is_some() {
        return "serde_json::Value".to_string();
    }

    match schema.schema_type.as_deref() {
        Some("integer") => match schema.format.as_deref() {
            Some("int64") => "i64".to_string(),
            _ => "i32".to_string(),
        },
        Some("number") => match schema.format.as_deref() {
            Some("float") => "f32".to_string(),
            // Default for number without format is f64 in Rust
            _ => "f64".to_string(),
        },
        Some("boolean") => "bool".to_string(),
        Some("string") => match schema.format.as_deref() {
            Some("uuid") => "Uuid".to_string(),
            Some("date-time") => "DateTime<Utc>".to_string(),
            Some("date") => "NaiveDate".to_string(),
            _ => "String".to_string(),
        },
        Some("array") => match &schema.items {
            Some(items) => format!("Vec<{}>", map_schema_to_rust_type(items, true)),
            None => "Vec<serde_json::Value>".to_string(),
        },
        _ => "serde_json::Value".to_string(),
    }
}

fn is_binary_schema(schema: &ShimSchema) -> bool {
    if matches!(schema.format.as_deref(), Some("binary") | Some("byte")) {
        return true;
    }

    if let Some(encoding) = schema.content_encoding.as_deref() {
        return matches!(encoding, "base64" | "base64url");
    }

    let Some(media) = schema.content_media_type.as_deref() else {
        return false;
    };

    media == "application/octet-stream"
        || media == "application/pdf"
        || media.starts_with("image/")
        || media.starts_with("audio/")
        || media.starts_with("video/")
}

/// Extracts the component name from a `$ref` location.
pub fn component_name(reference: &str) -> &str {
    reference.rsplit('/').next().unwrap_or(reference)
}

/// Normalizes a component name to a Rust type identifier.
pub fn entity_ident(name: &str) -> String {
    name.to_upper_camel_case()
}

/// Rust keywords that cannot be used as raw field or argument identifiers.
const RESERVED: &[&str] = &[
    "as", "async", "await", "box", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while",
];

/// Normalizes a wire name to a snake_case Rust identifier, dodging keywords.
pub fn field_ident(name: &str) -> String {
    let snake = name.to_snake_case();
    if RESERVED.contains(&snake.as_str()) {
        format!("{}_", snake)
    } else {
        snake
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(yaml: &str) -> ShimSchema {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_map_primitives() {
        assert_eq!(
            map_schema_to_rust_type(&schema("{ type: integer, format: int32 }"), true),
            "i32"
        );
        assert_eq!(
            map_schema_to_rust_type(&schema("{ type: integer, format: int64 }"), true),
            "i64"
        );
        assert_eq!(
            map_schema_to_rust_type(&schema("{ type: boolean }"), true),
            "bool"
        );
    }

    #[test]
    fn test_map_floats_registry() {
        assert_eq!(
            map_schema_to_rust_type(&schema("{ type: number, format: float }"), true),
            "f32"
        );
        assert_eq!(
            map_schema_to_rust_type(&schema("{ type: number, format: double }"), true),
            "f64"
        );
        assert_eq!(
            map_schema_to_rust_type(&schema("{ type: number }"), true),
            "f64"
        );
    }

    #[test]
    fn test_map_strings_registry() {
        assert_eq!(
            map_schema_to_rust_type(&schema("{ type: string }"), true),
            "String"
        );
        assert_eq!(
            map_schema_to_rust_type(&schema("{ type: string, format: uuid }"), true),
            "Uuid"
        );
        assert_eq!(
            map_schema_to_rust_type(&schema("{ type: string, format: date-time }"), true),
            "DateTime<Utc>"
        );
    }

    #[test]
    fn test_map_binary_variants() {
        assert_eq!(
            map_schema_to_rust_type(&schema("{ type: string, format: binary }"), true),
            "Vec<u8>"
        );
        assert_eq!(
            map_schema_to_rust_type(
                &schema("{ type: string, contentEncoding: base64 }"),
                true
            ),
            "Vec<u8>"
        );
        assert_eq!(
            map_schema_to_rust_type(
                &schema("{ type: string, contentMediaType: image/png }"),
                true
            ),
            "Vec<u8>"
        );
        // Text media types stay strings.
        assert_eq!(
            map_schema_to_rust_type(
                &schema("{ type: string, contentMediaType: text/plain }"),
                true
            ),
            "String"
        );
    }

    #[test]
    fn test_map_arrays_and_refs() {
        assert_eq!(
            map_schema_to_rust_type(
                &schema("{ type: array, items: { $ref: '#/components/schemas/Pet' } }"),
                true
            ),
            "Vec<Pet>"
        );
        assert_eq!(
            map_schema_to_rust_type(&schema("{ $ref: '#/components/schemas/Order' }"), true),
            "Order"
        );
        assert_eq!(
            map_schema_to_rust_type(&schema("{ type: array }"), true),
            "Vec<serde_json::Value>"
        );
    }

    #[test]
    fn test_optional_and_nullable_wrapping() {
        assert_eq!(
            map_schema_to_rust_type(&schema("{ type: string }"), false),
            "Option<String>"
        );
        assert_eq!(
            map_schema_to_rust_type(&schema("{ type: string, nullable: true }"), true),
            "Option<String>"
        );
    }

    #[test]
    fn test_polymorphic_fallback() {
        assert_eq!(
            map_schema_to_rust_type(
                &schema("{ oneOf: [{ type: string }, { type: integer }] }"),
                true
            ),
            "serde_json::Value"
        );
    }

    #[test]
    fn test_identifier_helpers() {
        assert_eq!(entity_ident("pet_response"), "PetResponse");
        assert_eq!(entity_ident("Pet"), "Pet");
        assert_eq!(field_ident("shipDate"), "ship_date");
        assert_eq!(field_ident("type"), "type_");
    }
}
