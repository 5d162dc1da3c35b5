#![deny(missing_docs)]

//! # Document Parsing
//!
//! Lowers the shim deserialization layer into the `ApiDocument` IR consumed by
//! the path matcher and the wrapper generators.

use crate::error::{AppError, AppResult};
use crate::oas::models::{
    ApiDocument, EntityEnum, EntityField, EntityModel, EntityStruct, EntityVariant, Method,
    Operation, OperationParam, ParamSource, ParamWidening, PathTemplate, RequestBodyDefinition,
    TemplateParam,
};
use crate::oas::shims::{
    ShimDocument, ShimOperation, ShimParameter, ShimPathItem, ShimSchema,
};
use crate::resolver::{entity_ident, field_ident, map_schema_to_rust_type};
use heck::{ToSnakeCase, ToUpperCamelCase};
use indexmap::IndexMap;
use log::{debug, warn};
use regex::Regex;
use std::collections::HashSet;

/// Media type whose presence makes a body or response typed.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Parses an OpenAPI document (YAML or JSON text) into the IR.
///
/// The root must declare `openapi: 3.x`, carry `info` and have a `paths`
/// object. Method keys under each path item are intersected with the fixed
/// verb enumeration during shim iteration; other keys are ignored.
pub fn parse_document(text: &str) -> AppResult<ApiDocument> {
    let shim: ShimDocument = serde_yaml::from_str(text)
        .map_err(|e| AppError::Parse(format!("invalid OpenAPI document: {}", e)))?;

    let version = shim
        .openapi
        .as_deref()
        .ok_or_else(|| AppError::Parse("document missing required 'openapi' version".into()))?;
    if !version.starts_with('3') {
        return Err(AppError::Parse(format!(
            "unsupported OpenAPI version '{}' (expected 3.x)",
            version
        )));
    }

    let info = shim
        .info
        .as_ref()
        .ok_or_else(|| AppError::Parse("document missing required 'info' object".into()))?;

    let paths = shim
        .paths
        .as_ref()
        .ok_or_else(|| AppError::Parse("document missing required 'paths' object".into()))?;

    let schemas = shim
        .components
        .as_ref()
        .and_then(|c| c.schemas.as_ref());

    let entities = match schemas {
        Some(map) => lower_entities(map),
        None => Vec::new(),
    };

    let placeholder_re = Regex::new(r"\{([^}]*)}")
        .map_err(|e| AppError::General(format!("invalid placeholder pattern: {}", e)))?;

    let mut templates = Vec::new();
    let mut operation_index = IndexMap::new();
    let mut seen_operation_ids = HashSet::new();

    for (path, item) in paths {
        if !path.starts_with('/') {
            warn!("path template '{}' does not start with '/'", path);
        }
        let template = lower_path_item(path, item, &placeholder_re)?;

        for op in &template.operations {
            if let Some(op_id) = operation_id_of(item, op.method) {
                if !seen_operation_ids.insert(op_id.to_string()) {
                    return Err(AppError::Parse(format!(
                        "duplicate operationId '{}' detected",
                        op_id
                    )));
                }
                operation_index.insert(op_id.to_string(), path.clone());
            }
        }

        templates.push(template);
    }

    Ok(ApiDocument {
        title: info.title.clone(),
        version: info.version.clone(),
        templates,
        entities,
        operation_index,
    })
}

fn operation_id_of(item: &ShimPathItem, method: Method) -> Option<&str> {
    item.operations()
        .find(|(m, _)| *m == method)
        .and_then(|(_, op)| op.operation_id.as_deref())
}

fn lower_path_item(
    path: &str,
    item: &ShimPathItem,
    placeholder_re: &Regex,
) -> AppResult<PathTemplate> {
    // 1. Placeholders: unique within one template, valid identifiers.
    let mut placeholders = Vec::new();
    let mut seen = HashSet::new();
    for cap in placeholder_re.captures_iter(path) {
        let name = cap[1].to_string();
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(AppError::Template(format!(
                "path template '{}' has malformed placeholder '{{{}}}'",
                path, name
            )));
        }
        if !seen.insert(name.clone()) {
            return Err(AppError::Template(format!(
                "path template '{}' contains duplicate placeholder '{}'",
                path, name
            )));
        }
        placeholders.push(name);
    }

    let common_params = item.parameters.as_deref().unwrap_or(&[]);

    // 2. A declared path parameter must name a placeholder.
    let all_shim_params = || {
        common_params.iter().chain(
            item.operations()
                .flat_map(|(_, op)| op.parameters.as_deref().unwrap_or(&[]).iter()),
        )
    };
    for param in all_shim_params().filter(|p| p.location == "path") {
        if !placeholders.contains(&param.name) {
            return Err(AppError::Template(format!(
                "path parameter '{}' is not present in path template '{}'",
                param.name, path
            )));
        }
    }

    // 3. Placeholder widenings from declared schemas; undeclared placeholders
    //    degrade to the any-token wildcard.
    let mut params = Vec::new();
    for name in &placeholders {
        let declared = all_shim_params().find(|p| p.location == "path" && p.name == *name);
        let (widening, ty) = match declared.and_then(|p| p.schema.as_ref()) {
            Some(schema) => (widening_of(schema), map_schema_to_rust_type(schema, true)),
            None => {
                debug!(
                    "placeholder '{{{}}}' in '{}' has no declared parameter schema",
                    name, path
                );
                (ParamWidening::Any, "String".to_string())
            }
        };
        params.push(TemplateParam {
            name: name.clone(),
            widening,
            ty,
        });
    }

    // 4. Operations: the intersection of this item's keys with the verb set.
    let mut operations = Vec::new();
    for (method, op) in item.operations() {
        operations.push(lower_operation(path, method, op, common_params)?);
    }

    Ok(PathTemplate {
        path: path.to_string(),
        params,
        operations,
    })
}

/// Derives the placeholder widening from a declared parameter schema.
///
/// Bounded literal sets keep their members; numeric primitives keep their
/// numeric shape; open strings (and everything else) accept any token.
fn widening_of(schema: &ShimSchema) -> ParamWidening {
    if let Some(values) = schema.literal_values() {
        return ParamWidening::Choice(values);
    }
    match schema.schema_type.as_deref() {
        Some("integer") | Some("number") => ParamWidening::Numeric,
        _ => ParamWidening::Any,
    }
}

fn lower_operation(
    path: &str,
    method: Method,
    op: &ShimOperation,
    common_params: &[ShimParameter],
) -> AppResult<Operation> {
    // 1. Wrapper name
    let handler_name = match &op.operation_id {
        Some(op_id) => op_id.to_snake_case(),
        None => derive_handler_name(method, path),
    };

    // 2. Parameters; operation-level declarations take precedence.
    let mut params = Vec::new();
    let mut seen = HashSet::new();
    let op_params = op.parameters.as_deref().unwrap_or(&[]);
    for shim in op_params.iter().chain(common_params.iter()) {
        if !seen.insert((shim.name.clone(), shim.location.clone())) {
            continue;
        }
        let Some(source) = ParamSource::from_location(&shim.location) else {
            warn!(
                "operation '{}' parameter '{}' has unknown location '{}'",
                handler_name, shim.name, shim.location
            );
            continue;
        };
        let required = shim.required || source == ParamSource::Path;
        let ty = match &shim.schema {
            Some(schema) => map_schema_to_rust_type(schema, required),
            None => "String".to_string(),
        };
        params.push(OperationParam {
            name: shim.name.clone(),
            source,
            ty,
            required,
            description: shim.description.clone(),
        });
    }

    // 3. Request body: typed only for declared JSON content.
    let request_body = op.request_body.as_ref().and_then(|body| {
        let schema = body
            .content
            .as_ref()
            .and_then(|content| content.get(JSON_MEDIA_TYPE))
            .and_then(|media| media.schema.as_ref());
        match schema {
            Some(schema) => Some(RequestBodyDefinition {
                ty: map_schema_to_rust_type(schema, true),
                required: body.required,
            }),
            None => {
                debug!(
                    "operation '{}' declares a non-JSON request body; wrapper takes none",
                    handler_name
                );
                None
            }
        }
    });

    // 4. Response: strictly the 200 response's JSON content.
    let response_type = op
        .responses
        .as_ref()
        .and_then(|responses| responses.get("200"))
        .and_then(|response| response.content.as_ref())
        .and_then(|content| content.get(JSON_MEDIA_TYPE))
        .and_then(|media| media.schema.as_ref())
        .map(|schema| map_schema_to_rust_type(schema, true));

    Ok(Operation {
        method,
        handler_name,
        params,
        request_body,
        response_type,
        summary: op.summary.clone(),
        deprecated: op.deprecated,
    })
}

/// Derives a wrapper name from the HTTP method and URL path when
/// `operationId` is missing.
///
/// e.g. `get /pet/{petId}` -> `get_pet_pet_id`
fn derive_handler_name(method: Method, path: &str) -> String {
    let clean_path = path.replace(['{', '}'], "").replace('/', "_");
    format!("{}_{}", method.key(), clean_path.trim_matches('_')).to_snake_case()
}

fn lower_entities(schemas: &IndexMap<String, ShimSchema>) -> Vec<EntityModel> {
    let mut entities = Vec::new();
    for (name, schema) in schemas {
        entities.push(lower_entity(name, schema, schemas));
    }
    entities
}

fn lower_entity(
    name: &str,
    schema: &ShimSchema,
    schemas: &IndexMap<String, ShimSchema>,
) -> EntityModel {
    let ident = entity_ident(name);

    if let Some(values) = &schema.enum_values {
        if let Some(variants) = string_enum_variants(values) {
            return EntityModel::Enum(EntityEnum {
                name: ident,
                description: schema.description.clone(),
                variants,
            });
        }
        debug!("schema '{}' has a non-string enum; kept as alias", name);
        return EntityModel::Alias(ident, map_schema_to_rust_type(schema, true));
    }

    let is_object = schema.properties.is_some()
        || schema.all_of.is_some()
        || schema.schema_type.as_deref() == Some("object");
    if is_object {
        let mut fields = Vec::new();
        let mut visited = HashSet::new();
        visited.insert(name.to_string());
        collect_fields(schema, schemas, &mut fields, &mut visited);
        if !fields.is_empty() {
            return EntityModel::Struct(EntityStruct {
                name: ident,
                description: schema.description.clone(),
                fields,
            });
        }
        // An object with no resolvable properties stays an open JSON value.
        return EntityModel::Alias(ident, "serde_json::Value".to_string());
    }

    EntityModel::Alias(ident, map_schema_to_rust_type(schema, true))
}

fn string_enum_variants(values: &[serde_json::Value]) -> Option<Vec<EntityVariant>> {
    let mut variants = Vec::new();
    for (i, value) in values.iter().enumerate() {
        let wire = value.as_str()?.to_string();
        let mut rust_name = wire.to_upper_camel_case();
        if rust_name.is_empty() {
            rust_name = format!("Value{}", i);
        }
        variants.push(EntityVariant { rust_name, wire });
    }
    Some(variants)
}

/// Collects struct fields, merging `allOf` composition (inline objects plus
/// resolvable component refs). `visited` guards against reference cycles.
fn collect_fields(
    schema: &ShimSchema,
    schemas: &IndexMap<String, ShimSchema>,
    fields: &mut Vec<EntityField>,
    visited: &mut HashSet<String>,
) {
    if let Some(subs) = &schema.all_of {
        for sub in subs {
            if let Some(reference) = &sub.reference {
                let component = crate::resolver::component_name(reference);
                if !visited.insert(component.to_string()) {
                    warn!("allOf reference cycle through '{}'; skipped", component);
                    continue;
                }
                match schemas.get(component) {
                    Some(resolved) => collect_fields(resolved, schemas, fields, visited),
                    None => warn!(
                        "allOf references unknown component '{}'; skipped",
                        component
                    ),
                }
            } else {
                collect_fields(sub, schemas, fields, visited);
            }
        }
    }

    let Some(properties) = &schema.properties else {
        return;
    };
    let required = schema.required.as_deref().unwrap_or(&[]);
    for (prop_name, prop_schema) in properties {
        if fields.iter().any(|f| f.name == *prop_name) {
            continue;
        }
        let is_required = required.iter().any(|r| r == prop_name);
        fields.push(EntityField {
            name: prop_name.clone(),
            rust_name: field_ident(prop_name),
            ty: map_schema_to_rust_type(prop_schema, is_required),
            description: prop_schema.description.clone(),
        });
    }
}
