#![deny(missing_docs)]

//! # Document Shims
//!
//! Generic structures acting as an Intermediate Deserialization Layer.
//! These structs map directly to OpenAPI YAML objects; `parse_document`
//! lowers them into the IR in `models`.

use crate::oas::models::{Method, ALL_METHODS};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// Root document shim (`openapi`, `info`, `paths`, `components`).
#[derive(Debug, Deserialize)]
pub struct ShimDocument {
    /// OpenAPI version (e.g. "3.0.2").
    /// Required in OAS 3.x.
    pub openapi: Option<String>,

    /// Metadata about the API.
    /// Required in OAS 3.x.
    pub info: Option<ShimInfo>,

    /// Path items keyed by path template.
    pub paths: Option<IndexMap<String, ShimPathItem>>,

    /// Components section holding reusable schemas.
    #[serde(default)]
    pub components: Option<ShimComponents>,

    /// Everything else at the root (`servers`, `tags`, extensions).
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// The `info` object.
#[derive(Debug, Deserialize)]
pub struct ShimInfo {
    /// API title.
    pub title: String,
    /// API version.
    pub version: String,
    /// Description, unused by generation but kept for diagnostics.
    pub description: Option<String>,
    /// Remaining info fields.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// Components object holding reusable definitions.
#[derive(Debug, Deserialize, Default)]
pub struct ShimComponents {
    /// Named schemas.
    pub schemas: Option<IndexMap<String, ShimSchema>>,
    /// Other component maps (parameters, responses, ...) kept loosely typed.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// A path item: the fixed verb fields plus path-level parameters.
#[derive(Debug, Deserialize, Default)]
pub struct ShimPathItem {
    /// Path-level summary.
    pub summary: Option<String>,
    /// Path-level description.
    pub description: Option<String>,
    /// Parameters shared by every operation under this path.
    pub parameters: Option<Vec<ShimParameter>>,

    /// `get` operation.
    pub get: Option<ShimOperation>,
    /// `delete` operation.
    pub delete: Option<ShimOperation>,
    /// `head` operation.
    pub head: Option<ShimOperation>,
    /// `options` operation.
    pub options: Option<ShimOperation>,
    /// `post` operation.
    pub post: Option<ShimOperation>,
    /// `put` operation.
    pub put: Option<ShimOperation>,
    /// `patch` operation.
    pub patch: Option<ShimOperation>,
    /// `purge` operation.
    pub purge: Option<ShimOperation>,
    /// `link` operation.
    pub link: Option<ShimOperation>,
    /// `unlink` operation.
    pub unlink: Option<ShimOperation>,

    /// Non-method keys (`servers`, extensions, verbs outside the fixed set).
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl ShimPathItem {
    /// Declared operations, as the intersection of this item's keys with the
    /// fixed verb enumeration, in enumeration order.
    pub fn operations(&self) -> impl Iterator<Item = (Method, &ShimOperation)> {
        ALL_METHODS.into_iter().filter_map(move |method| {
            let op = match method {
                Method::Get => &self.get,
                Method::Delete => &self.delete,
                Method::Head => &self.head,
                Method::Options => &self.options,
                Method::Post => &self.post,
                Method::Put => &self.put,
                Method::Patch => &self.patch,
                Method::Purge => &self.purge,
                Method::Link => &self.link,
                Method::Unlink => &self.unlink,
            };
            op.as_ref().map(|op| (method, op))
        })
    }
}

/// A single operation under a path item.
#[derive(Debug, Deserialize, Default)]
pub struct ShimOperation {
    /// Unique operation identifier.
    #[serde(rename = "operationId")]
    pub operation_id: Option<String>,
    /// Short summary.
    pub summary: Option<String>,
    /// Longer description.
    pub description: Option<String>,
    /// Operation-level parameters.
    pub parameters: Option<Vec<ShimParameter>>,
    /// Request body definition.
    #[serde(rename = "requestBody")]
    pub request_body: Option<ShimRequestBody>,
    /// Responses keyed by status code.
    pub responses: Option<IndexMap<String, ShimResponse>>,
    /// Whether the operation is deprecated.
    #[serde(default)]
    pub deprecated: bool,
    /// Grouping tags.
    pub tags: Option<Vec<String>>,
    /// Extensions and ignored fields.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// A declared parameter.
#[derive(Debug, Deserialize, Clone)]
pub struct ShimParameter {
    /// Parameter name.
    pub name: String,
    /// Location: `path`, `query`, `header` or `cookie`.
    #[serde(rename = "in")]
    pub location: String,
    /// Whether the parameter is mandatory.
    #[serde(default)]
    pub required: bool,
    /// Declared schema.
    pub schema: Option<ShimSchema>,
    /// Description carried into generated doc comments.
    pub description: Option<String>,
    /// Extensions and ignored fields.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// A request body object.
#[derive(Debug, Deserialize, Clone)]
pub struct ShimRequestBody {
    /// Whether the body is mandatory.
    #[serde(default)]
    pub required: bool,
    /// Content keyed by media type.
    pub content: Option<IndexMap<String, ShimMediaType>>,
    /// Description.
    pub description: Option<String>,
}

/// A media type object.
#[derive(Debug, Deserialize, Clone)]
pub struct ShimMediaType {
    /// Declared schema.
    pub schema: Option<ShimSchema>,
    /// Examples and encoding, kept loosely typed.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// A response object.
#[derive(Debug, Deserialize, Clone)]
pub struct ShimResponse {
    /// Description (required by the specification).
    pub description: Option<String>,
    /// Content keyed by media type.
    pub content: Option<IndexMap<String, ShimMediaType>>,
    /// Headers and extensions, kept loosely typed.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// A schema object, covering the subset the generator consumes.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ShimSchema {
    /// `$ref` to a component.
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
    /// Primitive or structural type.
    #[serde(rename = "type")]
    pub schema_type: Option<String>,
    /// Format refinement (`int64`, `date-time`, `binary`, ...).
    pub format: Option<String>,
    /// Bounded literal set.
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<Value>>,
    /// Single-literal constraint (treated as a one-element literal set).
    #[serde(rename = "const")]
    pub const_value: Option<Value>,
    /// Array item schema.
    pub items: Option<Box<ShimSchema>>,
    /// Object properties.
    pub properties: Option<IndexMap<String, ShimSchema>>,
    /// Names of mandatory properties.
    pub required: Option<Vec<String>>,
    /// Composition: merged object schemas.
    #[serde(rename = "allOf")]
    pub all_of: Option<Vec<ShimSchema>>,
    /// Composition: alternatives (lowered to `serde_json::Value`).
    #[serde(rename = "oneOf")]
    pub one_of: Option<Vec<ShimSchema>>,
    /// Composition: open alternatives (lowered to `serde_json::Value`).
    #[serde(rename = "anyOf")]
    pub any_of: Option<Vec<ShimSchema>>,
    /// OAS 3.0 nullability flag.
    #[serde(default)]
    pub nullable: bool,
    /// Content encoding (binary detection).
    #[serde(rename = "contentEncoding")]
    pub content_encoding: Option<String>,
    /// Content media type (binary detection).
    #[serde(rename = "contentMediaType")]
    pub content_media_type: Option<String>,
    /// Description carried into generated doc comments.
    pub description: Option<String>,
    /// Everything else (`additionalProperties`, examples, extensions).
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl ShimSchema {
    /// The literal values this schema pins, when it is literal-like.
    ///
    /// `enum` wins over `const`; values are rendered as path tokens (numbers
    /// and booleans stringified, strings kept as-is).
    pub fn literal_values(&self) -> Option<Vec<String>> {
        if let Some(values) = &self.enum_values {
            return Some(values.iter().map(value_token).collect());
        }
        self.const_value.as_ref().map(|v| vec![value_token(v)])
    }
}

/// Renders a JSON literal the way it would appear as a path token.
fn value_token(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
