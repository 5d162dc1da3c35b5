#![deny(missing_docs)]

//! # OpenAPI Models
//!
//! definition of Intermediate Representation (IR) structures for parsed OpenAPI elements.
//!
//! These structs transport parsed data from the YAML document into the path
//! matcher and the wrapper generators.

use indexmap::IndexMap;
use std::fmt;

/// The fixed HTTP verb enumeration recognized on path items.
///
/// Keys declared under a path template are intersected with this set; anything
/// else (`parameters`, `summary`, extensions) is not an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `get`
    Get,
    /// `delete`
    Delete,
    /// `head`
    Head,
    /// `options`
    Options,
    /// `post`
    Post,
    /// `put`
    Put,
    /// `patch`
    Patch,
    /// `purge`
    Purge,
    /// `link`
    Link,
    /// `unlink`
    Unlink,
}

/// All members of the verb enumeration, in declaration order.
pub const ALL_METHODS: [Method; 10] = [
    Method::Get,
    Method::Delete,
    Method::Head,
    Method::Options,
    Method::Post,
    Method::Put,
    Method::Patch,
    Method::Purge,
    Method::Link,
    Method::Unlink,
];

impl Method {
    /// The lowercase key used for this method in OpenAPI path items.
    pub fn key(&self) -> &'static str {
        match self {
            Method::Get => "get",
            Method::Delete => "delete",
            Method::Head => "head",
            Method::Options => "options",
            Method::Post => "post",
            Method::Put => "put",
            Method::Patch => "patch",
            Method::Purge => "purge",
            Method::Link => "link",
            Method::Unlink => "unlink",
        }
    }

    /// The uppercase HTTP verb sent on the wire.
    pub fn verb(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Purge => "PURGE",
            Method::Link => "LINK",
            Method::Unlink => "UNLINK",
        }
    }

    /// The variant name used when the method appears in generated source.
    pub fn variant(&self) -> &'static str {
        match self {
            Method::Get => "Get",
            Method::Delete => "Delete",
            Method::Head => "Head",
            Method::Options => "Options",
            Method::Post => "Post",
            Method::Put => "Put",
            Method::Patch => "Patch",
            Method::Purge => "Purge",
            Method::Link => "Link",
            Method::Unlink => "Unlink",
        }
    }

    /// Looks up a method by its lowercase path item key.
    pub fn from_key(key: &str) -> Option<Method> {
        ALL_METHODS.into_iter().find(|m| m.key() == key)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// How a placeholder widens during exactification.
///
/// Derived from the declared parameter schema: a literal-like schema keeps its
/// literal values, a numeric primitive keeps its numeric shape, anything else
/// degrades to the any-token wildcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamWidening {
    /// A bounded literal set (`enum`, or `const` as a one-element set).
    Choice(Vec<String>),
    /// A numeric primitive (`integer` or `number`).
    Numeric,
    /// Any string-or-number token.
    Any,
}

/// A `{name}` placeholder declared by a path template.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateParam {
    /// Placeholder name as written in the template.
    pub name: String,
    /// Widening applied during exactification.
    pub widening: ParamWidening,
    /// Rust type of the substituted value in generated wrappers.
    pub ty: String,
}

/// The source location of a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamSource {
    /// Path.
    Path,
    /// Query.
    Query,
    /// Header.
    Header,
    /// Cookie.
    Cookie,
}

impl ParamSource {
    /// Parses the OpenAPI `in` field.
    pub fn from_location(loc: &str) -> Option<ParamSource> {
        match loc {
            "path" => Some(ParamSource::Path),
            "query" => Some(ParamSource::Query),
            "header" => Some(ParamSource::Header),
            "cookie" => Some(ParamSource::Cookie),
            _ => None,
        }
    }
}

/// Represents a parameter declared on an operation.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationParam {
    /// Parameter name in the document.
    pub name: String,
    /// Location.
    pub source: ParamSource,
    /// Rust type.
    pub ty: String,
    /// Whether the parameter is mandatory.
    pub required: bool,
    /// Description carried into generated doc comments.
    pub description: Option<String>,
}

/// Definition of a JSON request body.
///
/// Only present when the operation declares `application/json` content; any
/// other media type leaves the operation without a body.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestBodyDefinition {
    /// The Rust type name (e.g. "Order").
    pub ty: String,
    /// Whether the body is mandatory.
    pub required: bool,
}

/// A parsed (path template, method) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    /// HTTP method.
    pub method: Method,
    /// Rust wrapper name, snake_case of `operationId` or derived from method + path.
    pub handler_name: String,
    /// Parameters (path and query; header/cookie are parsed but not wrapped).
    pub params: Vec<OperationParam>,
    /// JSON request body, when declared.
    pub request_body: Option<RequestBodyDefinition>,
    /// Rust type of the `200` response's `application/json` content.
    /// Any other status or media type yields `None` (the unit type).
    pub response_type: Option<String>,
    /// Operation summary carried into generated doc comments.
    pub summary: Option<String>,
    /// Whether the operation is deprecated.
    pub deprecated: bool,
}

impl Operation {
    /// Path parameters in declaration order.
    pub fn path_params(&self) -> impl Iterator<Item = &OperationParam> {
        self.params.iter().filter(|p| p.source == ParamSource::Path)
    }

    /// Query parameters in declaration order.
    pub fn query_params(&self) -> impl Iterator<Item = &OperationParam> {
        self.params
            .iter()
            .filter(|p| p.source == ParamSource::Query)
    }
}

/// A declared route pattern, possibly parameterized.
#[derive(Debug, Clone, PartialEq)]
pub struct PathTemplate {
    /// The template string as declared (e.g. `/pet/{petId}`).
    pub path: String,
    /// Placeholders with their widenings, in order of appearance.
    pub params: Vec<TemplateParam>,
    /// Operations declared under this template.
    pub operations: Vec<Operation>,
}

impl PathTemplate {
    /// The method set declared for this template.
    pub fn methods(&self) -> Vec<Method> {
        self.operations.iter().map(|op| op.method).collect()
    }

    /// Looks up the operation for one method.
    pub fn operation(&self, method: Method) -> Option<&Operation> {
        self.operations.iter().find(|op| op.method == method)
    }

    /// Looks up a placeholder widening by name.
    pub fn param(&self, name: &str) -> Option<&TemplateParam> {
        self.params.iter().find(|p| p.name == name)
    }
}

/// A named field of a generated entity struct.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityField {
    /// Wire name from the document.
    pub name: String,
    /// Rust field identifier (snake_case, keyword-safe).
    pub rust_name: String,
    /// Rust type.
    pub ty: String,
    /// Description carried into generated doc comments.
    pub description: Option<String>,
}

/// A `components.schemas` entry that becomes a Rust struct.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityStruct {
    /// Rust type name.
    pub name: String,
    /// Description carried into generated doc comments.
    pub description: Option<String>,
    /// Fields in declaration order.
    pub fields: Vec<EntityField>,
}

/// A variant of a generated string enum.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityVariant {
    /// Rust variant identifier.
    pub rust_name: String,
    /// Wire value from the document.
    pub wire: String,
}

/// A `components.schemas` string enum that becomes a Rust enum.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityEnum {
    /// Rust type name.
    pub name: String,
    /// Description carried into generated doc comments.
    pub description: Option<String>,
    /// Variants in declaration order.
    pub variants: Vec<EntityVariant>,
}

/// A named schema lowered for code generation.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityModel {
    /// An object schema.
    Struct(EntityStruct),
    /// A string enum schema.
    Enum(EntityEnum),
    /// A primitive or array schema, kept as a type alias.
    Alias(String, String),
}

impl EntityModel {
    /// The Rust name this entity binds.
    pub fn name(&self) -> &str {
        match self {
            EntityModel::Struct(s) => &s.name,
            EntityModel::Enum(e) => &e.name,
            EntityModel::Alias(name, _) => name,
        }
    }
}

/// The parsed document: the converter's `paths`, `components.schemas` and
/// `operations` members, lowered to IR.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiDocument {
    /// Document title from `info`.
    pub title: String,
    /// Document version from `info`.
    pub version: String,
    /// Path templates in declaration order.
    pub templates: Vec<PathTemplate>,
    /// Named schemas lowered for generation, in declaration order.
    pub entities: Vec<EntityModel>,
    /// `operationId` -> owning path template.
    pub operation_index: IndexMap<String, String>,
}

impl ApiDocument {
    /// Looks up a template by its declared path string.
    pub fn template(&self, path: &str) -> Option<&PathTemplate> {
        self.templates.iter().find(|t| t.path == path)
    }

    /// All operations across all templates, with their owning template.
    pub fn operations(&self) -> impl Iterator<Item = (&PathTemplate, &Operation)> {
        self.templates
            .iter()
            .flat_map(|t| t.operations.iter().map(move |op| (t, op)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_keys_round_trip() {
        for method in ALL_METHODS {
            assert_eq!(Method::from_key(method.key()), Some(method));
        }
        assert_eq!(Method::from_key("parameters"), None);
        assert_eq!(Method::from_key("trace"), None);
    }

    #[test]
    fn test_method_verb_casing() {
        assert_eq!(Method::Get.verb(), "GET");
        assert_eq!(Method::Unlink.verb(), "UNLINK");
        assert_eq!(Method::Purge.key(), "purge");
    }

    #[test]
    fn test_param_source_locations() {
        assert_eq!(ParamSource::from_location("path"), Some(ParamSource::Path));
        assert_eq!(
            ParamSource::from_location("query"),
            Some(ParamSource::Query)
        );
        assert_eq!(ParamSource::from_location("body"), None);
    }
}
