#![deny(missing_docs)]

//! # Resolve Command
//!
//! Resolves a concrete path against a document's declared templates and
//! prints the compatible set, method sets, and per-method operation types.

use crate::error::{CliError, CliResult};
use clap::Args;
use typed_openapi_core::oas::models::ParamSource;
use typed_openapi_core::{parse_document, Method, PathIndex, SchemaSource};

/// Arguments for `typed-openapi resolve`.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Schema source: a file path, an http(s) URL, or `-` for stdin.
    #[clap(long, env = "TYPED_OPENAPI_SRC")]
    pub src: String,

    /// Concrete path to resolve (substituted literal or bracketed template).
    pub path: String,

    /// Also show the operation declared for this method.
    #[clap(long)]
    pub method: Option<String>,
}

/// Runs the resolve command.
pub fn execute(args: &ResolveArgs) -> CliResult<()> {
    let text = SchemaSource::from_arg(&args.src)
        .and_then(SchemaSource::load)
        .map_err(CliError::Core)?;
    let doc = parse_document(&text).map_err(CliError::Core)?;

    let report = render(&doc, &args.path, args.method.as_deref())?;
    println!("{}", report);
    Ok(())
}

/// Renders the resolution report, or fails when nothing matches.
fn render(
    doc: &typed_openapi_core::ApiDocument,
    concrete: &str,
    method: Option<&str>,
) -> CliResult<String> {
    let index = PathIndex::build(doc);
    let matches = index.resolve(concrete);
    if matches.is_empty() {
        return Err(CliError::General(format!(
            "no declared path template matches '{}'",
            concrete
        )));
    }

    let method = match method {
        Some(key) => Some(
            Method::from_key(key)
                .ok_or_else(|| CliError::General(format!("unknown method '{}'", key)))?,
        ),
        None => None,
    };

    let mut out = String::new();
    for template in matches {
        out.push_str(&format!("{}\n", template.path));
        let methods: Vec<&str> = template.methods().iter().map(|m| m.key()).collect();
        out.push_str(&format!("  methods: {}\n", methods.join(", ")));

        let Some(method) = method else {
            continue;
        };
        let Some(op) = template.operation(method) else {
            return Err(CliError::General(format!(
                "method '{}' is not declared for '{}'",
                method, template.path
            )));
        };

        out.push_str(&format!("  operation: {}\n", op.handler_name));
        for param in &op.params {
            let source = match param.source {
                ParamSource::Path => "path",
                ParamSource::Query => "query",
                ParamSource::Header => "header",
                ParamSource::Cookie => "cookie",
            };
            out.push_str(&format!("    {} {}: {}\n", source, param.name, param.ty));
        }
        if let Some(body) = &op.request_body {
            let requirement = if body.required { "required" } else { "optional" };
            out.push_str(&format!("    body: {} ({})\n", body.ty, requirement));
        }
        out.push_str(&format!(
            "    response: {}\n",
            op.response_type.as_deref().unwrap_or("()")
        ));
    }
    Ok(out)
}
