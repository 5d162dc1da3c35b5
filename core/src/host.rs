#![deny(missing_docs)]

//! # Host Registration
//!
//! The seam between the generator and the host build pipeline: a trait for
//! registering generated files, global bindings and module aliases, and the
//! `setup` routine that drives the full pipeline against it. Registration
//! goes through an explicit context object; nothing global is mutated.

use crate::codegen::server::SERVER_ALIAS;
use crate::codegen::{client, entities, server, watch, ConvertOptions};
use crate::error::AppResult;
use crate::matcher::PathIndex;
use crate::oas::document::parse_document;
use crate::source::SchemaSource;
use log::info;

/// Directory name the host is expected to mount generated files under.
pub const GENERATED_DIR: &str = "typed_api";

/// Host capabilities the generator registers its output with.
pub trait HostContext {
    /// Registers a generated source file for compilation.
    fn register_file(&mut self, name: &str, contents: String) -> AppResult<()>;

    /// Registers a globally importable binding exported by a generated file.
    fn register_binding(&mut self, name: &str, file: &str) -> AppResult<()>;

    /// Registers a module alias reachable from server-side code.
    fn register_alias(&mut self, alias: &str, file: &str) -> AppResult<()>;
}

/// Recognized module configuration.
#[derive(Debug)]
pub struct ModuleOptions {
    /// Where the OpenAPI document comes from.
    pub src: SchemaSource,
    /// Whether to emit and bind the reactive calling convention.
    pub watch_client: bool,
    /// Whether to emit the server-side utility module and its alias.
    pub server_utils: bool,
    /// Pass-through options for schema-to-type conversion.
    pub convert: ConvertOptions,
}

impl ModuleOptions {
    /// Options with the default toggles (both surfaces enabled).
    pub fn new(src: SchemaSource) -> ModuleOptions {
        ModuleOptions {
            src,
            watch_client: true,
            server_utils: true,
            convert: ConvertOptions::default(),
        }
    }
}

/// Loads, parses, indexes and generates, registering everything with the host.
pub fn setup(options: ModuleOptions, ctx: &mut dyn HostContext) -> AppResult<()> {
    let text = options.src.load()?;
    let doc = parse_document(&text)?;

    // Exactify every template once so overlapping declarations get reported
    // before the wrappers referencing them are emitted.
    PathIndex::build(&doc);

    ctx.register_file("types.rs", entities::generate_types(&doc, &options.convert))?;
    for entity in &doc.entities {
        ctx.register_binding(entity.name(), "types.rs")?;
    }

    ctx.register_file("client.rs", client::generate_client(&doc))?;
    ctx.register_binding("Client", "client.rs")?;

    if options.watch_client {
        ctx.register_file("watch.rs", watch::generate_watch(&doc))?;
        ctx.register_binding("WatchClient", "watch.rs")?;
    }

    if options.server_utils {
        ctx.register_file("server.rs", server::generate_server(&doc))?;
        ctx.register_alias(SERVER_ALIAS, "server.rs")?;
    }

    let wrapper_count = doc.operations().count();
    info!(
        "registered {} wrappers across {} path templates for '{}'",
        wrapper_count,
        doc.templates.len(),
        doc.title
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Default)]
    struct RecordingHost {
        files: Vec<String>,
        bindings: Vec<(String, String)>,
        aliases: Vec<(String, String)>,
    }

    impl HostContext for RecordingHost {
        fn register_file(&mut self, name: &str, _contents: String) -> AppResult<()> {
            self.files.push(name.to_string());
            Ok(())
        }

        fn register_binding(&mut self, name: &str, file: &str) -> AppResult<()> {
            self.bindings.push((name.to_string(), file.to_string()));
            Ok(())
        }

        fn register_alias(&mut self, alias: &str, file: &str) -> AppResult<()> {
            self.aliases.push((alias.to_string(), file.to_string()));
            Ok(())
        }
    }

    fn inline_fixture() -> SchemaSource {
        SchemaSource::Inline(json!({
            "openapi": "3.0.2",
            "info": { "title": "fixture", "version": "1" },
            "paths": {
                "/pet": {
                    "post": {
                        "operationId": "addPet",
                        "responses": { "200": { "description": "ok" } }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Pet": {
                        "type": "object",
                        "properties": { "name": { "type": "string" } }
                    }
                }
            }
        }))
    }

    #[test]
    fn test_setup_registers_all_surfaces() {
        let mut host = RecordingHost::default();
        setup(ModuleOptions::new(inline_fixture()), &mut host).unwrap();

        assert_eq!(
            host.files,
            vec!["types.rs", "client.rs", "watch.rs", "server.rs"]
        );
        assert!(host
            .bindings
            .contains(&("Client".to_string(), "client.rs".to_string())));
        assert!(host
            .bindings
            .contains(&("WatchClient".to_string(), "watch.rs".to_string())));
        assert!(host
            .bindings
            .contains(&("Pet".to_string(), "types.rs".to_string())));
        assert_eq!(
            host.aliases,
            vec![(SERVER_ALIAS.to_string(), "server.rs".to_string())]
        );
    }

    #[test]
    fn test_setup_toggles_disable_surfaces() {
        let mut host = RecordingHost::default();
        let mut options = ModuleOptions::new(inline_fixture());
        options.watch_client = false;
        options.server_utils = false;
        setup(options, &mut host).unwrap();

        assert_eq!(host.files, vec!["types.rs", "client.rs"]);
        assert!(host.aliases.is_empty());
        assert!(!host.bindings.iter().any(|(name, _)| name == "WatchClient"));
    }

    #[test]
    fn test_setup_propagates_parse_errors() {
        let mut host = RecordingHost::default();
        let options = ModuleOptions::new(SchemaSource::Inline(json!({ "openapi": "2.0" })));
        assert!(setup(options, &mut host).is_err());
        assert!(host.files.is_empty());
    }
}
