#![deny(missing_docs)]

//! # Generate Command
//!
//! Drives the setup pipeline against a directory-backed host context: every
//! registered file lands under the output directory, and the recorded
//! bindings and aliases become a `mod.rs` index.

use crate::error::{CliError, CliResult};
use clap::Args;
use log::debug;
use std::fs;
use std::path::PathBuf;
use typed_openapi_core::{
    setup, AppResult, ConvertOptions, HostContext, ModuleOptions, SchemaSource, GENERATED_DIR,
};

/// Arguments for `typed-openapi generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Schema source: a file path, an http(s) URL, or `-` for stdin.
    #[clap(long, env = "TYPED_OPENAPI_SRC")]
    pub src: String,

    /// Output directory for the generated module.
    #[clap(long, default_value = GENERATED_DIR)]
    pub out: PathBuf,

    /// Skip the reactive calling convention.
    #[clap(long)]
    pub no_watch_client: bool,

    /// Skip the server-side utility module and its alias.
    #[clap(long)]
    pub no_server_utils: bool,

    /// Extra derive appended to every generated type (repeatable).
    #[clap(long = "derive")]
    pub extra_derives: Vec<String>,

    /// Emit `#[serde(deny_unknown_fields)]` on generated structs.
    #[clap(long)]
    pub deny_unknown_fields: bool,
}

/// A `HostContext` that writes registered files into a directory and records
/// bindings/aliases for the module index.
pub struct DirHost {
    root: PathBuf,
    files: Vec<String>,
    bindings: Vec<(String, String)>,
    aliases: Vec<(String, String)>,
}

impl DirHost {
    /// Creates a host rooted at `root`; the directory is created lazily.
    pub fn new(root: PathBuf) -> DirHost {
        DirHost {
            root,
            files: Vec::new(),
            bindings: Vec::new(),
            aliases: Vec::new(),
        }
    }

    /// Names of the files registered so far.
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Writes the `mod.rs` index tying the registered pieces together.
    pub fn write_module_root(&self) -> AppResult<()> {
        let mut code = String::from("//! Generated module index. Do not edit.\n\n");
        for file in &self.files {
            code.push_str(&format!("pub mod {};\n", module_stem(file)));
        }
        if !self.bindings.is_empty() {
            code.push('\n');
        }
        for (name, file) in &self.bindings {
            code.push_str(&format!("pub use {}::{};\n", module_stem(file), name));
        }
        for (alias, file) in &self.aliases {
            code.push_str(&format!("pub use self::{} as {};\n", module_stem(file), alias));
        }
        fs::write(self.root.join("mod.rs"), code)?;
        Ok(())
    }
}

fn module_stem(file: &str) -> &str {
    file.strip_suffix(".rs").unwrap_or(file)
}

impl HostContext for DirHost {
    fn register_file(&mut self, name: &str, contents: String) -> AppResult<()> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.root.join(name), contents)?;
        debug!("wrote {}", self.root.join(name).display());
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

/// Runs the generate command.
pub fn execute(args: &GenerateArgs) -> CliResult<()> {
    let src = SchemaSource::from_arg(&args.src).map_err(CliError::Core)?;

    let mut options = ModuleOptions::new(src);
    options.watch_client = !args.no_watch_client;
    options.server_utils = !args.no_server_utils;
    options.convert = ConvertOptions {
        extra_derives: args.extra_derives.clone(),
        deny_unknown_fields: args.deny_unknown_fields,
    };

    let mut host = DirHost::new(args.out.clone());
    setup(options, &mut host)?;
    host.write_module_root().map_err(CliError::Core)?;

    println!(
        "Generated {} files in {}",
        host.files().len() + 1,
        args.out.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
openapi: 3.0.2
info: { title: fixture, version: "1" }
paths:
  /pet/{petId}:
    parameters:
      - name: petId
        in: path
        required: true
        schema: { type: integer, format: int64 }
    get:
      operationId: getPetById
      responses:
        "200":
          description: ok
          content:
            application/json:
              schema: { $ref: '#/components/schemas/Pet' }
components:
  schemas:
    Pet:
      type: object
      properties:
        name: { type: string }
"#;

    fn write_fixture(dir: &std::path::Path) -> PathBuf {
        let spec = dir.join("openapi.yaml");
        fs::write(&spec, FIXTURE).unwrap();
        spec
    }

    #[test]
    fn test_generate_writes_module() {
        let tmp = tempfile::tempdir().unwrap();
        let spec = write_fixture(tmp.path());
        let out = tmp.path().join("gen");

        let args = GenerateArgs {
            src: spec.to_string_lossy().into_owned(),
            out: out.clone(),
            no_watch_client: false,
            no_server_utils: false,
            extra_derives: Vec::new(),
            deny_unknown_fields: false,
        };
        execute(&args).unwrap();

        for file in ["types.rs", "client.rs", "watch.rs", "server.rs", "mod.rs"] {
            assert!(out.join(file).exists(), "{} missing", file);
        }

        let index = fs::read_to_string(out.join("mod.rs")).unwrap();
        assert!(index.contains("pub mod client;"));
        assert!(index.contains("pub use client::Client;"));
        assert!(index.contains("pub use types::Pet;"));
        assert!(index.contains("pub use self::server as server_api;"));

        let client = fs::read_to_string(out.join("client.rs")).unwrap();
        assert!(client.contains("pub fn get_pet_by_id(&self, pet_id: i64) -> Result<Pet, FetchError>"));
    }

    #[test]
    fn test_generate_toggles() {
        let tmp = tempfile::tempdir().unwrap();
        let spec = write_fixture(tmp.path());
        let out = tmp.path().join("gen");

        let args = GenerateArgs {
            src: spec.to_string_lossy().into_owned(),
            out: out.clone(),
            no_watch_client: true,
            no_server_utils: true,
            extra_derives: Vec::new(),
            deny_unknown_fields: false,
        };
        execute(&args).unwrap();

        assert!(!out.join("watch.rs").exists());
        assert!(!out.join("server.rs").exists());
        let index = fs::read_to_string(out.join("mod.rs")).unwrap();
        assert!(!index.contains("server_api"));
    }

    #[test]
    fn test_generate_missing_source_fails() {
        let args = GenerateArgs {
            src: "/definitely/not/here.yaml".to_string(),
            out: PathBuf::from("unused"),
            no_watch_client: false,
            no_server_utils: false,
            extra_derives: Vec::new(),
            deny_unknown_fields: false,
        };
        assert!(execute(&args).is_err());
    }
}
