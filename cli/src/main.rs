#![deny(missing_docs)]

//! # typed-openapi CLI
//!
//! Command Line Interface for the typed OpenAPI wrapper generator.
//!
//! Supported Commands:
//! - `generate`: OpenAPI document -> typed call-wrapper module.
//! - `resolve`: Concrete path -> compatible templates, methods and types.

use clap::{Parser, Subcommand};

use crate::error::CliResult;

mod error;
mod generate;
mod resolve;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Typed OpenAPI wrapper generator")]
struct Cli {
    /// Enable debug logging.
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generates the typed wrapper module from an OpenAPI document.
    Generate(generate::GenerateArgs),
    /// Resolves a concrete path against the declared path templates.
    Resolve(resolve::ResolveArgs),
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    match &cli.command {
        Commands::Generate(args) => generate::execute(args)?,
        Commands::Resolve(args) => resolve::execute(args)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli_structure() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
