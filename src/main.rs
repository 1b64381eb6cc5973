//! Command-line tool generating an OpenAPI document from annotated sources.
//!
//! # Usage
//!
//! ```bash
//! openapi-from-comments [OPTIONS] <DIR>...
//! ```
//!
//! # Examples
//!
//! Generate YAML documentation:
//! ```bash
//! openapi-from-comments ./src -o openapi.yaml
//! ```
//!
//! Generate JSON documentation from two directories:
//! ```bash
//! openapi-from-comments ./src ./api -f json -o docs/api/openapi.json
//! ```

mod annotation;
mod cli;
mod constraint;
mod descriptor;
mod error;
mod metadata;
mod openapi_builder;
mod parameter;
mod schema;
mod serializer;
mod source;

use anyhow::Result;
use clap::Parser;
use log::info;

fn main() -> Result<()> {
    let args = cli::CliArgs::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("starting...");

    let args = cli::parse_args_from_parsed(args)?;
    cli::run(args)?;

    info!("OpenAPI document generation completed");

    Ok(())
}
