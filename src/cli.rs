use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::{debug, info};
use std::path::PathBuf;

/// Generate an OpenAPI document from route annotations in source comments
#[derive(Parser, Debug)]
#[command(name = "openapi-from-comments")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Directories to scan for annotated source files
    #[arg(value_name = "DIR", required = true, num_args = 1..)]
    pub directories: Vec<PathBuf>,

    /// Output format (yaml or json)
    #[arg(short = 'f', long = "format", value_enum, default_value = "yaml")]
    pub output_format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// Title of the generated document
    #[arg(long = "title", default_value = "Generated API")]
    pub title: String,

    /// Version of the documented API
    #[arg(long = "api-version", default_value = "1.0.0")]
    pub api_version: String,

    /// Description of the documented API
    #[arg(long = "description")]
    pub description: Option<String>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// YAML format
    Yaml,
    /// JSON format
    Json,
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("parsed arguments: {:?}", args);

    for directory in &args.directories {
        if !directory.exists() {
            anyhow::bail!("directory does not exist: {}", directory.display());
        }
        if !directory.is_dir() {
            anyhow::bail!("not a directory: {}", directory.display());
        }
    }

    info!("output format: {:?}", args.output_format);
    if let Some(ref output) = args.output_path {
        info!("output file: {}", output.display());
    } else {
        info!("output: stdout");
    }

    Ok(args)
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    use crate::openapi_builder::OpenApiBuilder;
    use crate::serializer::{serialize_json, serialize_yaml, write_to_file};
    use crate::source::routes_from_directories;

    info!("scanning {} directories...", args.directories.len());
    let routes = routes_from_directories(&args.directories)?;
    info!("found {} routes", routes.len());

    let mut builder =
        OpenApiBuilder::new().with_info(args.title, args.api_version, args.description);
    for route in &routes {
        builder.add_route(route);
    }
    let document = builder.build();

    let content = match args.output_format {
        OutputFormat::Yaml => serialize_yaml(&document)?,
        OutputFormat::Json => serialize_json(&document)?,
    };

    match args.output_path {
        Some(path) => {
            write_to_file(&content, &path)?;
            info!("OpenAPI document written to {}", path.display());
        }
        None => println!("{}", content),
    }

    Ok(())
}
