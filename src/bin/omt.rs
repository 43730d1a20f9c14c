//! Object Model Transform CLI
//!
//! Applies declarative schema documents to JSON data. Models named in a
//! document are resolved as record models, so output instances serialize as
//! tagged objects.

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use object_model_transform::{
    transform_with, MapperConfig, ModelRegistry, OutputFormat, SchemaDocument,
};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "omt")]
#[command(about = "Transform JSON data into model instances using a schema document")]
#[command(version)]
struct Cli {
    /// Explicit configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform a JSON document
    Transform {
        /// Input data (JSON)
        #[arg(short, long)]
        input: PathBuf,
        /// Schema document (JSON or TOML)
        #[arg(short, long)]
        schema: PathBuf,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Compact output, overriding the configured format
        #[arg(long)]
        compact: bool,
    },

    /// Validate every node of a schema document
    Check {
        /// Schema document (JSON or TOML)
        #[arg(short, long)]
        schema: PathBuf,
    },

    /// Show the effective configuration
    Config {
        /// Write it to this file instead of printing
        #[arg(long)]
        save: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = MapperConfig::load_from(cli.config.as_deref())?;

    match cli.command {
        Commands::Transform {
            input,
            schema,
            output,
            compact,
        } => {
            let data: Value = serde_json::from_str(&fs::read_to_string(&input)?)?;
            let document = SchemaDocument::load(&schema)?;
            let mut registry = ModelRegistry::new();
            let node = document.resolve(&mut registry)?;

            let mapped = transform_with(&data, &node, &config.transform_options())?;
            let json = mapped.to_json(&config.output.model_tag);

            let rendered = if compact || config.output.format == OutputFormat::Compact {
                serde_json::to_string(&json)?
            } else {
                serde_json::to_string_pretty(&json)?
            };

            match output {
                Some(path) => {
                    fs::write(&path, rendered)?;
                    eprintln!("✅ Wrote {:?}", path);
                    eprintln!("  Models: {}", registry.model_names().join(", "));
                }
                None => println!("{}", rendered),
            }
            Ok(())
        }

        Commands::Check { schema } => {
            let document = SchemaDocument::load(&schema)?;
            let mut registry = ModelRegistry::new();
            let node = document.resolve(&mut registry)?;

            match node.validate_tree() {
                Ok(()) => {
                    println!("✅ {:?} - valid", schema);
                    println!("  Models: {}", registry.model_names().join(", "));
                    Ok(())
                }
                Err(e) => {
                    println!("❌ {:?} - {}", schema, e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Config { save } => {
            match save {
                Some(path) => {
                    config.save(&path)?;
                    println!("✅ Configuration saved to {}", path);
                }
                None => print!("{}", config.to_toml()?),
            }
            Ok(())
        }
    }
}
