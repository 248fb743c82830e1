//! GridCell CLI - Inspect the GridCell schema and validate cell records

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{proj, schema, validate};
use config::{GridcellConfig, OutputFormat};
use gridcell_schema::GRID_CELL;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gridcell")]
#[command(about = "Schema introspection and record validation for spatial grid cells", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show an entity schema
    Schema {
        /// Entity name
        #[arg(default_value = GRID_CELL)]
        name: String,

        /// Directory with additional entity definitions (entities/*.toml)
        #[arg(long)]
        schemas: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Validate a file of candidate records
    Validate {
        /// JSON array of records, or one object per line for .ndjson/.jsonl
        file: PathBuf,

        /// Entity to validate against
        #[arg(long, default_value = GRID_CELL)]
        entity: String,

        /// Directory with additional entity definitions (entities/*.toml)
        #[arg(long)]
        schemas: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Resolve a projection name or EPSG code
    Proj {
        /// Alias (behrmann, google, ...), EPSG:<code>, or bare SRID
        name: Option<String>,

        /// List well-known projections
        #[arg(long)]
        list: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_directive = if cli.verbose { "gridcell=debug" } else { "gridcell=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(default_directive.parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = GridcellConfig::load()?;
    tracing::debug!(?config, "loaded configuration");

    match cli.command {
        Commands::Schema {
            name,
            schemas,
            format,
        } => schema::run(schema::SchemaArgs {
            name,
            schemas: schemas.or_else(|| config.schemas_dir.clone()),
            format: format.unwrap_or(config.format),
        }),
        Commands::Validate {
            file,
            entity,
            schemas,
            format,
        } => {
            let valid = validate::run(validate::ValidateArgs {
                file,
                entity,
                schemas: schemas.or_else(|| config.schemas_dir.clone()),
                format: format.unwrap_or(config.format),
            })?;
            if !valid {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Proj { name, list } => proj::run(name.as_deref(), list),
    }
}
