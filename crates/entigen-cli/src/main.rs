use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use entigen_config::FileFormat;
use tracing_subscriber::EnvFilter;

mod commands;
mod utils;
use commands::{
    PropertyCommand, cmd_export, cmd_init, cmd_new, cmd_property, cmd_render, cmd_schema,
};

/// entigen command-line interface.
#[derive(Parser, Debug)]
#[command(name = "entigen", author, version, about, arg_required_else_help = true)]
struct Cli {
    /// Emit debug logs on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Initialize entigen.json with defaults.
    Init,
    /// Create a new entity model with no properties.
    New {
        name: String,
        /// Table name passed to `@Entity`.
        #[arg(short = 't', long = "table")]
        table: Option<String>,
        /// Leave out the createdAt/updatedAt columns.
        #[arg(long = "no-timestamps")]
        no_timestamps: bool,
        /// Model file format (defaults to `modelFormat` in entigen.json).
        #[arg(short = 'f', long = "format", value_enum)]
        format: Option<FileFormat>,
    },
    /// Add, edit, remove or list the properties of an entity model.
    Property {
        #[command(subcommand)]
        command: PropertyCommand,
    },
    /// Render one model file as a TypeORM entity class.
    Render {
        file: PathBuf,
        /// Write to this file instead of stdout.
        #[arg(short = 'o', long = "out")]
        out: Option<PathBuf>,
    },
    /// Render every model into the export directory.
    Export {
        /// Override `exportDir` from entigen.json.
        #[arg(short = 'd', long = "export-dir")]
        export_dir: Option<PathBuf>,
    },
    /// Write JSON Schemas for model files and entigen.json.
    Schema {
        #[arg(short = 'o', long = "out", default_value = "schemas")]
        out: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Init => cmd_init(),
        Commands::New {
            name,
            table,
            no_timestamps,
            format,
        } => cmd_new(name, table, !no_timestamps, format),
        Commands::Property { command } => cmd_property(command),
        Commands::Render { file, out } => cmd_render(file, out),
        Commands::Export { export_dir } => cmd_export(export_dir).await,
        Commands::Schema { out } => cmd_schema(out),
    }
}
