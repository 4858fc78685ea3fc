mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{InsertCommand, LoadTypesCommand, QueryCommand};

/// Facet CLI - fact dimension store administration tool
#[derive(Debug, Parser)]
#[command(
    name = "facet",
    version,
    about = "Fact dimension store administration tool"
)]
struct Cli {
    /// SQLite database path
    #[arg(long, global = true, default_value = "facet.db")]
    db: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Upsert fact types from a YAML document
    LoadTypes(LoadTypesCommand),
    /// Insert a fact from a JSON document
    Insert(InsertCommand),
    /// Run a bracket-notation query and print the matching records
    Query(QueryCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::LoadTypes(cmd) => cmd.execute(&cli.db)?,
        Commands::Insert(cmd) => cmd.execute(&cli.db)?,
        Commands::Query(cmd) => cmd.execute(&cli.db)?,
    };

    std::process::exit(exit_code);
}
