//! Binary entry point for geocampo.
//!
//! This binary provides the CLI interface for the field inventory store.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print macros in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use geocampo::cli::{
    cmd_capture, cmd_delete, cmd_edit, cmd_export, cmd_import, cmd_list, cmd_stats,
    CaptureArgs, EditArgs, ImportMode,
};
use geocampo::config::GeocampoConfig;
use geocampo::observability;
use std::path::PathBuf;
use std::process::ExitCode;

/// Geocampo - an offline field inventory of outdoor advertising structures.
#[derive(Parser)]
#[command(name = "geocampo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Data directory (overrides GEOCAMPO_DATA_DIR and the platform default).
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Save a new field observation.
    Capture(CaptureArgs),

    /// List stored records, newest first.
    List,

    /// Edit fields of a stored record.
    Edit(EditArgs),

    /// Delete a record and its photo.
    Delete {
        /// ID of the record to delete.
        id: String,

        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },

    /// Import records from a CSV file.
    Import {
        /// CSV file to import.
        file: PathBuf,

        /// How imported records join the collection.
        #[arg(long, value_enum, default_value = "ask")]
        mode: ImportMode,

        /// Skip the replace confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },

    /// Export all records to a timestamped CSV file.
    Export {
        /// Directory to write the file into (default: current directory).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show aggregate statistics.
    Stats,
}

/// Main entry point.
fn main() -> ExitCode {
    let cli = Cli::parse();

    observability::init(cli.verbose);

    let config = match &cli.data_dir {
        Some(dir) => GeocampoConfig::with_data_dir(dir.clone()),
        None => GeocampoConfig::resolve(),
    };

    match run_command(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
fn run_command(cli: Cli, config: &GeocampoConfig) -> geocampo::Result<()> {
    match cli.command {
        Commands::Capture(args) => cmd_capture(config, args),

        Commands::List => cmd_list(config),

        Commands::Edit(args) => cmd_edit(config, args),

        Commands::Delete { id, yes } => cmd_delete(config, &id, yes),

        Commands::Import { file, mode, yes } => cmd_import(config, &file, mode, yes),

        Commands::Export { output } => cmd_export(config, output),

        Commands::Stats => cmd_stats(config),
    }
}
