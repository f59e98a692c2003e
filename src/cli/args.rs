//! Command line argument parsing for the Pike CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Pike - compile, validate and replay search requests
#[derive(Parser, Debug, Clone)]
#[command(name = "pike")]
#[command(about = "Typed query builder and response decoder for document search")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct PikeArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Client configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "PIKE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl PikeArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the wire body of a request file
    Compile(CompileArgs),

    /// Run a request file against a recorded response
    Search(SearchArgs),

    /// Check a request file without compiling it
    Validate(ValidateArgs),
}

/// Arguments for compiling a request
#[derive(Parser, Debug, Clone)]
pub struct CompileArgs {
    /// Request file path (JSON)
    #[arg(value_name = "REQUEST_FILE")]
    pub request_file: PathBuf,
}

/// Arguments for replaying a search
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Request file path (JSON)
    #[arg(value_name = "REQUEST_FILE")]
    pub request_file: PathBuf,

    /// Recorded raw response to decode (JSON)
    #[arg(short, long, value_name = "RAW_RESPONSE_FILE")]
    pub response: PathBuf,

    /// Maximum number of hits to print in human output
    #[arg(long, default_value = "10")]
    pub max_hits: usize,
}

/// Arguments for validating a request
#[derive(Parser, Debug, Clone)]
pub struct ValidateArgs {
    /// Request file path (JSON)
    #[arg(value_name = "REQUEST_FILE")]
    pub request_file: PathBuf,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
