//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lewiscal_core::TracingOutputFormat;

/// lewiscal - Calendar feeds for the LewisCal frontend
#[derive(Debug, Parser)]
#[command(name = "lewiscal")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "LEWISCAL_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Log output format: pretty, compact or json
    #[arg(long, global = true, env = "LEWISCAL_LOG_FORMAT")]
    pub log_format: Option<TracingOutputFormat>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse a local .ics file and print its events as JSON
    Parse {
        /// The calendar file
        file: PathBuf,
    },

    /// Load a calendar, merge curated events and print the report as JSON
    ///
    /// Without --url the saved calendar link is used; if none was saved,
    /// the local calendar file is read.
    Refresh {
        /// Calendar link to fetch
        #[arg(long)]
        url: Option<String>,

        /// Local calendar file (overrides the configured path)
        #[arg(long)]
        calendar: Option<PathBuf>,
    },

    /// Save the calendar link used by refresh and the server
    SaveUrl {
        /// The calendar link
        url: String,
    },

    /// Run the HTTP backend in the foreground
    Serve {
        /// Port to listen on (overrides PORT and the config file)
        #[arg(long, short)]
        port: Option<u16>,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Show configuration file path
    Path,
}
