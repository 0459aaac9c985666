//! CLI definitions and entry point.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

/// Inspect and maintain living-documentation reports
#[derive(Parser, Debug)]
#[command(name = "doctester", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Report directory (default: target/site/doctester, or DOCTESTER_OUTPUT_DIR)
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List documents registered in the report manifest
    Status,

    /// Regenerate index.html purely from the manifest
    RebuildIndex,

    /// Delete the report directory
    Clean {
        /// Actually delete (required)
        #[arg(long)]
        force: bool,
    },

    /// Print version information
    Version,
}
