//! CLI structure definition.
//!
//! This module defines the command-line surface using clap's derive
//! macros. The tool has a single operation, so there are no subcommands.

use crate::output::TallyFormat;
use clap::Parser;
use std::path::PathBuf;

/// Convert macOS Finder alias files to symbolic links.
#[derive(Parser)]
#[command(name = "dealias")]
#[command(version, about = "Convert macOS Finder alias files to symbolic links", long_about = None)]
pub struct Cli {
    /// Folder to scan for alias files
    pub folder: PathBuf,

    /// Do not descend into subdirectories
    #[arg(long)]
    pub no_recursive: bool,

    /// Output format for the final tally
    #[arg(long, value_enum, default_value = "human")]
    pub format: TallyFormat,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Suppress per-entry output
    #[arg(long)]
    pub quiet: bool,
}
