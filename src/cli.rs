//! Command-line interface definition using clap
//!
//! Provides structured argument parsing with automatic help generation.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

// =============================================================================
// CLI Definition
// =============================================================================

/// Tag-filtered line logger: pipes stdin (or --message values) through a
/// configured logger
#[derive(Parser, Debug, Default)]
#[command(name = "taglog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose internal debug output
    #[arg(short, long)]
    pub verbose: bool,

    /// Config file (TOML)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Named scheme from the config file to load
    #[arg(long, value_name = "NAME", requires = "config")]
    pub scheme: Option<String>,

    /// Use the DragonLog flavour (DRLog default tag)
    #[arg(long)]
    pub dragon: bool,

    /// Tag for every line (default: flavour or config default tag)
    #[arg(short, long, value_name = "TAG")]
    pub tag: Option<String>,

    /// Write to the error sink using the error tag
    #[arg(long)]
    pub err: bool,

    /// Only let these tags through
    #[arg(long, value_name = "TAG", value_delimiter = ',', conflicts_with_all = ["disable", "mute"])]
    pub solo: Vec<String>,

    /// Disable these tags
    #[arg(long, value_name = "TAG", value_delimiter = ',', conflicts_with = "mute")]
    pub disable: Vec<String>,

    /// Suppress all output
    #[arg(long)]
    pub mute: bool,

    /// Message to log (repeatable). Reads stdin lines when absent.
    #[arg(short, long, value_name = "TEXT")]
    pub message: Vec<String>,

    /// Print the recent-log history to stderr on exit
    #[arg(long)]
    pub history: bool,

    /// Write an export of the history into this directory on exit
    #[arg(long, value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default config file
    InitConfig {
        /// Destination path
        #[arg(value_name = "PATH", default_value = "taglog.toml")]
        path: PathBuf,
    },

    /// List schemes defined in the config file
    Schemes,
}

// =============================================================================
// Tests
// =============================================================================
