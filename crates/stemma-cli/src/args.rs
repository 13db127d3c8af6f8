//! Command-line argument definitions for the Stemma CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. A subcommand selects the operation; configuration file
//! selection and logging verbosity are shared across subcommands.

use clap::{Parser, Subcommand};

/// Command-line arguments for the Stemma corpus tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

/// Operations over a corpus snapshot
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the semantic-relation graph of a division
    Render(RenderArgs),
    /// Align the sentences of a division with its aligned division
    Align(AlignArgs),
    /// Report the annotation status of divisions
    Status(StatusArgs),
}

/// Arguments for the `render` subcommand
#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    /// Path to the corpus snapshot (JSON)
    #[arg(help = "Path to the corpus snapshot")]
    pub corpus: String,

    /// Identifier of the division to render
    #[arg(short, long)]
    pub division: u32,

    /// Relation type to render (defaults to the configured relation type)
    #[arg(short, long)]
    pub relation_type: Option<String>,

    /// Path to the output image file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,
}

/// Arguments for the `align` subcommand
#[derive(clap::Args, Debug)]
pub struct AlignArgs {
    /// Path to the corpus snapshot (JSON)
    #[arg(help = "Path to the corpus snapshot")]
    pub corpus: String,

    /// Identifier of the division to align
    #[arg(short, long)]
    pub division: u32,

    /// Fill the stretches between stored links by content diffing
    #[arg(short, long)]
    pub automatic: bool,
}

/// Arguments for the `status` subcommand
#[derive(clap::Args, Debug)]
pub struct StatusArgs {
    /// Path to the corpus snapshot (JSON)
    #[arg(help = "Path to the corpus snapshot")]
    pub corpus: String,

    /// Identifier of a single division to report (all divisions when omitted)
    #[arg(short, long)]
    pub division: Option<u32>,
}
