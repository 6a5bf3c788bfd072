//! Command-line interface for jotter.
//!
//! This module provides the CLI structure for the `jot` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    CheckoutCommand, ConfigCommand, DeleteCommand, EditCommand, ListCommand, NewCommand,
    PlansCommand, ShowCommand,
};

use crate::logging::Verbosity;

/// jot - markdown notes from the terminal
///
/// Create, search and edit markdown notes, and try out the subscription
/// checkout.
#[derive(Debug, Parser)]
#[command(name = "jot")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a note
    New(NewCommand),

    /// List notes, optionally filtered by a search query
    #[command(alias = "ls")]
    List(ListCommand),

    /// Show a note
    Show(ShowCommand),

    /// Change a note's title or content
    Edit(EditCommand),

    /// Delete a note
    #[command(alias = "rm")]
    Delete(DeleteCommand),

    /// List subscription plans
    Plans(PlansCommand),

    /// Subscribe to a plan
    Checkout(CheckoutCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}
