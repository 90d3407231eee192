//! Defines the command-line arguments and subcommands for the cfgpda CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::grammar::DEFAULT_START;
use crate::runtime::eval::DEFAULT_MAX_DEPTH;
use crate::runtime::machine::DEFAULT_MAX_EPSILON_MOVES;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "cfgpda",
    version,
    about = "Recognize strings of a context-free grammar with a pushdown automaton."
)]
pub struct CfgPdaArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run an input string through the grammar and print the trace.
    Run(RunArgs),
    /// Load and validate a grammar, then print its rules.
    Check {
        /// Rule file (.cfg, .txt, ...) or rule map (.yaml, .yml, .json).
        #[arg(required = true)]
        grammar: PathBuf,

        /// Quote every terminal and bracket every variable.
        #[arg(long)]
        explicit: bool,
    },
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Rule file (.cfg, .txt, ...) or rule map (.yaml, .yml, .json).
    #[arg(required = true)]
    pub grammar: PathBuf,

    /// The input string to recognize.
    pub input: String,

    /// Start variable.
    #[arg(long, default_value = DEFAULT_START)]
    pub start: String,

    /// Split the input on whitespace instead of into characters.
    #[arg(long)]
    pub words: bool,

    /// Close every production with an end marker and print the parse tree.
    #[arg(long)]
    pub markers: bool,

    /// Print the run result as JSON.
    #[arg(long)]
    pub json: bool,

    /// Stream open/shift/close events to stdout while running.
    #[arg(long, conflicts_with = "json")]
    pub events: bool,

    /// Do not record per-step stack snapshots.
    #[arg(long)]
    pub no_trace: bool,

    /// Maximum nesting while deriving one symbol.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Maximum end markers popped in a row.
    #[arg(long, default_value_t = DEFAULT_MAX_EPSILON_MOVES)]
    pub max_epsilon: usize,
}
