//! The cfgpda Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use miette::{IntoDiagnostic, Report};

use crate::cli::args::{CfgPdaArgs, Command, RunArgs};
use crate::runtime::{EventBuffer, Input, MachineOptions, Recognizer, StdoutSink};
use crate::syntax::load_grammar;

pub mod args;
pub mod output;

/// The main entry point for the CLI. Exits with success only when the input
/// is accepted (or the grammar checks out).
pub fn run() -> ExitCode {
    let args = CfgPdaArgs::parse();

    let result = match args.command {
        Command::Run(run_args) => handle_run(&run_args),
        Command::Check { grammar, explicit } => handle_check(&grammar, explicit),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(report) => {
            eprintln!("{:?}", report);
            ExitCode::FAILURE
        }
    }
}

/// Handles the `run` subcommand.
fn handle_run(args: &RunArgs) -> Result<bool, Report> {
    let mut grammar = load_grammar(&args.grammar)?;
    if args.markers {
        grammar = grammar.with_end_markers()?;
    }
    grammar.require(&args.start)?;

    let input = if args.words {
        Input::words(&args.input)
    } else {
        Input::chars(&args.input)
    };
    let options = MachineOptions {
        max_depth: args.max_depth,
        max_epsilon_moves: args.max_epsilon,
        record_trace: !args.no_trace,
    };

    let recognizer = Recognizer::new(&grammar).with_options(options);
    let mut events = EventBuffer::new();
    let result = if args.events {
        recognizer.run_with_sink(&args.start, &input, &mut (&mut events, StdoutSink))
    } else {
        recognizer.run_with_sink(&args.start, &input, &mut events)
    };
    let markup = args.markers.then(|| events.markup());

    if args.json {
        output::print_json(&result, &input, markup.as_deref()).into_diagnostic()?;
    } else {
        output::print_run(&result, &input, markup.as_deref());
    }
    Ok(result.accepted)
}

/// Handles the `check` subcommand.
fn handle_check(path: &Path, explicit: bool) -> Result<bool, Report> {
    let grammar = load_grammar(path)?;
    output::print_rules(grammar.rules(), explicit);
    Ok(true)
}
