//! The driver: feeds an input through a stack machine and records the trace.

use std::ops::Deref;

use serde::Serialize;

use crate::errors::MatchError;
use crate::grammar::Grammar;
use crate::runtime::machine::{MachineOptions, StackMachine};
use crate::runtime::sink::{Event, EventSink, NullSink};
use crate::token::{Symbol, Token};

// ============================================================================
// INPUT
// ============================================================================

/// A tokenized input string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Input {
    symbols: Vec<Symbol>,
}

impl Input {
    /// One symbol per character.
    pub fn chars(text: &str) -> Self {
        Self {
            symbols: text.chars().map(String::from).collect(),
        }
    }

    /// One symbol per whitespace-separated word.
    pub fn words(text: &str) -> Self {
        Self {
            symbols: text.split_whitespace().map(String::from).collect(),
        }
    }
}

impl<S: Into<Symbol>> FromIterator<S> for Input {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            symbols: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl Deref for Input {
    type Target = [Symbol];

    fn deref(&self) -> &[Symbol] {
        &self.symbols
    }
}

// ============================================================================
// RESULT
// ============================================================================

/// Stack contents after one consumed symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceStep {
    pub step: usize,
    pub symbol: Symbol,
    /// Top of stack first.
    pub stack: Vec<Token>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunResult {
    pub accepted: bool,
    pub start: String,
    /// Stack before the first symbol, top first.
    pub initial_stack: Vec<Token>,
    pub trace: Vec<TraceStep>,
    /// Stack when the run stopped, top first.
    pub remaining: Vec<Token>,
    /// Index of the input symbol that could not be consumed.
    pub failed_step: Option<usize>,
    pub error: Option<MatchError>,
}

impl RunResult {
    fn rejected(start: &str, error: MatchError) -> Self {
        Self {
            accepted: false,
            start: start.to_string(),
            initial_stack: Vec::new(),
            trace: Vec::new(),
            remaining: Vec::new(),
            failed_step: None,
            error: Some(error),
        }
    }
}

// ============================================================================
// DRIVER
// ============================================================================

/// Runs `input` against `grammar` from `start` with default options.
pub fn run(grammar: &Grammar, start: &str, input: &[Symbol]) -> RunResult {
    Recognizer::new(grammar).run(start, input)
}

/// Reusable entry point holding a grammar reference and run options.
#[derive(Debug, Clone, Copy)]
pub struct Recognizer<'g> {
    grammar: &'g Grammar,
    options: MachineOptions,
}

impl<'g> Recognizer<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Self {
            grammar,
            options: MachineOptions::default(),
        }
    }

    pub fn with_options(mut self, options: MachineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn run(&self, start: &str, input: &[Symbol]) -> RunResult {
        self.run_with_sink(start, input, &mut NullSink)
    }

    pub fn accepts(&self, start: &str, input: &[Symbol]) -> bool {
        self.run(start, input).accepted
    }

    /// Runs and reports open/shift/close events to `sink` as they happen.
    pub fn run_with_sink(&self, start: &str, input: &[Symbol], sink: &mut dyn EventSink) -> RunResult {
        // The start variable is expanded before any input is read.
        let Some(definition) = self.grammar.resolve(start) else {
            return RunResult::rejected(
                start,
                MatchError::UndefinedVariable {
                    name: start.to_string(),
                },
            );
        };

        let mut machine = StackMachine::new(self.grammar, self.options);
        machine.push(vec![definition.clone()]);
        sink.emit(Event::Open(start.to_string()));

        let mut result = RunResult {
            accepted: false,
            start: start.to_string(),
            initial_stack: machine.stack().snapshot(),
            trace: Vec::new(),
            remaining: Vec::new(),
            failed_step: None,
            error: None,
        };

        for (step, symbol) in input.iter().enumerate() {
            if let Err(err) = machine.process(symbol, sink) {
                result.failed_step = Some(step);
                result.error = Some(err);
                result.remaining = machine.stack().snapshot();
                return result;
            }
            if self.options.record_trace {
                result.trace.push(TraceStep {
                    step,
                    symbol: symbol.clone(),
                    stack: machine.stack().snapshot(),
                });
            }
        }

        result.error = machine.finish(sink).err();
        result.accepted = result.error.is_none();
        result.remaining = machine.stack().snapshot();
        result
    }
}
