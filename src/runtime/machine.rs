//! The stack machine: one pop and zero or more pushes per input symbol.

use crate::errors::MatchError;
use crate::grammar::Grammar;
use crate::runtime::eval::{Evaluator, DEFAULT_MAX_DEPTH};
use crate::runtime::sink::{Event, EventSink};
use crate::runtime::stack::Stack;
use crate::token::{Token, TokenKind};

/// Default bound on consecutive end markers popped for one symbol.
pub const DEFAULT_MAX_EPSILON_MOVES: usize = 10_000;

/// Limits and switches for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MachineOptions {
    /// Maximum nesting while the evaluator derives a single symbol.
    pub max_depth: usize,
    /// Maximum end markers popped in a row without consuming input.
    pub max_epsilon_moves: usize,
    /// Record a stack snapshot after every step.
    pub record_trace: bool,
}

impl Default for MachineOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_epsilon_moves: DEFAULT_MAX_EPSILON_MOVES,
            record_trace: true,
        }
    }
}

/// Owns the stack for one run over a shared, read-only grammar.
pub struct StackMachine<'g> {
    evaluator: Evaluator<'g>,
    stack: Stack,
    options: MachineOptions,
}

impl<'g> StackMachine<'g> {
    pub fn new(grammar: &'g Grammar, options: MachineOptions) -> Self {
        Self {
            evaluator: Evaluator::new(grammar, options.max_depth),
            stack: Stack::new(),
            options,
        }
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn push(&mut self, tokens: Vec<Token>) {
        self.stack.push(tokens);
    }

    /// Consumes one input symbol.
    ///
    /// End markers on top are popped and reported without consuming the
    /// symbol. The first other token is handed to the evaluator and its
    /// expansion pushed back. On error the popped token is not restored.
    pub fn process(&mut self, symbol: &str, sink: &mut dyn EventSink) -> Result<(), MatchError> {
        let mut epsilon_moves = 0;
        loop {
            let top = self.stack.pop()?;
            if let TokenKind::EndVariable(name) = top.kind() {
                epsilon_moves += 1;
                self.check_epsilon(epsilon_moves)?;
                sink.emit(Event::Close(name.clone()));
                continue;
            }

            let expansion = self.evaluator.evaluate(symbol, &top)?;
            for name in expansion.entered {
                sink.emit(Event::Open(name));
            }
            sink.emit(Event::Shift(symbol.to_string()));
            self.stack.push(expansion.tokens);
            return Ok(());
        }
    }

    /// Called once input is exhausted: drains trailing end markers, then
    /// requires the stack to be empty.
    pub fn finish(&mut self, sink: &mut dyn EventSink) -> Result<(), MatchError> {
        let mut epsilon_moves = 0;
        while let Some(TokenKind::EndVariable(name)) = self.stack.peek().map(Token::kind) {
            epsilon_moves += 1;
            self.check_epsilon(epsilon_moves)?;
            sink.emit(Event::Close(name.clone()));
            self.stack.pop()?;
        }

        match self.stack.peek() {
            None => Ok(()),
            Some(top) => Err(MatchError::UnconsumedStack {
                remaining: self.stack.len(),
                top: top.to_string(),
            }),
        }
    }

    fn check_epsilon(&self, moves: usize) -> Result<(), MatchError> {
        if moves > self.options.max_epsilon_moves {
            return Err(MatchError::ExpansionLimitExceeded {
                limit: self.options.max_epsilon_moves,
            });
        }
        Ok(())
    }
}
