//! The token evaluator.
//!
//! Given one input symbol and the token popped from the stack, decides what
//! must be pushed back. Concat, union and variable nodes are resolved
//! recursively down to a terminal comparison. The grammar tree itself is the
//! stack alphabet; there is no table construction step.

use crate::errors::MatchError;
use crate::grammar::Grammar;
use crate::token::{Token, TokenKind};

/// Default bound on nested resolution while deriving a single symbol.
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Result of a successful evaluation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expansion {
    /// Obligations to push, first element ends up on top of the stack.
    pub tokens: Vec<Token>,
    /// Variables resolved on the way to the terminal, outermost first.
    pub entered: Vec<String>,
}

/// Evaluates `symbol` against `token` with the default depth bound.
pub fn evaluate(symbol: &str, token: &Token, grammar: &Grammar) -> Result<Expansion, MatchError> {
    Evaluator::new(grammar, DEFAULT_MAX_DEPTH).evaluate(symbol, token)
}

#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'g> {
    grammar: &'g Grammar,
    max_depth: usize,
}

impl<'g> Evaluator<'g> {
    pub fn new(grammar: &'g Grammar, max_depth: usize) -> Self {
        Self { grammar, max_depth }
    }

    pub fn evaluate(&self, symbol: &str, token: &Token) -> Result<Expansion, MatchError> {
        self.eval_at(symbol, token, 0)
    }

    fn eval_at(&self, symbol: &str, token: &Token, depth: usize) -> Result<Expansion, MatchError> {
        if depth > self.max_depth {
            return Err(MatchError::ExpansionLimitExceeded {
                limit: self.max_depth,
            });
        }

        match token.kind() {
            TokenKind::Terminal(expected) => {
                if expected == symbol {
                    Ok(Expansion::default())
                } else {
                    Err(MatchError::SymbolMismatch {
                        expected: expected.clone(),
                        got: symbol.to_string(),
                    })
                }
            }

            TokenKind::Concat(children) => {
                let Some((head, rest)) = children.split_first() else {
                    return Err(no_alternative(symbol, 0));
                };
                // The head's own leftovers come first, then the rest of this sequence.
                let mut expansion = self.eval_at(symbol, head, depth + 1)?;
                expansion.tokens.extend(rest.iter().cloned());
                Ok(expansion)
            }

            // Commits to the first alternative that derives this symbol. A
            // later mismatch never comes back here (one symbol of lookahead).
            TokenKind::Union(children) => {
                for child in children {
                    match self.eval_at(symbol, child, depth + 1) {
                        Ok(expansion) => return Ok(expansion),
                        Err(err) if err.is_mismatch() => continue,
                        Err(err) => return Err(err),
                    }
                }
                Err(no_alternative(symbol, children.len()))
            }

            TokenKind::Variable(name) => {
                let definition = self
                    .grammar
                    .resolve(name)
                    .ok_or_else(|| MatchError::UndefinedVariable { name: name.clone() })?;
                let mut expansion = self
                    .eval_at(symbol, definition, depth + 1)
                    .map_err(|err| err.within_variable(name))?;
                expansion.entered.insert(0, name.clone());
                Ok(expansion)
            }

            // Epsilon moves belong to the stack machine.
            TokenKind::EndVariable(name) => Err(MatchError::MisplacedEndMarker { name: name.clone() }),
        }
    }
}

fn no_alternative(symbol: &str, tried: usize) -> MatchError {
    MatchError::NoAlternativeMatched {
        symbol: symbol.to_string(),
        variable: None,
        tried,
    }
}
