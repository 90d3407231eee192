//! The pushdown stack of pending obligations.

use std::fmt;

use crate::errors::MatchError;
use crate::token::Token;

/// LIFO stack of token expressions. The last element of the backing vector
/// is the top.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stack {
    items: Vec<Token>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes `tokens` so that the first of them becomes the new top.
    pub fn push(&mut self, tokens: Vec<Token>) {
        self.items.extend(tokens.into_iter().rev());
    }

    pub fn push_one(&mut self, token: Token) {
        self.items.push(token);
    }

    pub fn pop(&mut self) -> Result<Token, MatchError> {
        self.items.pop().ok_or(MatchError::StackEmpty)
    }

    pub fn peek(&self) -> Option<&Token> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates from top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.items.iter().rev()
    }

    /// Copy of the contents, top first.
    pub fn snapshot(&self) -> Vec<Token> {
        self.iter().cloned().collect()
    }
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.iter().try_for_each(|token| write!(f, "{}", token))
    }
}
