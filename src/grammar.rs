//! The grammar registry: variable name to defining token.
//!
//! A [`Grammar`] is built once and then only read. Variables inside token
//! trees refer to rules by name, so mutually recursive grammars need no
//! shared ownership. The registry is `Send + Sync` and can back any number of
//! concurrent runs.

use std::collections::{HashMap, HashSet};

use crate::errors::GrammarError;
use crate::token::{Token, TokenKind};

/// Name of the start variable when none is given.
pub const DEFAULT_START: &str = "$";

#[derive(Debug, Clone, Default)]
pub struct Grammar {
    rules: HashMap<String, Token>,
    order: Vec<String>,
}

impl Grammar {
    pub fn builder() -> GrammarBuilder {
        GrammarBuilder::default()
    }

    /// Builds a registry without any validation. Runs against it are still
    /// bounded by the machine's depth limit.
    pub fn unchecked(rules: impl IntoIterator<Item = (String, Token)>) -> Self {
        let mut grammar = Grammar::default();
        for (name, token) in rules {
            if grammar.rules.insert(name.clone(), token).is_none() {
                grammar.order.push(name);
            }
        }
        grammar
    }

    pub fn resolve(&self, name: &str) -> Option<&Token> {
        self.rules.get(name)
    }

    /// Looks up a variable that must exist, e.g. the start variable.
    pub fn require(&self, name: &str) -> Result<&Token, GrammarError> {
        self.resolve(name).ok_or_else(|| GrammarError::UndefinedVariable {
            name: name.to_string(),
            referenced_by: "the start symbol".to_string(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Rules in definition order.
    pub fn rules(&self) -> impl Iterator<Item = (&str, &Token)> {
        self.order
            .iter()
            .filter_map(|name| self.rules.get(name).map(|token| (name.as_str(), token)))
    }

    /// Checks that every referenced variable is defined and that no variable
    /// can reach itself without consuming a symbol.
    pub fn validate(&self) -> Result<(), GrammarError> {
        for (name, token) in self.rules() {
            let mut missing = None;
            token.for_each_reference(&mut |reference| {
                if missing.is_none() && !self.contains(reference) {
                    missing = Some(reference.to_string());
                }
            });
            if let Some(reference) = missing {
                return Err(GrammarError::UndefinedVariable {
                    name: reference,
                    referenced_by: format!("rule '{}'", name),
                });
            }
        }
        self.check_left_recursion()
    }

    fn check_left_recursion(&self) -> Result<(), GrammarError> {
        let mut finished = HashSet::new();
        for name in &self.order {
            let mut path = Vec::new();
            self.visit_heads(name, &mut path, &mut finished)?;
        }
        Ok(())
    }

    fn visit_heads<'a>(
        &'a self,
        name: &'a str,
        path: &mut Vec<&'a str>,
        finished: &mut HashSet<&'a str>,
    ) -> Result<(), GrammarError> {
        if finished.contains(name) {
            return Ok(());
        }
        if let Some(start) = path.iter().position(|n| *n == name) {
            let mut cycle: Vec<&str> = path[start..].to_vec();
            cycle.push(name);
            return Err(GrammarError::LeftRecursion {
                cycle: cycle.join(" -> "),
            });
        }
        let Some(token) = self.rules.get(name) else {
            return Ok(());
        };
        path.push(name);
        for head in token.head_references() {
            self.visit_heads(head, path, finished)?;
        }
        path.pop();
        finished.insert(name);
        Ok(())
    }

    /// Returns a copy in which every alternative of every rule ends with an
    /// end marker for that rule. Runs over the result report a close event
    /// each time a variable's production is fully matched.
    pub fn with_end_markers(&self) -> Result<Grammar, GrammarError> {
        let mut marked = Grammar::default();
        for (name, token) in self.rules() {
            let alternatives: Vec<Token> = match token.kind() {
                TokenKind::Union(children) => children.clone(),
                _ => vec![token.clone()],
            };
            let closed = alternatives
                .into_iter()
                .map(|alt| {
                    let mut items = match alt.kind() {
                        TokenKind::Concat(children) => children.clone(),
                        _ => vec![alt.clone()],
                    };
                    items.push(Token::end_variable(name));
                    Token::concat(items)
                })
                .collect::<Result<Vec<_>, _>>()?;
            marked.rules.insert(name.to_string(), Token::union(closed)?);
            marked.order.push(name.to_string());
        }
        Ok(marked)
    }
}

/// Collects rules and validates them as a whole on [`GrammarBuilder::build`].
#[derive(Debug, Default)]
pub struct GrammarBuilder {
    grammar: Grammar,
}

impl GrammarBuilder {
    /// Defines `name` by an arbitrary token.
    pub fn define(mut self, name: impl Into<String>, token: Token) -> Result<Self, GrammarError> {
        let name = name.into();
        if let TokenKind::EndVariable(marker) = token.kind() {
            return Err(GrammarError::MisplacedEndMarker {
                name: marker.clone(),
            });
        }
        if self.grammar.contains(&name) {
            return Err(GrammarError::DuplicateRule { name });
        }
        self.grammar.order.push(name.clone());
        self.grammar.rules.insert(name, token);
        Ok(self)
    }

    /// Defines `name` as the union of `alternatives`, in the given order.
    pub fn rule(self, name: impl Into<String>, alternatives: Vec<Token>) -> Result<Self, GrammarError> {
        self.define(name, Token::union(alternatives)?)
    }

    pub fn build(self) -> Result<Grammar, GrammarError> {
        self.grammar.validate()?;
        Ok(self.grammar)
    }
}
