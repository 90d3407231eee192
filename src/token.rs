//! Token expressions: the grammar fragments the recognizer interprets.
//!
//! A [`Token`] is inert data. All matching behavior lives in
//! [`crate::runtime::eval`]. Construction goes through the functions on
//! [`Token`], which reject malformed shapes up front so the evaluator never
//! sees an empty sequence or a misplaced end marker.

use std::fmt;

use serde::Serialize;

use crate::errors::GrammarError;

/// A single input symbol. One character in the compact form, an arbitrary
/// string in the general form.
pub type Symbol = String;

/// The five token shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum TokenKind {
    /// Matches exactly one input symbol equal to the payload.
    Terminal(Symbol),
    /// Matches the head now and schedules the rest.
    Concat(Vec<Token>),
    /// First alternative that derives the symbol wins.
    Union(Vec<Token>),
    /// Reference by name into the grammar registry.
    Variable(String),
    /// Closes the named variable. Consumes no input.
    EndVariable(String),
}

/// A validated token expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Token {
    kind: TokenKind,
}

impl Token {
    pub fn terminal(symbol: impl Into<Symbol>) -> Self {
        Self {
            kind: TokenKind::Terminal(symbol.into()),
        }
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Self {
            kind: TokenKind::Variable(name.into()),
        }
    }

    pub fn end_variable(name: impl Into<String>) -> Self {
        Self {
            kind: TokenKind::EndVariable(name.into()),
        }
    }

    /// Builds a concatenation. The head must be able to consume a symbol, so
    /// an end marker is only accepted after the first position.
    pub fn concat(children: Vec<Token>) -> Result<Self, GrammarError> {
        match children.first() {
            None => Err(GrammarError::EmptyConcat),
            Some(head) if head.is_end_marker() => Err(GrammarError::MisplacedEndMarker {
                name: head.marker_name().unwrap_or_default().to_string(),
            }),
            Some(_) => Ok(Self {
                kind: TokenKind::Concat(children),
            }),
        }
    }

    /// Builds a union. Declaration order is the tie-break between
    /// alternatives and is preserved as given.
    pub fn union(children: Vec<Token>) -> Result<Self, GrammarError> {
        if children.is_empty() {
            return Err(GrammarError::EmptyUnion);
        }
        if let Some(marker) = children.iter().find(|c| c.is_end_marker()) {
            return Err(GrammarError::MisplacedEndMarker {
                name: marker.marker_name().unwrap_or_default().to_string(),
            });
        }
        Ok(Self {
            kind: TokenKind::Union(children),
        })
    }

    /// A single item stays bare, several become a concatenation.
    pub fn sequence(mut items: Vec<Token>) -> Result<Self, GrammarError> {
        if items.len() == 1 {
            return Ok(items.remove(0));
        }
        Self::concat(items)
    }

    pub fn kind(&self) -> &TokenKind {
        &self.kind
    }

    pub fn is_end_marker(&self) -> bool {
        matches!(self.kind, TokenKind::EndVariable(_))
    }

    fn marker_name(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::EndVariable(name) => Some(name),
            _ => None,
        }
    }

    /// Calls `visit` with every variable name referenced anywhere in this
    /// expression, in declaration order.
    pub fn for_each_reference<'a>(&'a self, visit: &mut impl FnMut(&'a str)) {
        match &self.kind {
            TokenKind::Variable(name) => visit(name),
            TokenKind::Concat(children) | TokenKind::Union(children) => {
                for child in children {
                    child.for_each_reference(visit);
                }
            }
            TokenKind::Terminal(_) | TokenKind::EndVariable(_) => {}
        }
    }

    /// Variables this expression can expand before consuming any input.
    /// Used to reject left recursion.
    pub fn head_references(&self) -> Vec<&str> {
        let mut heads = Vec::new();
        self.collect_heads(&mut heads);
        heads
    }

    fn collect_heads<'a>(&'a self, heads: &mut Vec<&'a str>) {
        match &self.kind {
            TokenKind::Variable(name) => heads.push(name),
            TokenKind::Concat(children) => {
                if let Some(head) = children.first() {
                    head.collect_heads(heads);
                }
            }
            TokenKind::Union(children) => {
                for child in children {
                    child.collect_heads(heads);
                }
            }
            TokenKind::Terminal(_) | TokenKind::EndVariable(_) => {}
        }
    }
}

/// Meta characters of the grammar text format. A one-character name or
/// symbol that is one of these is displayed in its long form.
const META: &[char] = &['|', '"', '<', '>', '#', '(', ')', '/'];

fn is_compact(text: &str) -> bool {
    let mut chars = text.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if !c.is_whitespace() && !META.contains(&c))
}

/// The compact form writes one-character names and symbols bare, so a
/// terminal `A` and a variable `A` look the same. The alternate form (`{:#}`)
/// always writes terminals quoted and variables bracketed.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let alternate = f.alternate();
        let compact = |text: &str| !alternate && is_compact(text);
        match &self.kind {
            TokenKind::Terminal(s) if compact(s) => write!(f, "{}", s),
            TokenKind::Terminal(s) => write!(f, "{:?}", s),
            TokenKind::Variable(n) if compact(n) => write!(f, "{}", n),
            TokenKind::Variable(n) => write!(f, "<{}>", n),
            TokenKind::EndVariable(n) if compact(n) => write!(f, "/{}", n),
            TokenKind::EndVariable(n) => write!(f, "/<{}>", n),
            TokenKind::Concat(children) => children.iter().try_for_each(|c| fmt::Display::fmt(c, f)),
            TokenKind::Union(children) if children.len() == 1 => fmt::Display::fmt(&children[0], f),
            TokenKind::Union(children) => {
                write!(f, "(")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, "|")?;
                    }
                    fmt::Display::fmt(child, f)?;
                }
                write!(f, ")")
            }
        }
    }
}
