//! Error types for grammar construction and recognition runs.
//!
//! `GrammarError` covers everything that can go wrong before a run starts
//! (building tokens, loading files, validating the registry). `MatchError`
//! covers the ways a run rejects its input. Both render through miette.

use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::Serialize;
use thiserror::Error;

use crate::token::Symbol;

// ============================================================================
// RUN-TIME ERRORS
// ============================================================================

/// Why a recognition run rejected its input. Every variant is fatal to the
/// current run.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchError {
    #[error("stack empty: no obligation left for the next input symbol")]
    #[diagnostic(
        code(cfgpda::run::stack_empty),
        help("the input is longer than any derivation the grammar allows")
    )]
    StackEmpty,

    #[error("invalid symbol: expected {expected:?}, got {got:?}")]
    #[diagnostic(code(cfgpda::run::symbol_mismatch))]
    SymbolMismatch { expected: Symbol, got: Symbol },

    #[error("{} wasn't expecting symbol {symbol:?} ({tried} alternatives tried)", describe_union(.variable))]
    #[diagnostic(code(cfgpda::run::no_alternative))]
    NoAlternativeMatched {
        symbol: Symbol,
        variable: Option<String>,
        tried: usize,
    },

    #[error("undefined variable '{name}'")]
    #[diagnostic(
        code(cfgpda::run::undefined_variable),
        help("every referenced variable needs a rule in the grammar")
    )]
    UndefinedVariable { name: String },

    #[error("Unexpected End: stack should be empty ({remaining} obligations left, next is {top})")]
    #[diagnostic(code(cfgpda::run::unconsumed_stack))]
    UnconsumedStack { remaining: usize, top: String },

    #[error("expansion limit of {limit} exceeded without consuming input")]
    #[diagnostic(
        code(cfgpda::run::expansion_limit),
        help("check the grammar for left recursion or raise the limit")
    )]
    ExpansionLimitExceeded { limit: usize },

    #[error("end marker for '{name}' reached the evaluator")]
    #[diagnostic(code(cfgpda::run::misplaced_end_marker))]
    MisplacedEndMarker { name: String },
}

fn describe_union(variable: &Option<String>) -> String {
    match variable {
        Some(name) => format!("variable '{}'", name),
        None => "union".to_string(),
    }
}

impl MatchError {
    /// True when the token simply cannot derive the symbol. These are the
    /// failures a union recovers from by trying its next alternative.
    pub fn is_mismatch(&self) -> bool {
        matches!(
            self,
            MatchError::SymbolMismatch { .. } | MatchError::NoAlternativeMatched { .. }
        )
    }

    /// Attributes an exhausted union to the variable whose definition it is.
    pub(crate) fn within_variable(self, name: &str) -> Self {
        match self {
            MatchError::NoAlternativeMatched {
                symbol,
                variable: None,
                tried,
            } => MatchError::NoAlternativeMatched {
                symbol,
                variable: Some(name.to_string()),
                tried,
            },
            other => other,
        }
    }
}

// ============================================================================
// CONSTRUCTION / LOAD-TIME ERRORS
// ============================================================================

/// A grammar that cannot be built, loaded, or validated.
#[derive(Debug, Error, Diagnostic)]
pub enum GrammarError {
    #[error("concatenation needs at least one child")]
    #[diagnostic(code(cfgpda::grammar::empty_concat))]
    EmptyConcat,

    #[error("union needs at least one alternative")]
    #[diagnostic(code(cfgpda::grammar::empty_union))]
    EmptyUnion,

    #[error("end marker for '{name}' in a position that must consume input")]
    #[diagnostic(
        code(cfgpda::grammar::misplaced_end_marker),
        help("end markers may only follow the first item of a production")
    )]
    MisplacedEndMarker { name: String },

    #[error("undefined variable '{name}' referenced by {referenced_by}")]
    #[diagnostic(code(cfgpda::grammar::undefined_variable))]
    UndefinedVariable { name: String, referenced_by: String },

    #[error("rule '{name}' is defined more than once")]
    #[diagnostic(code(cfgpda::grammar::duplicate_rule))]
    DuplicateRule { name: String },

    #[error("left recursion: {cycle}")]
    #[diagnostic(
        code(cfgpda::grammar::left_recursion),
        help("a variable must not derive itself before consuming a symbol")
    )]
    LeftRecursion { cycle: String },

    #[error("syntax error: {message}")]
    #[diagnostic(code(cfgpda::grammar::syntax))]
    Syntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("{label}")]
        span: SourceSpan,
        label: String,
    },

    #[error("invalid rule map in {path}: {message}")]
    #[diagnostic(
        code(cfgpda::grammar::format),
        help("expected a mapping from variable name to a list of productions")
    )]
    Format { path: String, message: String },

    #[error("failed to read {path}")]
    #[diagnostic(code(cfgpda::grammar::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
