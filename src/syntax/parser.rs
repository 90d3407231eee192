//! Rule file parser.
//!
//! Turns the text format described in `grammar.pest` into a validated
//! [`Grammar`]. Parsing is two-pass: rules are collected first, so that a
//! bare character can be classified as a variable or a terminal once every
//! rule name is known.

use std::collections::HashSet;

use miette::{NamedSource, SourceSpan};
use pest::{error::InputLocation, iterators::Pair, Parser};
use pest_derive::Parser;

use crate::errors::GrammarError;
use crate::grammar::Grammar;
use crate::token::Token;

#[derive(Parser)]
#[grammar = "syntax/grammar.pest"]
struct RuleFileParser;

// ============================================================================
// PUBLIC API
// ============================================================================

/// One item of a production before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    /// `<name>`: always a variable.
    Named(String),
    /// `"text"`: always a single terminal.
    Quoted(String),
    /// A bare character: a variable if a rule of that name exists.
    Single(String),
}

impl Item {
    pub fn resolve(&self, rule_names: &HashSet<&str>) -> Token {
        match self {
            Item::Named(name) => Token::variable(name.as_str()),
            Item::Quoted(text) => Token::terminal(text.as_str()),
            Item::Single(c) if rule_names.contains(c.as_str()) => Token::variable(c.as_str()),
            Item::Single(c) => Token::terminal(c.as_str()),
        }
    }
}

/// Parses and validates a rule file. `name` labels diagnostics.
pub fn parse_grammar(name: &str, source: &str) -> Result<Grammar, GrammarError> {
    let text = SourceText { name, source };
    let rules = collect_rules(&text)?;
    let rule_names: HashSet<&str> = rules.iter().map(|r| r.name.as_str()).collect();

    let mut builder = Grammar::builder();
    for rule in &rules {
        let alternatives = rule
            .alternatives
            .iter()
            .map(|items| Token::sequence(items.iter().map(|i| i.resolve(&rule_names)).collect()))
            .collect::<Result<Vec<_>, _>>()?;
        builder = builder.rule(rule.name.as_str(), alternatives)?;
    }
    builder.build()
}

/// Parses one rule-map production such as `0A1` or `<term>+<expr>`. Spaces
/// and `#` are symbols here, not separators or comments.
pub fn parse_production(name: &str, source: &str) -> Result<Vec<Item>, GrammarError> {
    let text = SourceText { name, source };
    let mut pairs = RuleFileParser::parse(Rule::compact_production, source)
        .map_err(|e| text.convert_parse_error(e))?;
    match pairs.next() {
        Some(production) => Ok(build_items(production)),
        None => Err(text.error("empty production", "expected at least one symbol", (0, 0))),
    }
}

// ============================================================================
// COLLECTION
// ============================================================================

struct RawRule {
    name: String,
    alternatives: Vec<Vec<Item>>,
}

fn collect_rules(text: &SourceText) -> Result<Vec<RawRule>, GrammarError> {
    let pairs = RuleFileParser::parse(Rule::file, text.source).map_err(|e| text.convert_parse_error(e))?;

    let mut rules = Vec::new();
    let mut seen = HashSet::new();
    for pair in pairs.flat_map(|file| file.into_inner()) {
        if pair.as_rule() != Rule::rule {
            continue;
        }
        let span = pair.as_span();
        let mut inner = pair.into_inner();
        let (Some(head), Some(alternatives)) = (inner.next(), inner.next()) else {
            return Err(text.error("malformed rule", "here", (span.start(), span.end())));
        };

        let name = head_name(head);
        if !seen.insert(name.clone()) {
            return Err(text.error(
                format!("rule '{}' is defined more than once", name),
                "redefined here",
                (span.start(), span.end()),
            ));
        }

        rules.push(RawRule {
            name,
            alternatives: alternatives.into_inner().map(build_items).collect(),
        });
    }
    Ok(rules)
}

fn head_name(head: Pair<Rule>) -> String {
    head.into_inner()
        .next()
        .map(|item| match item.as_rule() {
            Rule::named => strip_delimiters(item.as_str()).to_string(),
            _ => item.as_str().to_string(),
        })
        .unwrap_or_default()
}

fn build_items(production: Pair<Rule>) -> Vec<Item> {
    production
        .into_inner()
        .filter_map(|item| match item.as_rule() {
            Rule::named => Some(Item::Named(strip_delimiters(item.as_str()).to_string())),
            Rule::quoted => Some(Item::Quoted(unescape(strip_delimiters(item.as_str())))),
            Rule::single | Rule::symbol => Some(Item::Single(item.as_str().to_string())),
            _ => None,
        })
        .collect()
}

/// Drops the first and last character: `<name>` or `"text"`.
fn strip_delimiters(text: &str) -> &str {
    let mut chars = text.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}

fn unescape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some(other) => result.push(other),
            None => result.push('\\'),
        }
    }
    result
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

struct SourceText<'a> {
    name: &'a str,
    source: &'a str,
}

impl SourceText<'_> {
    fn error(&self, message: impl Into<String>, label: &str, (start, end): (usize, usize)) -> GrammarError {
        GrammarError::Syntax {
            message: message.into(),
            src: NamedSource::new(self.name, self.source.to_string()),
            span: SourceSpan::from((start, end.saturating_sub(start))),
            label: label.to_string(),
        }
    }

    fn convert_parse_error(&self, error: pest::error::Error<Rule>) -> GrammarError {
        let (start, end) = match error.location {
            InputLocation::Pos(pos) => (pos, pos),
            InputLocation::Span(span) => span,
        };
        let message = if self.source[start.min(self.source.len())..].starts_with('"') {
            "unterminated or empty quoted terminal".to_string()
        } else {
            error.variant.message().to_string()
        };
        self.error(message, "here", (start, end))
    }
}
