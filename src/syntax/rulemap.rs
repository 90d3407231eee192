//! Rule maps: a YAML or JSON mapping from variable name to its productions.
//!
//! ```yaml
//! $: [AB]
//! A: [0A1, "2"]
//! B: [1B, 3A]
//! ```
//!
//! Every character of a production string is one symbol, spaces and `#`
//! included. `<name>` and `"text"` work as in rule files.

use std::collections::{BTreeMap, HashSet};

use crate::errors::GrammarError;
use crate::grammar::Grammar;
use crate::syntax::parser::parse_production;
use crate::token::Token;

pub type RuleMap = BTreeMap<String, Vec<String>>;

pub fn parse_yaml(path: &str, source: &str) -> Result<Grammar, GrammarError> {
    let map: RuleMap = serde_yaml::from_str(source).map_err(|e| GrammarError::Format {
        path: path.to_string(),
        message: e.to_string(),
    })?;
    from_rule_map(path, &map)
}

pub fn parse_json(path: &str, source: &str) -> Result<Grammar, GrammarError> {
    let map: RuleMap = serde_json::from_str(source).map_err(|e| GrammarError::Format {
        path: path.to_string(),
        message: e.to_string(),
    })?;
    from_rule_map(path, &map)
}

/// Builds a grammar from an already deserialized rule map.
pub fn from_rule_map(path: &str, map: &RuleMap) -> Result<Grammar, GrammarError> {
    let rule_names: HashSet<&str> = map.keys().map(String::as_str).collect();
    let mut builder = Grammar::builder();
    for (name, productions) in map {
        let alternatives = productions
            .iter()
            .map(|production| {
                let label = format!("{}: {}", path, name);
                let items = parse_production(&label, production)?;
                Token::sequence(items.iter().map(|i| i.resolve(&rule_names)).collect())
            })
            .collect::<Result<Vec<_>, _>>()?;
        builder = builder.rule(name.as_str(), alternatives)?;
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_rule_map_matches_text_form() {
        let grammar = parse_yaml("g.yaml", "$: [AB]\nA: [0A1, \"2\"]\nB: [1B, 3A]\n").unwrap();
        assert_eq!(grammar.resolve("A").unwrap().to_string(), "(0A1|2)");
        assert_eq!(grammar.resolve("B").unwrap().to_string(), "(1B|3A)");
    }

    #[test]
    fn json_rule_map() {
        let grammar = parse_json("g.json", r#"{"$": ["<xx>y"], "xx": ["z"]}"#).unwrap();
        assert_eq!(grammar.resolve("$").unwrap().to_string(), "<xx>y");
    }

    #[test]
    fn comment_and_space_characters_are_symbols() {
        let grammar = parse_json("g.json", r##"{"$": ["a#b", "a b"]}"##).unwrap();
        assert_eq!(
            grammar.resolve("$").unwrap(),
            &Token::union(vec![
                Token::concat(vec![Token::terminal("a"), Token::terminal("#"), Token::terminal("b")]).unwrap(),
                Token::concat(vec![Token::terminal("a"), Token::terminal(" "), Token::terminal("b")]).unwrap(),
            ])
            .unwrap()
        );
    }

    #[test]
    fn malformed_document_is_a_format_error() {
        assert!(matches!(
            parse_yaml("g.yaml", "A: 12"),
            Err(GrammarError::Format { path, .. }) if path == "g.yaml"
        ));
    }

    #[test]
    fn rule_without_productions_is_rejected() {
        assert!(matches!(
            parse_json("g.json", r#"{"A": []}"#),
            Err(GrammarError::EmptyUnion)
        ));
    }
}
