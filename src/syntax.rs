//! Grammar loading.
//!
//! Two source formats are supported: rule files (`parser`) and YAML/JSON rule
//! maps (`rulemap`). Both produce a validated [`Grammar`].

pub mod parser;
pub mod rulemap;

use std::{fs, path::Path};

use crate::errors::GrammarError;
use crate::grammar::Grammar;

pub use parser::{parse_grammar, parse_production, Item};

/// Source format of a grammar file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarFormat {
    RuleFile,
    Yaml,
    Json,
}

impl GrammarFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => GrammarFormat::Yaml,
            Some("json") => GrammarFormat::Json,
            _ => GrammarFormat::RuleFile,
        }
    }
}

/// Parses `source` in the given format. `name` labels diagnostics.
pub fn parse_source(name: &str, source: &str, format: GrammarFormat) -> Result<Grammar, GrammarError> {
    match format {
        GrammarFormat::RuleFile => parser::parse_grammar(name, source),
        GrammarFormat::Yaml => rulemap::parse_yaml(name, source),
        GrammarFormat::Json => rulemap::parse_json(name, source),
    }
}

/// Reads and parses a grammar file.
pub fn load_grammar<P: AsRef<Path>>(path: P) -> Result<Grammar, GrammarError> {
    let path = path.as_ref();
    let name = path.display().to_string();
    let source = fs::read_to_string(path).map_err(|source| GrammarError::Io {
        path: name.clone(),
        source,
    })?;
    parse_source(&name, &source, GrammarFormat::from_path(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(GrammarFormat::from_path(Path::new("a.yml")), GrammarFormat::Yaml);
        assert_eq!(GrammarFormat::from_path(Path::new("a.json")), GrammarFormat::Json);
        assert_eq!(GrammarFormat::from_path(Path::new("a.cfg")), GrammarFormat::RuleFile);
        assert_eq!(GrammarFormat::from_path(Path::new("rules")), GrammarFormat::RuleFile);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            load_grammar("does/not/exist.cfg"),
            Err(GrammarError::Io { .. })
        ));
    }
}
