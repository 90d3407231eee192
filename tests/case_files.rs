// Runs every YAML case file under tests/cases against the grammars in
// tests/grammars.

use std::fs;
use std::path::{Path, PathBuf};

use cfgpda::{load_grammar, run, Input, DEFAULT_START};
use serde::Deserialize;
use walkdir::WalkDir;

#[derive(Debug, Deserialize)]
struct Case {
    name: String,
    grammar: PathBuf,
    input: String,
    #[serde(default)]
    words: bool,
    start: Option<String>,
    accepted: bool,
    error: Option<String>,
    failed_step: Option<usize>,
}

fn tests_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests")
}

fn discover_case_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_type().is_file()
                && e.path()
                    .extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
        })
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();
    files
}

fn check_case(case: &Case) -> Result<(), String> {
    let grammar = load_grammar(tests_dir().join(&case.grammar)).map_err(|e| e.to_string())?;
    let input = if case.words {
        Input::words(&case.input)
    } else {
        Input::chars(&case.input)
    };
    let start = case.start.as_deref().unwrap_or(DEFAULT_START);
    let result = run(&grammar, start, &input);

    if result.accepted != case.accepted {
        return Err(format!("accepted = {}, error = {:?}", result.accepted, result.error));
    }
    if let Some(expected) = &case.error {
        let kind = result
            .error
            .as_ref()
            .and_then(|e| serde_json::to_value(e).ok())
            .and_then(|v| v["kind"].as_str().map(String::from));
        if kind.as_deref() != Some(expected.as_str()) {
            return Err(format!("error kind {:?}, expected {}", kind, expected));
        }
    }
    if case.failed_step.is_some() && result.failed_step != case.failed_step {
        return Err(format!("failed at {:?}, expected {:?}", result.failed_step, case.failed_step));
    }
    Ok(())
}

#[test]
fn yaml_cases_pass() {
    let files = discover_case_files(&tests_dir().join("cases"));
    assert!(!files.is_empty(), "no case files found");

    let mut failures = Vec::new();
    let mut count = 0;
    for file in files {
        let content = fs::read_to_string(&file).unwrap();
        let cases: Vec<Case> = serde_yaml::from_str(&content)
            .unwrap_or_else(|e| panic!("bad case file {}: {}", file.display(), e));
        for case in cases {
            count += 1;
            if let Err(reason) = check_case(&case) {
                failures.push(format!("{} / {}: {}", file.display(), case.name, reason));
            }
        }
    }

    assert!(count > 0);
    assert!(failures.is_empty(), "failing cases:\n{}", failures.join("\n"));
}
