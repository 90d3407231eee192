//! Handles all user-facing output for the CLI.
//!
//! Rendering is split from printing: the `render_*` functions build plain
//! strings (and are what the tests check), the `print_*` functions add color
//! and write to the terminal.

use std::io::Write;

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::runtime::RunResult;
use crate::token::{Token, TokenKind};

// ============================================================================
// RENDERING
// ============================================================================

fn render_stack(stack: &[Token]) -> String {
    stack.iter().map(Token::to_string).collect()
}

/// The automaton trace, one line per configuration:
///
/// ```text
/// - '$' |- AB
/// 0 '0' |- A1B
/// ```
pub fn render_trace(result: &RunResult) -> String {
    let mut out = format!("- '{}' |- {}\n", result.start, render_stack(&result.initial_stack));
    for step in &result.trace {
        out.push_str(&format!(
            "{} '{}' |- {}\n",
            step.step,
            step.symbol,
            render_stack(&step.stack)
        ));
    }
    out
}

/// One line: acceptance or the reason for rejection.
pub fn render_verdict(result: &RunResult, input: &[String]) -> String {
    match (&result.error, result.failed_step) {
        (None, _) => "string accepted!".to_string(),
        (Some(err), Some(step)) => {
            let symbol = input.get(step).map(String::as_str).unwrap_or_default();
            format!("rejected at step {} '{}': {}", step, symbol, err)
        }
        (Some(err), None) => format!("rejected: {}", err),
    }
}

/// `A -> 0A1 | 2`, or `<A> -> "0"<A>"1" | "2"` when `explicit`.
pub fn render_rule(name: &str, definition: &Token, explicit: bool) -> String {
    let show = |token: &Token| {
        if explicit {
            format!("{:#}", token)
        } else {
            token.to_string()
        }
    };
    let alternatives = match definition.kind() {
        TokenKind::Union(children) => children.iter().map(show).collect::<Vec<_>>().join(" | "),
        _ => show(definition),
    };
    format!("{} -> {}", show(&Token::variable(name)), alternatives)
}

// ============================================================================
// PRINTING
// ============================================================================

/// Prints the trace and verdict for a finished run.
pub fn print_run(result: &RunResult, input: &[String], markup: Option<&str>) {
    print!("{}", render_trace(result));
    if let Some(markup) = markup {
        println!("{}", markup);
    }

    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let color = if result.accepted { Color::Green } else { Color::Red };
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
    let _ = writeln!(stdout, "{}", render_verdict(result, input));
    let _ = stdout.reset();
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    result: &'a RunResult,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    markup: Option<&'a str>,
}

/// Prints the run result as pretty JSON.
pub fn print_json(result: &RunResult, input: &[String], markup: Option<&str>) -> serde_json::Result<()> {
    let report = JsonReport {
        result,
        message: render_verdict(result, input),
        markup,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Prints a loaded grammar, one rule per line.
pub fn print_rules<'a>(rules: impl Iterator<Item = (&'a str, &'a Token)>, explicit: bool) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true));
    let _ = writeln!(stdout, "grammar ok");
    let _ = stdout.reset();
    for (name, definition) in rules {
        println!("{}", render_rule(name, definition, explicit));
    }
}
