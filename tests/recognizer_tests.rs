//! End-to-end recognition runs over hand-built grammars.

use cfgpda::runtime::{EventBuffer, MachineOptions};
use cfgpda::{run, Grammar, Input, MatchError, Recognizer, Token};

fn t(s: &str) -> Token {
    Token::terminal(s)
}

fn v(s: &str) -> Token {
    Token::variable(s)
}

fn seq(items: Vec<Token>) -> Token {
    Token::sequence(items).unwrap()
}

/// $ -> AB, A -> 0A1 | 2, B -> 1B | 3A
fn sample() -> Grammar {
    Grammar::builder()
        .rule("$", vec![seq(vec![v("A"), v("B")])])
        .unwrap()
        .rule("A", vec![seq(vec![t("0"), v("A"), t("1")]), t("2")])
        .unwrap()
        .rule("B", vec![seq(vec![t("1"), v("B")]), seq(vec![t("3"), v("A")])])
        .unwrap()
        .build()
        .unwrap()
}

fn stacks(result: &cfgpda::RunResult) -> Vec<String> {
    result
        .trace
        .iter()
        .map(|step| step.stack.iter().map(Token::to_string).collect())
        .collect()
}

#[test]
fn worked_example_is_accepted_with_documented_trace() {
    let result = run(&sample(), "$", &Input::chars("021300211"));

    assert!(result.accepted);
    assert_eq!(result.error, None);
    assert!(result.remaining.is_empty());
    assert_eq!(result.initial_stack.len(), 1);
    assert_eq!(result.initial_stack[0].to_string(), "AB");
    assert_eq!(
        stacks(&result),
        vec!["A1B", "1B", "B", "A", "A1", "A11", "11", "1", ""]
    );
    let steps: Vec<usize> = result.trace.iter().map(|s| s.step).collect();
    assert_eq!(steps, (0..9).collect::<Vec<_>>());
    let symbols: String = result.trace.iter().map(|s| s.symbol.as_str()).collect();
    assert_eq!(symbols, "021300211");
}

#[test]
fn wrong_second_symbol_rejects_at_step_one() {
    let result = run(&sample(), "$", &Input::chars("031300211"));

    assert!(!result.accepted);
    assert_eq!(result.failed_step, Some(1));
    let err = result.error.clone().unwrap();
    assert!(err.is_mismatch());
    assert_eq!(
        err,
        MatchError::NoAlternativeMatched {
            symbol: "3".into(),
            variable: Some("A".into()),
            tried: 2,
        }
    );
    // Only the failing pop is consumed: A is gone, 1B remains.
    assert_eq!(result.remaining, vec![t("1"), v("B")]);
    assert_eq!(stacks(&result), vec!["A1B"]);
}

#[test]
fn terminal_on_top_reports_symbol_mismatch() {
    let result = run(&sample(), "$", &Input::chars("022"));
    assert_eq!(result.failed_step, Some(2));
    assert_eq!(
        result.error,
        Some(MatchError::SymbolMismatch {
            expected: "1".into(),
            got: "2".into(),
        })
    );
    assert_eq!(result.remaining, vec![v("B")]);
}

#[test]
fn truncated_input_leaves_unconsumed_stack() {
    let result = run(&sample(), "$", &Input::chars("0213"));
    assert!(!result.accepted);
    assert_eq!(result.failed_step, None);
    assert_eq!(
        result.error,
        Some(MatchError::UnconsumedStack {
            remaining: 1,
            top: "A".into(),
        })
    );
    assert_eq!(result.remaining, vec![v("A")]);
}

#[test]
fn input_past_derivation_underflows_stack() {
    let result = run(&sample(), "$", &Input::chars("0213002111"));
    assert_eq!(result.error, Some(MatchError::StackEmpty));
    assert_eq!(result.failed_step, Some(9));
    assert_eq!(result.trace.len(), 9);
}

#[test]
fn empty_input_is_rejected_when_start_needs_symbols() {
    let result = run(&sample(), "$", &Input::chars(""));
    assert!(matches!(result.error, Some(MatchError::UnconsumedStack { .. })));
}

#[test]
fn union_always_commits_to_first_declared_alternative() {
    // S -> 01 | 02: both alternatives start with 0.
    let grammar = Grammar::builder()
        .rule("$", vec![v("S")])
        .unwrap()
        .rule("S", vec![seq(vec![t("0"), t("1")]), seq(vec![t("0"), t("2")])])
        .unwrap()
        .build()
        .unwrap();

    assert!(run(&grammar, "$", &Input::chars("01")).accepted);

    // "02" is in the language, but the first alternative was taken on "0"
    // and is never revisited.
    let result = run(&grammar, "$", &Input::chars("02"));
    assert_eq!(stacks(&result), vec!["1"]);
    assert_eq!(result.failed_step, Some(1));
    assert_eq!(
        result.error,
        Some(MatchError::SymbolMismatch {
            expected: "1".into(),
            got: "2".into(),
        })
    );
}

#[test]
fn missing_start_variable_fails_fast() {
    let result = run(&Grammar::default(), "$", &Input::chars("021"));
    assert_eq!(
        result.error,
        Some(MatchError::UndefinedVariable { name: "$".into() })
    );
    assert!(result.trace.is_empty());

    let result = run(&sample(), "S", &Input::chars("021"));
    assert_eq!(
        result.error,
        Some(MatchError::UndefinedVariable { name: "S".into() })
    );
}

#[test]
fn left_recursion_in_unchecked_grammar_hits_limit() {
    let grammar = Grammar::unchecked(vec![(
        "$".to_string(),
        Token::union(vec![seq(vec![v("$"), t("a")]), t("b")]).unwrap(),
    )]);
    let options = MachineOptions {
        max_depth: 50,
        ..MachineOptions::default()
    };
    let result = Recognizer::new(&grammar)
        .with_options(options)
        .run("$", &Input::chars("ba"));
    assert_eq!(result.failed_step, Some(0));
    assert_eq!(
        result.error,
        Some(MatchError::ExpansionLimitExceeded { limit: 50 })
    );
}

#[test]
fn end_markers_produce_parse_tree_events() {
    let grammar = sample().with_end_markers().unwrap();
    let mut events = EventBuffer::new();
    let result = Recognizer::new(&grammar).run_with_sink("$", &Input::chars("021300211"), &mut events);

    assert!(result.accepted);
    assert_eq!(
        events.markup(),
        "<$><A>0<A>2</A>1</A><B>3<A>0<A>0<A>2</A>1</A>1</A></B></$>"
    );
}

#[test]
fn word_symbols() {
    let grammar = Grammar::builder()
        .rule("$", vec![seq(vec![t("if"), v("cond"), t("then")])])
        .unwrap()
        .rule("cond", vec![t("true"), t("false")])
        .unwrap()
        .build()
        .unwrap();
    assert!(run(&grammar, "$", &Input::words("if false then")).accepted);
    assert!(!run(&grammar, "$", &Input::words("if maybe then")).accepted);
}

#[test]
fn runs_share_one_grammar_across_threads() {
    let grammar = sample();
    let inputs = ["021300211", "213021", "0213", "031300211"];
    let verdicts: Vec<bool> = std::thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|input| {
                let grammar = &grammar;
                scope.spawn(move || Recognizer::new(grammar).accepts("$", &Input::chars(input)))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(verdicts, vec![true, true, false, false]);
}
