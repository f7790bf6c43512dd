//! Parse and runtime failures, and how they are reported.

mod common;

use atto::diagnostic::render_diagnostics;
use atto::interpreter::{run_source_with_io, InterpreterError, RunError, RunOptions};
use common::{parse_error, run, runtime_error};
use std::io::Cursor;

// =============================================================================
// PARSE ERRORS
// =============================================================================

#[test]
fn test_missing_closing_fn() {
    let err = parse_error(r#"fn main is print "hi""#);
    assert!(err.message.contains("missing closing `fn`"));
}

#[test]
fn test_missing_is() {
    let err = parse_error("fn main x y fn");
    assert!(err.message.contains("expected `is`"));
}

#[test]
fn test_fn_at_end_of_input() {
    let err = parse_error("fn main is x fn fn");
    assert!(err.message.contains("function name"));
}

#[test]
fn test_empty_body() {
    assert!(parse_error("fn main is fn").message.contains("empty body"));
}

#[test]
fn test_operands_run_out() {
    assert!(parse_error(r#"fn main is add "1" fn"#).message.contains("needs 2 operands"));
    assert!(parse_error(r#"fn main is if true "a" fn"#).message.contains("needs 3 operands"));
    assert!(parse_error("fn main is pick a fn fn pick x y is x fn").message.contains("needs 2 operands"));
}

#[test]
fn test_extra_tokens_in_body() {
    let err = parse_error(r#"fn main is print "a" "b" fn"#);
    assert!(err.message.contains("more than one expression"));
}

#[test]
fn test_stray_top_level_token() {
    let err = parse_error(r#"print "hi""#);
    assert!(err.message.contains("expected `fn`"));
}

#[test]
fn test_bad_names() {
    assert!(parse_error("fn add x is x fn").message.contains("built-in operation"));
    assert!(parse_error("fn f is is x fn").message.contains("unexpected `is`"));
    assert!(parse_error("fn f if is x fn").message.contains("reserved word"));
    assert!(parse_error("fn f x x is x fn").message.contains("appears twice"));
    assert!(parse_error(r#"fn "f" is x fn"#).message.contains("must not be quoted"));
}

#[test]
fn test_unterminated_quote() {
    let err = parse_error(r#"fn main is print "oops fn"#);
    assert!(err.to_string().contains("unterminated quote"));
}

#[test]
fn test_parse_error_runs_nothing() {
    let outcome = run(r#"fn main is print "a" fn fn broken is negate fn"#);
    assert!(matches!(outcome.result, Err(RunError::Parse(_))));
    assert_eq!(outcome.stdout, "");
}

// =============================================================================
// RUNTIME ERRORS
// =============================================================================

#[test]
fn test_arithmetic_on_words() {
    let err = runtime_error(r#"fn main is add "two" "3" fn"#);
    assert!(matches!(err, InterpreterError::TypeMismatch { .. }));
    assert!(err.to_string().contains("`add` expects a number"));
}

#[test]
fn test_arithmetic_on_lists() {
    let err = runtime_error(r#"fn main is multiply (pair "1" "2") "3" fn"#);
    assert!(matches!(err, InterpreterError::TypeMismatch { .. }));
}

#[test]
fn test_head_of_string() {
    let err = runtime_error(r#"fn main is head "abc" fn"#);
    assert!(matches!(err, InterpreterError::TypeMismatch { .. }));
}

#[test]
fn test_head_and_tail_of_empty_list() {
    assert!(matches!(
        runtime_error("fn main is head empty fn"),
        InterpreterError::EmptySequence { op: "head", .. }
    ));
    assert!(matches!(
        runtime_error("fn main is tail empty fn"),
        InterpreterError::EmptySequence { op: "tail", .. }
    ));
}

#[test]
fn test_if_on_non_boolean() {
    let err = runtime_error(r#"fn main is if "yes" "a" "b" fn"#);
    assert!(matches!(err, InterpreterError::TypeMismatch { .. }));
}

#[test]
fn test_remainder_by_zero() {
    let err = runtime_error(r#"fn main is remainder "5" "0" fn"#);
    assert!(matches!(err, InterpreterError::DivisionByZero { .. }));
}

#[test]
fn test_divide_by_zero_is_infinite() {
    assert_eq!(common::output(r#"fn main is print divide "1" "0" fn"#), "inf\n");
}

#[test]
fn test_output_before_error_is_kept() {
    let outcome = run(r#"fn main is pair (print "first") (head "oops") fn"#);
    assert!(outcome.result.is_err());
    assert_eq!(outcome.stdout, "first\n");
}

#[test]
fn test_unbounded_recursion_is_an_error() {
    let options = RunOptions {
        max_depth: 500,
        ..RunOptions::default()
    };
    let mut out = Vec::new();
    let mut input = Cursor::new(Vec::new());
    let result = run_source_with_io("fn spin is spin fn fn main is spin fn", &options, &mut out, &mut input);
    assert!(matches!(
        result,
        Err(RunError::Runtime(InterpreterError::RecursionLimit { limit: 500, .. }))
    ));
}

#[test]
fn test_default_recursion_limit_does_not_crash() {
    let err = runtime_error("fn spin x is spin x fn fn main is spin a fn");
    assert!(matches!(err, InterpreterError::RecursionLimit { limit: 10_000, .. }));
}

// =============================================================================
// DIAGNOSTICS
// =============================================================================

fn rendered(source: &str) -> String {
    let err = run(source).result.unwrap_err();
    render_diagnostics(source, "prog.at", &[err.to_diagnostic()], false)
}

#[test]
fn test_runtime_diagnostic_points_at_source() {
    let source = "fn main is\n  head tail tail pair a b\nfn";
    let text = rendered(source);
    assert!(text.contains("error[E0204]"), "{}", text);
    assert!(text.contains("prog.at:2:3"), "{}", text);
    assert!(text.ends_with("error: aborting due to 1 error\n"));
}

#[test]
fn test_parse_diagnostic_has_code() {
    let text = rendered("fn main is add x fn");
    assert!(text.contains("error[E0101]"), "{}", text);
    assert!(text.contains("prog.at:1:12"), "{}", text);
}

#[test]
fn test_error_codes() {
    let cases = [
        (r#"fn main is add "x" "1" fn"#, "E0203"),
        ("fn main is head empty fn", "E0204"),
        (r#"fn main is remainder "1" "0" fn"#, "E0207"),
    ];
    for (source, code) in cases {
        let err = run(source).result.unwrap_err();
        assert_eq!(err.to_diagnostic().code, Some(code), "{}", source);
    }
}
