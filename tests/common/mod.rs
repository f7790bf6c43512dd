#![allow(dead_code)]

use atto::interpreter::{run_source_with_io, InterpreterError, ParseError, RunError, RunOptions};
use atto::Value;
use std::io::Cursor;

pub struct Outcome {
    pub result: Result<Option<Value>, RunError>,
    pub stdout: String,
}

pub fn run_with(source: &str, options: &RunOptions, input: &str) -> Outcome {
    let mut out = Vec::new();
    let mut input = Cursor::new(input.as_bytes().to_vec());
    let result = run_source_with_io(source, options, &mut out, &mut input);
    Outcome {
        result,
        stdout: String::from_utf8(out).expect("program output is not UTF-8"),
    }
}

/// Run with the prelude loaded and no input.
pub fn run(source: &str) -> Outcome {
    run_with(source, &RunOptions::default(), "")
}

/// Run without the prelude.
pub fn run_bare(source: &str) -> Outcome {
    let options = RunOptions {
        prelude: false,
        ..RunOptions::default()
    };
    run_with(source, &options, "")
}

/// Everything the program printed. Panics if it failed.
pub fn output(source: &str) -> String {
    let outcome = run(source);
    if let Err(e) = &outcome.result {
        panic!("program failed: {}\nsource: {}", e, source);
    }
    outcome.stdout
}

pub fn runtime_error(source: &str) -> InterpreterError {
    match run(source).result {
        Err(RunError::Runtime(e)) => e,
        other => panic!("expected a runtime error, got {:?}", other),
    }
}

pub fn parse_error(source: &str) -> ParseError {
    match run(source).result {
        Err(RunError::Parse(e)) => e,
        other => panic!("expected a parse error, got {:?}", other),
    }
}
