use std::io::{BufRead, Write};

use super::super::error::InterpreterError;
use crate::diagnostic::Span;
use crate::value::Value;

/// Write the value and a newline, then hand the value back.
pub fn builtin_print(value: Value, out: &mut dyn Write, span: Span) -> Result<Value, InterpreterError> {
    writeln!(out, "{}", value).map_err(|e| InterpreterError::io(e, span))?;
    out.flush().map_err(|e| InterpreterError::io(e, span))?;
    Ok(value)
}

/// Show the prompt (no newline) and read one line. End of input reads as "".
pub fn builtin_read_line(
    prompt: &Value,
    out: &mut dyn Write,
    input: &mut dyn BufRead,
    span: Span,
) -> Result<Value, InterpreterError> {
    write!(out, "{}", prompt).map_err(|e| InterpreterError::io(e, span))?;
    out.flush().map_err(|e| InterpreterError::io(e, span))?;

    let mut line = String::new();
    input.read_line(&mut line).map_err(|e| InterpreterError::io(e, span))?;
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(Value::string(line))
}
