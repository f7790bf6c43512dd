//! Arithmetic and comparison.
//!
//! Numbers are strings: operands are parsed on demand and results are
//! re-encoded with [`Value::number`].

use super::super::error::InterpreterError;
use crate::ast::Opcode;
use crate::diagnostic::Span;
use crate::value::Value;

fn number(value: &Value, op: Opcode, span: Span) -> Result<f64, InterpreterError> {
    value.as_number().ok_or_else(|| {
        InterpreterError::type_mismatch(
            format!("`{}` expects a number, got {} `{}`", op, value.type_name(), value),
            span,
        )
    })
}

fn integer(value: &Value, op: Opcode, span: Span) -> Result<i64, InterpreterError> {
    value.as_integer().ok_or_else(|| {
        InterpreterError::type_mismatch(
            format!("`{}` expects an integer, got {} `{}`", op, value.type_name(), value),
            span,
        )
    })
}

macro_rules! binary_math {
    ($name:ident, $op:expr, |$a:ident, $b:ident| $result:expr) => {
        pub fn $name(left: &Value, right: &Value, span: Span) -> Result<Value, InterpreterError> {
            let $a = number(left, $op, span)?;
            let $b = number(right, $op, span)?;
            Ok($result)
        }
    };
}

binary_math!(builtin_add, Opcode::Add, |a, b| Value::number(a + b));
binary_math!(builtin_multiply, Opcode::Multiply, |a, b| Value::number(a * b));
binary_math!(builtin_divide, Opcode::Divide, |a, b| Value::number(a / b));
binary_math!(builtin_less_than, Opcode::LessThan, |a, b| Value::Bool(a < b));
binary_math!(builtin_less_or_equal, Opcode::LessOrEqual, |a, b| Value::Bool(a <= b));

pub fn builtin_negate(value: &Value, span: Span) -> Result<Value, InterpreterError> {
    Ok(Value::number(-number(value, Opcode::Negate, span)?))
}

pub fn builtin_remainder(left: &Value, right: &Value, span: Span) -> Result<Value, InterpreterError> {
    let a = integer(left, Opcode::Remainder, span)?;
    let b = integer(right, Opcode::Remainder, span)?;
    if b == 0 {
        return Err(InterpreterError::division_by_zero(span));
    }
    Ok(Value::string(a.wrapping_rem(b).to_string()))
}
