use super::super::error::InterpreterError;
use super::with_list;
use crate::diagnostic::Span;
use crate::value::Value;

pub fn builtin_head(value: &Value, span: Span) -> Result<Value, InterpreterError> {
    with_list!(value, "head", span, |items: &[Value]| {
        items
            .first()
            .cloned()
            .ok_or_else(|| InterpreterError::empty_sequence("head", span))
    })
}

pub fn builtin_tail(value: &Value, span: Span) -> Result<Value, InterpreterError> {
    with_list!(value, "tail", span, |items: &[Value]| {
        if items.is_empty() {
            Err(InterpreterError::empty_sequence("tail", span))
        } else {
            Ok(Value::list(items[1..].to_vec()))
        }
    })
}

pub fn builtin_pair(left: Value, right: Value) -> Value {
    Value::list(vec![left, right])
}

/// Deep structural equality. Values of different kinds are never equal.
pub fn builtin_equals(left: &Value, right: &Value) -> Value {
    Value::Bool(left == right)
}
