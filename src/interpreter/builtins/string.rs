use crate::ast::{Expr, ExprKind};
use crate::lexer::split_words;
use crate::value::Value;

pub fn builtin_concatenate(left: &Value, right: &Value) -> Value {
    Value::string(format!("{}{}", left, right))
}

/// The operand as written, without evaluating it. A single word comes back
/// as its token text, with any quotes already stripped by the tokenizer.
pub fn builtin_stringify(operand: &Expr) -> Value {
    match &operand.kind {
        ExprKind::Literal(text) | ExprKind::Text(text) => Value::String(text.clone()),
        _ => Value::string(operand.to_string()),
    }
}

/// Split the display form of a value into words, honouring quotes.
pub fn builtin_tokenize_words(value: &Value) -> Value {
    let words = split_words(&value.to_string())
        .into_iter()
        .map(Value::string)
        .collect();
    Value::list(words)
}
