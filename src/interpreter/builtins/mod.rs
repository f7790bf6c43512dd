//! Built-in operations.
//!
//! Operations are organized into categories:
//! - **Math**: `negate`, `add`, `multiply`, `divide`, `remainder`, `lessThan`, `lessOrEqual`
//! - **List**: `head`, `tail`, `pair`, `equals`
//! - **String**: `concatenate`, `stringify`, `tokenizeWords`
//! - **IO**: `print`, `readLine`
//!
//! Every function here receives already-evaluated operands, except
//! `stringify`, which the evaluator handles on the unevaluated tree.

mod io;
mod list;
mod math;
mod string;

pub use io::*;
pub use list::*;
pub use math::*;
pub use string::*;

/// Unwrap a list operand or fail with a type mismatch naming the opcode.
/// Callers must have `Value` and `InterpreterError` in scope.
macro_rules! with_list {
    ($value:expr, $op:expr, $span:expr, $body:expr) => {
        match $value {
            Value::List(items) => $body(&items[..]),
            other => Err(InterpreterError::type_mismatch(
                format!("`{}` expects a list, got {} `{}`", $op, other.type_name(), other),
                $span,
            )),
        }
    };
}

pub(crate) use with_list;
