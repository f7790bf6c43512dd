pub mod ast;
pub mod cli;
pub mod config;
pub mod diagnostic;
pub mod interpreter;
pub mod lexer;
pub mod prelude;
pub mod token;
pub mod value;

pub use ast::{Expr, ExprKind, Opcode};
pub use token::Token;
pub use value::Value;
