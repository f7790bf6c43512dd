pub mod builtins;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod parser;

pub use environment::Environment;
pub use error::InterpreterError;
pub use evaluator::{
    load_program, run_source, run_source_with_io, Interpreter, RunError, RunOptions, DEFAULT_MAX_DEPTH,
};
pub use functions::{FunctionDef, FunctionTable};
pub use parser::{parse_program, ParseError, Program};
