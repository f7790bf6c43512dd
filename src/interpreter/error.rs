use crate::diagnostic::{Diagnostic, Span};

#[derive(Debug, Clone, PartialEq)]
pub enum InterpreterError {
    UndefinedFunction { name: String, span: Span },
    ArityMismatch { name: String, expected: usize, found: usize, span: Span },
    TypeMismatch { message: String, span: Span },
    EmptySequence { op: &'static str, span: Span },
    RecursionLimit { limit: usize, span: Span },
    DivisionByZero { span: Span },
    Io { message: String, span: Span },
}

impl InterpreterError {
    pub fn undefined_function(name: impl Into<String>, span: Span) -> Self {
        Self::UndefinedFunction { name: name.into(), span }
    }

    pub fn arity_mismatch(name: impl Into<String>, expected: usize, found: usize, span: Span) -> Self {
        Self::ArityMismatch { name: name.into(), expected, found, span }
    }

    pub fn type_mismatch(message: impl Into<String>, span: Span) -> Self {
        Self::TypeMismatch { message: message.into(), span }
    }

    pub fn empty_sequence(op: &'static str, span: Span) -> Self {
        Self::EmptySequence { op, span }
    }

    pub fn recursion_limit(limit: usize, span: Span) -> Self {
        Self::RecursionLimit { limit, span }
    }

    pub fn division_by_zero(span: Span) -> Self {
        Self::DivisionByZero { span }
    }

    pub fn io(err: std::io::Error, span: Span) -> Self {
        Self::Io { message: err.to_string(), span }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Self::UndefinedFunction { name, span } => {
                Diagnostic::error(format!("undefined function `{}`", name))
                    .with_code("E0201")
                    .with_label(*span, "no function with this name")
            }
            Self::ArityMismatch { name, expected, found, span } => Diagnostic::error(format!(
                "`{}` takes {} argument{} but {} were supplied",
                name,
                expected,
                if *expected == 1 { "" } else { "s" },
                found
            ))
            .with_code("E0202")
            .with_label(*span, ""),
            Self::TypeMismatch { message, span } => {
                Diagnostic::error(format!("type mismatch: {}", message))
                    .with_code("E0203")
                    .with_label(*span, "")
            }
            Self::EmptySequence { op, span } => {
                Diagnostic::error(format!("`{}` of an empty list", op))
                    .with_code("E0204")
                    .with_label(*span, "this list is empty")
            }
            Self::RecursionLimit { limit, span } => {
                Diagnostic::error(format!("recursion limit of {} calls exceeded", limit))
                    .with_code("E0205")
                    .with_label(*span, "while calling this")
                    .with_help("raise the limit with `--max-depth`")
            }
            Self::DivisionByZero { span } => Diagnostic::error("division by zero")
                .with_code("E0207")
                .with_label(*span, "integer remainder by zero"),
            Self::Io { message, span } => Diagnostic::error(format!("i/o error: {}", message))
                .with_code("E0206")
                .with_label(*span, ""),
        }
    }
}

impl std::fmt::Display for InterpreterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InterpreterError::UndefinedFunction { name, .. } => {
                write!(f, "Undefined function: {}", name)
            }
            InterpreterError::ArityMismatch { name, expected, found, .. } => {
                write!(f, "Arity mismatch: {} expects {} arguments, got {}", name, expected, found)
            }
            InterpreterError::TypeMismatch { message, .. } => write!(f, "Type mismatch: {}", message),
            InterpreterError::EmptySequence { op, .. } => write!(f, "Empty sequence: {} of an empty list", op),
            InterpreterError::RecursionLimit { limit, .. } => {
                write!(f, "Recursion limit exceeded: {}", limit)
            }
            InterpreterError::DivisionByZero { .. } => write!(f, "Division by zero"),
            InterpreterError::Io { message, .. } => write!(f, "I/O error: {}", message),
        }
    }
}

impl std::error::Error for InterpreterError {}
