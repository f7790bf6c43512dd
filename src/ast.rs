use crate::diagnostic::Span;
use crate::token::write_quoted;
use std::fmt;
use std::rc::Rc;

/// Remaining native stack below which tree walks switch to a fresh segment.
pub(crate) const STACK_RED_ZONE: usize = 128 * 1024;
/// Size of each segment `stacker` allocates.
pub(crate) const STACK_GROW_SIZE: usize = 4 * 1024 * 1024;

/// A built-in operation with a fixed operand count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    Negate,
    Add,
    Multiply,
    Divide,
    Remainder,
    LessThan,
    LessOrEqual,
    Equals,
    Head,
    Tail,
    Pair,
    Concatenate,
    Stringify,
    TokenizeWords,
    ReadLine,
    Print,
}

impl Opcode {
    pub const ALL: [Opcode; 16] = [
        Opcode::Negate,
        Opcode::Add,
        Opcode::Multiply,
        Opcode::Divide,
        Opcode::Remainder,
        Opcode::LessThan,
        Opcode::LessOrEqual,
        Opcode::Equals,
        Opcode::Head,
        Opcode::Tail,
        Opcode::Pair,
        Opcode::Concatenate,
        Opcode::Stringify,
        Opcode::TokenizeWords,
        Opcode::ReadLine,
        Opcode::Print,
    ];

    /// The source word for this opcode.
    pub fn keyword(self) -> &'static str {
        match self {
            Opcode::Negate => "negate",
            Opcode::Add => "add",
            Opcode::Multiply => "multiply",
            Opcode::Divide => "divide",
            Opcode::Remainder => "remainder",
            Opcode::LessThan => "lessThan",
            Opcode::LessOrEqual => "lessOrEqual",
            Opcode::Equals => "equals",
            Opcode::Head => "head",
            Opcode::Tail => "tail",
            Opcode::Pair => "pair",
            Opcode::Concatenate => "concatenate",
            Opcode::Stringify => "stringify",
            Opcode::TokenizeWords => "tokenizeWords",
            Opcode::ReadLine => "readLine",
            Opcode::Print => "print",
        }
    }

    pub fn from_keyword(word: &str) -> Option<Opcode> {
        Opcode::ALL.into_iter().find(|op| op.keyword() == word)
    }

    pub fn arity(self) -> usize {
        match self {
            Opcode::Negate
            | Opcode::Head
            | Opcode::Tail
            | Opcode::Stringify
            | Opcode::TokenizeWords
            | Opcode::ReadLine
            | Opcode::Print => 1,
            Opcode::Add
            | Opcode::Multiply
            | Opcode::Divide
            | Opcode::Remainder
            | Opcode::LessThan
            | Opcode::LessOrEqual
            | Opcode::Equals
            | Opcode::Pair
            | Opcode::Concatenate => 2,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    /// Span of the leading token.
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// A bound parameter, or the word itself when nothing is bound.
    Literal(Rc<str>),
    /// A quoted word. Never looked up.
    Text(Rc<str>),
    Conditional {
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    Builtin {
        op: Opcode,
        operands: Vec<Expr>,
    },
    Call {
        name: Rc<str>,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn literal(text: &str, span: Span) -> Self {
        Self::new(ExprKind::Literal(Rc::from(text)), span)
    }

    pub fn text(text: &str, span: Span) -> Self {
        Self::new(ExprKind::Text(Rc::from(text)), span)
    }
}

fn needs_quotes(text: &str) -> bool {
    text.is_empty()
        || text
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | '"' | '\''))
        || Opcode::from_keyword(text).is_some()
        || matches!(text, "fn" | "is" | "if")
}

fn write_word(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    if !needs_quotes(text) {
        f.write_str(text)
    } else {
        write_quoted(f, text)
    }
}

/// Nested trees are released on a grown stack, like they are walked.
impl Drop for Expr {
    fn drop(&mut self) {
        if matches!(self.kind, ExprKind::Literal(_) | ExprKind::Text(_)) {
            return;
        }
        let kind = std::mem::replace(&mut self.kind, ExprKind::Text(Rc::from("")));
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, move || drop(kind));
    }
}

/// Renders the expression back to prefix source. Nested forms are wrapped in
/// parentheses, which the tokenizer ignores.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.write_source(f))
    }
}

impl Expr {
    fn write_source(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Literal(text) => write_word(f, text),
            ExprKind::Text(text) => write_quoted(f, text),
            ExprKind::Conditional {
                condition,
                then_branch,
                else_branch,
            } => {
                write!(f, "if ")?;
                write_operand(f, condition)?;
                write!(f, " ")?;
                write_operand(f, then_branch)?;
                write!(f, " ")?;
                write_operand(f, else_branch)
            }
            ExprKind::Builtin { op, operands } => {
                write!(f, "{}", op)?;
                for operand in operands {
                    write!(f, " ")?;
                    write_operand(f, operand)?;
                }
                Ok(())
            }
            ExprKind::Call { name, args } => {
                write!(f, "{}", name)?;
                for arg in args {
                    write!(f, " ")?;
                    write_operand(f, arg)?;
                }
                Ok(())
            }
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr) -> fmt::Result {
    let compound = match &expr.kind {
        ExprKind::Literal(_) | ExprKind::Text(_) => false,
        ExprKind::Call { args, .. } => !args.is_empty(),
        ExprKind::Conditional { .. } | ExprKind::Builtin { .. } => true,
    };
    if compound {
        write!(f, "({})", expr)
    } else {
        write!(f, "{}", expr)
    }
}
