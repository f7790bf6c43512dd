//! Two-pass parser.
//!
//! The first pass splits the token stream into `fn ... is ... fn` blocks and
//! records every function's parameter list. The second pass parses each body
//! against the complete name → arity table, so a call may refer to a
//! function defined later in the file.
//!
//! Arity belongs to the name, not to a particular definition: when a name is
//! defined twice, every call site uses the arity of the last definition.

use super::functions::{FunctionDef, FunctionTable};
use crate::ast::{Expr, ExprKind, Opcode, STACK_GROW_SIZE, STACK_RED_ZONE};
use crate::diagnostic::{Diagnostic, Span};
use crate::lexer::LexError;
use crate::token::{Token, FN, IF, IS};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
    pub found: Option<String>,
    pub help: Option<String>,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            found: None,
            help: None,
        }
    }

    pub fn with_found(mut self, found: impl Into<String>) -> Self {
        self.found = Some(found.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut message = self.message.clone();
        if let Some(found) = &self.found {
            message.push_str(&format!(", found `{}`", found));
        }
        let mut diag = Diagnostic::error(message)
            .with_code("E0101")
            .with_label(self.span, "");
        if let Some(help) = &self.help {
            diag = diag.with_help(help.clone());
        }
        diag
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Malformed source: {}", self.message)?;
        if let Some(found) = &self.found {
            write!(f, ", found `{}`", found)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::new("unterminated quote", err.span)
            .with_help("close the quote before the end of the file")
    }
}

/// A parsed program: every function, `main` included.
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub functions: FunctionTable,
}

impl Program {
    pub fn main(&self) -> Option<&Rc<FunctionDef>> {
        self.functions.get("main")
    }
}

/// One `fn name params is body fn` block found by the first pass.
struct Block<'t> {
    name: &'t Token,
    params: Vec<Rc<str>>,
    body: &'t [Token],
    close: Span,
}

/// Why an unquoted word cannot name a function or parameter.
fn reserved(token: &Token) -> Option<&'static str> {
    if token.quoted {
        return None;
    }
    if [FN, IS, IF].contains(&token.text.as_str()) {
        Some("reserved word")
    } else if Opcode::from_keyword(&token.text).is_some() {
        Some("built-in operation")
    } else {
        None
    }
}

fn check_binding_name(token: &Token, what: &str) -> Result<(), ParseError> {
    if token.quoted {
        return Err(ParseError::new(format!("{} must not be quoted", what), token.span)
            .with_found(token.to_string()));
    }
    if let Some(reason) = reserved(token) {
        return Err(ParseError::new(
            format!("`{}` is a {} and cannot be used as a {}", token.text, reason, what),
            token.span,
        ));
    }
    Ok(())
}

/// First pass: split the stream into blocks and check their shape.
fn scan_blocks(tokens: &[Token]) -> Result<Vec<Block<'_>>, ParseError> {
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let opener = &tokens[i];
        if !opener.is_keyword(FN) {
            return Err(
                ParseError::new("expected `fn` to start a function definition", opener.span)
                    .with_found(opener.to_string()),
            );
        }
        i += 1;

        let name = tokens.get(i).ok_or_else(|| {
            ParseError::new("expected a function name after `fn`", opener.span)
        })?;
        check_binding_name(name, "function name")?;
        i += 1;

        let mut params: Vec<Rc<str>> = Vec::new();
        let mut seen = HashSet::new();
        loop {
            let token = match tokens.get(i) {
                Some(token) if !token.is_keyword(FN) => token,
                _ => {
                    return Err(ParseError::new(
                        format!("expected `is` after the parameters of `{}`", name.text),
                        name.span,
                    )
                    .with_help("a definition reads `fn name param... is body fn`"))
                }
            };
            i += 1;
            if token.is_keyword(IS) {
                break;
            }
            check_binding_name(token, "parameter name")?;
            if !seen.insert(token.text.as_str()) {
                return Err(ParseError::new(
                    format!("parameter `{}` appears twice in `{}`", token.text, name.text),
                    token.span,
                ));
            }
            params.push(Rc::from(token.text.as_str()));
        }

        let start = i;
        while i < tokens.len() && !tokens[i].is_keyword(FN) {
            i += 1;
        }
        let close = match tokens.get(i) {
            Some(token) => token.span,
            None => {
                return Err(ParseError::new(
                    format!("missing closing `fn` for `{}`", name.text),
                    name.span,
                ))
            }
        };
        let body = &tokens[start..i];
        i += 1;

        if body.is_empty() {
            return Err(ParseError::new(
                format!("function `{}` has an empty body", name.text),
                close,
            ));
        }

        blocks.push(Block {
            name,
            params,
            body,
            close,
        });
    }

    Ok(blocks)
}

/// Parses one function body against a complete arity table.
struct BodyParser<'t> {
    tokens: &'t [Token],
    current: usize,
    function: &'t str,
    params: &'t [Rc<str>],
    arities: &'t HashMap<Rc<str>, usize>,
    close: Span,
}

impl<'t> BodyParser<'t> {
    fn advance(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.current)?;
        self.current += 1;
        Some(token)
    }

    fn parse_body(mut self) -> Result<Expr, ParseError> {
        let body = self.parse_expression()?;
        if let Some(extra) = self.tokens.get(self.current) {
            return Err(ParseError::new(
                format!("the body of `{}` holds more than one expression", self.function),
                extra.span,
            )
            .with_found(extra.to_string())
            .with_help("a function body is a single expression"));
        }
        Ok(body)
    }

    fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.parse_expression_inner())
    }

    fn parse_expression_inner(&mut self) -> Result<Expr, ParseError> {
        let token = match self.advance() {
            Some(token) => token,
            None => {
                return Err(ParseError::new(
                    format!("the body of `{}` ended while an expression was expected", self.function),
                    self.close,
                ))
            }
        };

        if token.quoted {
            return Ok(Expr::text(&token.text, token.span));
        }

        let text = token.text.as_str();
        if text == IF {
            let operands = self.parse_operands(token, 3)?;
            let Ok([condition, then_branch, else_branch]) = <[Expr; 3]>::try_from(operands) else {
                return Err(ParseError::new("`if` needs a condition and two branches", token.span));
            };
            return Ok(Expr::new(
                ExprKind::Conditional {
                    condition: Box::new(condition),
                    then_branch: Box::new(then_branch),
                    else_branch: Box::new(else_branch),
                },
                token.span,
            ));
        }
        if text == IS {
            return Err(ParseError::new("unexpected `is` in a function body", token.span)
                .with_help("quote the word to use it as data"));
        }
        if let Some(op) = Opcode::from_keyword(text) {
            let operands = self.parse_operands(token, op.arity())?;
            return Ok(Expr::new(ExprKind::Builtin { op, operands }, token.span));
        }
        if self.params.iter().any(|param| param.as_ref() == text) {
            return Ok(Expr::literal(text, token.span));
        }
        if let Some(&arity) = self.arities.get(text) {
            let args = self.parse_operands(token, arity)?;
            return Ok(Expr::new(
                ExprKind::Call {
                    name: Rc::from(text),
                    args,
                },
                token.span,
            ));
        }
        Ok(Expr::literal(text, token.span))
    }

    fn parse_operands(&mut self, owner: &Token, count: usize) -> Result<Vec<Expr>, ParseError> {
        let mut operands = Vec::with_capacity(count);
        for _ in 0..count {
            if self.current >= self.tokens.len() {
                return Err(ParseError::new(
                    format!(
                        "`{}` needs {} operand{} but the body of `{}` ends after {}",
                        owner.text,
                        count,
                        if count == 1 { "" } else { "s" },
                        self.function,
                        operands.len()
                    ),
                    owner.span,
                ));
            }
            operands.push(self.parse_expression()?);
        }
        Ok(operands)
    }
}

/// Parse a whole token stream into a program.
pub fn parse_program(tokens: &[Token]) -> Result<Program, ParseError> {
    let blocks = scan_blocks(tokens)?;

    let arities: HashMap<Rc<str>, usize> = blocks
        .iter()
        .map(|block| (Rc::from(block.name.text.as_str()), block.params.len()))
        .collect();

    let mut functions = FunctionTable::new();
    for block in &blocks {
        let parser = BodyParser {
            tokens: block.body,
            current: 0,
            function: &block.name.text,
            params: &block.params,
            arities: &arities,
            close: block.close,
        };
        let body = parser.parse_body()?;
        functions.register(FunctionDef {
            name: Rc::from(block.name.text.as_str()),
            params: block.params.clone(),
            body,
            span: block.name.span,
        });
    }

    Ok(Program { functions })
}
