use super::builtins;
use super::environment::Environment;
use super::error::InterpreterError;
use super::functions::{FunctionDef, FunctionTable};
use super::parser::{parse_program, ParseError, Program};
use crate::ast::{Expr, ExprKind, Opcode, STACK_GROW_SIZE, STACK_RED_ZONE};
use crate::diagnostic::{Diagnostic, Span};
use crate::lexer::tokenize;
use crate::prelude::PRELUDE;
use crate::token::Token;
use crate::value::Value;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

/// Default limit on nested user-function calls.
pub const DEFAULT_MAX_DEPTH: usize = 10_000;

pub struct Interpreter<'a> {
    functions: &'a FunctionTable,
    out: &'a mut dyn Write,
    input: &'a mut dyn BufRead,
    verbose: bool,
    max_depth: usize,
    depth: usize,
}

impl<'a> Interpreter<'a> {
    pub fn new(functions: &'a FunctionTable, out: &'a mut dyn Write, input: &'a mut dyn BufRead) -> Self {
        Self {
            functions,
            out,
            input,
            verbose: false,
            max_depth: DEFAULT_MAX_DEPTH,
            depth: 0,
        }
    }

    /// Trace every call to stderr.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Run `main` if the program has one. A program without `main` does nothing.
    pub fn run(&mut self) -> Result<Option<Value>, InterpreterError> {
        let Some(main) = self.functions.get("main").cloned() else {
            self.trace("no `main` function, nothing to run");
            return Ok(None);
        };
        if main.arity() != 0 {
            return Err(InterpreterError::arity_mismatch("main", main.arity(), 0, main.span));
        }
        let top = Rc::new(Environment::new());
        let value = self.call(&main, Vec::new(), main.span, &top)?;
        if self.verbose {
            self.trace(&format!("`main` returned {}", value));
        }
        Ok(Some(value))
    }

    pub fn evaluate(&mut self, expr: &Expr, env: &Rc<Environment>) -> Result<Value, InterpreterError> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.evaluate_inner(expr, env))
    }

    fn evaluate_inner(&mut self, expr: &Expr, env: &Rc<Environment>) -> Result<Value, InterpreterError> {
        match &expr.kind {
            ExprKind::Literal(name) => Ok(env
                .get(name)
                .cloned()
                .unwrap_or_else(|| Value::String(name.clone()))),

            ExprKind::Text(text) => Ok(Value::String(text.clone())),

            ExprKind::Conditional {
                condition,
                then_branch,
                else_branch,
            } => {
                let chosen = match self.evaluate(condition, env)? {
                    Value::Bool(b) => b,
                    Value::String(text) if &*text == "true" => true,
                    Value::String(text) if &*text == "false" => false,
                    other => {
                        return Err(InterpreterError::type_mismatch(
                            format!("`if` expects a boolean, got {} `{}`", other.type_name(), other),
                            condition.span,
                        ))
                    }
                };
                if chosen {
                    self.evaluate(then_branch, env)
                } else {
                    self.evaluate(else_branch, env)
                }
            }

            ExprKind::Builtin { op, operands } => self.apply_builtin(*op, operands, expr.span, env),

            ExprKind::Call { name, args } => {
                let function = self
                    .functions
                    .get(name)
                    .cloned()
                    .ok_or_else(|| InterpreterError::undefined_function(name.to_string(), expr.span))?;
                if args.len() != function.arity() {
                    return Err(InterpreterError::arity_mismatch(
                        name.to_string(),
                        function.arity(),
                        args.len(),
                        expr.span,
                    ));
                }
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.evaluate(arg, env)?);
                }
                self.call(&function, values, expr.span, env)
            }
        }
    }

    fn call(
        &mut self,
        function: &FunctionDef,
        args: Vec<Value>,
        span: Span,
        caller: &Rc<Environment>,
    ) -> Result<Value, InterpreterError> {
        if self.depth >= self.max_depth {
            return Err(InterpreterError::recursion_limit(self.max_depth, span));
        }
        if self.verbose {
            let shown: Vec<String> = args.iter().map(|arg| format!("{:?}", arg.to_string())).collect();
            self.trace(&format!(
                "{}call `{}` [{}]",
                "  ".repeat(self.depth.min(40)),
                function.name,
                shown.join(", ")
            ));
        }

        let env = Rc::new(Environment::for_call(Rc::clone(caller), &function.params, args));
        self.depth += 1;
        let result = self.evaluate(&function.body, &env);
        self.depth -= 1;
        result
    }

    fn apply_builtin(
        &mut self,
        op: Opcode,
        operands: &[Expr],
        span: Span,
        env: &Rc<Environment>,
    ) -> Result<Value, InterpreterError> {
        if let (Opcode::Stringify, [operand]) = (op, operands) {
            return Ok(builtins::builtin_stringify(operand));
        }

        let mut values = Vec::with_capacity(operands.len());
        for operand in operands {
            values.push(self.evaluate(operand, env)?);
        }

        match (op, values.as_slice()) {
            (Opcode::Negate, [value]) => builtins::builtin_negate(value, span),
            (Opcode::Add, [left, right]) => builtins::builtin_add(left, right, span),
            (Opcode::Multiply, [left, right]) => builtins::builtin_multiply(left, right, span),
            (Opcode::Divide, [left, right]) => builtins::builtin_divide(left, right, span),
            (Opcode::Remainder, [left, right]) => builtins::builtin_remainder(left, right, span),
            (Opcode::LessThan, [left, right]) => builtins::builtin_less_than(left, right, span),
            (Opcode::LessOrEqual, [left, right]) => builtins::builtin_less_or_equal(left, right, span),
            (Opcode::Equals, [left, right]) => Ok(builtins::builtin_equals(left, right)),
            (Opcode::Head, [value]) => builtins::builtin_head(value, span),
            (Opcode::Tail, [value]) => builtins::builtin_tail(value, span),
            (Opcode::Pair, [left, right]) => Ok(builtins::builtin_pair(left.clone(), right.clone())),
            (Opcode::Concatenate, [left, right]) => Ok(builtins::builtin_concatenate(left, right)),
            (Opcode::TokenizeWords, [value]) => Ok(builtins::builtin_tokenize_words(value)),
            (Opcode::ReadLine, [prompt]) => builtins::builtin_read_line(prompt, self.out, self.input, span),
            (Opcode::Print, [value]) => builtins::builtin_print(value.clone(), self.out, span),
            (op, values) => Err(InterpreterError::arity_mismatch(
                op.keyword(),
                op.arity(),
                values.len(),
                span,
            )),
        }
    }

    fn trace(&self, message: &str) {
        if self.verbose {
            eprintln!("[atto:debug] {}", message);
        }
    }
}

/// How a source file is loaded and run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Prepend the bundled prelude.
    pub prelude: bool,
    pub verbose: bool,
    pub max_depth: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            prelude: true,
            verbose: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Either a loading failure or a failure while running.
#[derive(Debug, Clone, PartialEq)]
pub enum RunError {
    Parse(ParseError),
    Runtime(InterpreterError),
}

impl RunError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            RunError::Parse(e) => e.to_diagnostic(),
            RunError::Runtime(e) => e.to_diagnostic(),
        }
    }
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunError::Parse(e) => write!(f, "{}", e),
            RunError::Runtime(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for RunError {}

impl From<ParseError> for RunError {
    fn from(err: ParseError) -> Self {
        RunError::Parse(err)
    }
}

impl From<InterpreterError> for RunError {
    fn from(err: InterpreterError) -> Self {
        RunError::Runtime(err)
    }
}

/// Tokenize and parse a source file, behind the prelude when enabled.
///
/// Prelude tokens carry no span, so diagnostics only ever point into `source`.
pub fn load_program(source: &str, options: &RunOptions) -> Result<Program, ParseError> {
    let mut tokens: Vec<Token> = Vec::new();
    if options.prelude {
        tokens.extend(tokenize(PRELUDE)?.into_iter().map(Token::detached));
    }
    let prelude_len = tokens.len();
    tokens.extend(tokenize(source)?);

    if options.verbose {
        eprintln!(
            "[atto:debug] {} prelude tokens, {} source tokens",
            prelude_len,
            tokens.len() - prelude_len
        );
    }

    let program = parse_program(&tokens)?;
    if options.verbose {
        eprintln!(
            "[atto:debug] registered {} functions: {}",
            program.functions.len(),
            program
                .functions
                .iter()
                .map(|def| format!("{}/{}", def.name, def.arity()))
                .collect::<Vec<_>>()
                .join(" ")
        );
    }
    Ok(program)
}

/// Load and run `source` against the given output and input handles.
pub fn run_source_with_io(
    source: &str,
    options: &RunOptions,
    out: &mut dyn Write,
    input: &mut dyn BufRead,
) -> Result<Option<Value>, RunError> {
    let program = load_program(source, options)?;
    let mut interpreter = Interpreter::new(&program.functions, out, input)
        .with_verbose(options.verbose)
        .with_max_depth(options.max_depth);
    Ok(interpreter.run()?)
}

/// Load and run `source` on the process's stdout and stdin.
pub fn run_source(source: &str, options: &RunOptions) -> Result<Option<Value>, RunError> {
    let mut out = io::stdout().lock();
    let mut input = io::stdin().lock();
    run_source_with_io(source, options, &mut out, &mut input)
}
