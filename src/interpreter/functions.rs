use crate::ast::Expr;
use crate::diagnostic::Span;
use indexmap::IndexMap;
use std::rc::Rc;

/// A user-defined function.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: Rc<str>,
    pub params: Vec<Rc<str>>,
    pub body: Expr,
    /// Span of the function name.
    pub span: Span,
}

impl FunctionDef {
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// Every known function, keyed by name in first-definition order.
///
/// Built by the parser and read-only afterwards. Registering a name twice
/// replaces the earlier definition.
#[derive(Debug, Clone, Default)]
pub struct FunctionTable {
    functions: IndexMap<Rc<str>, Rc<FunctionDef>>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, def: FunctionDef) {
        self.functions.insert(def.name.clone(), Rc::new(def));
    }

    pub fn get(&self, name: &str) -> Option<&Rc<FunctionDef>> {
        self.functions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Definitions in first-definition order.
    pub fn iter(&self) -> impl Iterator<Item = &Rc<FunctionDef>> {
        self.functions.values()
    }
}
