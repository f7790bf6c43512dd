use crate::value::Value;
use std::collections::HashMap;
use std::rc::Rc;

/// Parameter bindings of one call.
///
/// A frame links to the frame of its caller, so a name that the callee does
/// not bind resolves against whoever called it (dynamic scope). Frames are
/// immutable once built.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    bindings: HashMap<Rc<str>, Value>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// The empty top-level frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// A frame for a call made from `caller`, binding `params` to `args` in order.
    pub fn for_call(caller: Rc<Environment>, params: &[Rc<str>], args: Vec<Value>) -> Self {
        let bindings = params.iter().cloned().zip(args).collect();
        Self {
            bindings,
            parent: Some(caller),
        }
    }

    /// Look a name up, innermost frame first.
    pub fn get(&self, name: &str) -> Option<&Value> {
        let mut frame = self;
        loop {
            if let Some(value) = frame.bindings.get(name) {
                return Some(value);
            }
            frame = frame.parent.as_deref()?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<Rc<str>> {
        list.iter().map(|n| Rc::from(*n)).collect()
    }

    #[test]
    fn test_binds_in_order() {
        let env = Environment::for_call(
            Rc::new(Environment::new()),
            &names(&["a", "b"]),
            vec![Value::string("1"), Value::string("2")],
        );
        assert_eq!(env.get("a"), Some(&Value::string("1")));
        assert_eq!(env.get("b"), Some(&Value::string("2")));
        assert_eq!(env.get("c"), None);
    }

    #[test]
    fn test_inner_frame_shadows_caller() {
        let caller = Rc::new(Environment::for_call(
            Rc::new(Environment::new()),
            &names(&["x", "y"]),
            vec![Value::string("outer"), Value::string("kept")],
        ));
        let callee = Environment::for_call(caller, &names(&["x"]), vec![Value::string("inner")]);
        assert_eq!(callee.get("x"), Some(&Value::string("inner")));
        assert_eq!(callee.get("y"), Some(&Value::string("kept")));
        assert_eq!(callee.get("z"), None);
    }
}
