use std::fmt;
use std::rc::Rc;

/// A runtime value. Values are immutable; lists share their elements.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(Rc<str>),
    Bool(bool),
    List(Rc<[Value]>),
}

impl Value {
    pub fn string(text: impl AsRef<str>) -> Self {
        Value::String(Rc::from(text.as_ref()))
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Rc::from(items))
    }

    /// Encode a number the way arithmetic results are stored.
    pub fn number(n: f64) -> Self {
        Value::string(format_number(n))
    }

    pub fn as_string(&self) -> Option<&str> {
        if let Value::String(text) = self {
            Some(&text[..])
        } else {
            None
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        if let Value::Bool(b) = self {
            Some(*b)
        } else {
            None
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        if let Value::List(items) = self {
            Some(&items[..])
        } else {
            None
        }
    }

    /// The string parsed as a base-10 number.
    pub fn as_number(&self) -> Option<f64> {
        self.as_string().and_then(|text| text.trim().parse::<f64>().ok())
    }

    pub fn as_integer(&self) -> Option<i64> {
        self.as_string().and_then(|text| text.trim().parse::<i64>().ok())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Bool(_) => "boolean",
            Value::List(_) => "list",
        }
    }
}

/// Display form: strings raw, booleans as words, lists as `[a b c]`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(text) => f.write_str(text),
            Value::Bool(b) => write!(f, "{}", b),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Shortest round-trip form without a trailing `.0`.
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        // no "-0"
        "0".to_string()
    } else if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}
