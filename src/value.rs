use std::fmt;

// Values are what the reader makes from the parse tree, and what
// evaluation results in. They are never changed once made; evaluating
// a value makes a new one. A list owns its items outright, so a value
// is always a tree and dropping the root drops the lot.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Value {
    Number(i64),
    Symbol(String),
    // Errors are values too, so they can travel up the tree like any
    // other result.
    Error(String),
    SExpr(Vec<Value>),
}

impl Value {
    pub fn symbol(s: &str) -> Value {
        Value::Symbol(String::from(s))
    }

    pub fn error(msg: &str) -> Value {
        Value::Error(String::from(msg))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Symbol(s) => f.write_str(s),
            Value::Error(msg) => write!(f, "Error: {}", msg),
            Value::SExpr(items) => {
                f.write_str("(")?;
                if let Some((first, rest)) = items.split_first() {
                    write!(f, "{}", first)?;
                    for item in rest {
                        write!(f, " {}", item)?;
                    }
                }
                f.write_str(")")
            }
        }
    }
}

pub fn render(v: &Value) -> String {
    v.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_atoms() {
        assert_eq!("-42", render(&Value::Number(-42)));
        assert_eq!("*", render(&Value::symbol("*")));
        assert_eq!("Error: division by zero", render(&Value::error("division by zero")));
    }

    #[test]
    fn render_lists() {
        assert_eq!("()", render(&Value::SExpr(vec![])));
        let nested = Value::SExpr(vec![
            Value::symbol("+"),
            Value::Number(1),
            Value::SExpr(vec![Value::symbol("*"), Value::Number(7), Value::Number(5)]),
            Value::SExpr(vec![]),
        ]);
        assert_eq!("(+ 1 (* 7 5) ())", render(&nested));
    }
}
