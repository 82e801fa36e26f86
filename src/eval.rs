use crate::prims::Op;
use crate::value::Value;

pub const UNKNOWN_OPERATOR: &str = "unknown operator";
pub const NON_NUMBER: &str = "cannot operate on non-number";

// Evaluation takes a value and gives back a new one. Errors are
// results like any other; the first one found, going left to right,
// is the answer.
pub fn eval(expr: Value) -> Value {
    match expr {
        Value::Number(_) | Value::Symbol(_) | Value::Error(_) => expr,
        Value::SExpr(terms) => eval_sexpr(terms),
    }
}

fn eval_sexpr(terms: Vec<Value>) -> Value {
    // () is itself, and (x) is just x.
    if terms.len() < 2 {
        return match terms.into_iter().next() {
            Some(only) => eval(only),
            None => Value::SExpr(vec![]),
        }
    }

    let mut evaluated = Vec::with_capacity(terms.len());
    for term in terms {
        let val = eval(term);
        if val.is_error() {
            return val
        }
        evaluated.push(val);
    }

    let mut iter = evaluated.into_iter();
    let op = match iter.next() {
        Some(Value::Symbol(ref sym)) => match Op::from_symbol(sym) {
            Some(op) => op,
            None => return Value::error(UNKNOWN_OPERATOR),
        },
        _ => return Value::error(UNKNOWN_OPERATOR),
    };
    match eval_args(iter) {
        Ok(args) => op.apply(&args),
        Err(e) => e,
    }
}

fn eval_args(args: impl Iterator<Item = Value>) -> Result<Vec<i64>, Value> {
    args.map(|arg| match arg {
        Value::Number(n) => Ok(n),
        _ => Err(Value::error(NON_NUMBER)),
    }).collect()
}
