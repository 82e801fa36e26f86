use crate::value::Value;

pub const DIVISION_BY_ZERO: &str = "division by zero";
pub const INTEGER_OVERFLOW: &str = "integer overflow";
pub const NOT_ENOUGH_OPERANDS: &str = "not enough operands";

// The operators. A symbol only gets turned into one of these at
// evaluation time; the reader takes any symbol it's given.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    pub fn from_symbol(sym: &str) -> Option<Op> {
        match sym {
            "+" => Some(Op::Add),
            "-" => Some(Op::Sub),
            "*" => Some(Op::Mul),
            "/" => Some(Op::Div),
            _ => None,
        }
    }

    /// Fold the operands left to right. The evaluator always has at
    /// least one operand; with none, `+` and `*` give their identity.
    pub fn apply(self, args: &[i64]) -> Value {
        let result = match self {
            Op::Add => plus(args),
            Op::Sub => minus(args),
            Op::Mul => times(args),
            Op::Div => divide(args),
        };
        match result {
            Ok(n) => Value::Number(n),
            Err(msg) => Value::error(msg),
        }
    }
}

type Arith = Result<i64, &'static str>;

fn plus(args: &[i64]) -> Arith {
    args.iter().try_fold(0i64, |acc, &n| acc.checked_add(n).ok_or(INTEGER_OVERFLOW))
}

fn times(args: &[i64]) -> Arith {
    args.iter().try_fold(1i64, |acc, &n| acc.checked_mul(n).ok_or(INTEGER_OVERFLOW))
}

// With one operand, minus is negation.
fn minus(args: &[i64]) -> Arith {
    match args {
        [] => Err(NOT_ENOUGH_OPERANDS),
        [n] => n.checked_neg().ok_or(INTEGER_OVERFLOW),
        [first, rest @ ..] => rest.iter().try_fold(*first, |acc, &n| {
            acc.checked_sub(n).ok_or(INTEGER_OVERFLOW)
        }),
    }
}

// A zero divisor anywhere is an error, whatever comes before it.
fn divide(args: &[i64]) -> Arith {
    match args {
        [] => Err(NOT_ENOUGH_OPERANDS),
        [first, rest @ ..] => {
            if rest.contains(&0) {
                return Err(DIVISION_BY_ZERO)
            }
            rest.iter().try_fold(*first, |acc, &n| acc.checked_div(n).ok_or(INTEGER_OVERFLOW))
        }
    }
}
