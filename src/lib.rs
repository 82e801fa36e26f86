//! # lispy
//!
//! A small prefix-arithmetic calculator over S-expressions. A line of
//! text goes through four steps:
//!
//! 1. [`parse`] checks it against the grammar, giving a concrete
//!    parse tree or a [`SyntaxError`];
//! 2. [`read`] turns the parse tree into a [`Value`];
//! 3. [`eval`] reduces the value to a number, or to an error value;
//! 4. [`render`] gives the text to show.
//!
//! ```
//! use lispy::{eval, parse, read, render};
//!
//! let tree = parse("(+ 1 (* 7 5))").unwrap();
//! assert_eq!("36", render(&eval(read(&tree))));
//! ```
//!
//! None of these keep any state, and apart from a syntax error nothing
//! here fails: bad numbers, unknown operators and division by zero all
//! come back as `Value::Error`.

pub mod error;
pub mod eval;
pub mod parser;
pub mod prims;
pub mod read;
pub mod value;

pub use crate::error::SyntaxError;
pub use crate::eval::eval;
pub use crate::parser::{parse, Grammar, Node, Tag};
pub use crate::read::read;
pub use crate::value::{render, Value};

/// Run one line all the way through with the given grammar.
pub fn eval_line(grammar: &Grammar, line: &str) -> Result<Value, SyntaxError> {
    let tree = grammar.parse(line)?;
    Ok(eval(read(&tree)))
}
