// Turns the concrete parse tree into values. Reading never fails as
// such: a number that doesn't fit, or a node that can't be where it
// is, becomes an error value in place, and evaluation deals with it
// like any other error.

use crate::parser::{Node, Tag};
use crate::value::Value;

pub const INVALID_NUMBER: &str = "invalid number";
pub const MALFORMED_TREE: &str = "malformed parse tree";

fn read_number(text: &str) -> Value {
    match text.parse::<i64>() {
        Ok(n) => Value::Number(n),
        Err(_) => Value::error(INVALID_NUMBER),
    }
}

pub fn read(node: &Node) -> Value {
    match node.tag {
        Tag::Number => read_number(&node.contents),
        Tag::Symbol => Value::Symbol(node.contents.clone()),
        Tag::Expr => match node.children.as_slice() {
            [inner] => read(inner),
            _ => Value::error(MALFORMED_TREE),
        },
        Tag::Root | Tag::Sexpr => Value::SExpr(
            node.children.iter()
                .filter(|child| child.tag != Tag::Char)
                .map(read)
                .collect()
        ),
        // delimiters only make sense inside a list
        Tag::Char => Value::error(MALFORMED_TREE),
    }
}
