use std::fmt;

use nom::{
    IResult,
    branch::alt,
    character::complete::{char,digit1,multispace0,one_of},
    combinator::{all_consuming,cut,map,opt,recognize},
    error::{Error,ErrorKind},
    multi::many0,
    sequence::{pair,preceded,terminated},
};

use crate::error::SyntaxError;

// The operators are the only symbols the grammar accepts.
const SYMBOL_CHARS: &str = "+-*/";

pub const DEFAULT_MAX_DEPTH: usize = 256;

// The concrete parse tree. This has the shape of the grammar, and
// keeps the punctuation; the reader throws all that away when it
// makes values.

#[derive(Debug,PartialEq,Eq,Clone,Copy)]
pub enum Tag {
    Root,
    Expr,
    Sexpr,
    Number,
    Symbol,
    Char, // a '(' or ')' delimiter
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Tag::Root => "root",
            Tag::Expr => "expr",
            Tag::Sexpr => "sexpr",
            Tag::Number => "number",
            Tag::Symbol => "symbol",
            Tag::Char => "char",
        };
        f.write_str(name)
    }
}

#[derive(Debug,PartialEq,Clone)]
pub struct Node {
    pub tag: Tag,
    // literal text, for leaves only
    pub contents: String,
    // byte offset into the line
    pub offset: usize,
    pub children: Vec<Node>,
}

impl Node {
    fn leaf(tag: Tag, contents: &str, offset: usize) -> Node {
        Node{
            tag,
            contents: String::from(contents),
            offset,
            children: vec![],
        }
    }

    fn branch(tag: Tag, offset: usize, children: Vec<Node>) -> Node {
        Node{
            tag,
            contents: String::new(),
            offset,
            children,
        }
    }

    fn write_tree(&self, f: &mut fmt::Formatter, indent: usize) -> fmt::Result {
        write!(f, "{}{}:{}", "  ".repeat(indent), self.tag, self.offset)?;
        if !self.contents.is_empty() {
            write!(f, " '{}'", self.contents)?;
        }
        writeln!(f)?;
        for child in &self.children {
            child.write_tree(f, indent + 1)?;
        }
        Ok(())
    }
}

// One node per line, indented by depth.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.write_tree(f, 0)
    }
}

/// The grammar. Build one of these at startup and hand it by
/// reference to whatever reads lines; it holds no state between
/// parses.
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub struct Grammar {
    max_depth: usize,
}

impl Default for Grammar {
    fn default() -> Self { Grammar::new() }
}

impl Grammar {
    pub fn new() -> Grammar {
        Grammar::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    /// `max_depth` is the number of parentheses that may be open at
    /// once.
    pub fn with_max_depth(max_depth: usize) -> Grammar {
        Grammar{ max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    // parse a _whole line_; anything left over is an error.
    pub fn parse(&self, line: &str) -> Result<Node, SyntaxError> {
        let state = State{ grammar: self, source: line };
        match state.parse_root(line) {
            Ok((_, root)) => Ok(root),
            Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) =>
                Err(syntax_error(line, e, self.max_depth)),
            // only the streaming parsers say this
            Err(nom::Err::Incomplete(_)) =>
                Err(SyntaxError::UnclosedParen{ column: column_at(line, line.len()) }),
        }
    }
}

/// Parse with the default grammar.
pub fn parse(line: &str) -> Result<Node, SyntaxError> {
    Grammar::new().parse(line)
}

// The parsers need to know where they are in the line, to record
// offsets, and the grammar, to know when to give up nesting.
struct State<'g, 'a> {
    grammar: &'g Grammar,
    source: &'a str,
}

impl<'g, 'a> State<'g, 'a> {

    fn offset(&self, i: &'a str) -> usize {
        self.source.len() - i.len()
    }

    // A minus sign belongs to the number only if digits follow it
    // directly; otherwise it's the symbol.
    fn parse_number(&self, i: &'a str) -> IResult<&'a str, Node> {
        let at = self.offset(i);
        map(recognize(pair(opt(char('-')), digit1)), move |text: &str| {
            Node::leaf(Tag::Number, text, at)
        })(i)
    }

    fn parse_symbol(&self, i: &'a str) -> IResult<&'a str, Node> {
        let at = self.offset(i);
        map(one_of(SYMBOL_CHARS), move |c: char| {
            Node::leaf(Tag::Symbol, &c.to_string(), at)
        })(i)
    }

    fn parse_delimiter(&self, delim: char, i: &'a str) -> IResult<&'a str, Node> {
        let at = self.offset(i);
        map(char(delim), move |c: char| {
            Node::leaf(Tag::Char, &c.to_string(), at)
        })(i)
    }

    // `depth` counts the lists already open around this one. Once
    // inside the open paren, there's no going back: anything wrong is
    // a failure rather than a reason to try something else.
    fn parse_sexpr(&self, i: &'a str, depth: usize) -> IResult<&'a str, Node> {
        let at = self.offset(i);
        let (rest, open) = self.parse_delimiter('(', i)?;
        if depth >= self.grammar.max_depth {
            return Err(nom::Err::Failure(Error::new(i, ErrorKind::TooLarge)));
        }
        let (rest, mut children) = many0(preceded(
            multispace0,
            |i: &'a str| self.parse_expr(i, depth + 1)
        ))(rest)?;
        let (rest, close) = cut(preceded(
            multispace0,
            |i: &'a str| self.parse_delimiter(')', i)
        ))(rest)?;

        children.insert(0, open);
        children.push(close);
        Ok((rest, Node::branch(Tag::Sexpr, at, children)))
    }

    fn parse_expr(&self, i: &'a str, depth: usize) -> IResult<&'a str, Node> {
        let at = self.offset(i);
        map(alt((
            |i: &'a str| self.parse_number(i),
            |i: &'a str| self.parse_symbol(i),
            |i: &'a str| self.parse_sexpr(i, depth),
        )), move |inner| Node::branch(Tag::Expr, at, vec![inner]))(i)
    }

    fn parse_root(&self, i: &'a str) -> IResult<&'a str, Node> {
        map(all_consuming(terminated(
            many0(preceded(multispace0, |i: &'a str| self.parse_expr(i, 0))),
            multispace0
        )), |exprs| Node::branch(Tag::Root, 0, exprs))(i)
    }
}

fn column_at(line: &str, offset: usize) -> usize {
    line[..offset].chars().count() + 1
}

fn ends_token(c: char) -> bool {
    c.is_whitespace() || c == '(' || c == ')'
}

// Work out what went wrong from where the parser stopped.
fn syntax_error(line: &str, e: Error<&str>, limit: usize) -> SyntaxError {
    let offset = line.len() - e.input.len();
    let column = column_at(line, offset);
    if e.code == ErrorKind::TooLarge {
        return SyntaxError::TooDeep{ column, limit };
    }
    let before = &line[..offset];
    match e.input.chars().next() {
        None => SyntaxError::UnclosedParen{ column },
        Some(')') => SyntaxError::UnmatchedParen{ column },
        Some(_) if before.ends_with(|c: char| c.is_ascii_digit()) => {
            let digits = before.trim_end_matches(|c: char| c.is_ascii_digit());
            let start = digits.strip_suffix('-').unwrap_or(digits).len();
            let end = e.input.find(ends_token).map_or(line.len(), |n| offset + n);
            SyntaxError::MalformedNumber{
                column: column_at(line, start),
                text: String::from(&line[start..end]),
            }
        },
        Some(found) => SyntaxError::Unexpected{ column, found },
    }
}

#[cfg(test)]
fn leaf_texts(node: &Node) -> Vec<String> {
    if node.children.is_empty() {
        vec![node.contents.clone()]
    } else {
        node.children.iter().flat_map(leaf_texts).collect()
    }
}

#[test]
fn atom_parser() {
    let root = parse("12").unwrap();
    assert_eq!(Tag::Root, root.tag);
    let expr = &root.children[0];
    assert_eq!(Tag::Expr, expr.tag);
    assert_eq!(Node::leaf(Tag::Number, "12", 0), expr.children[0]);

    let root = parse("  -7 ").unwrap();
    assert_eq!(Node::leaf(Tag::Number, "-7", 2), root.children[0].children[0]);

    let root = parse("/").unwrap();
    assert_eq!(Node::leaf(Tag::Symbol, "/", 0), root.children[0].children[0]);
}

#[test]
fn minus_without_digits_is_symbol() {
    let root = parse("- 5").unwrap();
    assert_eq!(Tag::Symbol, root.children[0].children[0].tag);
    assert_eq!(Tag::Number, root.children[1].children[0].tag);
}

#[test]
fn list_parser() {
    let root = parse("()").unwrap();
    let sexpr = &root.children[0].children[0];
    assert_eq!(Tag::Sexpr, sexpr.tag);
    assert_eq!(vec![Node::leaf(Tag::Char, "(", 0), Node::leaf(Tag::Char, ")", 1)],
               sexpr.children);

    let root = parse("(+ 1 (* 2 3))").unwrap();
    assert_eq!(vec!["(", "+", "1", "(", "*", "2", "3", ")", ")"], leaf_texts(&root));
}

#[test]
fn tokens_need_no_spaces() {
    let root = parse("(+1 2)").unwrap();
    assert_eq!(vec!["(", "+", "1", "2", ")"], leaf_texts(&root));
}

#[test]
fn empty_line_is_empty_root() {
    let root = parse("   ").unwrap();
    assert_eq!(Tag::Root, root.tag);
    assert!(root.children.is_empty());
}

#[test]
fn syntax_errors() {
    assert_eq!(Err(SyntaxError::UnclosedParen{ column: 7 }), parse("(* 1 2"));
    assert_eq!(Err(SyntaxError::UnmatchedParen{ column: 8 }), parse("(+ 1 2))"));
    assert_eq!(Err(SyntaxError::UnmatchedParen{ column: 1 }), parse(")"));
    assert_eq!(Err(SyntaxError::Unexpected{ column: 4, found: 'x' }), parse("(+ x 1)"));
    assert_eq!(Err(SyntaxError::MalformedNumber{ column: 4, text: String::from("12ab") }),
               parse("(+ 12ab 1)"));
    assert_eq!(Err(SyntaxError::MalformedNumber{ column: 1, text: String::from("-1.5") }),
               parse("-1.5"));
}

#[test]
fn nesting_limit() {
    let grammar = Grammar::with_max_depth(3);
    assert!(grammar.parse("(((1)))").is_ok());
    assert_eq!(Err(SyntaxError::TooDeep{ column: 4, limit: 3 }), grammar.parse("((((1))))"));
}

#[test]
fn tree_display() {
    let root = parse("(- 5)").unwrap();
    let expected = "\
root:0
  expr:0
    sexpr:0
      char:0 '('
      expr:1
        symbol:1 '-'
      expr:3
        number:3 '5'
      char:4 ')'
";
    assert_eq!(expected, root.to_string());
}
