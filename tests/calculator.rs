use lispy::{eval, eval_line, parse, read, render, Grammar, SyntaxError, Value};

fn run(line: &str) -> Value {
    eval(read(&parse(line).unwrap_or_else(|e| panic!("{:?} failed to parse: {}", line, e))))
}

fn show(line: &str) -> String {
    render(&run(line))
}

#[test]
fn arithmetic() {
    assert_eq!(Value::Number(3), run("(+ 1 2)"));
    assert_eq!(Value::Number(36), run("(+ 1 (* 7 5))"));
    assert_eq!(Value::Number(-5), run("(- 5)"));
    assert_eq!(Value::Number(-8), run("(- 2 (* 2 5))"));
    assert_eq!(Value::Number(2), run("(/ 10 (- 8 3))"));
    assert_eq!(Value::Number(6), run("+ 1 2 3"));
}

#[test]
fn division_by_zero() {
    assert_eq!(Value::error("division by zero"), run("(/ 1 0)"));
    assert_eq!("Error: division by zero", show("(/ 10 2 (- 3 3) 5)"));
}

#[test]
fn unmatched_paren_never_reaches_reader() {
    assert_eq!(Err(SyntaxError::UnclosedParen{ column: 7 }), parse("(* 1 2").map(|_| ()));
    assert!(eval_line(&Grammar::new(), "(* 1 2").is_err());
}

#[test]
fn empty_list_round_trips() {
    assert_eq!("()", show("()"));
    assert_eq!("()", show(""));
    assert_eq!("()", show("(())"));
}

#[test]
fn degenerate_forms() {
    assert_eq!("+", show("(+)"));
    assert_eq!("7", show("((7))"));
    assert_eq!("-3", show("-3"));
}

#[test]
fn value_errors_display() {
    assert_eq!("Error: unknown operator", show("(1 2 3)"));
    assert_eq!("Error: cannot operate on non-number", show("(* 2 (+))"));
    assert_eq!("Error: invalid number", show("(+ 1 123456789012345678901234567890)"));
    assert_eq!("Error: integer overflow", show("(* 9223372036854775807 2)"));
}

#[test]
fn leftmost_error_wins() {
    assert_eq!("Error: division by zero",
               show("(+ (/ 1 0) 99999999999999999999 (1 2))"));
    assert_eq!("Error: invalid number",
               show("(+ 1 (- 99999999999999999999) (/ 1 0))"));
    assert_eq!("Error: unknown operator",
               show("(* (1 2) (/ 1 0))"));
}

#[test]
fn evaluation_is_deterministic() {
    let line = "(- (* 3 (+ 4 5 -6)) (/ 100 7) (- 2))";
    let first = run(line);
    assert_eq!(Value::Number(-3), first);
    for _ in 0..10 {
        assert_eq!(first, run(line));
    }
}

#[test]
fn well_formed_arithmetic_gives_numbers() {
    let lines = [
        "(+ 1 2 3 4 5)",
        "(* (+ 1 1) (- 9 3) (/ 8 2))",
        "(- (- (- 1)))",
        "(/ -9 2)",
        "(+ (* 2 (+ 3 (* 4 (+ 5 6)))) 1)",
    ];
    for line in lines.iter() {
        match run(line) {
            Value::Number(_) => (),
            other => panic!("{} gave {}", line, other),
        }
    }
}

#[test]
fn syntax_error_messages() {
    let err = parse("(+ 1 $)").unwrap_err();
    assert_eq!("<stdin>:1:6: unexpected '$', expected number, symbol, '(' or ')'", err.to_string());
    let err = parse("(+ 1 2.5)").unwrap_err();
    assert_eq!("<stdin>:1:6: malformed number '2.5'", err.to_string());
    let err = parse("(+ 1 2))").unwrap_err();
    assert_eq!("<stdin>:1:8: unmatched ')'", err.to_string());
}

#[test]
fn deep_nesting() {
    let grammar = Grammar::with_max_depth(32);
    let depth = grammar.max_depth();
    let ok = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(Ok(Value::Number(1)), eval_line(&grammar, &ok));

    let too_deep = format!("(+ 1 {}1{})", "(".repeat(depth), ")".repeat(depth));
    match eval_line(&grammar, &too_deep) {
        Err(SyntaxError::TooDeep{ column, limit }) => {
            assert_eq!(depth, limit);
            assert_eq!(6 + depth - 1, column);
        },
        other => panic!("expected too deep, got {:?}", other),
    }
}
