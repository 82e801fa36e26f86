use clap::Parser;
use rustyline::error::ReadlineError;

use lispy::parser::DEFAULT_MAX_DEPTH;
use lispy::{eval, read, Grammar, SyntaxError};

const PROMPT: &str = "lispy> ";

/// A calculator for prefix arithmetic written as S-expressions, e.g.
/// (+ 1 (* 7 5)).
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Evaluate this one line, print the result and exit.
    #[arg(short, long)]
    eval: Option<String>,

    /// How many parentheses may be open at once.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Show the parse tree and the value read from it on stderr.
    #[arg(short, long)]
    trace: bool,
}

struct Session {
    grammar: Grammar,
    trace: bool,
    interactive: bool,
}

impl Session {
    // The text to show for a line: the result, or the syntax error if
    // it didn't parse.
    fn run_line(&self, line: &str) -> Result<String, String> {
        match self.grammar.parse(line) {
            Ok(tree) => {
                let expr = read(&tree);
                if self.trace {
                    eprint!("{}", tree);
                    eprintln!("read: {}", expr);
                }
                Ok(eval(expr).to_string())
            },
            Err(e) => Err(syntax_error_lines(&e, self.interactive)),
        }
    }
}

/// The message for a syntax error. At the prompt, this is preceded by
/// a caret under the offending column of the line as typed. Columns
/// count characters, so the caret lines up only while every character
/// takes one cell; wide or combining characters push it out. The
/// grammar itself is all ASCII.
fn syntax_error_lines(e: &SyntaxError, interactive: bool) -> String {
    if interactive {
        format!("{}^\nError: {}", " ".repeat(PROMPT.len() + e.column() - 1), e)
    } else {
        format!("Error: {}", e)
    }
}

// Run a single line as given with --eval; gives back what to print and
// the exit status.
fn run_once(session: &Session, line: &str) -> (String, i32) {
    match session.run_line(line) {
        Ok(out) => (out, 0),
        Err(msg) => (msg, 1),
    }
}

fn repl(session: &Session) {
    let mut reader = rustyline::Editor::<()>::new();
    println!("Lispy Version {}", env!("CARGO_PKG_VERSION"));
    println!("Press Ctrl+c to exit.\n");
    loop {
        match reader.readline(PROMPT) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                reader.add_history_entry(line.as_str());
                match session.run_line(&line) {
                    Ok(out) | Err(out) => println!("{}", out),
                }
            },
            Err(ReadlineError::Eof) => break,
            Err(ReadlineError::Interrupted) => {
                println!("Cheerio then");
                break
            },
            Err(e) => {
                println!("Couldn't readline: {}", e);
                break
            },
        }
    }
}

fn main() {
    let args = Args::parse();
    let mut session = Session{
        grammar: Grammar::with_max_depth(args.max_depth),
        trace: args.trace,
        interactive: true,
    };

    match args.eval {
        Some(line) => {
            session.interactive = false;
            let (out, status) = run_once(&session, &line);
            println!("{}", out);
            if status != 0 {
                std::process::exit(status);
            }
        },
        None => repl(&session),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(interactive: bool) -> Session {
        Session{ grammar: Grammar::new(), trace: false, interactive }
    }

    #[test]
    fn results_are_rendered() {
        assert_eq!(Ok(String::from("36")), session(true).run_line("(+ 1 (* 7 5))"));
        assert_eq!(Ok(String::from("Error: division by zero")),
                   session(true).run_line("(/ 1 0)"));
    }

    #[test]
    fn caret_points_at_column() {
        let e = SyntaxError::UnclosedParen{ column: 7 };
        let expected = format!("{}^\nError: <stdin>:1:7: unexpected end of input, expected ')'",
                               " ".repeat(PROMPT.len() + 6));
        assert_eq!(expected, syntax_error_lines(&e, true));
        assert_eq!(Err(expected), session(true).run_line("(* 1 2"));
    }

    #[test]
    fn no_caret_outside_prompt() {
        let e = SyntaxError::UnmatchedParen{ column: 1 };
        assert_eq!("Error: <stdin>:1:1: unmatched ')'", syntax_error_lines(&e, false));
    }

    #[test]
    fn eval_flag_exit_status() {
        let once = session(false);
        assert_eq!((String::from("3"), 0), run_once(&once, "(+ 1 2)"));
        assert_eq!((String::from("Error: unknown operator"), 0), run_once(&once, "(1 2)"));
        assert_eq!((String::from("Error: <stdin>:1:7: unexpected end of input, expected ')'"), 1),
                   run_once(&once, "(* 1 2"));
    }
}
