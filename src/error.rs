use thiserror::Error;

/// A line that doesn't match the grammar. These never become values;
/// the caller shows them and moves on to the next line.
///
/// Columns count characters from 1.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("<stdin>:1:{column}: unexpected end of input, expected ')'")]
    UnclosedParen { column: usize },

    #[error("<stdin>:1:{column}: unmatched ')'")]
    UnmatchedParen { column: usize },

    #[error("<stdin>:1:{column}: malformed number '{text}'")]
    MalformedNumber { column: usize, text: String },

    #[error("<stdin>:1:{column}: unexpected '{found}', expected number, symbol, '(' or ')'")]
    Unexpected { column: usize, found: char },

    #[error("<stdin>:1:{column}: expression too deeply nested (limit is {limit})")]
    TooDeep { column: usize, limit: usize },
}

impl SyntaxError {
    pub fn column(&self) -> usize {
        match self {
            SyntaxError::UnclosedParen { column }
            | SyntaxError::UnmatchedParen { column }
            | SyntaxError::MalformedNumber { column, .. }
            | SyntaxError::Unexpected { column, .. }
            | SyntaxError::TooDeep { column, .. } => *column,
        }
    }
}
