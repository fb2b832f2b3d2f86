use thiserror::Error;

/// Result type for jstatic operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types surfaced by the collaborator layers (I/O, lexing, parsing).
/// The analysis itself never fails; an unanalyzable construct just keeps its
/// method out of the eligible set.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Lexical error at line {line}, column {column}: {message}")]
    Lex {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Parse error at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },
}

impl Error {
    /// Create a lexical error with location information
    pub fn lex_error(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::Lex {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a parse error with location information
    pub fn parse_error(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            column,
            message: message.into(),
        }
    }
}
