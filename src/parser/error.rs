use crate::lexer::TokenType;
use std::fmt;

/// Errors that can occur during parsing
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// An unexpected token was encountered
    UnexpectedToken {
        expected: String,
        found: TokenType,
        line: usize,
        column: usize,
    },

    /// Invalid syntax was detected
    InvalidSyntax {
        message: String,
        line: usize,
        column: usize,
    },

    /// End of file was reached unexpectedly
    EOF {
        expected: String,
        line: usize,
        column: usize,
    },
}

impl ParseError {
    /// Get the line number where the error occurred
    pub fn line(&self) -> usize {
        match self {
            ParseError::UnexpectedToken { line, .. } => *line,
            ParseError::InvalidSyntax { line, .. } => *line,
            ParseError::EOF { line, .. } => *line,
        }
    }

    /// Get the column number where the error occurred
    pub fn column(&self) -> usize {
        match self {
            ParseError::UnexpectedToken { column, .. } => *column,
            ParseError::InvalidSyntax { column, .. } => *column,
            ParseError::EOF { column, .. } => *column,
        }
    }

    /// Create a new invalid syntax error
    pub fn invalid_syntax(message: &str, line: usize, column: usize) -> Self {
        ParseError::InvalidSyntax {
            message: message.to_string(),
            line,
            column,
        }
    }

    /// Get the error message without its position
    pub fn get_message(&self) -> String {
        match self {
            ParseError::UnexpectedToken { expected, found, .. } => {
                format!("Expected {}, but found {}", expected, found.describe())
            }
            ParseError::InvalidSyntax { message, .. } => message.clone(),
            ParseError::EOF { expected, .. } => {
                format!("Unexpected end of input, expected {}", expected)
            }
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line(), self.column(), self.get_message())
    }
}

impl std::error::Error for ParseError {}
