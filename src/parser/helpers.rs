use crate::lexer::{Token, TokenType};
use crate::parser::error::ParseError;
use crate::parser::Parser;

/// Common error messages
pub const ERR_EXPECTED_IDENTIFIER: &str = "identifier";
pub const ERR_EXPECTED_EXPRESSION: &str = "expression";
pub const ERR_EXPECTED_TYPE: &str = "type";
pub const ERR_UNCLOSED_PAREN: &str = "')' to close '('";
pub const ERR_UNCLOSED_BRACE: &str = "'}' to close '{'";

/// Trait for token matching and consumption
pub trait TokenMatching {
    /// Check if the current token matches the expected type
    fn check(&self, expected_type: TokenType) -> bool;

    /// Check if the token `n` positions after the current one matches
    fn peek_matches(&self, n: usize, expected_type: TokenType) -> bool;

    /// Match and consume a token if it's the expected type
    fn match_token(&mut self, expected_type: TokenType) -> bool;

    /// Consume a token of the given type, or return an error
    fn consume(&mut self, expected_type: TokenType, expected: &str) -> Result<Token, ParseError>;

    /// Consume an identifier token, returning its name and position
    fn consume_identifier(&mut self, expected: &str) -> Result<(String, usize, usize), ParseError>;

    /// Error describing the current token as not being what was expected
    fn unexpected<T>(&self, expected: &str) -> Result<T, ParseError>;

    /// Create a syntax error at the current position
    fn syntax_error<T>(&self, message: &str) -> Result<T, ParseError>;

    /// Token matching utility function
    fn token_matches(&self, a: &TokenType, b: &TokenType) -> bool;
}

impl TokenMatching for Parser {
    fn check(&self, expected_type: TokenType) -> bool {
        match &self.current {
            Some(token) => self.token_matches(&token.token_type, &expected_type),
            None => false,
        }
    }

    fn peek_matches(&self, n: usize, expected_type: TokenType) -> bool {
        match self.tokens.get(n) {
            Some(token) => self.token_matches(&token.token_type, &expected_type),
            None => false,
        }
    }

    fn match_token(&mut self, expected_type: TokenType) -> bool {
        if self.check(expected_type) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume(&mut self, expected_type: TokenType, expected: &str) -> Result<Token, ParseError> {
        if self.check(expected_type) {
            match self.advance() {
                Some(token) => Ok(token),
                None => self.unexpected(expected),
            }
        } else {
            self.unexpected(expected)
        }
    }

    fn consume_identifier(&mut self, expected: &str) -> Result<(String, usize, usize), ParseError> {
        if let Some(Token {
            token_type: TokenType::Identifier(name),
            line,
            column,
            ..
        }) = &self.current
        {
            let result = (name.clone(), *line, *column);
            self.advance();
            return Ok(result);
        }
        self.unexpected(expected)
    }

    fn unexpected<T>(&self, expected: &str) -> Result<T, ParseError> {
        let Some(token) = &self.current else {
            let (line, column) = self.last_position();
            return Err(ParseError::EOF {
                expected: expected.to_string(),
                line,
                column,
            });
        };

        Err(match &token.token_type {
            TokenType::EOF => ParseError::EOF {
                expected: expected.to_string(),
                line: token.line,
                column: token.column,
            },
            TokenType::Invalid(message) => {
                ParseError::invalid_syntax(message, token.line, token.column)
            }
            found => ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: found.clone(),
                line: token.line,
                column: token.column,
            },
        })
    }

    fn syntax_error<T>(&self, message: &str) -> Result<T, ParseError> {
        let (line, column) = self.current_position();
        Err(ParseError::invalid_syntax(message, line, column))
    }

    fn token_matches(&self, actual: &TokenType, expected: &TokenType) -> bool {
        // Literal-carrying tokens match on kind, not value.
        std::mem::discriminant(actual) == std::mem::discriminant(expected)
    }
}
