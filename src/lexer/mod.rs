pub mod error;
mod helpers;
pub mod token;

pub use error::LexerError;
pub use token::{Token, TokenType};

/// Splits source text into tokens
///
/// Lexing never stops at the first problem: unexpected characters become
/// [`TokenType::Invalid`] tokens and are recorded in [`Lexer::get_errors`].
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
    errors: Vec<LexerError>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            position: 0,
            line: 1,
            column: 1,
            errors: Vec::new(),
        }
    }

    /// Tokenize the whole input; the last token is always `EOF`
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token();
            let at_end = token.token_type == TokenType::EOF;
            tokens.push(token);
            if at_end {
                break;
            }
        }

        tokens
    }

    pub fn get_errors(&self) -> &[LexerError] {
        &self.errors
    }

    fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        if self.is_at_end() {
            return Token::new(TokenType::EOF, self.line, self.column, String::new());
        }

        let current_char = self.peek_char();

        if current_char.is_ascii_digit() {
            return self.handle_number();
        }

        if is_identifier_start(current_char) {
            return self.handle_identifier();
        }

        let start_pos = self.position;
        let (line, column) = (self.line, self.column);
        self.consume_char();

        let token_type = match current_char {
            '+' => TokenType::Plus,
            '=' => {
                if self.peek_char() == '>' {
                    self.consume_char();
                    TokenType::Arrow
                } else {
                    TokenType::Assign
                }
            }
            '?' => TokenType::Question,
            '(' => TokenType::LeftParen,
            ')' => TokenType::RightParen,
            '{' => TokenType::LeftBrace,
            '}' => TokenType::RightBrace,
            ',' => TokenType::Comma,
            '.' => TokenType::Dot,
            ':' => TokenType::Colon,
            ';' => TokenType::SemiColon,
            other => {
                let message = format!("Unexpected character '{}'", other);
                let suggestion = match other {
                    '-' | '*' | '/' | '%' => Some("only '+' is supported for numbers"),
                    '"' | '\'' | '`' => Some("string literals are not supported"),
                    _ => None,
                };
                self.add_error(&message, suggestion, line, column);
                TokenType::Invalid(message)
            }
        };

        let lexeme = self.get_slice(start_pos, self.position).to_string();
        Token::new(token_type, line, column, lexeme)
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            let current_char = self.peek_char();
            if !self.is_at_end() && current_char.is_whitespace() {
                self.consume_char();
            } else if current_char == '/' && self.peek_char_n(1) == '/' {
                self.consume_while(|c| c != '\n');
            } else if current_char == '/' && self.peek_char_n(1) == '*' {
                self.skip_block_comment();
            } else {
                break;
            }
        }
    }

    fn skip_block_comment(&mut self) {
        let (line, column) = (self.line, self.column);
        self.consume_char();
        self.consume_char();

        while !self.is_at_end() {
            if self.peek_char() == '*' && self.peek_char_n(1) == '/' {
                self.consume_char();
                self.consume_char();
                return;
            }
            self.consume_char();
        }

        self.add_error("Unterminated block comment", Some("close it with '*/'"), line, column);
    }

    fn handle_identifier(&mut self) -> Token {
        let start_pos = self.position;
        let (line, column) = (self.line, self.column);

        self.consume_while(is_identifier_continue);

        let text = self.get_slice(start_pos, self.position);
        let token_type =
            TokenType::keyword(text).unwrap_or_else(|| TokenType::Identifier(text.to_string()));

        Token::new(token_type, line, column, text.to_string())
    }

    fn handle_number(&mut self) -> Token {
        let start_pos = self.position;
        let (line, column) = (self.line, self.column);

        self.consume_while(|c| c.is_ascii_digit());
        if self.peek_char() == '.' && self.peek_char_n(1).is_ascii_digit() {
            self.consume_char();
            self.consume_while(|c| c.is_ascii_digit());
        }

        let text = self.get_slice(start_pos, self.position);
        match text.parse::<f64>() {
            Ok(value) => Token::new(TokenType::NumberLiteral(value), line, column, text.to_string()),
            Err(_) => {
                let message = format!("Invalid number literal '{}'", text);
                self.add_error(&message, None, line, column);
                Token::error(&message, line, column, text)
            }
        }
    }

    fn add_error(&mut self, message: &str, suggestion: Option<&str>, line: usize, column: usize) {
        let error = LexerError {
            message: message.to_string(),
            line,
            column,
            snippet: self.line_text(line),
            suggestion: suggestion.map(str::to_string),
        };
        self.errors.push(error);
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_identifier_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}
