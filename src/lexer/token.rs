use std::fmt;

#[derive(Debug, PartialEq, Clone)]
pub enum TokenType {
    // Keywords
    Const,
    Function,
    Return,
    True,
    False,

    // Identifiers and literals
    Identifier(String),
    NumberLiteral(f64),

    // Operators
    Plus,     // +
    Assign,   // =
    Arrow,    // =>
    Question, // ?

    // Delimiters
    LeftParen,  // (
    RightParen, // )
    LeftBrace,  // {
    RightBrace, // }
    Comma,      // ,
    Dot,        // .
    Colon,      // :
    SemiColon,  // ;

    EOF,

    // Invalid token
    Invalid(String),
}

impl TokenType {
    /// Keyword token for an identifier-like word, if it is reserved
    pub fn keyword(text: &str) -> Option<TokenType> {
        match text {
            "const" => Some(TokenType::Const),
            "function" => Some(TokenType::Function),
            "return" => Some(TokenType::Return),
            "true" => Some(TokenType::True),
            "false" => Some(TokenType::False),
            _ => None,
        }
    }

    /// Human-readable description used in parse errors
    pub fn describe(&self) -> String {
        match self {
            TokenType::Identifier(name) => format!("identifier '{}'", name),
            TokenType::NumberLiteral(value) => format!("number {}", value),
            TokenType::Invalid(message) => message.clone(),
            TokenType::EOF => "end of input".to_string(),
            TokenType::Const => "'const'".to_string(),
            TokenType::Function => "'function'".to_string(),
            TokenType::Return => "'return'".to_string(),
            TokenType::True => "'true'".to_string(),
            TokenType::False => "'false'".to_string(),
            TokenType::Plus => "'+'".to_string(),
            TokenType::Assign => "'='".to_string(),
            TokenType::Arrow => "'=>'".to_string(),
            TokenType::Question => "'?'".to_string(),
            TokenType::LeftParen => "'('".to_string(),
            TokenType::RightParen => "')'".to_string(),
            TokenType::LeftBrace => "'{'".to_string(),
            TokenType::RightBrace => "'}'".to_string(),
            TokenType::Comma => "','".to_string(),
            TokenType::Dot => "'.'".to_string(),
            TokenType::Colon => "':'".to_string(),
            TokenType::SemiColon => "';'".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    pub line: usize,
    pub column: usize,
    pub lexeme: String,
}

impl Token {
    pub fn new(token_type: TokenType, line: usize, column: usize, lexeme: String) -> Self {
        Token {
            token_type,
            line,
            column,
            lexeme,
        }
    }

    pub fn error(message: &str, line: usize, column: usize, lexeme: &str) -> Self {
        Token::new(
            TokenType::Invalid(message.to_string()),
            line,
            column,
            lexeme.to_owned(),
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:?} '{}' at {}:{}",
            self.token_type, self.lexeme, self.line, self.column
        )
    }
}
