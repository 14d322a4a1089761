mod error;
mod expr;
mod helpers;
mod stmt;
mod types;

pub use error::ParseError;
use helpers::TokenMatching;
use stmt::SeqParser;
use types::ParserContext;

use crate::ast::Term;
use crate::lexer::{Token, TokenType};

use std::collections::VecDeque;

/// Parser for program source
///
/// A recursive descent parser over the token stream, producing a single
/// [`Term`] for the whole program. Parsing stops at the first error.
pub struct Parser {
    /// Queue of tokens to be processed
    tokens: VecDeque<Token>,

    /// Current token being processed
    current: Option<Token>,

    /// Last token that was processed
    last_token: Option<Token>,

    /// Stack of parser contexts
    context_stack: Vec<ParserContext>,
}

impl Parser {
    /// Creates a new parser with the given tokens
    pub fn new(tokens: Vec<Token>) -> Self {
        let mut tokens_deque = VecDeque::from(tokens);
        let current = tokens_deque.pop_front();

        Parser {
            tokens: tokens_deque,
            current,
            last_token: None,
            context_stack: vec![ParserContext::Normal],
        }
    }

    /// Parses the entire input into one term
    pub fn parse(&mut self) -> Result<Term, ParseError> {
        let term = self.parse_sequence()?;

        if !self.check(TokenType::EOF) && self.current.is_some() {
            return self.unexpected("end of input");
        }

        Ok(term)
    }

    /// Push a context onto the stack
    pub fn push_context(&mut self, context: ParserContext) {
        self.context_stack.push(context);
    }

    /// Pop a context from the stack
    pub fn pop_context(&mut self) -> Option<ParserContext> {
        if self.context_stack.len() > 1 {
            self.context_stack.pop()
        } else {
            None
        }
    }

    /// Check if any context in the stack matches the given context
    pub fn is_in_context(&self, context: ParserContext) -> bool {
        self.context_stack.contains(&context)
    }

    /// Execute a function with a temporary context
    pub fn with_context<F, T>(&mut self, context: ParserContext, f: F) -> T
    where
        F: FnOnce(&mut Self) -> T,
    {
        self.push_context(context);
        let result = f(self);
        self.pop_context();
        result
    }

    /// Get the current token position or a default if no token exists
    pub fn current_position(&self) -> (usize, usize) {
        match &self.current {
            Some(token) => (token.line, token.column),
            None => self.last_position(),
        }
    }

    /// Get the position of the last token or (0,0) if no last token
    pub fn last_position(&self) -> (usize, usize) {
        match &self.last_token {
            Some(token) => (token.line, token.column),
            None => (0, 0),
        }
    }

    /// Advance to the next token, returning the current one
    ///
    /// The parser never moves past the `EOF` token.
    pub fn advance(&mut self) -> Option<Token> {
        if self.check(TokenType::EOF) {
            return self.current.clone();
        }

        let current = self.current.take();
        if let Some(token) = &current {
            self.last_token = Some(token.clone());
        }
        self.current = self.tokens.pop_front();

        current
    }
}

/// Parse a token stream into a term
pub fn parse(tokens: Vec<Token>) -> Result<Term, ParseError> {
    let mut parser = Parser::new(tokens);
    parser.parse()
}
