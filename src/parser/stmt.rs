use crate::ast::Term;
use crate::lexer::TokenType;
use crate::parser::expr::ExprParser;
use crate::parser::helpers::{TokenMatching, ERR_EXPECTED_IDENTIFIER, ERR_UNCLOSED_BRACE};
use crate::parser::types::{ParserContext, TypeParser};
use crate::parser::{ParseError, Parser};

/// Parser methods for statement sequences
///
/// A sequence is a chain of declarations and expression statements ending in
/// the expression that gives the sequence its value.
pub trait SeqParser {
    /// Parse a sequence up to the end of the enclosing block or input
    fn parse_sequence(&mut self) -> Result<Term, ParseError>;

    /// Parse `const name = init; rest`
    fn parse_const(&mut self) -> Result<Term, ParseError>;

    /// Parse `function name(params): T { body } rest`
    fn parse_function_declaration(&mut self) -> Result<Term, ParseError>;

    /// Parse `return expr;` as the last statement of a function body
    fn parse_return(&mut self) -> Result<Term, ParseError>;

    /// Parse the continuation after a declaration
    fn parse_rest(&mut self, after: &str) -> Result<Term, ParseError>;

    /// Check whether the current token closes a sequence
    fn at_sequence_end(&self) -> bool;
}

impl SeqParser for Parser {
    fn parse_sequence(&mut self) -> Result<Term, ParseError> {
        if self.check(TokenType::Const) {
            return self.parse_const();
        }
        if self.check(TokenType::Function) {
            return self.parse_function_declaration();
        }
        if self.check(TokenType::Return) {
            return self.parse_return();
        }

        let body = self.parse_expression()?;
        if !self.match_token(TokenType::SemiColon) || self.at_sequence_end() {
            return Ok(body);
        }

        let (line, column) = (body.line, body.column);
        let rest = self.parse_sequence()?;
        Ok(Term::seq(body, rest).at(line, column))
    }

    fn parse_const(&mut self) -> Result<Term, ParseError> {
        let keyword = self.consume(TokenType::Const, "'const'")?;
        let (name, _, _) = self.consume_identifier(ERR_EXPECTED_IDENTIFIER)?;
        self.consume(TokenType::Assign, "'=' after constant name")?;
        let init = self.parse_expression()?;
        self.consume(TokenType::SemiColon, "';' after constant declaration")?;
        let rest = self.parse_rest("constant declaration")?;

        Ok(Term::constant(&name, init, rest).at(keyword.line, keyword.column))
    }

    fn parse_function_declaration(&mut self) -> Result<Term, ParseError> {
        let keyword = self.consume(TokenType::Function, "'function'")?;
        let (name, _, _) = self.consume_identifier("function name")?;
        let params = self.parse_params()?;
        if !self.match_token(TokenType::Colon) {
            return self.syntax_error(&format!("Return type is required for function '{}'", name));
        }
        let ret_type = self.parse_type()?;

        self.consume(TokenType::LeftBrace, "'{' to open function body")?;
        let body = self.with_context(ParserContext::Function, |parser| parser.parse_sequence())?;
        self.consume(TokenType::RightBrace, ERR_UNCLOSED_BRACE)?;

        let rest = self.parse_rest("function declaration")?;

        Ok(Term::rec_func(&name, params, ret_type, body, rest).at(keyword.line, keyword.column))
    }

    fn parse_return(&mut self) -> Result<Term, ParseError> {
        if !self.is_in_context(ParserContext::Function) {
            return self.syntax_error("'return' outside of a function body");
        }
        self.consume(TokenType::Return, "'return'")?;
        let value = self.parse_expression()?;
        self.match_token(TokenType::SemiColon);

        if !self.check(TokenType::RightBrace) {
            return self.unexpected("'}' after return statement");
        }
        Ok(value)
    }

    fn parse_rest(&mut self, after: &str) -> Result<Term, ParseError> {
        if self.at_sequence_end() {
            return self.syntax_error(&format!("Expected an expression after {}", after));
        }
        self.parse_sequence()
    }

    fn at_sequence_end(&self) -> bool {
        self.check(TokenType::RightBrace) || self.check(TokenType::EOF)
    }
}
