use crate::ast::{PropertyTerm, Term, TermKind};
use crate::lexer::TokenType;
use crate::parser::helpers::{
    TokenMatching, ERR_EXPECTED_EXPRESSION, ERR_EXPECTED_IDENTIFIER, ERR_UNCLOSED_BRACE,
    ERR_UNCLOSED_PAREN,
};
use crate::parser::stmt::SeqParser;
use crate::parser::types::{ParserContext, TypeParser};
use crate::parser::{ParseError, Parser};

/// Parser methods for expressions
pub trait ExprParser {
    /// Parse an expression: an arrow function or a conditional
    fn parse_expression(&mut self) -> Result<Term, ParseError>;

    /// Check whether the current `(` opens an arrow function's parameter list
    fn at_arrow_function(&self) -> bool;

    /// Parse an arrow function `(params): T => body`
    fn parse_arrow_function(&mut self) -> Result<Term, ParseError>;

    /// Parse `cond ? thn : els`
    fn parse_conditional(&mut self) -> Result<Term, ParseError>;

    /// Parse a left-associative chain of `+`
    fn parse_additive(&mut self) -> Result<Term, ParseError>;

    /// Parse calls and property accesses following a primary expression
    fn parse_postfix(&mut self) -> Result<Term, ParseError>;

    /// Parse an atom
    fn parse_primary(&mut self) -> Result<Term, ParseError>;

    /// Parse call arguments up to the closing parenthesis
    fn parse_arguments(&mut self) -> Result<Vec<Term>, ParseError>;

    /// Parse an object literal after its opening brace
    fn parse_object_literal(&mut self, line: usize, column: usize) -> Result<Term, ParseError>;
}

impl ExprParser for Parser {
    fn parse_expression(&mut self) -> Result<Term, ParseError> {
        if self.at_arrow_function() {
            self.parse_arrow_function()
        } else {
            self.parse_conditional()
        }
    }

    fn at_arrow_function(&self) -> bool {
        // Parameters always carry annotations, so `(` followed by `)` or by
        // `name :` can only start a parameter list.
        self.check(TokenType::LeftParen)
            && (self.peek_matches(0, TokenType::RightParen)
                || (self.peek_matches(0, TokenType::Identifier(String::new()))
                    && self.peek_matches(1, TokenType::Colon)))
    }

    fn parse_arrow_function(&mut self) -> Result<Term, ParseError> {
        let (line, column) = self.current_position();
        let params = self.parse_params()?;

        let ret_type = if self.match_token(TokenType::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };

        self.consume(TokenType::Arrow, "'=>'")?;

        let body = if self.match_token(TokenType::LeftBrace) {
            let body = self.with_context(ParserContext::Function, |parser| parser.parse_sequence())?;
            self.consume(TokenType::RightBrace, ERR_UNCLOSED_BRACE)?;
            body
        } else {
            self.parse_expression()?
        };

        Ok(Term::func(params, ret_type, body).at(line, column))
    }

    fn parse_conditional(&mut self) -> Result<Term, ParseError> {
        let cond = self.parse_additive()?;

        if !self.match_token(TokenType::Question) {
            return Ok(cond);
        }

        let (line, column) = (cond.line, cond.column);
        let thn = self.parse_expression()?;
        self.consume(TokenType::Colon, "':' in conditional expression")?;
        let els = self.parse_expression()?;

        Ok(Term::cond(cond, thn, els).at(line, column))
    }

    fn parse_additive(&mut self) -> Result<Term, ParseError> {
        let mut left = self.parse_postfix()?;

        while self.match_token(TokenType::Plus) {
            let right = self.parse_postfix()?;
            let (line, column) = (left.line, left.column);
            left = Term::add(left, right).at(line, column);
        }

        Ok(left)
    }

    fn parse_postfix(&mut self) -> Result<Term, ParseError> {
        let mut expr = self.parse_primary()?;

        loop {
            if self.match_token(TokenType::LeftParen) {
                let args = self.parse_arguments()?;
                let (line, column) = (expr.line, expr.column);
                expr = Term::call(expr, args).at(line, column);
            } else if self.match_token(TokenType::Dot) {
                let (name, line, column) = self.consume_identifier("property name")?;
                expr = Term::get(expr, &name).at(line, column);
            } else {
                return Ok(expr);
            }
        }
    }

    fn parse_primary(&mut self) -> Result<Term, ParseError> {
        let Some(token) = self.current.clone() else {
            return self.unexpected(ERR_EXPECTED_EXPRESSION);
        };
        let (line, column) = (token.line, token.column);

        match token.token_type {
            TokenType::True => {
                self.advance();
                Ok(Term::boolean(true).at(line, column))
            }
            TokenType::False => {
                self.advance();
                Ok(Term::boolean(false).at(line, column))
            }
            TokenType::NumberLiteral(value) => {
                self.advance();
                Ok(Term::number(value).at(line, column))
            }
            TokenType::Identifier(name) => {
                self.advance();
                Ok(Term::var(&name).at(line, column))
            }
            TokenType::LeftParen if self.at_arrow_function() => self.parse_arrow_function(),
            TokenType::LeftParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.consume(TokenType::RightParen, ERR_UNCLOSED_PAREN)?;
                Ok(expr)
            }
            TokenType::LeftBrace => {
                self.advance();
                self.parse_object_literal(line, column)
            }
            _ => self.unexpected(ERR_EXPECTED_EXPRESSION),
        }
    }

    fn parse_arguments(&mut self) -> Result<Vec<Term>, ParseError> {
        let mut args = Vec::new();

        while !self.check(TokenType::RightParen) {
            args.push(self.parse_expression()?);
            if !self.match_token(TokenType::Comma) {
                break;
            }
        }

        self.consume(TokenType::RightParen, ERR_UNCLOSED_PAREN)?;
        Ok(args)
    }

    fn parse_object_literal(&mut self, line: usize, column: usize) -> Result<Term, ParseError> {
        let mut props = Vec::new();

        while !self.check(TokenType::RightBrace) {
            let (name, name_line, name_column) =
                self.consume_identifier(ERR_EXPECTED_IDENTIFIER)?;

            let term = if self.match_token(TokenType::Colon) {
                self.parse_expression()?
            } else {
                // `{ x }` is shorthand for `{ x: x }`
                Term::var(&name).at(name_line, name_column)
            };
            props.push(PropertyTerm { name, term });

            if !self.match_token(TokenType::Comma) {
                break;
            }
        }

        self.consume(TokenType::RightBrace, ERR_UNCLOSED_BRACE)?;
        Ok(Term::new(TermKind::ObjectNew { props }).at(line, column))
    }
}
