use crate::lexer::TokenType;
use crate::parser::helpers::{
    TokenMatching, ERR_EXPECTED_IDENTIFIER, ERR_EXPECTED_TYPE, ERR_UNCLOSED_BRACE,
    ERR_UNCLOSED_PAREN,
};
use crate::parser::{ParseError, Parser};
use crate::types::{Param, PropertyType, Type};

/// Represents the context in which parsing is occurring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserContext {
    /// Top level of the program
    Normal,

    /// Inside a function body, where `return` is allowed
    Function,
}

/// Parser methods for type annotations
pub trait TypeParser {
    /// Parse a type: `boolean`, `number`, a function type or an object type
    fn parse_type(&mut self) -> Result<Type, ParseError>;

    /// Parse a parenthesized, typed parameter list
    fn parse_params(&mut self) -> Result<Vec<Param>, ParseError>;

    /// Parse the body of an object type after its opening brace
    fn parse_object_type(&mut self) -> Result<Type, ParseError>;
}

impl TypeParser for Parser {
    fn parse_type(&mut self) -> Result<Type, ParseError> {
        if self.check(TokenType::LeftParen) {
            let params = self.parse_params()?;
            self.consume(TokenType::Arrow, "'=>' in function type")?;
            let ret_type = self.parse_type()?;
            return Ok(Type::func(params, ret_type));
        }

        if self.match_token(TokenType::LeftBrace) {
            return self.parse_object_type();
        }

        let (line, column) = self.current_position();
        let (name, _, _) = self.consume_identifier(ERR_EXPECTED_TYPE)?;
        match name.as_str() {
            "boolean" => Ok(Type::Boolean),
            "number" => Ok(Type::Number),
            _ => Err(ParseError::invalid_syntax(
                &format!("Unknown type '{}'", name),
                line,
                column,
            )),
        }
    }

    fn parse_params(&mut self) -> Result<Vec<Param>, ParseError> {
        self.consume(TokenType::LeftParen, "'('")?;
        let mut params = Vec::new();

        while !self.check(TokenType::RightParen) {
            let (name, _, _) = self.consume_identifier(ERR_EXPECTED_IDENTIFIER)?;
            self.consume(TokenType::Colon, "':' and a parameter type")?;
            let ty = self.parse_type()?;
            params.push(Param { name, ty });

            if !self.match_token(TokenType::Comma) {
                break;
            }
        }

        self.consume(TokenType::RightParen, ERR_UNCLOSED_PAREN)?;
        Ok(params)
    }

    fn parse_object_type(&mut self) -> Result<Type, ParseError> {
        let mut props: Vec<PropertyType> = Vec::new();

        while !self.check(TokenType::RightBrace) {
            let (name, line, column) = self.consume_identifier(ERR_EXPECTED_IDENTIFIER)?;
            if props.iter().any(|p| p.name == name) {
                return Err(ParseError::invalid_syntax(
                    &format!("Duplicate property '{}' in object type", name),
                    line,
                    column,
                ));
            }
            self.consume(TokenType::Colon, "':' and a property type")?;
            let ty = self.parse_type()?;
            props.push(PropertyType { name, ty });

            if !self.match_token(TokenType::SemiColon) && !self.match_token(TokenType::Comma) {
                break;
            }
        }

        self.consume(TokenType::RightBrace, ERR_UNCLOSED_BRACE)?;
        Ok(Type::Object { props })
    }
}
