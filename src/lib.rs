pub mod ast;
pub mod lexer;
pub mod parser;
pub mod typechecker;
pub mod types;

pub use ast::{PropertyTerm, Term, TermKind};
pub use lexer::{Lexer, LexerError, Token, TokenType};
pub use parser::ParseError;
pub use typechecker::{
    check_batch, check_program, subtype, type_eq, typecheck, CheckerConfig, Compatibility,
    TypeChecker, TypeEnv, TypeError, TypeErrorKind, TypeResult,
};
pub use types::{Param, PropertyType, Type};

use thiserror::Error;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Any failure on the way from source text to a type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("lexical errors: {}", join_messages(.0))]
    Lex(Vec<LexerError>),

    #[error("syntax error at {0}")]
    Parse(#[from] ParseError),

    #[error("type error at {0}")]
    Type(#[from] TypeError),
}

fn join_messages(errors: &[LexerError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Lex and parse source text into a term
pub fn parse(source: &str) -> Result<Term, Error> {
    let mut lexer = Lexer::new(source);
    let tokens = lexer.tokenize();

    let lexer_errors = lexer.get_errors();
    if !lexer_errors.is_empty() {
        return Err(Error::Lex(lexer_errors.to_vec()));
    }

    Ok(parser::parse(tokens)?)
}

/// Parse source text and type-check it under an empty environment
pub fn check_source(source: &str) -> Result<Type, Error> {
    let term = parse(source)?;
    Ok(check_program(&term)?)
}
