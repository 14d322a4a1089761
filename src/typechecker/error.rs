use crate::ast::Term;
use crate::types::Type;
use thiserror::Error;

/// Reason a term failed to type-check
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TypeErrorKind {
    #[error("boolean expected, found {found}")]
    BooleanExpected { found: Type },

    #[error("number expected, found {found}")]
    NumberExpected { found: Type },

    #[error("then and else must have the same type (then: {then_type}, else: {else_type})")]
    BranchMismatch { then_type: Type, else_type: Type },

    #[error("undefined variable: {0}")]
    UndefinedVariable(String),

    /// Body of a plain function disagrees with its declared return type
    #[error("return type mismatch: declared {declared}, found {found}")]
    ReturnTypeMismatch { declared: Type, found: Type },

    /// Body of a recursive binder disagrees with its declared return type
    #[error("wrong return type: declared {declared}, found {found}")]
    WrongReturnType { declared: Type, found: Type },

    #[error("function expected, found {found}")]
    FunctionExpected { found: Type },

    #[error("wrong number of arguments: expected {expected}, found {found}")]
    WrongArgumentCount { expected: usize, found: usize },

    #[error("argument type mismatch for parameter {index} ({name}): expected {expected}, found {found}")]
    ArgumentMismatch {
        index: usize,
        name: String,
        expected: Type,
        found: Type,
    },

    #[error("return type is required for function {0}")]
    ReturnTypeRequired(String),

    #[error("object type expected, found {found}")]
    ObjectExpected { found: Type },

    #[error("unknown property name: {0}")]
    UnknownProperty(String),

    #[error("duplicate property name: {0}")]
    DuplicateProperty(String),
}

/// Broad classes of type errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A term has the wrong kind of type for its position
    Shape,
    /// A call supplies the wrong number of arguments
    Arity,
    /// Two types that must agree do not
    Consistency,
    /// A name is not bound
    Scope,
}

impl TypeErrorKind {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TypeErrorKind::BooleanExpected { .. }
            | TypeErrorKind::NumberExpected { .. }
            | TypeErrorKind::FunctionExpected { .. }
            | TypeErrorKind::ObjectExpected { .. } => ErrorCategory::Shape,
            TypeErrorKind::WrongArgumentCount { .. } => ErrorCategory::Arity,
            TypeErrorKind::BranchMismatch { .. }
            | TypeErrorKind::ReturnTypeMismatch { .. }
            | TypeErrorKind::WrongReturnType { .. }
            | TypeErrorKind::ArgumentMismatch { .. }
            | TypeErrorKind::ReturnTypeRequired(_)
            | TypeErrorKind::UnknownProperty(_)
            | TypeErrorKind::DuplicateProperty(_) => ErrorCategory::Consistency,
            TypeErrorKind::UndefinedVariable(_) => ErrorCategory::Scope,
        }
    }
}

/// A type error, located at the term that caused it
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{line}:{column}: {kind}")]
pub struct TypeError {
    pub kind: TypeErrorKind,
    pub line: usize,
    pub column: usize,
}

impl TypeError {
    pub fn new(kind: TypeErrorKind, line: usize, column: usize) -> Self {
        TypeError { kind, line, column }
    }

    /// Create an error located at `term`
    pub fn at(term: &Term, kind: TypeErrorKind) -> Self {
        TypeError::new(kind, term.line, term.column)
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// The message without the position prefix
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}
