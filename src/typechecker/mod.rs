use crate::ast::Term;
use crate::types::Type;
use log::debug;
use rayon::prelude::*;

mod checker;
mod environment;
mod error;
mod relation;

pub use checker::{CheckerConfig, Compatibility, TypeChecker};
pub use environment::{TypeEnv, TypeEnvironment};
pub use error::{ErrorCategory, TypeError, TypeErrorKind};
pub use relation::{subtype, type_eq};

/// Result type for type checking operations
pub type TypeResult<T> = Result<T, TypeError>;

/// Type check a term against an environment with the default configuration
pub fn typecheck(term: &Term, env: &TypeEnv) -> TypeResult<Type> {
    TypeChecker::default().check(term, env)
}

/// Main entry point for type checking a whole program
pub fn check_program(term: &Term) -> TypeResult<Type> {
    typecheck(term, &TypeEnv::new())
}

/// Type check independent terms in parallel against one shared environment
///
/// Results are returned in the order of `terms`.
pub fn check_batch(checker: &TypeChecker, terms: &[Term], env: &TypeEnv) -> Vec<TypeResult<Type>> {
    debug!("type-checking a batch of {} terms", terms.len());
    terms.par_iter().map(|term| checker.check(term, env)).collect()
}
