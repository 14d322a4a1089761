use crate::types::{Param, Type};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Represents one scope in the type environment
#[derive(Debug)]
struct Scope {
    /// Maps names bound by this scope to their types
    variables: HashMap<String, Type>,
    /// The enclosing scope, if any
    parent: Option<Arc<Scope>>,
}

impl Scope {
    /// Look up a name, searching from this scope outward
    fn lookup(&self, name: &str) -> Option<&Type> {
        let mut scope = self;
        loop {
            if let Some(ty) = scope.variables.get(name) {
                return Some(ty);
            }
            scope = scope.parent.as_deref()?;
        }
    }
}

/// Type environment mapping variable names to their types
///
/// Environments are persistent: extending one produces a new environment
/// whose innermost scope holds only the new bindings and links to the
/// enclosing scopes, which are shared rather than copied. The receiver is
/// never modified, so a binding added for an inner scope cannot leak into
/// the scope that created it.
#[derive(Debug, Clone, Default)]
pub struct TypeEnvironment {
    head: Option<Arc<Scope>>,
}

/// Short alias used throughout the checker
pub type TypeEnv = TypeEnvironment;

impl TypeEnvironment {
    /// Create a new empty type environment
    pub fn new() -> Self {
        Self { head: None }
    }

    /// Return a new environment with `name` bound to `ty`
    ///
    /// An existing binding for `name` is shadowed in the new environment only.
    pub fn extend(&self, name: &str, ty: Type) -> Self {
        let mut variables = HashMap::with_capacity(1);
        variables.insert(name.to_string(), ty);
        self.push_scope(variables)
    }

    /// Return a new environment with every parameter bound to its type
    ///
    /// Later parameters shadow earlier ones of the same name.
    pub fn extend_params(&self, params: &[Param]) -> Self {
        if params.is_empty() {
            return self.clone();
        }
        let variables = params
            .iter()
            .map(|param| (param.name.clone(), param.ty.clone()))
            .collect();
        self.push_scope(variables)
    }

    fn push_scope(&self, variables: HashMap<String, Type>) -> Self {
        Self {
            head: Some(Arc::new(Scope {
                variables,
                parent: self.head.clone(),
            })),
        }
    }

    /// Look up a variable's type in the environment
    pub fn lookup(&self, name: &str) -> Option<&Type> {
        self.head.as_deref()?.lookup(name)
    }

    /// Check if a name is bound in the environment
    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Number of distinct names visible in the environment
    pub fn len(&self) -> usize {
        self.visible_names().len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes().all(|scope| scope.variables.is_empty())
    }

    /// Number of scopes between the innermost binding and the top level
    pub fn depth(&self) -> usize {
        self.scopes().count()
    }

    /// Names visible in the environment, innermost bindings first
    pub fn visible_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        for scope in self.scopes() {
            for name in scope.variables.keys() {
                if seen.insert(name.as_str()) {
                    names.push(name.as_str());
                }
            }
        }
        names
    }

    fn scopes(&self) -> impl Iterator<Item = &Scope> {
        std::iter::successors(self.head.as_deref(), |scope| scope.parent.as_deref())
    }
}

impl FromIterator<(String, Type)> for TypeEnvironment {
    fn from_iter<I: IntoIterator<Item = (String, Type)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(TypeEnvironment::new(), |env, (name, ty)| env.extend(&name, ty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_in_empty_environment_fails() {
        let env = TypeEnvironment::new();
        assert!(env.lookup("x").is_none());
        assert!(env.is_empty());
    }

    #[test]
    fn extend_does_not_modify_receiver() {
        let outer = TypeEnvironment::new().extend("x", Type::Number);
        let inner = outer.extend("y", Type::Boolean);

        assert!(inner.contains("x"));
        assert!(inner.contains("y"));
        assert!(!outer.contains("y"));
        assert_eq!(outer.len(), 1);
        assert_eq!(inner.len(), 2);
    }

    #[test]
    fn shadowing_is_scoped() {
        let outer = TypeEnvironment::new().extend("x", Type::Number);
        let inner = outer.extend("x", Type::Boolean);

        assert_eq!(inner.lookup("x"), Some(&Type::Boolean));
        assert_eq!(outer.lookup("x"), Some(&Type::Number));
        assert_eq!(inner.len(), 1);
    }

    #[test]
    fn later_params_shadow_earlier_ones() {
        let env = TypeEnvironment::new().extend_params(&[
            Param::new("a", Type::Number),
            Param::new("b", Type::Number),
        ]);
        assert_eq!(env.lookup("a"), Some(&Type::Number));

        let env = TypeEnvironment::new().extend_params(&[
            Param::new("a", Type::Number),
            Param::new("a", Type::Boolean),
        ]);
        assert_eq!(env.lookup("a"), Some(&Type::Boolean));
    }

    #[test]
    fn collects_from_pairs() {
        let env: TypeEnvironment = vec![
            ("x".to_string(), Type::Number),
            ("f".to_string(), Type::func(vec![], Type::Boolean)),
        ]
        .into_iter()
        .collect();

        assert_eq!(env.lookup("f"), Some(&Type::func(vec![], Type::Boolean)));
        assert_eq!(env.visible_names().len(), 2);
    }

    #[test]
    fn depth_counts_scopes_not_names() {
        let env = TypeEnvironment::new();
        assert_eq!(env.depth(), 0);

        let env = env
            .extend_params(&[
                Param::new("a", Type::Number),
                Param::new("b", Type::Boolean),
            ])
            .extend("a", Type::Boolean);
        assert_eq!(env.depth(), 2);
        assert_eq!(env.len(), 2);
        assert!(!env.is_empty());
    }

    #[test]
    fn environment_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TypeEnvironment>();
    }
}
