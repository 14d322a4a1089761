use crate::ast::{PropertyTerm, Term, TermKind};
use crate::typechecker::environment::TypeEnv;
use crate::typechecker::error::{TypeError, TypeErrorKind};
use crate::typechecker::relation::{subtype, type_eq};
use crate::typechecker::TypeResult;
use crate::types::{Param, PropertyType, Type};
use log::{debug, trace};
use std::collections::HashSet;

/// How call arguments and conditional branches are matched against each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compatibility {
    /// Types must be structurally equal
    #[default]
    Exact,
    /// An argument may be a subtype of its parameter, and one branch may be a
    /// subtype of the other
    Subtype,
}

/// Options for a [`TypeChecker`]
#[derive(Debug, Clone, Default)]
pub struct CheckerConfig {
    /// Matching used for call arguments and conditional branches; binder
    /// return types are always compared exactly
    pub compatibility: Compatibility,
}

impl CheckerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_compatibility(mut self, compatibility: Compatibility) -> Self {
        self.compatibility = compatibility;
        self
    }
}

/// Type checker for terms
///
/// The checker holds only its configuration; every call starts from the
/// environment it is given and leaves no state behind, so one checker can be
/// shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct TypeChecker {
    config: CheckerConfig,
}

impl TypeChecker {
    /// Create a new type checker
    pub fn new(config: CheckerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// Type check a term against an environment
    pub fn check(&self, term: &Term, env: &TypeEnv) -> TypeResult<Type> {
        debug!(
            "type-checking {} term at {}:{} ({} scopes deep, {:?} matching)",
            term.kind.name(),
            term.line,
            term.column,
            env.depth(),
            self.config.compatibility
        );
        let result = self.infer(term, env, 0);
        if let Err(error) = &result {
            debug!("type error: {}", error);
        }
        result
    }

    fn infer(&self, term: &Term, env: &TypeEnv, depth: usize) -> TypeResult<Type> {
        trace!(
            "{:indent$}{} at {}:{}",
            "",
            term.kind.name(),
            term.line,
            term.column,
            indent = depth * 2
        );
        let depth = depth + 1;

        match &term.kind {
            TermKind::True | TermKind::False => Ok(Type::Boolean),

            TermKind::Number(_) => Ok(Type::Number),

            TermKind::If { cond, thn, els } => self.check_if(term, cond, thn, els, env, depth),

            TermKind::Add { left, right } => {
                self.expect_number(left, env, depth)?;
                self.expect_number(right, env, depth)?;
                Ok(Type::Number)
            }

            TermKind::Var(name) => env.lookup(name).cloned().ok_or_else(|| {
                TypeError::at(term, TypeErrorKind::UndefinedVariable(name.clone()))
            }),

            TermKind::Func {
                params,
                ret_type,
                body,
            } => self.check_func(term, params, ret_type.as_ref(), body, env, depth),

            TermKind::RecFunc {
                func_name,
                params,
                ret_type,
                body,
                rest,
            } => self.check_rec_func(term, func_name, params, ret_type, body, rest, env, depth),

            TermKind::Call { func, args } => self.check_call(term, func, args, env, depth),

            TermKind::Seq { body, rest } => {
                self.infer(body, env, depth)?;
                self.infer(rest, env, depth)
            }

            TermKind::Const { name, init, rest } => {
                self.check_const(term, name, init, rest, env, depth)
            }

            TermKind::ObjectNew { props } => self.check_object_new(props, env, depth),

            TermKind::ObjectGet { obj, prop_name } => {
                let obj_type = self.infer(obj, env, depth)?;
                if !matches!(obj_type, Type::Object { .. }) {
                    return Err(TypeError::at(
                        obj,
                        TypeErrorKind::ObjectExpected { found: obj_type },
                    ));
                }
                obj_type.get_property(prop_name).cloned().ok_or_else(|| {
                    TypeError::at(term, TypeErrorKind::UnknownProperty(prop_name.clone()))
                })
            }
        }
    }

    fn expect_number(&self, operand: &Term, env: &TypeEnv, depth: usize) -> TypeResult<()> {
        let ty = self.infer(operand, env, depth)?;
        if ty.is_number() {
            Ok(())
        } else {
            Err(TypeError::at(
                operand,
                TypeErrorKind::NumberExpected { found: ty },
            ))
        }
    }

    fn check_if(
        &self,
        term: &Term,
        cond: &Term,
        thn: &Term,
        els: &Term,
        env: &TypeEnv,
        depth: usize,
    ) -> TypeResult<Type> {
        let cond_type = self.infer(cond, env, depth)?;
        if !cond_type.is_boolean() {
            return Err(TypeError::at(
                cond,
                TypeErrorKind::BooleanExpected { found: cond_type },
            ));
        }

        let then_type = self.infer(thn, env, depth)?;
        let else_type = self.infer(els, env, depth)?;
        match self.join_branches(&then_type, &else_type) {
            Some(ty) => Ok(ty),
            None => Err(TypeError::at(
                term,
                TypeErrorKind::BranchMismatch {
                    then_type,
                    else_type,
                },
            )),
        }
    }

    /// Common type of two conditional branches, if they have one
    fn join_branches(&self, then_type: &Type, else_type: &Type) -> Option<Type> {
        match self.config.compatibility {
            Compatibility::Exact => type_eq(then_type, else_type).then(|| then_type.clone()),
            Compatibility::Subtype => {
                if subtype(then_type, else_type) {
                    Some(else_type.clone())
                } else if subtype(else_type, then_type) {
                    Some(then_type.clone())
                } else {
                    None
                }
            }
        }
    }

    /// Whether an argument of type `found` may be passed for `expected`
    fn accepts_argument(&self, found: &Type, expected: &Type) -> bool {
        match self.config.compatibility {
            Compatibility::Exact => type_eq(expected, found),
            Compatibility::Subtype => subtype(found, expected),
        }
    }

    fn check_func(
        &self,
        term: &Term,
        params: &[Param],
        declared: Option<&Type>,
        body: &Term,
        env: &TypeEnv,
        depth: usize,
    ) -> TypeResult<Type> {
        let body_env = env.extend_params(params);
        let body_type = self.infer(body, &body_env, depth)?;

        let ret_type = match declared {
            Some(declared) => {
                if !type_eq(&body_type, declared) {
                    return Err(TypeError::at(
                        term,
                        TypeErrorKind::ReturnTypeMismatch {
                            declared: declared.clone(),
                            found: body_type,
                        },
                    ));
                }
                declared.clone()
            }
            None => body_type,
        };

        Ok(Type::func(params.to_vec(), ret_type))
    }

    #[allow(clippy::too_many_arguments)]
    fn check_rec_func(
        &self,
        term: &Term,
        func_name: &str,
        params: &[Param],
        ret_type: &Type,
        body: &Term,
        rest: &Term,
        env: &TypeEnv,
        depth: usize,
    ) -> TypeResult<Type> {
        // The signature is declared, so it can be bound before the body exists.
        let func_type = Type::func(params.to_vec(), ret_type.clone());

        let body_env = env
            .extend_params(params)
            .extend(func_name, func_type.clone());
        let body_type = self.infer(body, &body_env, depth)?;
        if !type_eq(ret_type, &body_type) {
            return Err(TypeError::at(
                term,
                TypeErrorKind::WrongReturnType {
                    declared: ret_type.clone(),
                    found: body_type,
                },
            ));
        }

        // Parameters stay local to the definition.
        let rest_env = env.extend(func_name, func_type);
        self.infer(rest, &rest_env, depth)
    }

    fn check_call(
        &self,
        term: &Term,
        func: &Term,
        args: &[Term],
        env: &TypeEnv,
        depth: usize,
    ) -> TypeResult<Type> {
        let (params, ret_type) = match self.infer(func, env, depth)? {
            Type::Func { params, ret_type } => (params, ret_type),
            other => {
                return Err(TypeError::at(
                    func,
                    TypeErrorKind::FunctionExpected { found: other },
                ))
            }
        };

        if params.len() != args.len() {
            return Err(TypeError::at(
                term,
                TypeErrorKind::WrongArgumentCount {
                    expected: params.len(),
                    found: args.len(),
                },
            ));
        }

        for (index, (param, arg)) in params.iter().zip(args).enumerate() {
            let arg_type = self.infer(arg, env, depth)?;
            if !self.accepts_argument(&arg_type, &param.ty) {
                return Err(TypeError::at(
                    arg,
                    TypeErrorKind::ArgumentMismatch {
                        index,
                        name: param.name.clone(),
                        expected: param.ty.clone(),
                        found: arg_type,
                    },
                ));
            }
        }

        Ok(*ret_type)
    }

    fn check_const(
        &self,
        term: &Term,
        name: &str,
        init: &Term,
        rest: &Term,
        env: &TypeEnv,
        depth: usize,
    ) -> TypeResult<Type> {
        let TermKind::Func {
            params, ret_type, ..
        } = &init.kind
        else {
            let init_type = self.infer(init, env, depth)?;
            return self.infer(rest, &env.extend(name, init_type), depth);
        };

        let Some(ret_type) = ret_type else {
            return Err(TypeError::at(
                init,
                TypeErrorKind::ReturnTypeRequired(name.to_string()),
            ));
        };

        // A function-valued binder is visible in the continuation through its
        // declared signature. The declared return type is compared against
        // the continuation's type; the function body itself is not checked
        // on this path.
        let func_type = Type::func(params.clone(), ret_type.clone());
        let rest_env = env.extend(name, func_type);
        let rest_type = self.infer(rest, &rest_env, depth)?;
        if !type_eq(ret_type, &rest_type) {
            return Err(TypeError::at(
                term,
                TypeErrorKind::WrongReturnType {
                    declared: ret_type.clone(),
                    found: rest_type,
                },
            ));
        }
        Ok(rest_type)
    }

    fn check_object_new(
        &self,
        props: &[PropertyTerm],
        env: &TypeEnv,
        depth: usize,
    ) -> TypeResult<Type> {
        let mut seen = HashSet::with_capacity(props.len());
        let mut prop_types = Vec::with_capacity(props.len());

        for prop in props {
            if !seen.insert(prop.name.as_str()) {
                return Err(TypeError::at(
                    &prop.term,
                    TypeErrorKind::DuplicateProperty(prop.name.clone()),
                ));
            }
            let ty = self.infer(&prop.term, env, depth)?;
            prop_types.push(PropertyType::new(&prop.name, ty));
        }

        Ok(Type::Object { props: prop_types })
    }
}
