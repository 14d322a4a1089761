//! Structural relations between types: equality and subtyping.

use crate::types::{PropertyType, Type};

fn find_prop<'a>(props: &'a [PropertyType], name: &str) -> Option<&'a PropertyType> {
    props.iter().find(|p| p.name == name)
}

/// Structural type equality
///
/// Parameter names are irrelevant; object properties are matched by name, so
/// their order is irrelevant too. Objects must have the same number of
/// properties and every property of `ty2` must exist in `ty1` with an equal
/// type.
pub fn type_eq(ty1: &Type, ty2: &Type) -> bool {
    match ty2 {
        Type::Boolean => matches!(ty1, Type::Boolean),
        Type::Number => matches!(ty1, Type::Number),
        Type::Func {
            params: params2,
            ret_type: ret2,
        } => {
            let Type::Func {
                params: params1,
                ret_type: ret1,
            } = ty1
            else {
                return false;
            };
            params1.len() == params2.len()
                && params1
                    .iter()
                    .zip(params2)
                    .all(|(p1, p2)| type_eq(&p1.ty, &p2.ty))
                && type_eq(ret1, ret2)
        }
        Type::Object { props: props2 } => {
            let Type::Object { props: props1 } = ty1 else {
                return false;
            };
            props1.len() == props2.len()
                && props2.iter().all(|prop2| {
                    find_prop(props1, &prop2.name).is_some_and(|prop1| type_eq(&prop1.ty, &prop2.ty))
                })
        }
    }
}

/// Whether `ty1` is usable where `ty2` is expected
///
/// Objects allow width and depth subtyping. Functions are contravariant in
/// their parameters and covariant in their return type. There is no
/// subtyping between primitives.
pub fn subtype(ty1: &Type, ty2: &Type) -> bool {
    match ty2 {
        Type::Boolean => matches!(ty1, Type::Boolean),
        Type::Number => matches!(ty1, Type::Number),
        Type::Object { props: props2 } => {
            let Type::Object { props: props1 } = ty1 else {
                return false;
            };
            props2.iter().all(|prop2| {
                find_prop(props1, &prop2.name).is_some_and(|prop1| subtype(&prop1.ty, &prop2.ty))
            })
        }
        Type::Func {
            params: params2,
            ret_type: ret2,
        } => {
            let Type::Func {
                params: params1,
                ret_type: ret1,
            } = ty1
            else {
                return false;
            };
            params1.len() == params2.len()
                && params1
                    .iter()
                    .zip(params2)
                    .all(|(p1, p2)| subtype(&p2.ty, &p1.ty))
                && subtype(ret1, ret2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Param;

    fn point() -> Type {
        Type::object(vec![("x", Type::Number), ("y", Type::Number)])
    }

    fn x_only() -> Type {
        Type::object(vec![("x", Type::Number)])
    }

    #[test]
    fn primitives_equal_only_themselves() {
        assert!(type_eq(&Type::Number, &Type::Number));
        assert!(type_eq(&Type::Boolean, &Type::Boolean));
        assert!(!type_eq(&Type::Number, &Type::Boolean));
        assert!(!type_eq(&Type::Boolean, &Type::Number));
    }

    #[test]
    fn function_equality_ignores_param_names() {
        let f = Type::func(vec![Param::new("a", Type::Number)], Type::Boolean);
        let g = Type::func(vec![Param::new("b", Type::Number)], Type::Boolean);
        assert!(type_eq(&f, &g));
    }

    #[test]
    fn function_equality_checks_arity_and_positions() {
        let one = Type::func(vec![Param::new("a", Type::Number)], Type::Number);
        let two = Type::func(
            vec![Param::new("a", Type::Number), Param::new("b", Type::Number)],
            Type::Number,
        );
        let swapped = Type::func(
            vec![Param::new("a", Type::Boolean), Param::new("b", Type::Number)],
            Type::Number,
        );
        let mixed = Type::func(
            vec![Param::new("a", Type::Number), Param::new("b", Type::Boolean)],
            Type::Number,
        );
        assert!(!type_eq(&one, &two));
        assert!(!type_eq(&swapped, &mixed));
    }

    #[test]
    fn object_equality_ignores_order() {
        let a = Type::object(vec![("x", Type::Number), ("y", Type::Boolean)]);
        let b = Type::object(vec![("y", Type::Boolean), ("x", Type::Number)]);
        assert!(type_eq(&a, &b));
        assert!(type_eq(&b, &a));
    }

    #[test]
    fn object_equality_requires_same_width() {
        assert!(!type_eq(&point(), &x_only()));
        assert!(!type_eq(&x_only(), &point()));
    }

    #[test]
    fn width_subtyping() {
        assert!(subtype(&point(), &x_only()));
        assert!(!subtype(&x_only(), &point()));
    }

    #[test]
    fn depth_subtyping() {
        let wide = Type::object(vec![("p", point())]);
        let narrow = Type::object(vec![("p", x_only())]);
        assert!(subtype(&wide, &narrow));
        assert!(!subtype(&narrow, &wide));
    }

    #[test]
    fn no_subtyping_between_primitives() {
        assert!(!subtype(&Type::Number, &Type::Boolean));
        assert!(!subtype(&Type::Boolean, &Type::Number));
        assert!(!subtype(&point(), &Type::Number));
    }

    #[test]
    fn function_parameters_are_contravariant() {
        let takes_point = Type::func(vec![Param::new("p", point())], Type::Number);
        let takes_x = Type::func(vec![Param::new("p", x_only())], Type::Number);
        // Accepting less is usable where more is guaranteed.
        assert!(subtype(&takes_x, &takes_point));
        assert!(!subtype(&takes_point, &takes_x));
    }

    #[test]
    fn function_returns_are_covariant() {
        let returns_point = Type::func(vec![], point());
        let returns_x = Type::func(vec![], x_only());
        assert!(subtype(&returns_point, &returns_x));
        assert!(!subtype(&returns_x, &returns_point));
    }

    #[test]
    fn function_subtyping_requires_same_arity() {
        let unary = Type::func(vec![Param::new("a", Type::Number)], Type::Number);
        let nullary = Type::func(vec![], Type::Number);
        assert!(!subtype(&unary, &nullary));
        assert!(!subtype(&nullary, &unary));
    }
}
