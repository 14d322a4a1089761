use test_case::test_case;
use tyck::typechecker::{
    self, CheckerConfig, Compatibility, ErrorCategory, TypeChecker, TypeEnv, TypeErrorKind,
};
use tyck::{Param, Term, Type};

fn check(source: &str) -> Result<Type, TypeErrorKind> {
    let term = tyck::parse(source).unwrap();
    typechecker::check_program(&term).map_err(|e| e.kind)
}

fn check_with_subtyping(source: &str) -> Result<Type, TypeErrorKind> {
    let term = tyck::parse(source).unwrap();
    let checker =
        TypeChecker::new(CheckerConfig::new().with_compatibility(Compatibility::Subtype));
    checker.check(&term, &TypeEnv::new()).map_err(|e| e.kind)
}

fn point() -> Type {
    Type::object(vec![("x", Type::Number), ("y", Type::Number)])
}

#[test_case("true", Type::Boolean ; "true literal")]
#[test_case("false", Type::Boolean ; "false literal")]
#[test_case("42", Type::Number ; "number literal")]
#[test_case("1 + 2 + 3", Type::Number ; "additions")]
#[test_case("true ? 1 : 2", Type::Number ; "conditional")]
#[test_case("false ? true : false", Type::Boolean ; "boolean conditional")]
#[test_case("1; true", Type::Boolean ; "sequence takes the last type")]
#[test_case("const x = 1; x + x", Type::Number ; "constant")]
#[test_case("const x = 1; const x = true; x", Type::Boolean ; "shadowed constant")]
#[test_case("{}", Type::Object { props: vec![] } ; "empty object")]
fn test_well_typed_programs(source: &str, expected: Type) {
    assert_eq!(check(source), Ok(expected));
}

#[test]
fn test_arithmetic_through_constants() {
    let source = r#"
const add = (x: number, y: number) => x + y;
add(1, 2)
"#;
    // A function-valued constant needs a declared return type.
    assert_eq!(check(source), Err(TypeErrorKind::ReturnTypeRequired("add".to_string())));

    let source = r#"
const add = (x: number, y: number): number => x + y;
add(1, 2)
"#;
    assert_eq!(check(source), Ok(Type::Number));
}

#[test]
fn test_ill_typed_conditional() {
    assert_eq!(
        check("true ? 1 : true"),
        Err(TypeErrorKind::BranchMismatch {
            then_type: Type::Number,
            else_type: Type::Boolean,
        })
    );
    assert_eq!(
        check("1 ? 1 : 2"),
        Err(TypeErrorKind::BooleanExpected {
            found: Type::Number
        })
    );
}

#[test]
fn test_addition_requires_numbers() {
    let term = tyck::parse("1 + true").unwrap();
    let error = typechecker::check_program(&term).unwrap_err();

    assert_eq!(
        error.kind,
        TypeErrorKind::NumberExpected {
            found: Type::Boolean
        }
    );
    assert_eq!((error.line, error.column), (1, 5));
    assert_eq!(error.category(), ErrorCategory::Shape);
    assert_eq!(error.to_string(), "1:5: number expected, found boolean");
}

#[test]
fn test_undefined_variable() {
    assert_eq!(
        check("x + 1"),
        Err(TypeErrorKind::UndefinedVariable("x".to_string()))
    );
}

#[test]
fn test_discarded_terms_are_still_checked() {
    // A sequence drops the type of its first term, not its errors.
    assert_eq!(
        check("1 + true; 2"),
        Err(TypeErrorKind::NumberExpected {
            found: Type::Boolean
        })
    );
    assert_eq!(
        check("const x = 1 + true; 3"),
        Err(TypeErrorKind::NumberExpected {
            found: Type::Boolean
        })
    );
    assert_eq!(
        check("const x = missing; 3"),
        Err(TypeErrorKind::UndefinedVariable("missing".to_string()))
    );
}

#[test]
fn test_program_with_declared_helpers() {
    let source = r#"
function count(n: number): number {
    return count(n + 1);
}
function shift(p: { x: number; y: number }): { x: number; y: number } {
    return { x: p.x + 1, y: p.y };
}
const origin = { x: 0, y: 0 };
true ? count(shift(origin).x) : origin.y
"#;
    assert_eq!(check(source), Ok(Type::Number));
}

#[test]
fn test_function_types() {
    assert_eq!(
        check("(x: number) => x + 1"),
        Ok(Type::func(vec![Param::new("x", Type::Number)], Type::Number))
    );
    assert_eq!(
        check("(x: number): boolean => x"),
        Err(TypeErrorKind::ReturnTypeMismatch {
            declared: Type::Boolean,
            found: Type::Number,
        })
    );
    assert_eq!(check("() => true"), Ok(Type::func(vec![], Type::Boolean)));
}

#[test]
fn test_later_parameters_shadow_earlier_ones() {
    assert_eq!(
        check("(x: number, x: boolean) => x"),
        Ok(Type::func(
            vec![
                Param::new("x", Type::Number),
                Param::new("x", Type::Boolean)
            ],
            Type::Boolean
        ))
    );
}

#[test]
fn test_calls() {
    assert_eq!(check("((x: number) => x)(1)"), Ok(Type::Number));
    assert_eq!(
        check("((x: number) => x)(1, 2)"),
        Err(TypeErrorKind::WrongArgumentCount {
            expected: 1,
            found: 2
        })
    );
    assert_eq!(
        check("((x: number) => x)(true)"),
        Err(TypeErrorKind::ArgumentMismatch {
            index: 0,
            name: "x".to_string(),
            expected: Type::Number,
            found: Type::Boolean,
        })
    );
    assert_eq!(
        check("const a = 1; a(2)"),
        Err(TypeErrorKind::FunctionExpected {
            found: Type::Number
        })
    );
}

#[test]
fn test_recursive_function() {
    let source = r#"
function count(n: number): number {
    return count(n + 1);
}
count(1) + count(2)
"#;
    assert_eq!(check(source), Ok(Type::Number));

    let term = tyck::parse("function f(n: number): number { return n; } f").unwrap();
    assert_eq!(
        typechecker::check_program(&term),
        Ok(Type::func(vec![Param::new("n", Type::Number)], Type::Number))
    );
}

#[test]
fn test_recursive_function_body_must_match() {
    let source = "function f(n: number): boolean { return n; } f(1)";
    let term = tyck::parse(source).unwrap();
    let error = typechecker::check_program(&term).unwrap_err();

    assert_eq!(
        error.kind,
        TypeErrorKind::WrongReturnType {
            declared: Type::Boolean,
            found: Type::Number,
        }
    );
    assert_eq!((error.line, error.column), (1, 1));
}

#[test]
fn test_parameters_do_not_leak_into_continuation() {
    assert_eq!(
        check("function f(n: number): number { return n; } n"),
        Err(TypeErrorKind::UndefinedVariable("n".to_string()))
    );
}

#[test]
fn test_function_valued_constant_compares_continuation() {
    // The continuation, not the function body, is compared against the
    // declared return type.
    assert_eq!(
        check("const f = (x: number): number => x; true"),
        Err(TypeErrorKind::WrongReturnType {
            declared: Type::Number,
            found: Type::Boolean,
        })
    );
    assert_eq!(
        check("const f = (x: number): number => true; f(1)"),
        Ok(Type::Number)
    );
}

#[test]
fn test_objects() {
    let source = "const o = { x: 1, y: true }; o.y";
    assert_eq!(check(source), Ok(Type::Boolean));

    assert_eq!(
        check("const o = { x: 1, y: true }; o.z"),
        Err(TypeErrorKind::UnknownProperty("z".to_string()))
    );
    assert_eq!(
        check("const x = 1; x.y"),
        Err(TypeErrorKind::ObjectExpected {
            found: Type::Number
        })
    );
    assert_eq!(
        check("{ x: 1, x: 2 }"),
        Err(TypeErrorKind::DuplicateProperty("x".to_string()))
    );
}

#[test]
fn test_shorthand_object_properties() {
    assert_eq!(
        check("const x = 1; const y = 2; { x, y }"),
        Ok(point())
    );
}

#[test]
fn test_object_property_order_is_irrelevant() {
    let source = r#"
function norm(p: { y: number; x: number }): number {
    return p.x + p.y;
}
norm({ x: 3, y: 4 })
"#;
    assert_eq!(check(source), Ok(Type::Number));
}

#[test]
fn test_exact_matching_rejects_wider_arguments() {
    let source = r#"
function getX(p: { x: number }): number { return p.x; }
getX({ x: 1, y: 2 })
"#;
    assert!(matches!(
        check(source),
        Err(TypeErrorKind::ArgumentMismatch { index: 0, .. })
    ));
    assert_eq!(check_with_subtyping(source), Ok(Type::Number));
}

#[test]
fn test_subtype_matching_for_branches() {
    let source = "true ? { x: 1, y: 2 } : { x: 3 }";
    assert!(matches!(
        check(source),
        Err(TypeErrorKind::BranchMismatch { .. })
    ));
    assert_eq!(
        check_with_subtyping(source),
        Ok(Type::object(vec![("x", Type::Number)]))
    );
    assert!(matches!(
        check_with_subtyping("true ? { x: 1 } : { y: 2 }"),
        Err(TypeErrorKind::BranchMismatch { .. })
    ));
}

#[test]
fn test_subtype_matching_keeps_return_types_exact() {
    let source = "function f(n: number): { x: number } { return { x: n, y: n }; } f(1)";
    assert!(matches!(
        check_with_subtyping(source),
        Err(TypeErrorKind::WrongReturnType { .. })
    ));
}

#[test]
fn test_checking_with_a_prepared_environment() {
    let env = TypeEnv::new()
        .extend("n", Type::Number)
        .extend("point", point());
    let term = Term::add(Term::var("n"), Term::get(Term::var("point"), "y"));

    assert_eq!(typechecker::typecheck(&term, &env), Ok(Type::Number));
    assert!(typechecker::check_program(&term).is_err());
}

#[test]
fn test_terms_built_directly() {
    let term = Term::rec_func(
        "f",
        vec![Param::new("x", Type::Number)],
        Type::Number,
        Term::call(Term::var("f"), vec![Term::var("x")]),
        Term::call(Term::var("f"), vec![Term::number(0.0)]),
    );
    assert_eq!(typechecker::check_program(&term), Ok(Type::Number));

    let term = Term::object(vec![
        ("a", Term::boolean(true)),
        ("b", Term::add(Term::number(1.0), Term::number(2.0))),
    ]);
    assert_eq!(
        typechecker::check_program(&term),
        Ok(Type::object(vec![("a", Type::Boolean), ("b", Type::Number)]))
    );
}

#[test]
fn test_errors_point_at_the_offending_term() {
    let source = "const o = { x: 1 };\no.x + o.y";
    let term = tyck::parse(source).unwrap();
    let error = typechecker::check_program(&term).unwrap_err();

    assert_eq!(error.kind, TypeErrorKind::UnknownProperty("y".to_string()));
    assert_eq!((error.line, error.column), (2, 9));
}

#[test]
fn test_check_batch_preserves_order() {
    let sources = ["1 + 2", "true ? 1 : false", "{ a: true }", "missing"];
    let terms: Vec<Term> = sources.iter().map(|s| tyck::parse(s).unwrap()).collect();

    let results = typechecker::check_batch(&TypeChecker::default(), &terms, &TypeEnv::new());

    assert_eq!(results.len(), 4);
    assert_eq!(results[0], Ok(Type::Number));
    assert!(matches!(
        results[1].as_ref().map_err(|e| &e.kind),
        Err(TypeErrorKind::BranchMismatch { .. })
    ));
    assert_eq!(
        results[2],
        Ok(Type::object(vec![("a", Type::Boolean)]))
    );
    assert!(matches!(
        results[3].as_ref().map_err(|e| e.category()),
        Err(ErrorCategory::Scope)
    ));
}

#[test]
fn test_checking_does_not_change_the_environment() {
    let env = TypeEnv::new().extend("x", Type::Number);
    let term = tyck::parse("const y = true; y").unwrap();

    assert_eq!(typechecker::typecheck(&term, &env), Ok(Type::Boolean));
    assert!(env.lookup("y").is_none());
    assert_eq!(env.len(), 1);
}
