use std::{cell::RefCell, collections::HashMap, rc::Rc};

use numex::{
    engine::{
        definitions::parse_definition,
        evaluator::{EvalContext, evaluate},
        lexer::{TokenKind, tokenize},
        parser::parse,
        registry::{Arity, FunctionDef, Registry},
    },
    error::{DefinitionError, EvalError, FunctionParseError, ParseError},
    eval_str,
};

fn eval(source: &str) -> f64 {
    let registry = Registry::standard();
    eval_str(source, &registry).unwrap_or_else(|e| panic!("'{source}' failed: {e}"))
}

fn eval_error(source: &str, registry: &Registry) -> EvalError {
    let tokens = tokenize(source).expect("tokenize failed");
    let ast = parse(&tokens, registry).expect("parse failed");
    match evaluate(&ast, &EvalContext::new(registry)) {
        Ok(v) => panic!("'{source}' succeeded with {v} but was expected to fail"),
        Err(e) => e,
    }
}

fn parse_error(source: &str) -> ParseError {
    let registry = Registry::standard();
    let tokens = tokenize(source).expect("tokenize failed");
    match parse(&tokens, &registry) {
        Ok(_) => panic!("'{source}' parsed but was expected to fail"),
        Err(e) => e,
    }
}

#[test]
fn empty_and_whitespace_inputs_tokenize_to_eof() {
    let tokens = tokenize("").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);

    let tokens = tokenize(" \t\r\n   ").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);
    assert_eq!(tokens[0].position.line, 2);
}

#[test]
fn number_forms() {
    assert_eq!(eval("42"), 42.0);
    assert_eq!(eval("3.14"), 3.14);
    assert_eq!(eval(".5"), 0.5);
    assert_eq!(eval("2e3"), 2000.0);
    assert_eq!(eval("2.5e-1"), 0.25);
    assert_eq!(eval("1E2"), 100.0);
}

#[test]
fn incomplete_exponent_suffix_rolls_back() {
    // `2e` is the number 2 followed by the identifier `e`.
    let tokens = tokenize("2e").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Number(2.0));
    assert_eq!(tokens[1].kind, TokenKind::Identifier("e".to_string()));

    // `2e+` additionally leaves the sign as an operator.
    let tokens = tokenize("2e+").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Number(2.0));
    assert_eq!(tokens[1].kind, TokenKind::Identifier("e".to_string()));
    assert_eq!(tokens[2].kind, TokenKind::Operator("+".to_string()));

    // There is no implicit product, so the trailing identifier fails to
    // parse.
    assert!(matches!(parse_error("2e"), ParseError::TrailingTokens { .. }));
}

#[test]
fn token_positions_track_lines_and_columns() {
    let tokens = tokenize("1 +\n  foo").unwrap();

    assert_eq!(tokens[0].position.line, 1);
    assert_eq!(tokens[0].position.column, 1);
    assert_eq!(tokens[1].position.column, 3);

    assert_eq!(tokens[2].kind, TokenKind::Identifier("foo".to_string()));
    assert_eq!(tokens[2].position.line, 2);
    assert_eq!(tokens[2].position.column, 3);
    assert_eq!(tokens[2].position.offset, 6);
}

#[test]
fn unrecognized_character_is_a_lexical_error() {
    let error = tokenize("1 + $2").unwrap_err();
    assert_eq!(error.line, 1);
    assert_eq!(error.column, 5);

    let error = tokenize("1\n  ?").unwrap_err();
    assert_eq!(error.line, 2);
    assert_eq!(error.column, 3);
}

#[test]
fn precedence_and_grouping() {
    assert_eq!(eval("2 + 3 * 4"), 14.0);
    assert_eq!(eval("(2 + 3) * 4"), 20.0);
    assert_eq!(eval("2 * 3 + 4 * 5"), 26.0);
    assert_eq!(eval("100 / 10 / 2"), 5.0);
    assert_eq!(eval("7 % 4"), 3.0);
}

#[test]
fn associativity() {
    assert_eq!(eval("2 ^ 3 ^ 2"), 512.0);
    assert_eq!(eval("10 - 5 - 2"), 3.0);
    assert_eq!(eval("(2 ^ 3) ^ 2"), 64.0);
}

#[test]
fn unary_operators() {
    assert_eq!(eval("-5 + 10"), 5.0);
    assert_eq!(eval("+5"), 5.0);
    assert_eq!(eval("-(-5)"), 5.0);
    assert_eq!(eval("2 ^ -1"), 0.5);
    assert_eq!(eval("2 * -3"), -6.0);

    // Unary binds tighter than exponentiation.
    assert_eq!(eval("-3 ^ 2"), 9.0);
}

#[test]
fn comparisons_return_one_or_zero() {
    assert_eq!(eval("2 < 3"), 1.0);
    assert_eq!(eval("3 < 2"), 0.0);
    assert_eq!(eval("2 <= 2"), 1.0);
    assert_eq!(eval("3 >= 4"), 0.0);
    assert_eq!(eval("2 == 2"), 1.0);
    assert_eq!(eval("2 != 2"), 0.0);
    assert_eq!(eval("1 + 1 == 2"), 1.0);

    // IEEE semantics: NaN is not equal to itself.
    assert_eq!(eval("sqrt(0 - 1) == sqrt(0 - 1)"), 0.0);
}

#[test]
fn division_and_modulo_by_zero() {
    let registry = Registry::standard();
    assert!(matches!(eval_error("1 / 0", &registry), EvalError::DivisionByZero { .. }));
    assert!(matches!(eval_error("1 % 0", &registry), EvalError::ModuloByZero { .. }));
    assert!(matches!(eval_error("1 / 0.0", &registry), EvalError::DivisionByZero { .. }));

    // A tiny divisor is not zero.
    assert!(eval("1 / 1e-300").is_finite());
}

#[test]
fn builtin_functions() {
    assert_eq!(eval("sin(0)"), 0.0);
    assert_eq!(eval("cos(0)"), 1.0);
    assert_eq!(eval("sqrt(9)"), 3.0);
    assert_eq!(eval("abs(0 - 5)"), 5.0);
    assert_eq!(eval("sign(0 - 42)"), -1.0);
    assert_eq!(eval("sign(0)"), 0.0);
    assert_eq!(eval("sign(11)"), 1.0);
    assert_eq!(eval("floor(3.7)"), 3.0);
    assert_eq!(eval("ceil(3.2)"), 4.0);
    assert_eq!(eval("round(3.7)"), 4.0);
    assert_eq!(eval("ln(e)"), 1.0);
    assert_eq!(eval("log2(8)"), 3.0);
}

#[test]
fn variadic_min_max() {
    assert_eq!(eval("min(3, 1, 2)"), 1.0);
    assert_eq!(eval("max(3, 1, 2)"), 3.0);
    assert_eq!(eval("min(7)"), 7.0);

    let registry = Registry::standard();
    assert!(matches!(eval_error("min()", &registry), EvalError::MissingArguments { .. }));
}

#[test]
fn fixed_arity_is_checked() {
    let registry = Registry::standard();
    let error = eval_error("sin(1, 2)", &registry);
    assert!(matches!(error,
                     EvalError::ArityMismatch { expected: 1,
                                                got: 2,
                                                .. }));
}

#[test]
fn constants_and_variables() {
    assert_eq!(eval("pi"), std::f64::consts::PI);
    assert_eq!(eval("tau == 2 * pi"), 1.0);
    assert_eq!(eval("e"), std::f64::consts::E);

    // Variables shadow constants of the same name.
    let registry = Registry::standard();
    let variables = HashMap::from([("pi".to_string(), 3.0), ("x".to_string(), 10.0)]);
    let context = EvalContext::with_variables(&registry, &variables);

    let tokens = tokenize("pi + x").unwrap();
    let ast = parse(&tokens, &registry).unwrap();
    assert_eq!(evaluate(&ast, &context).unwrap(), 13.0);
}

#[test]
fn unresolved_symbols() {
    let registry = Registry::standard();
    assert!(matches!(eval_error("foo + 1", &registry),
                     EvalError::UndefinedIdentifier { .. }));
    assert!(matches!(eval_error("foo(1)", &registry), EvalError::UnknownFunction { .. }));
}

#[test]
fn malformed_expressions() {
    assert!(matches!(parse_error("2 3"), ParseError::TrailingTokens { .. }));
    assert!(matches!(parse_error("1 +"), ParseError::UnexpectedEndOfInput { .. }));
    assert!(matches!(parse_error("(1 + 2"), ParseError::ExpectedClosingParen { .. }));
    assert!(matches!(parse_error("min(1 2)"), ParseError::ExpectedArgumentSeparator { .. }));
    assert!(matches!(parse_error("* 3"), ParseError::UnexpectedToken { .. }));
    assert!(matches!(parse_error(""), ParseError::UnexpectedEndOfInput { .. }));

    // `=` tokenizes but is not a binary operator.
    assert!(parse_error("a = 3").position().column > 0);
}

#[test]
fn prefix_operator_requires_a_registry_entry() {
    let mut registry = Registry::standard();
    registry.unregister_operator("u-");

    let tokens = tokenize("-3").unwrap();
    assert!(matches!(parse(&tokens, &registry),
                     Err(ParseError::UnknownOperator { .. })));
}

#[test]
fn user_defined_function_and_calls() {
    let mut registry = Registry::standard();

    let func = parse_definition("f(x) = x^2 + 2*x + 1", &registry).unwrap();
    registry.define_function(func).unwrap();
    assert_eq!(eval_str("f(3)", &registry).unwrap(), 16.0);

    let func = parse_definition("add(a, b) = a + b", &registry).unwrap();
    registry.define_function(func).unwrap();
    assert_eq!(eval_str("add(2, 5)", &registry).unwrap(), 7.0);

    let func = parse_definition("answer() = 42", &registry).unwrap();
    registry.define_function(func).unwrap();
    assert_eq!(eval_str("answer()", &registry).unwrap(), 42.0);
}

#[test]
fn user_functions_compose() {
    let mut registry = Registry::standard();

    let f = parse_definition("f(x) = x^2 + 2*x + 1", &registry).unwrap();
    registry.define_function(f).unwrap();
    let g = parse_definition("g(x) = f(x) + 1", &registry).unwrap();
    registry.define_function(g).unwrap();

    assert_eq!(eval_str("g(3)", &registry).unwrap(), 17.0);
}

#[test]
fn function_names_resolve_at_call_time() {
    let mut registry = Registry::standard();

    // `h` references `k` before `k` exists; only the call needs it.
    let h = parse_definition("h(x) = k(x) + 1", &registry).unwrap();
    registry.define_function(h).unwrap();
    assert!(matches!(eval_error("h(1)", &registry), EvalError::UnknownFunction { .. }));

    let k = parse_definition("k(x) = x * 10", &registry).unwrap();
    registry.define_function(k).unwrap();
    assert_eq!(eval_str("h(1)", &registry).unwrap(), 11.0);
}

#[test]
fn user_function_arity_is_checked() {
    let mut registry = Registry::standard();
    let f = parse_definition("f(x, y) = x + y", &registry).unwrap();
    registry.define_function(f).unwrap();

    assert!(matches!(eval_error("f(3)", &registry),
                     EvalError::ArityMismatch { expected: 2,
                                                got: 1,
                                                .. }));
}

#[test]
fn parameters_shadow_constants_only_inside_the_body() {
    let mut registry = Registry::standard();
    let f = parse_definition("f(pi) = pi + 1", &registry).unwrap();
    registry.define_function(f).unwrap();

    assert_eq!(eval_str("f(2)", &registry).unwrap(), 3.0);
    assert_eq!(eval_str("pi", &registry).unwrap(), std::f64::consts::PI);
}

#[test]
fn redefinition_of_builtin_function_is_rejected() {
    let mut registry = Registry::standard();
    let func = parse_definition("sin(x) = x", &registry).unwrap();

    assert!(matches!(registry.define_function(func),
                     Err(DefinitionError::NameCollision { .. })));
    assert!(!registry.has_user_function("sin"));
}

#[test]
fn user_functions_may_be_redefined() {
    let mut registry = Registry::standard();

    let f = parse_definition("f(x) = x", &registry).unwrap();
    registry.define_function(f).unwrap();
    let f = parse_definition("f(x) = x * 2", &registry).unwrap();
    registry.define_function(f).unwrap();

    assert_eq!(eval_str("f(4)", &registry).unwrap(), 8.0);
}

#[test]
fn malformed_function_definitions() {
    let registry = Registry::standard();

    assert!(matches!(parse_definition("(x) = x", &registry),
                     Err(FunctionParseError::ExpectedFunctionName { .. })));
    assert!(matches!(parse_definition("f x = x", &registry),
                     Err(FunctionParseError::ExpectedParameterList { .. })));
    assert!(matches!(parse_definition("f(1) = 1", &registry),
                     Err(FunctionParseError::ExpectedParameter { .. })));
    assert!(matches!(parse_definition("f(x, x) = x", &registry),
                     Err(FunctionParseError::DuplicateParameter { .. })));
    assert!(matches!(parse_definition("f(x y) = x", &registry),
                     Err(FunctionParseError::ExpectedCommaOrClosingParen { .. })));
    assert!(matches!(parse_definition("f(x) x", &registry),
                     Err(FunctionParseError::ExpectedEquals { .. })));
    assert!(matches!(parse_definition("f(x) =", &registry),
                     Err(FunctionParseError::EmptyBody { .. })));
    assert!(matches!(parse_definition("f(x) = x +", &registry),
                     Err(FunctionParseError::Body(_))));
    assert!(matches!(parse_definition("f(x) = x @ 2", &registry),
                     Err(FunctionParseError::Lexical(_))));
}

#[test]
fn native_function_failures_are_wrapped() {
    let mut registry = Registry::standard();
    registry.register_function(FunctionDef { name:  "fail".to_string(),
                                             arity: Arity::Exact(1),
                                             func:  |_| Err("broken".to_string()), });

    let error = eval_error("fail(1)", &registry);
    match error {
        EvalError::FunctionFailed { name, message, .. } => {
            assert_eq!(name, "fail");
            assert_eq!(message, "broken");
        },
        other => panic!("expected FunctionFailed, got {other:?}"),
    }
}

#[test]
fn registries_are_isolated() {
    let mut a = Registry::standard();
    let b = Registry::standard();

    a.register_function(FunctionDef { name:  "double".to_string(),
                                      arity: Arity::Exact(1),
                                      func:  |args| Ok(args[0] * 2.0), });
    let f = parse_definition("f(x) = x", &a).unwrap();
    a.define_function(f).unwrap();

    assert!(a.has_function("double"));
    assert!(!b.has_function("double"));
    assert!(a.has_user_function("f"));
    assert!(!b.has_user_function("f"));
}

#[test]
fn registry_crud() {
    let mut registry = Registry::standard();

    assert!(registry.has_operator("^"));
    assert!(registry.unregister_operator("^").is_some());
    assert!(!registry.has_operator("^"));

    assert!(registry.list_functions().contains(&"sin".to_string()));
    assert_eq!(registry.constant("pi"), Some(std::f64::consts::PI));
    registry.register_constant("answer", 42.0);
    assert_eq!(registry.constant("answer"), Some(42.0));
    assert!(registry.unregister_constant("answer").is_some());

    registry.clear_constants();
    assert!(registry.list_constants().is_empty());
}

#[test]
fn change_observer_sees_definitions_and_removals() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let mut registry = Registry::standard();
    registry.set_change_observer(move |name| sink.borrow_mut().push(name.to_string()));

    let f = parse_definition("f(x) = x", &registry).unwrap();
    registry.define_function(f).unwrap();
    registry.undefine_function("f");
    registry.undefine_function("missing");

    assert_eq!(*seen.borrow(), vec!["f".to_string(), "f".to_string()]);
}

#[test]
fn whitespace_before_the_argument_list_still_forms_a_call() {
    assert_eq!(eval("sqrt (4)"), 2.0);
    assert_eq!(eval("(sqrt2) ^ 2").round(), 2.0);
}
