use std::collections::HashMap;

use crate::{
    ast::Expr,
    engine::{
        definitions::substitute,
        lexer::Position,
        registry::{Arity, Registry},
    },
    error::EvalError,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or an
/// [`EvalError`] describing the failure.
pub type EvalResult<T> = Result<T, EvalError>;

/// Everything the evaluator needs to resolve symbols.
///
/// Holds the registry plus an optional read-only variable map supplied by
/// the caller. Variables, when present, shadow constants of the same name.
/// The context borrows both, so building one is free and two contexts over
/// distinct registries are fully independent.
#[derive(Clone, Copy)]
pub struct EvalContext<'a> {
    /// Operator, function, and constant catalog.
    pub registry:  &'a Registry,
    /// Optional name-to-value map checked before constants.
    pub variables: Option<&'a HashMap<String, f64>>,
}

impl<'a> EvalContext<'a> {
    /// Creates a context with no variables.
    #[must_use]
    pub const fn new(registry: &'a Registry) -> Self {
        Self { registry,
               variables: None }
    }

    /// Creates a context whose variables shadow same-named constants.
    #[must_use]
    pub const fn with_variables(registry: &'a Registry,
                                variables: &'a HashMap<String, f64>)
                                -> Self {
        Self { registry,
               variables: Some(variables) }
    }
}

/// Evaluates an expression tree to a number.
///
/// Dispatch is a single match over the node kind. Evaluation is pure and
/// allocates no long-lived state; operands and arguments are always
/// evaluated left to right, making evaluation order observable for
/// side-effecting native functions.
///
/// Call resolution is two-tier: the user-function table is checked first,
/// then the built-in table. A user function is applied by substituting the
/// argument values into its body and evaluating the resulting tree through
/// this same entry point, so functions it references are resolved at
/// evaluation time rather than definition time.
///
/// # Errors
/// Returns an [`EvalError`] for undefined identifiers, unknown functions,
/// division or modulo by exactly zero, arity mismatches, and failures
/// raised by native implementations (rewrapped as
/// [`EvalError::FunctionFailed`]).
///
/// # Example
/// ```
/// use numex::engine::{
///     evaluator::{EvalContext, evaluate},
///     lexer::tokenize,
///     parser::parse,
///     registry::Registry,
/// };
///
/// let registry = Registry::standard();
/// let tokens = tokenize("2 + 3 * 4").unwrap();
/// let ast = parse(&tokens, &registry).unwrap();
///
/// let result = evaluate(&ast, &EvalContext::new(&registry)).unwrap();
/// assert_eq!(result, 14.0);
/// ```
pub fn evaluate(expr: &Expr, context: &EvalContext<'_>) -> EvalResult<f64> {
    match expr {
        Expr::Literal { value, .. } => Ok(*value),

        Expr::Identifier { name, position } => {
            if let Some(variables) = context.variables
               && let Some(value) = variables.get(name)
            {
                return Ok(*value);
            }
            context.registry
                   .constant(name)
                   .ok_or_else(|| EvalError::UndefinedIdentifier { name:     name.clone(),
                                                                   position: *position, })
        },

        Expr::Unary { operator,
                      operand,
                      position, } => {
            let value = evaluate(operand, context)?;
            match operator.as_str() {
                "u+" => Ok(value),
                "u-" => Ok(-value),
                _ => Err(EvalError::UnsupportedOperator { symbol:   operator.clone(),
                                                          position: *position, }),
            }
        },

        Expr::Binary { operator,
                       left,
                       right,
                       position, } => {
            let left = evaluate(left, context)?;
            let right = evaluate(right, context)?;
            eval_binary(operator, left, right, *position)
        },

        Expr::Call { callee,
                     arguments,
                     position, } => eval_call(callee, arguments, *position, context),
    }
}

/// Applies one binary operator to already-evaluated operands.
///
/// Comparisons return `1` for true and `0` for false under ordinary IEEE
/// semantics, so `NaN == NaN` evaluates to `0`. Exponentiation follows host
/// floating-point power semantics; `0^0` and negative-base fractional
/// exponents are not specially guarded.
fn eval_binary(operator: &str, left: f64, right: f64, position: Position) -> EvalResult<f64> {
    match operator {
        "+" => Ok(left + right),
        "-" => Ok(left - right),
        "*" => Ok(left * right),
        "/" => {
            if right == 0.0 {
                Err(EvalError::DivisionByZero { position })
            } else {
                Ok(left / right)
            }
        },
        "%" => {
            if right == 0.0 {
                Err(EvalError::ModuloByZero { position })
            } else {
                Ok(left % right)
            }
        },
        "^" => Ok(left.powf(right)),
        "==" => Ok(truth(left == right)),
        "!=" => Ok(truth(left != right)),
        "<" => Ok(truth(left < right)),
        ">" => Ok(truth(left > right)),
        "<=" => Ok(truth(left <= right)),
        ">=" => Ok(truth(left >= right)),
        _ => Err(EvalError::UnsupportedOperator { symbol: operator.to_string(),
                                                  position }),
    }
}

/// Numeric encoding of a comparison result.
const fn truth(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}

/// Evaluates a function call.
///
/// The callee must exist in the user-defined or built-in table before any
/// argument is evaluated. Arguments are then evaluated eagerly left to
/// right, arity is checked against the resolved definition, and the
/// function is applied.
fn eval_call(callee: &str,
             arguments: &[Expr],
             position: Position,
             context: &EvalContext<'_>)
             -> EvalResult<f64> {
    let is_user = context.registry.has_user_function(callee);
    if !is_user && !context.registry.has_function(callee) {
        return Err(EvalError::UnknownFunction { name: callee.to_string(),
                                                position });
    }

    let mut values = Vec::with_capacity(arguments.len());
    for argument in arguments {
        values.push(evaluate(argument, context)?);
    }

    if is_user {
        let Some(func) = context.registry.user_function(callee) else {
            unreachable!()
        };
        if values.len() != func.params.len() {
            return Err(EvalError::ArityMismatch { name: callee.to_string(),
                                                  expected: func.params.len(),
                                                  got: values.len(),
                                                  position });
        }

        let bindings: HashMap<String, f64> = func.params.iter().cloned().zip(values).collect();
        let body = substitute(&func.body, &bindings);
        return evaluate(&body, context);
    }

    let Some(def) = context.registry.function(callee) else {
        unreachable!()
    };
    match def.arity {
        Arity::Exact(expected) if expected != values.len() => {
            return Err(EvalError::ArityMismatch { name: callee.to_string(),
                                                  expected,
                                                  got: values.len(),
                                                  position });
        },
        Arity::Variadic if values.is_empty() => {
            return Err(EvalError::MissingArguments { name: callee.to_string(),
                                                     position });
        },
        _ => {},
    }

    (def.func)(&values).map_err(|message| EvalError::FunctionFailed { name: callee.to_string(),
                                                                      message,
                                                                      position })
}
