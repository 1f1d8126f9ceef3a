use std::collections::HashMap;

use crate::{
    ast::{Expr, UserFunction},
    engine::{
        lexer::{TokenKind, tokenize},
        parser::parse,
        registry::Registry,
    },
    error::FunctionParseError,
};

/// Parses function-definition text of the form `name(params) = body`.
///
/// The grammar is:
///
/// ```text
///     definition := IDENTIFIER "(" [IDENTIFIER ("," IDENTIFIER)*] ")" "=" expression
/// ```
///
/// The name and every parameter must independently satisfy the identifier
/// syntax, parameters must be distinct, and the body is parsed with the
/// ordinary expression parser applied to the remaining tokens. The registry
/// supplies operator shapes for the body, exactly as it does for
/// standalone expressions.
///
/// Parsing a definition does not register it; pass the result to
/// [`Registry::define_function`] for that.
///
/// # Errors
/// Returns a [`FunctionParseError`] on malformed syntax: a missing name or
/// parameter list, a non-identifier or duplicate parameter, a missing `=`,
/// an empty body, or a body that fails to parse.
///
/// # Example
/// ```
/// use numex::engine::{definitions::parse_definition, registry::Registry};
///
/// let registry = Registry::standard();
/// let func = parse_definition("f(x) = x^2 + 2*x + 1", &registry).unwrap();
///
/// assert_eq!(func.name, "f");
/// assert_eq!(func.params, vec!["x".to_string()]);
///
/// assert!(parse_definition("f() =", &registry).is_err());
/// ```
pub fn parse_definition(text: &str,
                        registry: &Registry)
                        -> Result<UserFunction, FunctionParseError> {
    let tokens = tokenize(text)?;
    let mut pos = 0;

    let name = match &tokens[pos].kind {
        TokenKind::Identifier(name) => {
            let name = name.clone();
            pos += 1;
            name
        },
        other => {
            return Err(FunctionParseError::ExpectedFunctionName { token:    other.to_string(),
                                                                  position:
                                                                      tokens[pos].position, });
        },
    };

    match &tokens[pos].kind {
        TokenKind::LParen => pos += 1,
        other => {
            return Err(FunctionParseError::ExpectedParameterList { token:    other.to_string(),
                                                                   position:
                                                                       tokens[pos].position, });
        },
    }

    let mut params: Vec<String> = Vec::new();
    if matches!(tokens[pos].kind, TokenKind::RParen) {
        pos += 1;
    } else {
        loop {
            match &tokens[pos].kind {
                TokenKind::Identifier(param) => {
                    if params.iter().any(|existing| existing == param) {
                        return Err(FunctionParseError::DuplicateParameter {
                            name: param.clone(),
                            position: tokens[pos].position,
                        });
                    }
                    params.push(param.clone());
                    pos += 1;
                },
                other => {
                    return Err(FunctionParseError::ExpectedParameter {
                        token: other.to_string(),
                        position: tokens[pos].position,
                    });
                },
            }

            match &tokens[pos].kind {
                TokenKind::Comma => pos += 1,
                TokenKind::RParen => {
                    pos += 1;
                    break;
                },
                other => {
                    return Err(FunctionParseError::ExpectedCommaOrClosingParen {
                        token: other.to_string(),
                        position: tokens[pos].position,
                    });
                },
            }
        }
    }

    match &tokens[pos].kind {
        TokenKind::Operator(symbol) if symbol == "=" => pos += 1,
        other => {
            return Err(FunctionParseError::ExpectedEquals { token:    other.to_string(),
                                                            position: tokens[pos].position, });
        },
    }

    if matches!(tokens[pos].kind, TokenKind::Eof) {
        return Err(FunctionParseError::EmptyBody { position: tokens[pos].position });
    }

    let body = parse(&tokens[pos..], registry)?;

    Ok(UserFunction { name, params, body })
}

/// Builds a new tree from `body` with parameter identifiers replaced by
/// bound literal values.
///
/// Literals are copied as-is. Identifiers whose name appears in `bindings`
/// become fresh literals carrying the bound value; free identifiers that
/// refer to constants or other functions remain untouched. Unary, binary,
/// and call nodes are rebuilt with their children substituted recursively.
/// The original tree is never mutated, so one parsed body can serve many
/// calls.
#[must_use]
pub fn substitute(body: &Expr, bindings: &HashMap<String, f64>) -> Expr {
    match body {
        Expr::Literal { .. } => body.clone(),

        Expr::Identifier { name, position } => {
            bindings.get(name)
                    .map_or_else(|| body.clone(), |value| Expr::Literal { value:    *value,
                                                                          position: *position, })
        },

        Expr::Unary { operator,
                      operand,
                      position, } => Expr::Unary { operator: operator.clone(),
                                                   operand:  Box::new(substitute(operand,
                                                                                 bindings)),
                                                   position: *position, },

        Expr::Binary { operator,
                       left,
                       right,
                       position, } => Expr::Binary { operator: operator.clone(),
                                                     left: Box::new(substitute(left, bindings)),
                                                     right: Box::new(substitute(right, bindings)),
                                                     position: *position, },

        Expr::Call { callee,
                     arguments,
                     position, } => {
            Expr::Call { callee:    callee.clone(),
                         arguments: arguments.iter()
                                             .map(|argument| substitute(argument, bindings))
                                             .collect(),
                         position:  *position, }
        },
    }
}
