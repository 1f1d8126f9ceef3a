//! # numex
//!
//! numex is a small numeric expression language written in Rust.
//! It tokenizes a textual formula, parses it with explicit operator
//! precedence and associativity, and evaluates it against a mutable catalog
//! of operators, built-in functions, constants, and user-defined functions.
//!
//! The engine is synchronous, single-threaded, pure computation: the four
//! entry points — [`engine::lexer::tokenize`], [`engine::parser::parse`],
//! [`engine::evaluator::evaluate`], and
//! [`engine::definitions::parse_definition`] — are functions of their inputs
//! plus a [`engine::registry::Registry`], with no hidden global state.
//! Collaborators that need per-session isolation give each session its own
//! registry.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use crate::engine::{
    evaluator::{EvalContext, evaluate},
    lexer::tokenize,
    parser::parse,
    registry::Registry,
};

/// Defines the structure of parsed expressions.
///
/// This module declares the `Expr` enum representing the syntactic
/// structure of a formula as a tree, plus the `UserFunction` type built
/// from definition text. The AST is built by the parser and traversed by
/// the evaluator; every node carries a source position for error reporting.
///
/// # Responsibilities
/// - Defines expression node types for all language constructs.
/// - Attaches source positions to AST nodes for error reporting.
/// - Defines the reusable user-function representation.
pub mod ast;
/// The engine module ties the language phases together.
///
/// Data flows `string → lexer → tokens → parser(registry) → AST →
/// evaluator(context) → number`, with the definitions module layered on
/// top of lexer and parser for `name(params) = body` text. The registry is
/// shared, mutable state consulted by both parser (operator shapes) and
/// evaluator (symbol resolution).
///
/// # Responsibilities
/// - Coordinates all phases: lexer, registry, parser, evaluator,
///   definitions.
/// - Exposes the four entry points collaborators build on.
pub mod engine;
/// Provides unified error types for every phase.
///
/// This module defines all errors that can be raised while tokenizing,
/// parsing, evaluating, or defining functions. Every failure aborts the
/// current call immediately and is surfaced to the caller with its source
/// position; the engine performs no local recovery of any kind.
///
/// # Responsibilities
/// - Defines error enums for all failure modes, one file per family.
/// - Attaches line/column information and detailed messages.
/// - Implements the standard error traits for composition with `?`.
pub mod error;

/// Evaluates a single expression string against a registry.
///
/// This convenience wrapper runs the full pipeline — tokenize, parse,
/// evaluate — with no context variables. Callers that need variables or
/// want to inspect intermediate results use the entry points in
/// [`engine`] directly.
///
/// # Errors
/// Returns the first error raised by any phase, erased to
/// `Box<dyn std::error::Error>`.
///
/// # Examples
/// ```
/// use numex::{engine::registry::Registry, eval_str};
///
/// let registry = Registry::standard();
///
/// assert_eq!(eval_str("2 + 3 * 4", &registry).unwrap(), 14.0);
/// assert_eq!(eval_str("(2 + 3) * 4", &registry).unwrap(), 20.0);
///
/// // Unknown identifier: the error is surfaced, not defaulted.
/// assert!(eval_str("x + 1", &registry).is_err());
/// ```
pub fn eval_str(source: &str, registry: &Registry) -> Result<f64, Box<dyn std::error::Error>> {
    let tokens = tokenize(source)?;
    let ast = parse(&tokens, registry)?;
    let context = EvalContext::new(registry);
    Ok(evaluate(&ast, &context)?)
}
