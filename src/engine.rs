/// The lexer module tokenizes expression text.
///
/// The lexer (tokenizer) reads raw source text and produces a flat token
/// sequence terminated by a single end-of-input token. Every token carries
/// its byte offset, line, and column for error reporting.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with kind and source
///   location.
/// - Handles numeric literals (including scientific notation), identifiers,
///   operators, and delimiters.
/// - Reports lexical errors for unrecognized characters.
pub mod lexer;
/// The registry module holds the mutable symbol catalog.
///
/// A [`registry::Registry`] owns four independent maps: operator
/// definitions, built-in functions, constants, and user-defined functions.
/// The parser consults it for operator shapes and the evaluator for symbol
/// resolution. It is an explicit, constructible value, never a hidden
/// module-level singleton, so per-session isolation is structural.
///
/// # Responsibilities
/// - CRUD over operators, built-in functions, constants, and user
///   functions.
/// - Seeds the standard operator/function/constant set via
///   [`registry::Registry::standard`].
/// - Rejects user functions that would shadow a built-in.
pub mod registry;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser is a Pratt (precedence-climbing) parser: each operator's
/// binding power is derived from its registry definition, so a single
/// expression loop handles arbitrary precedence and associativity without a
/// grammar rule per level.
///
/// # Responsibilities
/// - Converts tokens into structured [`crate::ast::Expr`] nodes.
/// - Derives binding powers from operator precedence and associativity.
/// - Rejects malformed input and trailing tokens with positioned errors.
pub mod parser;
/// The evaluator module computes numeric results from AST nodes.
///
/// The evaluator traverses the tree with a single exhaustive match per node
/// kind, resolving identifiers and functions through an
/// [`evaluator::EvalContext`]. It is pure: two calls with distinct
/// registries are fully independent.
///
/// # Responsibilities
/// - Evaluates literals, identifiers, unary/binary operations, and calls.
/// - Resolves identifiers through context variables, then constants.
/// - Resolves calls through user functions, then built-ins.
/// - Reports evaluation errors such as division by zero or arity
///   mismatches.
pub mod evaluator;
/// The definitions module manages user-defined functions.
///
/// This is a thin orchestration layer over the tokenizer and parser: it
/// parses `name(params) = body` text into a [`crate::ast::UserFunction`]
/// and applies one by substituting argument values into the body tree.
///
/// # Responsibilities
/// - Parses function-definition text with positioned errors.
/// - Builds substituted body trees without mutating the original.
pub mod definitions;
