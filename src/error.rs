/// Lexical errors.
///
/// Defines the error raised while tokenizing source text. A lexical error
/// occurs whenever the input contains a character that belongs to no token
/// class, and carries the line and column of that character.
pub mod lexical_error;
/// Parsing errors.
///
/// Defines all error types that can occur while turning a token sequence
/// into an abstract syntax tree: unexpected tokens, unmatched parentheses,
/// malformed argument lists, and trailing input after a complete expression.
pub mod parse_error;
/// Evaluation errors.
///
/// Contains all error types that can be raised while evaluating an
/// expression tree: undefined identifiers, unknown functions, division and
/// modulo by zero, arity mismatches, and failures raised by native function
/// implementations.
pub mod eval_error;
/// Function-definition errors.
///
/// Covers the two failure modes of the user-defined-function layer:
/// malformed `name(params) = body` definition text, and registering a
/// function whose name collides with a built-in.
pub mod definition_error;

pub use definition_error::{DefinitionError, FunctionParseError};
pub use eval_error::EvalError;
pub use lexical_error::LexicalError;
pub use parse_error::ParseError;
