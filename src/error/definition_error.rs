use crate::{
    engine::lexer::Position,
    error::{LexicalError, ParseError},
};

#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur while parsing a function definition
/// of the form `name(params) = body`.
pub enum FunctionParseError {
    /// The definition text could not be tokenized.
    Lexical(LexicalError),
    /// The definition does not begin with a function name.
    ExpectedFunctionName {
        /// Description of the token found instead.
        token:    String,
        /// The source position where the error occurred.
        position: Position,
    },
    /// The function name is not followed by `(`.
    ExpectedParameterList {
        /// Description of the token found instead.
        token:    String,
        /// The source position where the error occurred.
        position: Position,
    },
    /// A parameter position holds something other than an identifier.
    ExpectedParameter {
        /// Description of the token found instead.
        token:    String,
        /// The source position where the error occurred.
        position: Position,
    },
    /// The same parameter name appears more than once.
    DuplicateParameter {
        /// The repeated parameter name.
        name:     String,
        /// The source position where the error occurred.
        position: Position,
    },
    /// The parameter list continued with something other than `,` or `)`.
    ExpectedCommaOrClosingParen {
        /// Description of the token found instead.
        token:    String,
        /// The source position where the error occurred.
        position: Position,
    },
    /// The parameter list is not followed by `=`.
    ExpectedEquals {
        /// Description of the token found instead.
        token:    String,
        /// The source position where the error occurred.
        position: Position,
    },
    /// No body expression follows the `=`.
    EmptyBody {
        /// The source position where the error occurred.
        position: Position,
    },
    /// The body expression itself failed to parse.
    Body(ParseError),
}

impl std::fmt::Display for FunctionParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexical(e) => write!(f, "{e}"),
            Self::Body(e) => write!(f, "{e}"),
            Self::ExpectedFunctionName { token, position } => {
                write!(f,
                       "Error on line {}, column {}: Expected function name, found {token}.",
                       position.line, position.column)
            },
            Self::ExpectedParameterList { token, position } => {
                write!(f,
                       "Error on line {}, column {}: Expected '(' after function name, found {token}.",
                       position.line, position.column)
            },
            Self::ExpectedParameter { token, position } => {
                write!(f,
                       "Error on line {}, column {}: Expected parameter name, found {token}.",
                       position.line, position.column)
            },
            Self::DuplicateParameter { name, position } => {
                write!(f,
                       "Error on line {}, column {}: Duplicate parameter '{name}'.",
                       position.line, position.column)
            },
            Self::ExpectedCommaOrClosingParen { token, position } => {
                write!(f,
                       "Error on line {}, column {}: Expected ',' or ')' in parameter list, found {token}.",
                       position.line, position.column)
            },
            Self::ExpectedEquals { token, position } => {
                write!(f,
                       "Error on line {}, column {}: Expected '=' after parameter list, found {token}.",
                       position.line, position.column)
            },
            Self::EmptyBody { position } => {
                write!(f,
                       "Error on line {}, column {}: Function definition has an empty body. Example: f(x) = x * x",
                       position.line, position.column)
            },
        }
    }
}

impl std::error::Error for FunctionParseError {}

impl From<LexicalError> for FunctionParseError {
    fn from(e: LexicalError) -> Self {
        Self::Lexical(e)
    }
}

impl From<ParseError> for FunctionParseError {
    fn from(e: ParseError) -> Self {
        Self::Body(e)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents a rejected user-function registration.
pub enum DefinitionError {
    /// The definition's name collides with a built-in function.
    ///
    /// Built-ins are immutable once seeded into a standard registry, so the
    /// registration is rejected rather than overwriting.
    NameCollision {
        /// The colliding name.
        name: String,
    },
}

impl std::fmt::Display for DefinitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NameCollision { name } => {
                write!(f, "Cannot redefine built-in function '{name}'.")
            },
        }
    }
}

impl std::error::Error for DefinitionError {}
