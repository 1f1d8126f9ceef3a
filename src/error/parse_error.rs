use crate::engine::lexer::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while parsing a token sequence.
pub enum ParseError {
    /// Found a token that cannot begin or continue an expression.
    UnexpectedToken {
        /// Description of the token encountered.
        token:    String,
        /// The source position where the error occurred.
        position: Position,
    },
    /// Reached the end of input where an expression was expected.
    UnexpectedEndOfInput {
        /// The source position where the error occurred.
        position: Position,
    },
    /// A closing parenthesis `)` was expected but not found.
    ExpectedClosingParen {
        /// Description of the token found instead.
        token:    String,
        /// The source position where the error occurred.
        position: Position,
    },
    /// An argument list continued with something other than `,` or `)`.
    ExpectedArgumentSeparator {
        /// Description of the token found instead.
        token:    String,
        /// The source position where the error occurred.
        position: Position,
    },
    /// A prefix operator has no matching definition in the registry.
    UnknownOperator {
        /// The registry symbol that failed to resolve.
        symbol:   String,
        /// The source position where the error occurred.
        position: Position,
    },
    /// Found extra tokens after a complete expression.
    TrailingTokens {
        /// Description of the first extra token.
        token:    String,
        /// The source position where the error occurred.
        position: Position,
    },
}

impl ParseError {
    /// Gets the source position from `self`.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::UnexpectedToken { position, .. }
            | Self::UnexpectedEndOfInput { position }
            | Self::ExpectedClosingParen { position, .. }
            | Self::ExpectedArgumentSeparator { position, .. }
            | Self::UnknownOperator { position, .. }
            | Self::TrailingTokens { position, .. } => *position,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let position = self.position();
        write!(f, "Error on line {}, column {}: ", position.line, position.column)?;
        match self {
            Self::UnexpectedToken { token, .. } => {
                write!(f, "Unexpected token: {token}.")
            },

            Self::UnexpectedEndOfInput { .. } => {
                write!(f, "Unexpected end of input.")
            },

            Self::ExpectedClosingParen { token, .. } => {
                write!(f, "Expected closing parenthesis ')' but found {token}.")
            },

            Self::ExpectedArgumentSeparator { token, .. } => {
                write!(f, "Expected ',' or ')' in argument list but found {token}.")
            },

            Self::UnknownOperator { symbol, .. } => {
                write!(f, "Operator '{symbol}' is not defined in the registry.")
            },

            Self::TrailingTokens { token, .. } => {
                write!(f, "Extra tokens after expression. Check your input: {token}")
            },
        }
    }
}

impl std::error::Error for ParseError {}
