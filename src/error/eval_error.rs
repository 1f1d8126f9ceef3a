use crate::engine::lexer::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while evaluating an expression tree.
pub enum EvalError {
    /// An identifier resolved to neither a context variable nor a constant.
    UndefinedIdentifier {
        /// The name that failed to resolve.
        name:     String,
        /// The source position where the error occurred.
        position: Position,
    },
    /// Called a function that exists in neither the user-defined nor the
    /// built-in table.
    UnknownFunction {
        /// The name of the function.
        name:     String,
        /// The source position where the error occurred.
        position: Position,
    },
    /// Attempted division by exactly zero.
    DivisionByZero {
        /// The source position where the error occurred.
        position: Position,
    },
    /// Attempted modulo by exactly zero.
    ModuloByZero {
        /// The source position where the error occurred.
        position: Position,
    },
    /// The wrong number of arguments was supplied to a function.
    ArityMismatch {
        /// The name of the function.
        name:     String,
        /// The number of arguments the function declares.
        expected: usize,
        /// The number of arguments actually supplied.
        got:      usize,
        /// The source position where the error occurred.
        position: Position,
    },
    /// A variadic function was called with no arguments.
    MissingArguments {
        /// The name of the function.
        name:     String,
        /// The source position where the error occurred.
        position: Position,
    },
    /// A native function implementation reported a failure of its own.
    FunctionFailed {
        /// The name of the function.
        name:     String,
        /// The inner failure message.
        message:  String,
        /// The source position where the error occurred.
        position: Position,
    },
    /// An operator appeared in the tree with no evaluation rule.
    ///
    /// Unreachable for trees built by the bundled parser against the
    /// standard registry; reachable only when custom operators are
    /// registered for parsing without a matching evaluation rule.
    UnsupportedOperator {
        /// The registry symbol of the operator.
        symbol:   String,
        /// The source position where the error occurred.
        position: Position,
    },
}

impl EvalError {
    /// Gets the source position from `self`.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::UndefinedIdentifier { position, .. }
            | Self::UnknownFunction { position, .. }
            | Self::DivisionByZero { position }
            | Self::ModuloByZero { position }
            | Self::ArityMismatch { position, .. }
            | Self::MissingArguments { position, .. }
            | Self::FunctionFailed { position, .. }
            | Self::UnsupportedOperator { position, .. } => *position,
        }
    }
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let position = self.position();
        write!(f, "Error on line {}, column {}: ", position.line, position.column)?;
        match self {
            Self::UndefinedIdentifier { name, .. } => {
                write!(f, "Undefined identifier '{name}'.")
            },
            Self::UnknownFunction { name, .. } => {
                write!(f, "Unknown function '{name}'.")
            },
            Self::DivisionByZero { .. } => write!(f, "Division by zero."),
            Self::ModuloByZero { .. } => write!(f, "Modulo by zero."),
            Self::ArityMismatch { name,
                                  expected,
                                  got,
                                  .. } => {
                write!(f,
                       "Function '{name}' expects {expected} argument(s) but got {got}.")
            },
            Self::MissingArguments { name, .. } => {
                write!(f, "Function '{name}' requires at least one argument.")
            },
            Self::FunctionFailed { name, message, .. } => {
                write!(f, "Function '{name}' failed: {message}")
            },
            Self::UnsupportedOperator { symbol, .. } => {
                write!(f, "Operator '{symbol}' has no evaluation rule.")
            },
        }
    }
}

impl std::error::Error for EvalError {}
