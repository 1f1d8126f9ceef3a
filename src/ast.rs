use crate::engine::lexer::Position;

/// An abstract syntax tree (AST) node representing an expression.
///
/// `Expr` covers every construct of the expression language: numeric
/// literals, identifier references, unary and binary operations, and
/// function calls. Each variant carries the source position of its leading
/// token, which is used exclusively for error reporting and never for
/// evaluation semantics.
///
/// Trees are immutable once constructed. Parameter substitution (see
/// [`crate::engine::definitions::substitute`]) builds new trees rather than
/// mutating existing ones, so a parsed function body can be shared across
/// many calls.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal such as `3.14` or `2e10`.
    Literal {
        /// The literal's numeric value.
        value:    f64,
        /// Position of the literal in the source.
        position: Position,
    },
    /// Reference to a named constant or context variable.
    Identifier {
        /// Name of the identifier.
        name:     String,
        /// Position of the identifier in the source.
        position: Position,
    },
    /// A prefix operation such as `-x`.
    Unary {
        /// Registry symbol of the operator (`u+` or `u-`).
        operator: String,
        /// The operand expression.
        operand:  Box<Self>,
        /// Position of the operator in the source.
        position: Position,
    },
    /// An infix operation such as `a + b`.
    Binary {
        /// Registry symbol of the operator (`+`, `^`, `<=`, ...).
        operator: String,
        /// Left operand.
        left:     Box<Self>,
        /// Right operand.
        right:    Box<Self>,
        /// Position of the left operand in the source.
        position: Position,
    },
    /// A function call such as `sin(x)` or `max(1, 2, 3)`.
    Call {
        /// Name of the function being called.
        callee:    String,
        /// Argument expressions, evaluated left to right.
        arguments: Vec<Self>,
        /// Position of the callee in the source.
        position:  Position,
    },
}

impl Expr {
    /// Gets the source position from `self`.
    ///
    /// ## Example
    /// ```
    /// use numex::{ast::Expr, engine::lexer::Position};
    ///
    /// let expr = Expr::Identifier { name:     "x".to_string(),
    ///                               position: Position { offset: 4,
    ///                                                    line:   1,
    ///                                                    column: 5, }, };
    ///
    /// assert_eq!(expr.position().column, 5);
    /// ```
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Literal { position, .. }
            | Self::Identifier { position, .. }
            | Self::Unary { position, .. }
            | Self::Binary { position, .. }
            | Self::Call { position, .. } => *position,
        }
    }
}

/// A user-defined function built from `name(params) = body` text.
///
/// The body is an ordinary expression tree in which parameter names appear
/// as [`Expr::Identifier`] nodes. Applying the function substitutes argument
/// values for those identifiers and evaluates the resulting tree.
///
/// Invariant: `params` contains distinct identifiers, and `name` never
/// collides with a built-in function (the registry rejects such definitions
/// instead of overwriting).
#[derive(Debug, Clone, PartialEq)]
pub struct UserFunction {
    /// The name of the function.
    pub name:   String,
    /// The parameter names, in declaration order.
    pub params: Vec<String>,
    /// The body expression evaluated when the function is called.
    pub body:   Expr,
}
