use crate::{
    ast::Expr,
    engine::{
        lexer::{Position, Token, TokenKind},
        registry::{Associativity, OperatorDef, Registry},
    },
    error::ParseError,
};

/// Result type used by the parser.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a token sequence into an expression tree.
///
/// This is a Pratt (precedence-climbing) parser: the binding power of each
/// operator is derived from its [`OperatorDef`] in the registry, so one
/// expression loop handles arbitrary precedence and associativity. Parsing
/// succeeds only if, after one complete expression, the next token is
/// end-of-input; trailing tokens are an error, never silently ignored.
///
/// # Errors
/// Returns a [`ParseError`] carrying the offending token's position on
/// malformed input: unexpected tokens, unmatched parentheses, malformed
/// argument lists, unregistered prefix operators, or trailing tokens.
///
/// # Example
/// ```
/// use numex::engine::{lexer::tokenize, parser::parse, registry::Registry};
///
/// let registry = Registry::standard();
/// let tokens = tokenize("1 + 2 * 3").unwrap();
/// let ast = parse(&tokens, &registry).unwrap();
///
/// // `*` binds tighter than `+`, so the root node is the addition.
/// assert!(matches!(ast, numex::ast::Expr::Binary { ref operator, .. } if operator == "+"));
/// ```
pub fn parse(tokens: &[Token], registry: &Registry) -> ParseResult<Expr> {
    if tokens.is_empty() {
        return Err(ParseError::UnexpectedEndOfInput { position: Position { offset: 0,
                                                                           line:   1,
                                                                           column: 1, }, });
    }

    let mut parser = Parser { tokens,
                              registry,
                              pos: 0 };

    let expr = parser.expression(0)?;

    let token = parser.current().clone();
    match token.kind {
        TokenKind::Eof => Ok(expr),
        other => Err(ParseError::TrailingTokens { token:    other.to_string(),
                                                  position: token.position, }),
    }
}

/// Computes the `(left, right)` binding powers of an operator.
///
/// Left-associative operators yield `(p, p + 1)` so an equal-precedence
/// operator to the right does not bind; right-associative operators yield
/// `(p + 1, p)` so it does.
const fn binding_power(def: &OperatorDef) -> (u8, u8) {
    match def.associativity {
        Associativity::Left => (def.precedence, def.precedence + 1),
        Associativity::Right => (def.precedence + 1, def.precedence),
    }
}

/// Parser state: a cursor over the token sequence plus the registry that
/// supplies operator shapes.
struct Parser<'a> {
    tokens:   &'a [Token],
    registry: &'a Registry,
    pos:      usize,
}

impl Parser<'_> {
    /// The token under the cursor. Reads past the end keep returning the
    /// final `Eof` token.
    fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// Moves the cursor forward, clamping at the final `Eof` token.
    fn advance(&mut self) {
        self.pos = (self.pos + 1).min(self.tokens.len() - 1);
    }

    /// Parses one expression whose operators all bind at least as tightly
    /// as `min_bp`.
    ///
    /// Obtains a left-hand node via [`Self::nud`], then loops: a `(` after
    /// a bare identifier is a function-call suffix; an infix operator with
    /// sufficient left binding power extends the tree rightward; anything
    /// else ends the expression and is left for the caller.
    fn expression(&mut self, min_bp: u8) -> ParseResult<Expr> {
        let mut left = self.nud()?;

        loop {
            let token = self.current().clone();
            match token.kind {
                TokenKind::Eof | TokenKind::RParen | TokenKind::Comma => break,

                TokenKind::LParen if matches!(left, Expr::Identifier { .. }) => {
                    left = self.call(left)?;
                },

                TokenKind::Operator(ref symbol) => {
                    let Some(def) = self.registry.operator(symbol) else {
                        break;
                    };
                    if def.arity != 2 {
                        break;
                    }
                    let (left_bp, right_bp) = binding_power(def);
                    if left_bp < min_bp {
                        // This operator belongs to an outer call.
                        break;
                    }

                    let operator = symbol.clone();
                    let position = left.position();
                    self.advance();
                    let right = self.expression(right_bp)?;
                    left = Expr::Binary { operator,
                                          left: Box::new(left),
                                          right: Box::new(right),
                                          position };
                },

                _ => break,
            }
        }

        Ok(left)
    }

    /// Null denotation: consumes the token that begins an expression.
    ///
    /// Numbers become literals, identifiers become references, prefix `+`
    /// and `-` resolve to the registry's `u+`/`u-` definitions, and `(`
    /// opens a grouped sub-expression that must be closed by `)`.
    fn nud(&mut self) -> ParseResult<Expr> {
        let token = self.current().clone();
        match token.kind {
            TokenKind::Number(value) => {
                self.advance();
                Ok(Expr::Literal { value,
                                   position: token.position })
            },

            TokenKind::Identifier(name) => {
                self.advance();
                Ok(Expr::Identifier { name,
                                      position: token.position })
            },

            TokenKind::Operator(ref symbol) if symbol == "+" || symbol == "-" => {
                let unary = if symbol == "+" { "u+" } else { "u-" };
                let Some(def) = self.registry.operator(unary) else {
                    return Err(ParseError::UnknownOperator { symbol:   unary.to_string(),
                                                             position: token.position, });
                };
                let (_, right_bp) = binding_power(def);
                self.advance();
                let operand = self.expression(right_bp)?;
                Ok(Expr::Unary { operator: unary.to_string(),
                                 operand:  Box::new(operand),
                                 position: token.position, })
            },

            TokenKind::LParen => {
                self.advance();
                let expr = self.expression(0)?;
                let next = self.current().clone();
                match next.kind {
                    TokenKind::RParen => {
                        self.advance();
                        Ok(expr)
                    },
                    other => Err(ParseError::ExpectedClosingParen { token:    other.to_string(),
                                                                    position: next.position, }),
                }
            },

            TokenKind::Eof => Err(ParseError::UnexpectedEndOfInput { position: token.position }),

            other => Err(ParseError::UnexpectedToken { token:    other.to_string(),
                                                       position: token.position, }),
        }
    }

    /// Parses a function-call suffix: `callee ( args )`.
    ///
    /// The cursor is on the `(`. A `)` immediately after it yields a
    /// zero-argument call; otherwise arguments are full expressions
    /// separated by commas. A missing comma or closing parenthesis is a
    /// [`ParseError`] naming the offending token's position.
    fn call(&mut self, callee: Expr) -> ParseResult<Expr> {
        let Expr::Identifier { name, position } = callee else {
            unreachable!()
        };
        self.advance();

        let mut arguments = Vec::new();

        if matches!(self.current().kind, TokenKind::RParen) {
            self.advance();
            return Ok(Expr::Call { callee: name,
                                   arguments,
                                   position });
        }

        loop {
            arguments.push(self.expression(0)?);

            let next = self.current().clone();
            match next.kind {
                TokenKind::Comma => self.advance(),
                TokenKind::RParen => {
                    self.advance();
                    break;
                },
                other => {
                    return Err(ParseError::ExpectedArgumentSeparator { token:    other.to_string(),
                                                                       position: next.position, });
                },
            }
        }

        Ok(Expr::Call { callee: name,
                        arguments,
                        position })
    }
}
