use logos::Logos;

use crate::error::LexicalError;

/// A location in the source text.
///
/// `line` and `column` are 1-based; `offset` is the byte offset from the
/// start of the input. Positions are attached to tokens and AST nodes and
/// are used only for error reporting, never for evaluation semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Byte offset from the start of the input.
    pub offset: usize,
    /// 1-based source line.
    pub line:   usize,
    /// 1-based source column.
    pub column: usize,
}

/// The kind of a lexical token, with its payload where one exists.
///
/// Numbers carry their parsed value; identifiers and operators carry their
/// lexeme. `Eof` terminates every token sequence exactly once.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Numeric literal, such as `42`, `3.14`, `.5`, or `2.1e-10`.
    Number(f64),
    /// Identifier, such as `x` or `sqrt2`.
    Identifier(String),
    /// Operator lexeme, such as `+`, `^`, `<=`, or `=`.
    Operator(String),
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,`
    Comma,
    /// End of input.
    Eof,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(value) => write!(f, "number {value}"),
            Self::Identifier(name) => write!(f, "identifier '{name}'"),
            Self::Operator(symbol) => write!(f, "operator '{symbol}'"),
            Self::LParen => write!(f, "'('"),
            Self::RParen => write!(f, "')'"),
            Self::Comma => write!(f, "','"),
            Self::Eof => write!(f, "end of input"),
        }
    }
}

/// A lexical token: a minimal but meaningful unit of text produced by the
/// lexer, together with its source position.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What the token is, with its payload.
    pub kind:     TokenKind,
    /// Where the token starts in the source.
    pub position: Position,
}

/// Raw token classes recognized by the generated lexer.
///
/// `tokenize` converts these into [`Token`] values with positions; the raw
/// enum stays private to this module.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(extras = LexerExtras)]
#[logos(skip r"[ \t\r\f]+")]
enum RawToken {
    /// Numeric literal tokens. The exponent suffix `[eE][+-]?digits` is
    /// matched only when at least one digit follows; otherwise matching
    /// falls back to the last accepting state, so `2e` lexes as the number
    /// `2` followed by the identifier `e`.
    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?", parse_number)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_number)]
    Number(f64),
    /// Identifier tokens: a letter or underscore followed by letters,
    /// digits, or underscores.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// Operator tokens. Two-character operators are matched before their
    /// single-character prefixes. The bare `=` never parses inside an
    /// expression but is required by function-definition text.
    #[regex(r"==|!=|<=|>=|[+\-*/^%<>=]", |lex| lex.slice().to_string())]
    Operator(String),
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
    /// Newlines advance the line counter and reset the column origin.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        lex.extras.line_start = lex.span().end;
        logos::Skip
    })]
    NewLine,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number and the byte offset at which that line
/// begins, so that token columns can be computed from spans.
pub struct LexerExtras {
    /// The current 1-based line number.
    pub line:       usize,
    /// Byte offset of the first character of the current line.
    pub line_start: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line:       1,
               line_start: 0, }
    }
}

/// Parses a numeric literal from the current token slice.
fn parse_number(lex: &mut logos::Lexer<RawToken>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Tokenizes expression text into a flat token sequence.
///
/// The returned sequence is always terminated by exactly one
/// [`TokenKind::Eof`] token at the end-of-input offset. Whitespace
/// (space, tab, carriage return, form feed, newline) separates tokens and
/// is never part of one; newlines advance the line counter and reset the
/// column to 1.
///
/// # Errors
/// Returns a [`LexicalError`] carrying line and column when the input
/// contains a character that belongs to no token class.
///
/// # Example
/// ```
/// use numex::engine::lexer::{TokenKind, tokenize};
///
/// let tokens = tokenize("2 + sin(x)").unwrap();
/// assert_eq!(tokens.len(), 7);
/// assert_eq!(tokens[0].kind, TokenKind::Number(2.0));
/// assert_eq!(tokens[1].kind, TokenKind::Operator("+".to_string()));
/// assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
///
/// assert!(tokenize("2 ? 3").is_err());
/// ```
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexicalError> {
    let mut tokens = Vec::new();
    let mut lexer = RawToken::lexer(input);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let position = Position { offset: span.start,
                                  line:   lexer.extras.line,
                                  column: span.start - lexer.extras.line_start + 1, };

        match result {
            Ok(raw) => {
                let kind = match raw {
                    RawToken::Number(value) => TokenKind::Number(value),
                    RawToken::Identifier(name) => TokenKind::Identifier(name),
                    RawToken::Operator(symbol) => TokenKind::Operator(symbol),
                    RawToken::LParen => TokenKind::LParen,
                    RawToken::RParen => TokenKind::RParen,
                    RawToken::Comma => TokenKind::Comma,
                    RawToken::NewLine => continue,
                };
                tokens.push(Token { kind, position });
            },
            Err(()) => {
                return Err(LexicalError { message: format!("Unrecognized character '{}'.",
                                                           lexer.slice()),
                                          line:    position.line,
                                          column:  position.column, });
            },
        }
    }

    tokens.push(Token { kind:     TokenKind::Eof,
                        position: Position { offset: input.len(),
                                             line:   lexer.extras.line,
                                             column: input.len() - lexer.extras.line_start
                                                     + 1, }, });

    Ok(tokens)
}
