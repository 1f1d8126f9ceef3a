/// Represents a failure to tokenize source text.
///
/// Raised when the input contains a byte that matches none of: whitespace,
/// digit, letter or underscore, recognized operator character, `(`, `)`,
/// or `,`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexicalError {
    /// Details about the unrecognized input.
    pub message: String,
    /// The source line where the error occurred (1-based).
    pub line:    usize,
    /// The source column where the error occurred (1-based).
    pub column:  usize,
}

impl std::fmt::Display for LexicalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f,
               "Error on line {}, column {}: {}",
               self.line, self.column, self.message)
    }
}

impl std::error::Error for LexicalError {}
