use std::fmt;

/// Which pass rejected the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad characters, strings, numbers or comments.
    Lex,
    /// Well-formed tokens in the wrong order.
    Syntax,
}

/// Failure to read a `.vpage` document, positioned at the offending token.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ErrorKind,
    pub message: String,
    /// 1-based.
    pub line: usize,
    /// 1-based.
    pub col: usize,
}

impl ParseError {
    pub(crate) fn lex(message: impl Into<String>, (line, col): (usize, usize)) -> Self {
        Self { kind: ErrorKind::Lex, message: message.into(), line, col }
    }

    pub(crate) fn syntax(message: impl Into<String>, (line, col): (usize, usize)) -> Self {
        Self { kind: ErrorKind::Syntax, message: message.into(), line, col }
    }

    pub fn position(&self) -> (usize, usize) {
        (self.line, self.col)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            ErrorKind::Lex => "unreadable input",
            ErrorKind::Syntax => "syntax error",
        };
        write!(f, "{}:{}: {what}: {}", self.line, self.col, self.message)
    }
}

impl std::error::Error for ParseError {}
