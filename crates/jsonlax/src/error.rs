//! Error types raised by the decoder.
//!
//! Every failure is a single immutable [`ParseError`] carrying a payload
//! describing what went wrong plus the 1-based line and column where it was
//! detected. Callers that need to branch on the class of failure use
//! [`ParseError::kind`] rather than matching on message text.

use core::fmt;

use thiserror::Error;

use crate::options::OptionsError;

/// An error raised while setting up or running a parse.
///
/// Rendered as `<message> at line <line> column <column>`; errors detected
/// before any byte is scanned (absent input, invalid option combinations)
/// carry no position and render as the bare message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub(crate) source: ErrorSource,
    pub(crate) line: usize,
    pub(crate) column: usize,
}

impl ParseError {
    pub(crate) fn new(source: ErrorSource, line: usize, column: usize) -> Self {
        Self { source, line, column }
    }

    /// An error with no position, raised before scanning begins.
    pub(crate) fn unlocated(source: ErrorSource) -> Self {
        Self { source, line: 0, column: 0 }
    }

    /// The programmatic classification of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match &self.source {
            ErrorSource::InvalidInput(_) => ErrorKind::InvalidInput,
            ErrorSource::Syntax(_) => ErrorKind::Syntax,
            ErrorSource::NestingTooDeep(_) => ErrorKind::NestingTooDeep,
            ErrorSource::Encoding { .. } => ErrorKind::Encoding,
            ErrorSource::Options(_) => ErrorKind::Options,
            ErrorSource::UnknownAddition(_) | ErrorSource::AdditionFailed(..) => {
                ErrorKind::Addition
            }
        }
    }

    /// 1-based line of the failure, or 0 when the error has no position.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1-based column of the failure, or 0 when the error has no position.
    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 {
            self.source.fmt(f)
        } else {
            write!(f, "{} at line {} column {}", self.source, self.line, self.column)
        }
    }
}

impl core::error::Error for ParseError {}

/// Coarse error classification for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The supplied input is not parseable text or bytes at all.
    InvalidInput,
    /// A grammar or lexical violation in otherwise scannable input.
    Syntax,
    /// The configured nesting limit was exceeded.
    NestingTooDeep,
    /// A caller encoding assertion is violated by the actual byte content.
    Encoding,
    /// The option set failed validation before scanning.
    Options,
    /// Tagged reconstruction referenced an unknown type or failed.
    Addition,
}

/// The payload of a [`ParseError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorSource {
    /// No scannable input was supplied.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// A lexical or structural violation.
    #[error("{0}")]
    Syntax(#[from] SyntaxError),
    /// Container depth exceeded the configured limit.
    #[error("nesting of {0} is too deep")]
    NestingTooDeep(usize),
    /// A byte incompatible with the asserted input encoding.
    #[error("invalid byte {byte:#04x} for {assertion} input")]
    Encoding {
        /// Human-readable name of the asserted encoding.
        assertion: &'static str,
        /// The offending byte.
        byte: u8,
    },
    /// The option set is inconsistent.
    #[error("{0}")]
    Options(#[from] OptionsError),
    /// A tagged object named a type with no registered reconstruction.
    #[error("no addition registered for type {0:?}")]
    UnknownAddition(String),
    /// A registered reconstruction function reported a failure.
    #[error("addition {0:?} failed: {1}")]
    AdditionFailed(String, String),
}

/// Lexical and grammatical violations.
///
/// Variants that quote source text hold a snippet already truncated to a
/// small fixed number of codepoints, so messages stay bounded regardless of
/// input size.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// A byte sequence that cannot start any token.
    #[error("unexpected character: '{0}'")]
    UnexpectedCharacter(String),
    /// A well-formed token in a position the grammar does not allow.
    #[error("unexpected token {0}")]
    UnexpectedToken(&'static str),
    /// Input ended while a value was still expected.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// A specific token was required and something else appeared.
    #[error("expected {expected}, got: {got}")]
    Expected {
        /// What the grammar required at this point.
        expected: &'static str,
        /// The token that appeared instead.
        got: &'static str,
    },
    /// A number literal violating the JSON number grammar.
    #[error("invalid number: '{0}'")]
    InvalidNumber(String),
    /// A backslash escape other than the recognized set.
    #[error("invalid escape sequence: '{0}'")]
    InvalidEscape(String),
    /// A `\u` escape without exactly four hex digits.
    #[error("invalid unicode escape: '{0}'")]
    InvalidUnicodeEscape(String),
    /// A raw control byte inside a string literal.
    #[error("unescaped control character in string")]
    ControlCharacter,
    /// Input ended inside a string literal.
    #[error("unterminated string")]
    UnterminatedString,
    /// Input ended inside a block comment.
    #[error("unterminated block comment")]
    UnterminatedComment,
    /// A separator before a closing bracket without the option allowing it.
    #[error("trailing comma before '{0}'")]
    TrailingComma(char),
    /// A repeated object key under the rejecting policy.
    #[error("duplicate key \"{0}\"")]
    DuplicateKey(String),
    /// Non-whitespace content after the top-level value.
    #[error("unexpected content after top-level value: '{0}'")]
    TrailingContent(String),
}
