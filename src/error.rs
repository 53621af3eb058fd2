use std::fmt;

use regex_automata::meta::BuildError;

use crate::expr::DataType;

/// Result type for this crate with specific error enum.
pub type Result<T> = ::std::result::Result<T, Error>;

/// An error for the result of building a pattern holder.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// The function node can't carry a pattern: wrong arity, or its second
    /// argument isn't a string literal.
    InvalidArgument {
        /// Name of the offending function
        function: String,
        /// What is wrong with the arguments
        reason: ArgumentError,
    },
    /// The pattern (after LIKE translation, if any) was rejected.
    InvalidPattern {
        /// The pattern as it was handed to the failing step
        pattern: String,
        /// Why it was rejected
        reason: PatternError,
    },
}

/// Reason for an [`Error::InvalidArgument`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ArgumentError {
    /// The node doesn't have exactly two children, holds the actual count
    WrongArity(usize),
    /// The second child isn't a literal
    NotLiteral,
    /// The second child is a literal of a non-string type
    NotString(DataType),
    /// The pattern literal is null
    NullLiteral,
    /// A binary pattern literal that is not valid UTF-8
    NonUtf8Literal,
    /// The literal payload doesn't agree with its declared type
    PayloadMismatch,
}

/// Reason for an [`Error::InvalidPattern`].
#[derive(Debug)]
#[non_exhaustive]
pub enum PatternError {
    /// The regex engine refused to compile the pattern
    Regex(BuildError),
    /// LIKE pattern ends with an unescaped escape character
    TrailingEscape,
    /// LIKE escape character followed by something other than `%`, `_` or itself
    InvalidEscape(char),
    /// LIKE pattern longer than the supported limit, holds the actual length
    TooLong(usize),
}

impl Error {
    pub(crate) fn invalid_argument(function: &str, reason: ArgumentError) -> Error {
        Error::InvalidArgument {
            function: function.to_string(),
            reason,
        }
    }

    pub(crate) fn invalid_pattern(pattern: &str, reason: PatternError) -> Error {
        Error::InvalidPattern {
            pattern: pattern.to_string(),
            reason,
        }
    }
}

impl ::std::error::Error for Error {
    fn source(&self) -> Option<&(dyn ::std::error::Error + 'static)> {
        match self {
            Error::InvalidPattern {
                reason: PatternError::Regex(e),
                ..
            } => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidArgument { function, reason } => {
                write!(f, "'{}' function {}", function, reason)
            }
            Error::InvalidPattern { pattern, reason } => {
                write!(f, "Building pattern '{}' failed: {}", pattern, reason)
            }
        }
    }
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ArgumentError::WrongArity(n) => {
                write!(f, "requires two parameters, got {}", n)
            }
            ArgumentError::NotLiteral => {
                write!(f, "requires a literal as the second parameter")
            }
            ArgumentError::NotString(data_type) => write!(
                f,
                "requires a string literal as the second parameter, got {}",
                data_type
            ),
            ArgumentError::NullLiteral => {
                write!(f, "requires a non-null literal as the second parameter")
            }
            ArgumentError::NonUtf8Literal => {
                write!(f, "requires a valid UTF-8 literal as the second parameter")
            }
            ArgumentError::PayloadMismatch => {
                write!(f, "has a literal whose value doesn't match its type")
            }
        }
    }
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PatternError::Regex(e) => write!(f, "Regex error: {}", e),
            PatternError::TrailingEscape => {
                write!(f, "Unexpected escape char at the end of pattern")
            }
            PatternError::InvalidEscape(c) => {
                write!(f, "Invalid escape sequence, escaped '{}'", c)
            }
            PatternError::TooLong(len) => {
                write!(f, "Pattern of {} bytes exceeds the size limit", len)
            }
        }
    }
}
