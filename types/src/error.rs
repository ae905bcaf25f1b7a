//! Parse errors for the textual forms of the fundamental types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("expected at most {max} bytes, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("expected exactly {expected} bytes, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("empty value")]
    Empty,

    #[error("invalid idea id: {0}")]
    InvalidIdeaId(String),
}
