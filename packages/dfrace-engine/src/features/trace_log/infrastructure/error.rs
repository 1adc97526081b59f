/// Log line parsing errors
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogParseError {
    #[error("expected {expected} fields, found {found}")]
    MissingFields { expected: usize, found: usize },

    #[error("invalid integer '{0}'")]
    InvalidInteger(String),

    #[error("invalid hex address '{0}'")]
    InvalidAddress(String),

    #[error("invalid access tag '{0}' (expected W or R)")]
    InvalidAccessTag(String),

    #[error("unexpected token '{0}' after memory action")]
    TrailingToken(String),
}

pub type Result<T> = std::result::Result<T, LogParseError>;
