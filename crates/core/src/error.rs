//! Errors raised by client-side checks, before any request is sent.
//!
//! Transport and backend failures are `ApiError`s in `chainboard-client`.

use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A form or payload field failed its check.
    #[error("invalid input: {0}")]
    Validation(String),

    /// A select value or path segment that is not a numeric id.
    #[error("invalid {kind}: {reason}")]
    InvalidId { kind: &'static str, reason: String },

    #[error("unknown order status '{0}'")]
    UnknownStatus(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
