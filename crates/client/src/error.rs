use thiserror::Error;

/// Failure of a single backend call.
///
/// Views turn these into inline messages; nothing here is fatal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Transport failure: the request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("API error ({status}): {}", .message.as_deref().unwrap_or("no details"))]
    Status { status: u16, message: Option<String> },

    /// The response body did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message the backend put in its error response, if any.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// What to show next to the control: the backend's own message when it
    /// sent one, `fallback` otherwise.
    pub fn user_message(&self, fallback: &str) -> String {
        self.backend_message().unwrap_or(fallback).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_backend_text() {
        let with = ApiError::Status {
            status: 409,
            message: Some("Email already registered".to_string()),
        };
        let without = ApiError::Status {
            status: 500,
            message: None,
        };
        assert_eq!(with.user_message("Registration failed."), "Email already registered");
        assert_eq!(without.user_message("Registration failed."), "Registration failed.");
        assert_eq!(
            ApiError::Network("refused".into()).user_message("Try again."),
            "Try again."
        );
        assert_eq!(without.to_string(), "API error (500): no details");
    }
}
