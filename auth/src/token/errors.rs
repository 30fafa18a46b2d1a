use thiserror::Error;

/// Error type for token operations.
///
/// Display strings are the messages surfaced to clients on rejection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    Encoding(String),

    #[error("Malformed token")]
    Malformed,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid token payload: {0}")]
    InvalidPayload(String),

    #[error("Token expired")]
    Expired,
}
