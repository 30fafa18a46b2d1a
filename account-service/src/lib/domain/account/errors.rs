use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email address")]
    InvalidFormat,
}

/// Top-level error for all account operations.
///
/// Display strings are the plain-text messages returned to clients, so they
/// must never reveal whether an email is registered.
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    // Bad input: email shape, missing required fields
    #[error("{0}")]
    Validation(String),

    // Email already registered (pre-check or store uniqueness constraint)
    #[error("Email already registered")]
    Conflict(String),

    // Unknown email or wrong password
    #[error("Invalid email or password")]
    InvalidCredentials,

    // Missing header, malformed, forged or expired token
    #[error("{0}")]
    Unauthorized(String),

    // Token verified but the account no longer exists
    #[error("User not found")]
    NotFound(String),

    // Stored data that does not decode
    #[error("Malformed stored data: {0}")]
    Format(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<EmailError> for AccountError {
    fn from(err: EmailError) -> Self {
        AccountError::Validation(err.to_string())
    }
}
