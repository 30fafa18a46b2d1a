use thiserror::Error;

/// Errors for outbound email operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MailError {
    // Missing or malformed send fields
    #[error("{0}")]
    Validation(String),

    #[error(
        "SMTP credentials are not configured. Set SMTP__HOST, SMTP__USERNAME, and SMTP__PASSWORD."
    )]
    NotConfigured,

    // Message building or SMTP transport failure
    #[error("Failed to send email: {0}")]
    Delivery(String),
}
