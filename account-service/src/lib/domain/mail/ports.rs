use async_trait::async_trait;

use crate::domain::account::models::User;
use crate::domain::mail::errors::MailError;
use crate::domain::mail::models::OutgoingEmail;
use crate::domain::mail::models::SendEmailCommand;

/// Port for mail domain service operations.
#[async_trait]
pub trait MailServicePort: Send + Sync + 'static {
    /// Send an email on behalf of an authenticated account.
    ///
    /// # Arguments
    /// * `sender` - Account the request was authorized for
    /// * `command` - Validated recipient, subject, body and reply-to
    ///
    /// # Errors
    /// * `NotConfigured` - Outbound transport has no credentials
    /// * `Delivery` - Message could not be built or sent
    async fn send_email(
        &self,
        sender: &User,
        command: SendEmailCommand,
    ) -> Result<(), MailError>;
}

/// Outbound transport for plain-text email.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// Deliver a single message.
    ///
    /// # Errors
    /// * `NotConfigured` - Host, username or password is missing
    /// * `Delivery` - Transport failure
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError>;
}
