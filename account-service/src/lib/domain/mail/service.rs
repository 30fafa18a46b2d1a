use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::account::models::User;
use crate::domain::mail::errors::MailError;
use crate::domain::mail::models::OutgoingEmail;
use crate::domain::mail::models::SendEmailCommand;
use crate::domain::mail::ports::MailServicePort;
use crate::domain::mail::ports::Mailer;

/// Domain service implementation for sending email.
pub struct MailService<M>
where
    M: Mailer,
{
    mailer: Arc<M>,
}

impl<M> MailService<M>
where
    M: Mailer,
{
    pub fn new(mailer: Arc<M>) -> Self {
        Self { mailer }
    }
}

#[async_trait]
impl<M> MailServicePort for MailService<M>
where
    M: Mailer,
{
    async fn send_email(
        &self,
        sender: &User,
        command: SendEmailCommand,
    ) -> Result<(), MailError> {
        let email = OutgoingEmail::from(command);

        match self.mailer.send(&email).await {
            Ok(()) => {
                tracing::info!(sender = %sender.id, to = %email.to, "Email sent");
                Ok(())
            }
            Err(e) => {
                tracing::error!(sender = %sender.id, to = %email.to, error = %e, "Email send failed");
                Err(e)
            }
        }
    }
}
