use crate::domain::account::models::EmailAddress;
use crate::domain::mail::errors::MailError;

/// Validated request to send a plain-text email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendEmailCommand {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub reply_to: Option<String>,
}

impl SendEmailCommand {
    /// Construct a new send command.
    ///
    /// Fields are trimmed. Addresses keep their case, since the recipient's
    /// mail server owns the local part.
    ///
    /// # Errors
    /// * `Validation` - A required field is blank or an address is malformed
    pub fn new(
        to: &str,
        subject: &str,
        body: &str,
        reply_to: Option<&str>,
    ) -> Result<Self, MailError> {
        let to = to.trim();
        let subject = subject.trim();
        let body = body.trim();

        if to.is_empty() || subject.is_empty() || body.is_empty() {
            return Err(MailError::Validation(
                "Recipient, subject, and body are required".to_string(),
            ));
        }

        let reply_to = reply_to.map(str::trim).filter(|r| !r.is_empty());

        if !EmailAddress::is_valid(to) || reply_to.is_some_and(|r| !EmailAddress::is_valid(r)) {
            return Err(MailError::Validation("Invalid email address".to_string()));
        }

        Ok(Self {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
            reply_to: reply_to.map(str::to_string),
        })
    }
}

/// Message handed to the mailer. The From mailbox is owned by the transport
/// configuration, not the account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub reply_to: Option<String>,
}

impl From<SendEmailCommand> for OutgoingEmail {
    fn from(command: SendEmailCommand) -> Self {
        Self {
            to: command.to,
            subject: command.subject,
            body: command.body,
            reply_to: command.reply_to,
        }
    }
}
