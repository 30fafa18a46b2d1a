use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::Address;
use lettre::Message;
use lettre::SmtpTransport;
use lettre::Transport;

use crate::config::SmtpConfig;
use crate::domain::mail::errors::MailError;
use crate::domain::mail::models::OutgoingEmail;
use crate::domain::mail::ports::Mailer;

/// SMTP mailer backed by lettre's blocking transport.
///
/// Settings are checked at send time, so the service starts without SMTP
/// credentials and only `/api/send` fails.
pub struct SmtpMailer {
    config: SmtpConfig,
}

impl SmtpMailer {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    fn build_message(&self, email: &OutgoingEmail) -> Result<Message, MailError> {
        let from = Mailbox::new(
            Some(self.config.from_name.clone()),
            parse_address(self.config.sender_address())?,
        );

        let mut builder = Message::builder()
            .from(from)
            .to(Mailbox::new(None, parse_address(&email.to)?))
            .subject(email.subject.as_str())
            .header(ContentType::TEXT_PLAIN);

        if let Some(reply_to) = &email.reply_to {
            builder = builder.reply_to(Mailbox::new(None, parse_address(reply_to)?));
        }

        builder
            .body(email.body.clone())
            .map_err(|e| MailError::Delivery(e.to_string()))
    }

    fn build_transport(&self) -> Result<SmtpTransport, MailError> {
        let builder = if self.config.use_tls {
            SmtpTransport::starttls_relay(&self.config.host)
        } else {
            SmtpTransport::relay(&self.config.host)
        }
        .map_err(|e| MailError::Delivery(e.to_string()))?;

        Ok(builder
            .port(self.config.port)
            .credentials(Credentials::new(
                self.config.username.clone(),
                self.config.password.clone(),
            ))
            .build())
    }
}

fn parse_address(address: &str) -> Result<Address, MailError> {
    address
        .parse::<Address>()
        .map_err(|e| MailError::Delivery(format!("{}: {}", address, e)))
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        if !self.config.is_configured() {
            return Err(MailError::NotConfigured);
        }

        let message = self.build_message(email)?;
        let transport = self.build_transport()?;

        tracing::debug!(
            host = %self.config.host,
            port = self.config.port,
            starttls = self.config.use_tls,
            "Dispatching email over SMTP"
        );

        tokio::task::spawn_blocking(move || transport.send(&message))
            .await
            .map_err(|e| MailError::Delivery(e.to_string()))?
            .map_err(|e| MailError::Delivery(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> SmtpConfig {
        SmtpConfig {
            host: "smtp.test".to_string(),
            port: 587,
            username: "sender@example.com".to_string(),
            password: "password".to_string(),
            use_tls: true,
            from_email: String::new(),
            from_name: "Jmail".to_string(),
        }
    }

    fn email(reply_to: Option<&str>) -> OutgoingEmail {
        OutgoingEmail {
            to: "bob@example.com".to_string(),
            subject: "Hello".to_string(),
            body: "Hi Bob".to_string(),
            reply_to: reply_to.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_send_without_credentials() {
        for config in [
            SmtpConfig::default(),
            SmtpConfig {
                host: String::new(),
                ..configured()
            },
            SmtpConfig {
                password: String::new(),
                ..configured()
            },
        ] {
            let result = SmtpMailer::new(config).send(&email(None)).await;
            assert_eq!(result, Err(MailError::NotConfigured));
        }
    }

    #[test]
    fn test_message_headers() {
        let mailer = SmtpMailer::new(configured());
        let message = mailer
            .build_message(&email(Some("alice@example.com")))
            .unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("From: "));
        assert!(raw.contains("Jmail"));
        assert!(raw.contains("<sender@example.com>"));
        assert!(raw.contains("To: bob@example.com"));
        assert!(raw.contains("Reply-To: alice@example.com"));
        assert!(raw.contains("Subject: Hello"));
        assert!(raw.contains("Content-Type: text/plain"));
        assert!(raw.contains("Hi Bob"));
    }

    #[test]
    fn test_message_prefers_from_email() {
        let mailer = SmtpMailer::new(SmtpConfig {
            from_email: "noreply@example.com".to_string(),
            ..configured()
        });
        let raw = String::from_utf8(mailer.build_message(&email(None)).unwrap().formatted())
            .unwrap();

        assert!(raw.contains("noreply@example.com"));
        assert!(!raw.contains("Reply-To"));
    }
}
