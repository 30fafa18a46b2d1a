use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::account::errors::EmailError;

/// User aggregate entity.
///
/// Owned by the user store; the account service only requests creation.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Always lowercase. Accepts the `local@domain.tld` shape: ASCII, no
/// whitespace, exactly one `@`, and a domain of at least two non-empty
/// dot-separated labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// Surrounding whitespace is trimmed and the address is lowercased
    /// before validation.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not have the `local@domain.tld` shape
    pub fn new(email: String) -> Result<Self, EmailError> {
        let email = Self::normalize(&email);
        if Self::is_valid(&email) {
            Ok(Self(email))
        } else {
            Err(EmailError::InvalidFormat)
        }
    }

    /// Canonical lookup key for an address: trimmed and lowercased.
    pub fn normalize(email: &str) -> String {
        email.trim().to_lowercase()
    }

    /// Check the `local@domain.tld` shape without normalizing.
    pub fn is_valid(email: &str) -> bool {
        if !email.is_ascii() || email.chars().any(|c| c.is_ascii_whitespace()) {
            return false;
        }

        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };
        if local.is_empty() || domain.contains('@') {
            return false;
        }

        let mut labels = domain.split('.');
        let labels_present = labels.clone().count() >= 2;
        labels_present && labels.all(|label| !label.is_empty())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Record handed to the store when an account is created.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: EmailAddress,
    pub password_hash: String,
    pub display_name: Option<String>,
}

/// Command to register a new account with domain types
#[derive(Debug)]
pub struct RegisterCommand {
    pub email: EmailAddress,
    pub password: String,
    pub display_name: Option<String>,
}

impl RegisterCommand {
    /// Construct a new register command.
    ///
    /// # Arguments
    /// * `email` - Validated email address
    /// * `password` - Plain text password (will be hashed by service)
    /// * `display_name` - Optional name; blank values are dropped
    pub fn new(email: EmailAddress, password: String, display_name: Option<String>) -> Self {
        let display_name = display_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());

        Self {
            email,
            password,
            display_name,
        }
    }
}

/// Command to log in with an email and password.
///
/// The email is only normalized: an address that could never have been
/// registered simply fails the lookup.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

impl LoginCommand {
    pub fn new(email: &str, password: String) -> Self {
        Self {
            email: EmailAddress::normalize(email),
            password,
        }
    }
}

/// External projection of a user. Never includes the credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    pub id: i64,
    pub email: String,
    pub display_name: Option<String>,
    /// ISO-8601 / RFC 3339 timestamp
    pub created_at: String,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            email: user.email.as_str().to_string(),
            display_name: user.display_name.clone(),
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// Token and user view returned by register and login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResult {
    pub token: String,
    pub user: UserView,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_email_is_normalized() {
        let email = EmailAddress::new("  Alice@Example.COM ".to_string()).unwrap();
        assert_eq!(email.as_str(), "alice@example.com");
    }

    #[test]
    fn test_email_accepts_simple_shapes() {
        for valid in ["a@b.c", "first.last@mail.example.org", "x+tag@sub.domain.io"] {
            assert!(EmailAddress::new(valid.to_string()).is_ok(), "{}", valid);
        }
    }

    #[test]
    fn test_email_rejects_bad_shapes() {
        for invalid in [
            "invalid",
            "",
            "@example.com",
            "alice@",
            "alice@example",
            "alice@example.",
            "alice@.com",
            "alice@example..com",
            "alice@@example.com",
            "alice@bob@example.com",
            "al ice@example.com",
            "alicé@example.com",
        ] {
            assert_eq!(
                EmailAddress::new(invalid.to_string()),
                Err(EmailError::InvalidFormat),
                "{}",
                invalid
            );
        }
    }

    #[test]
    fn test_register_command_drops_blank_display_name() {
        let email = EmailAddress::new("alice@example.com".to_string()).unwrap();

        let blank = RegisterCommand::new(email.clone(), "pw".to_string(), Some("  ".to_string()));
        assert_eq!(blank.display_name, None);

        let named = RegisterCommand::new(email, "pw".to_string(), Some(" Alice ".to_string()));
        assert_eq!(named.display_name, Some("Alice".to_string()));
    }

    #[test]
    fn test_login_command_normalizes_email() {
        let command = LoginCommand::new(" ALICE@example.com", "pw".to_string());
        assert_eq!(command.email, "alice@example.com");
    }

    #[test]
    fn test_user_view_excludes_credential() {
        let user = User {
            id: UserId(7),
            email: EmailAddress::new("alice@example.com".to_string()).unwrap(),
            password_hash: "salt$key".to_string(),
            display_name: Some("Alice".to_string()),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
        };

        let view = UserView::from(&user);
        assert_eq!(view.id, 7);
        assert_eq!(view.email, "alice@example.com");
        assert_eq!(view.display_name, Some("Alice".to_string()));
        assert_eq!(view.created_at, "2024-05-01T12:30:00+00:00");

        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("password_hash").is_none());
    }
}
