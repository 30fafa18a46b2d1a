use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token;
use crate::token::Claims;
use crate::token::TokenError;

/// Authentication coordinator combining password verification and token issuance.
///
/// Holds the signing secret and token lifetime read from configuration and
/// passes them explicitly into every token operation.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    secret: Vec<u8>,
    ttl_seconds: i64,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `secret` - Secret key for token signing
    /// * `ttl_seconds` - Lifetime of issued tokens
    ///
    /// # Returns
    /// Configured Authenticator instance
    pub fn new(secret: &[u8], ttl_seconds: i64) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            secret: secret.to_vec(),
            ttl_seconds,
        }
    }

    /// Replace the default password hasher (e.g. to tune the iteration count).
    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against a stored credential. Malformed credentials never match.
    pub fn verify_password(&self, password: &str, credential: &str) -> bool {
        self.password_hasher.verify(password, credential)
    }

    /// Verify credentials and issue a token for `subject`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `credential` - Stored credential
    /// * `subject` - Identifier to place in the token
    /// * `now` - Current Unix timestamp
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `Token` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        credential: &str,
        subject: i64,
        now: i64,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.verify_password(password, credential) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.issue_token(subject, now)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue a token without password verification.
    ///
    /// Used right after registration, when the password was just hashed.
    ///
    /// # Errors
    /// * `Encoding` - Token generation failed
    pub fn issue_token(&self, subject: i64, now: i64) -> Result<String, TokenError> {
        token::issue(subject, now, self.ttl_seconds, &self.secret)
    }

    /// Validate a token and return its claims.
    ///
    /// # Errors
    /// * `TokenError` - Token is malformed, forged, or expired
    pub fn validate_token(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        token::decode(token, now, &self.secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;

    fn authenticator() -> Authenticator {
        Authenticator::new(b"test_secret_key", 3600)
            .with_password_hasher(PasswordHasher::with_iterations(1_000))
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = authenticator();

        let password = "my_password";
        let credential = authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        let result = authenticator
            .authenticate(password, &credential, 123, NOW)
            .expect("Authentication failed");

        assert!(!result.access_token.is_empty());

        let claims = authenticator
            .validate_token(&result.access_token, NOW)
            .expect("Token validation failed");
        assert_eq!(claims.sub, Some(123));
        assert_eq!(claims.exp, NOW + 3600);
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = authenticator();

        let credential = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let result = authenticator.authenticate("wrong_password", &credential, 123, NOW);
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_malformed_credential() {
        let result = authenticator().authenticate("my_password", "no-delimiter", 123, NOW);
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_validate_token_from_other_secret() {
        let ours = authenticator();
        let theirs = Authenticator::new(b"another_secret", 3600);

        let token = theirs.issue_token(1, NOW).expect("Failed to issue token");

        assert_eq!(
            ours.validate_token(&token, NOW).unwrap_err(),
            TokenError::InvalidSignature
        );
    }

    #[test]
    fn test_validate_expired_token() {
        let authenticator = authenticator();
        let token = authenticator
            .issue_token(1, NOW)
            .expect("Failed to issue token");

        let result = authenticator.validate_token(&token, NOW + 3600);
        assert_eq!(result.unwrap_err(), TokenError::Expired);
    }
}
