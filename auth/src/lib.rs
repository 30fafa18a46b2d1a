//! Authentication core
//!
//! Synchronous, side-effect free building blocks for account authentication:
//! - URL-safe base64 codec
//! - Password hashing (PBKDF2-HMAC-SHA256, salted)
//! - Signed token issuance and validation (HMAC-SHA256, JWT layout)
//! - Authentication coordination
//!
//! Nothing here touches storage or the clock: the caller supplies the user
//! record, the signing secret and the current time.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::with_iterations(1_000);
//! let credential = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &credential));
//! assert!(!hasher.verify("other_password", &credential));
//! ```
//!
//! ## Tokens
//! ```
//! let secret = b"secret_key";
//! let token = auth::token::issue(42, 1_700_000_000, 3600, secret).unwrap();
//! let claims = auth::token::decode(&token, 1_700_000_100, secret).unwrap();
//! assert_eq!(claims.sub, Some(42));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, PasswordHasher};
//!
//! let auth = Authenticator::new(b"secret_key", 3600)
//!     .with_password_hasher(PasswordHasher::with_iterations(1_000));
//!
//! // Register: hash password
//! let credential = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let now = 1_700_000_000;
//! let result = auth.authenticate("password123", &credential, 7, now).unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&result.access_token, now + 60).unwrap();
//! assert_eq!(claims.sub, Some(7));
//! ```

pub mod authenticator;
pub mod codec;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use codec::CodecError;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::TokenError;
