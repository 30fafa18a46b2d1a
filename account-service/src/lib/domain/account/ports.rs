use async_trait::async_trait;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::AuthResult;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::NewUser;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::User;
use crate::domain::account::models::UserId;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account and issue a token for it.
    ///
    /// # Arguments
    /// * `command` - Validated email, plaintext password, optional display name
    ///
    /// # Returns
    /// Token and user view of the created account
    ///
    /// # Errors
    /// * `Validation` - Password is empty
    /// * `Conflict` - Email is already registered
    /// * `DatabaseError` - Store operation failed
    async fn register(&self, command: RegisterCommand) -> Result<AuthResult, AccountError>;

    /// Verify credentials and issue a token.
    ///
    /// # Arguments
    /// * `command` - Normalized email and plaintext password
    ///
    /// # Returns
    /// Token and user view
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `DatabaseError` - Store operation failed
    async fn login(&self, command: LoginCommand) -> Result<AuthResult, AccountError>;

    /// Resolve an `Authorization` header value to the account it names.
    ///
    /// # Arguments
    /// * `authorization` - Raw header value, expected as `Bearer <token>`
    /// * `now` - Current Unix timestamp used for expiry checks
    ///
    /// # Returns
    /// The authenticated user
    ///
    /// # Errors
    /// * `Unauthorized` - Missing/invalid header, or malformed, forged, expired token
    /// * `NotFound` - Token is valid but the account no longer exists
    /// * `DatabaseError` - Store operation failed
    async fn authorize(&self, authorization: &str, now: i64) -> Result<User, AccountError>;
}

/// Persistence operations for user accounts.
///
/// Keys are passed already normalized; implementations must not rewrite them.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Arguments
    /// * `user` - Email, credential and display name of the new account
    ///
    /// # Returns
    /// Identifier assigned by the store
    ///
    /// # Errors
    /// * `Conflict` - Email violates the store's uniqueness constraint
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<UserId, AccountError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AccountError>;

    /// Retrieve user by normalized email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountError>;
}
