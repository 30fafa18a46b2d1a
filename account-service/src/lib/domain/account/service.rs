use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::AuthResult;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::NewUser;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::User;
use crate::domain::account::models::UserId;
use crate::domain::account::models::UserView;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::account::ports::UserRepository;

const BEARER_PREFIX: &str = "Bearer ";

/// Well-formed credential no password derives to. Verified against when the
/// email is unknown so both login failures cost one key derivation.
const UNKNOWN_ACCOUNT_CREDENTIAL: &str =
    "AAAAAAAAAAAAAAAAAAAAAA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Domain service implementation for account operations.
///
/// Combines the password hasher and token engine from the `auth` crate with
/// an injected user store.
pub struct AccountService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AccountService<UR>
where
    UR: UserRepository,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token signing, bound to the configured secret
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    fn auth_result(&self, user: &User, now: i64) -> Result<AuthResult, AccountError> {
        let token = self
            .authenticator
            .issue_token(user.id.0, now)
            .map_err(|e| AccountError::Unknown(format!("Token generation failed: {}", e)))?;

        Ok(AuthResult {
            token,
            user: user.into(),
        })
    }
}

#[async_trait]
impl<UR> AccountServicePort for AccountService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<AuthResult, AccountError> {
        if command.password.is_empty() {
            return Err(AccountError::Validation(
                "Email and password are required".to_string(),
            ));
        }

        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(AccountError::Conflict(command.email.to_string()));
        }

        let password_hash = self
            .authenticator
            .hash_password(&command.password)
            .map_err(|e| AccountError::Unknown(format!("Password hashing failed: {}", e)))?;

        // A racing registration that slipped past the check above is rejected
        // here by the store's unique constraint as `Conflict`.
        let user_id = self
            .repository
            .create(NewUser {
                email: command.email,
                password_hash,
                display_name: command.display_name,
            })
            .await?;

        let user = self
            .repository
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| {
                AccountError::Unknown(format!("User {} missing after creation", user_id))
            })?;

        tracing::info!(user_id = %user.id, "Account registered");

        self.auth_result(&user, Utc::now().timestamp())
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthResult, AccountError> {
        let now = Utc::now().timestamp();

        let Some(user) = self.repository.find_by_email(&command.email).await? else {
            self.authenticator
                .verify_password(&command.password, UNKNOWN_ACCOUNT_CREDENTIAL);
            tracing::info!("Login rejected");
            return Err(AccountError::InvalidCredentials);
        };

        match self
            .authenticator
            .authenticate(&command.password, &user.password_hash, user.id.0, now)
        {
            Ok(result) => Ok(AuthResult {
                token: result.access_token,
                user: UserView::from(&user),
            }),
            Err(AuthenticationError::InvalidCredentials) => {
                tracing::info!("Login rejected");
                Err(AccountError::InvalidCredentials)
            }
            Err(AuthenticationError::Token(e)) => Err(AccountError::Unknown(format!(
                "Token generation failed: {}",
                e
            ))),
        }
    }

    async fn authorize(&self, authorization: &str, now: i64) -> Result<User, AccountError> {
        let token = authorization
            .strip_prefix(BEARER_PREFIX)
            .ok_or_else(|| AccountError::Unauthorized("Missing Authorization header".to_string()))?;

        let claims = self
            .authenticator
            .validate_token(token, now)
            .map_err(|e| {
                tracing::warn!(error = %e, "Token validation failed");
                AccountError::Unauthorized(e.to_string())
            })?;

        let user_id = claims
            .sub
            .map(UserId)
            .ok_or_else(|| AccountError::Unauthorized("Token missing subject".to_string()))?;

        self.repository
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| AccountError::NotFound(user_id.to_string()))
    }
}
