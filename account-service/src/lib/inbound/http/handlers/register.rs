use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::AuthResult;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::UserView;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<ApiSuccess<AuthResponseData>, ApiError> {
    let Json(body) = payload?;

    state
        .account_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|result| ApiSuccess::new(StatusCode::OK, result.into()))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    display_name: Option<String>,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, ApiError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(ApiError::BadRequest(
                "Email and password are required".to_string(),
            ));
        }

        let email = EmailAddress::new(self.email)
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        Ok(RegisterCommand::new(email, self.password, self.display_name))
    }
}

/// Token and user returned by registration and login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthResponseData {
    pub token: String,
    pub user: UserView,
}

impl From<AuthResult> for AuthResponseData {
    fn from(result: AuthResult) -> Self {
        Self {
            token: result.token,
            user: result.user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            display_name: None,
        }
    }

    #[test]
    fn test_missing_fields() {
        for (email, password) in [("", "pw"), ("  ", "pw"), ("alice@example.com", "")] {
            assert_eq!(
                request(email, password).try_into_command().unwrap_err(),
                ApiError::BadRequest("Email and password are required".to_string())
            );
        }
    }

    #[test]
    fn test_invalid_email() {
        assert_eq!(
            request("invalid", "pw").try_into_command().unwrap_err(),
            ApiError::BadRequest("Invalid email address".to_string())
        );
    }

    #[test]
    fn test_email_is_normalized() {
        let command = request(" Alice@Example.com", "pw").try_into_command().unwrap();
        assert_eq!(command.email.as_str(), "alice@example.com");
    }
}
