use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::account::errors::AccountError;
use crate::domain::mail::errors::MailError;

pub mod get_profile;
pub mod health;
pub mod login;
pub mod register;
pub mod send_email;

const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Validation(_) | AccountError::Format(_) => {
                ApiError::BadRequest(err.to_string())
            }
            AccountError::Conflict(_) => ApiError::Conflict(err.to_string()),
            // A valid token for a deleted account is an authentication failure
            AccountError::InvalidCredentials
            | AccountError::Unauthorized(_)
            | AccountError::NotFound(_) => ApiError::Unauthorized(err.to_string()),
            AccountError::DatabaseError(_) | AccountError::Unknown(_) => {
                tracing::error!(error = %err, "Account operation failed");
                ApiError::InternalServerError(INTERNAL_SERVER_ERROR_MESSAGE.to_string())
            }
        }
    }
}

impl From<MailError> for ApiError {
    fn from(err: MailError) -> Self {
        match err {
            MailError::Validation(_) => ApiError::BadRequest(err.to_string()),
            MailError::NotConfigured => ApiError::InternalServerError(err.to_string()),
            MailError::Delivery(_) => {
                ApiError::InternalServerError(INTERNAL_SERVER_ERROR_MESSAGE.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected request body");
        ApiError::BadRequest("Invalid JSON payload".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Response for unmatched routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_error_status_mapping() {
        assert_eq!(
            ApiError::from(AccountError::Validation("Invalid email address".to_string())),
            ApiError::BadRequest("Invalid email address".to_string())
        );
        assert_eq!(
            ApiError::from(AccountError::Conflict("alice@example.com".to_string())),
            ApiError::Conflict("Email already registered".to_string())
        );
        assert_eq!(
            ApiError::from(AccountError::InvalidCredentials),
            ApiError::Unauthorized("Invalid email or password".to_string())
        );
        assert_eq!(
            ApiError::from(AccountError::NotFound("7".to_string())),
            ApiError::Unauthorized("User not found".to_string())
        );
        assert_eq!(
            ApiError::from(AccountError::DatabaseError("disk I/O error".to_string())),
            ApiError::InternalServerError("Internal server error".to_string())
        );
    }

    #[test]
    fn test_mail_error_status_mapping() {
        assert_eq!(
            ApiError::from(MailError::Validation("Invalid email address".to_string())),
            ApiError::BadRequest("Invalid email address".to_string())
        );
        assert!(matches!(
            ApiError::from(MailError::NotConfigured),
            ApiError::InternalServerError(msg) if msg.starts_with("SMTP credentials are not configured")
        ));
    }

    #[test]
    fn test_error_response_status() {
        let response = ApiError::Unauthorized("Token expired".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
