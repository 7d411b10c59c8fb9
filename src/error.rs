/// Error types for the task service
///
/// One taxonomy for the whole service; every variant maps to an HTTP status
/// and a JSON `{error, status}` body. Authorization failures carry the
/// `WWW-Authenticate` challenge the endpoint contract requires.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

/// Result type for task-service operations
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    /// Unknown user or wrong password. Uniform on purpose: login failures
    /// never reveal whether the username exists.
    #[error("Incorrect username or password")]
    InvalidCredentials,

    /// Login requested a scope the account was never granted.
    #[error("Unauthorized")]
    ScopeNotGranted,

    /// Missing, malformed, tampered, foreign-key or wrong-algorithm bearer
    /// token, or a subject with no live account behind it.
    #[error("Could not validate credentials")]
    InvalidToken { challenge: String },

    /// Token carried an `exp` claim that has passed.
    #[error("Token expired")]
    TokenExpired,

    /// Token is valid but does not grant every scope the endpoint requires.
    #[error("Not enough permissions")]
    InsufficientScope { challenge: String },

    /// Account exists and authenticated, but is flagged inactive.
    #[error("The user is disabled")]
    AccountDisabled,

    #[error("{0}")]
    NotFound(String),

    #[error("User already exists")]
    AlreadyExists,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn challenge(&self) -> Option<&str> {
        match self {
            AppError::InvalidToken { challenge } => Some(challenge.as_str()),
            AppError::InsufficientScope { challenge } => Some(challenge.as_str()),
            _ => None,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidCredentials => StatusCode::BAD_REQUEST,
            AppError::ScopeNotGranted => StatusCode::UNAUTHORIZED,
            AppError::InvalidToken { .. } => StatusCode::UNAUTHORIZED,
            AppError::TokenExpired => StatusCode::UNAUTHORIZED,
            AppError::InsufficientScope { .. } => StatusCode::UNAUTHORIZED,
            AppError::AccountDisabled => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AlreadyExists => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let mut builder = HttpResponse::build(status);
        if let Some(challenge) = self.challenge() {
            builder.insert_header(("WWW-Authenticate", challenge));
        }
        builder.json(serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(_err: jsonwebtoken::errors::Error) -> Self {
        AppError::InvalidToken {
            challenge: "Bearer".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_match_contract() {
        assert_eq!(
            AppError::InvalidCredentials.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::ScopeNotGranted.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::AccountDisabled.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::InsufficientScope {
                challenge: "Bearer".to_string()
            }
            .status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_challenge_header_present() {
        let err = AppError::InvalidToken {
            challenge: "Bearer scope='task:read'".to_string(),
        };
        let resp = err.error_response();
        let header = resp
            .headers()
            .get("WWW-Authenticate")
            .expect("challenge header");
        assert_eq!(header.to_str().unwrap(), "Bearer scope='task:read'");
    }

    #[test]
    fn test_no_challenge_on_plain_errors() {
        let resp = AppError::AccountDisabled.error_response();
        assert!(resp.headers().get("WWW-Authenticate").is_none());
    }
}
