use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use accounts_domain::user::UsernameError;

/// Accounts service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum AccountsServiceError {
    #[error("user not found")]
    UserNotFound,
    #[error("example not found")]
    ExampleNotFound,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("example already exists")]
    ExampleAlreadyExists,
    #[error("username already taken")]
    UsernameTaken,
    #[error("invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),
    #[error("invalid email")]
    InvalidEmail,
    #[error("password too weak")]
    WeakPassword,
    #[error("invalid credential")]
    InvalidCredential,
    #[error("invalid token")]
    InvalidToken,
    #[error("invalid refresh token")]
    InvalidRefreshToken,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl AccountsServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::ExampleNotFound => "EXAMPLE_NOT_FOUND",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::ExampleAlreadyExists => "EXAMPLE_ALREADY_EXISTS",
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::InvalidUsername(_) => "INVALID_USERNAME",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::WeakPassword => "WEAK_PASSWORD",
            Self::InvalidCredential => "INVALID_CREDENTIAL",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::InvalidRefreshToken => "INVALID_REFRESH_TOKEN",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for AccountsServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UserNotFound | Self::ExampleNotFound => StatusCode::NOT_FOUND,
            Self::UserAlreadyExists | Self::ExampleAlreadyExists | Self::UsernameTaken => {
                StatusCode::CONFLICT
            }
            Self::InvalidUsername(_) | Self::InvalidEmail | Self::WeakPassword => {
                StatusCode::BAD_REQUEST
            }
            Self::InvalidCredential | Self::InvalidToken | Self::InvalidRefreshToken => {
                StatusCode::UNAUTHORIZED
            }
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // TraceLayer already records status for every request; only the 500
        // path needs the anyhow chain.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
