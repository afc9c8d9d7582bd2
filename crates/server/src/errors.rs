use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use service::auth::errors::AuthError;
use service::errors::ServiceError;

/// HTTP-facing error. Handlers and middleware return this; the token and
/// service error types never cross the route boundary themselves.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("token expired")]
    TokenExpired,
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) | ApiError::TokenExpired => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code; clients branch on `token_expired` to
    /// trigger a refresh instead of a re-login.
    fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::TokenExpired => "token_expired",
            ApiError::Forbidden(_) => "forbidden",
            ApiError::NotFound(_) => "not_found",
            ApiError::Conflict(_) => "conflict",
            ApiError::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        let body = Json(serde_json::json!({ "error": self.to_string(), "code": self.code() }));
        (status, body).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(m) => ApiError::BadRequest(m),
            AuthError::Conflict => ApiError::Conflict("owner already exists".into()),
            AuthError::NotFound => ApiError::NotFound("owner not found".into()),
            AuthError::Unauthorized => ApiError::Unauthorized("invalid credentials".into()),
            AuthError::ExpiredToken => ApiError::TokenExpired,
            AuthError::InvalidToken | AuthError::MissingSubject | AuthError::Revoked => {
                ApiError::Unauthorized(err.to_string())
            }
            AuthError::Hash(m) | AuthError::Token(m) | AuthError::Repository(m) => ApiError::Internal(m),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(m) => ApiError::BadRequest(m),
            ServiceError::NotFound(m) => ApiError::NotFound(m),
            ServiceError::Forbidden(m) => ApiError::Forbidden(m),
            ServiceError::Db(m) => ApiError::Internal(m),
            ServiceError::Model(models::errors::ModelError::Validation(m)) => ApiError::BadRequest(m),
            ServiceError::Model(models::errors::ModelError::Db(m)) => ApiError::Internal(m),
        }
    }
}
