use crate::db::models::api::ApiResponse;
use axum::{Json, http::StatusCode, response::IntoResponse};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Authentication required")]
    Unauthenticated,

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Invalid state: {message}")]
    InvalidState { message: String },

    #[error("Invitation has expired")]
    Expired,

    #[error("A pending invitation already exists for this email")]
    DuplicateInvite,

    #[error("User is already a member of this workspace")]
    AlreadyMember,

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status and stable error code reported in the response envelope.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Unauthenticated | AppError::Jwt(_) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED")
            }
            AppError::Forbidden { .. } => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            AppError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::InvalidState { .. } => (StatusCode::CONFLICT, "INVALID_STATE"),
            AppError::Expired => (StatusCode::GONE, "INVITATION_EXPIRED"),
            AppError::DuplicateInvite => (StatusCode::CONFLICT, "DUPLICATE_INVITE"),
            AppError::AlreadyMember => (StatusCode::CONFLICT, "ALREADY_MEMBER"),
            AppError::Validation { .. } => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            AppError::Database(_)
            | AppError::Pool(_)
            | AppError::Config(_)
            | AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, code) = self.status_and_code();

        let message = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                "Database error".to_string()
            }
            AppError::Pool(ref e) => {
                tracing::error!("Connection pool error: {}", e);
                "Connection error".to_string()
            }
            AppError::Config(ref e) => {
                tracing::error!("Configuration error: {}", e);
                "Configuration error".to_string()
            }
            AppError::Internal(ref message) => {
                tracing::error!("Internal error: {}", message);
                "Internal server error".to_string()
            }
            AppError::Jwt(ref e) => {
                tracing::debug!("Rejected bearer token: {}", e);
                "Invalid token".to_string()
            }
            AppError::NotFound { ref resource } => format!("{} not found", resource),
            AppError::Forbidden { ref message }
            | AppError::InvalidState { ref message }
            | AppError::Validation { ref message } => message.clone(),
            ref other => other.to_string(),
        };

        let response = ApiResponse::<()>::error(status.as_u16(), code, &message);
        (status, Json(response)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_errors_map_to_distinct_statuses() {
        assert_eq!(
            AppError::Unauthenticated.status_and_code(),
            (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED")
        );
        assert_eq!(
            AppError::forbidden("nope").status_and_code().0,
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::Expired.status_and_code(),
            (StatusCode::GONE, "INVITATION_EXPIRED")
        );
        assert_eq!(
            AppError::DuplicateInvite.status_and_code().1,
            "DUPLICATE_INVITE"
        );
        assert_eq!(AppError::AlreadyMember.status_and_code().1, "ALREADY_MEMBER");
        assert_eq!(
            AppError::invalid_state("accepted").status_and_code(),
            (StatusCode::CONFLICT, "INVALID_STATE")
        );
    }

    #[test]
    fn internal_errors_render_as_500() {
        let response = AppError::internal("boom").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = AppError::not_found("invitation").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
