use crate::db::errors::DbError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error as ThisError;
use utoipa::ToSchema;

/// Message returned for every 5xx response; internal detail is only logged
pub const SERVER_ERROR_MESSAGE: &str = "Server error. Please try again later.";

#[derive(ThisError, Debug)]
pub enum Error {
    /// Invalid request data: malformed JSON, missing or mistyped fields
    #[error("{message}")]
    BadRequest { message: String },

    /// Requested resource not found
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// Operation not allowed on this resource
    #[error("{message}")]
    Forbidden { message: String },

    /// Conflict with existing data, e.g. a duplicate natural key
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Generic internal service error
    #[error("Failed to {operation}")]
    Internal { operation: String },

    /// Store operation error
    #[error(transparent)]
    Database(#[from] DbError),

    /// Unexpected error with full context chain
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// JSON body of every error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

impl Error {
    pub fn not_found(resource: impl Into<String>) -> Self {
        Error::NotFound { resource: resource.into() }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Forbidden { .. } => StatusCode::FORBIDDEN,
            Error::Conflict { .. } => StatusCode::CONFLICT,
            Error::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Database(db_err) => match db_err {
                DbError::NotFound => StatusCode::NOT_FOUND,
                DbError::UniqueViolation { .. } => StatusCode::CONFLICT,
                DbError::Validation { .. } => StatusCode::BAD_REQUEST,
                DbError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a user-safe error message, without leaking internal implementation details
    pub fn user_message(&self) -> String {
        match self {
            Error::BadRequest { message } | Error::Forbidden { message } | Error::Conflict { message } => message.clone(),
            Error::NotFound { resource } => format!("{resource} not found"),
            Error::Database(db_err) => match db_err {
                DbError::NotFound => "Resource not found".to_string(),
                DbError::UniqueViolation { constraint, .. } => match constraint.as_deref() {
                    Some("businesses_name_address_unique") => "Business already exists with this name and address".to_string(),
                    Some("reviews_userid_businessid_unique") => "Review already posted by this user for this business".to_string(),
                    _ => "Resource already exists".to_string(),
                },
                DbError::Validation { .. } => "Invalid data provided".to_string(),
                DbError::Other(_) => SERVER_ERROR_MESSAGE.to_string(),
            },
            Error::Internal { .. } | Error::Other(_) => SERVER_ERROR_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Log full error details for debugging - different log levels based on severity
        match &self {
            Error::Database(DbError::Other(_)) | Error::Internal { .. } | Error::Other(_) => {
                tracing::error!("Internal service error: {:#}", self);
            }
            Error::Database(_) => {
                tracing::warn!("Store constraint error: {}", self);
            }
            Error::Conflict { .. } | Error::Forbidden { .. } => {
                tracing::warn!("Rejected write: {}", self);
            }
            Error::BadRequest { .. } | Error::NotFound { .. } => {
                tracing::debug!("Client error: {}", self);
            }
        }

        let body = ErrorBody { error: self.user_message() };
        (self.status_code(), Json(body)).into_response()
    }
}

/// Type alias for service operation results
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::not_found("Business").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            Error::Forbidden { message: "no".to_string() }.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            Error::Database(DbError::unique_violation("reviews", "reviews_id_unique")).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            Error::Database(DbError::Validation { message: "bad".to_string() }).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_internal_details_are_not_exposed() {
        let err = Error::Other(anyhow::anyhow!("connection refused to 10.0.0.3"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.user_message(), SERVER_ERROR_MESSAGE);

        let err = Error::Database(DbError::Other(anyhow::anyhow!("pool timed out")));
        assert_eq!(err.user_message(), SERVER_ERROR_MESSAGE);
    }

    #[test]
    fn test_unique_violation_messages() {
        let err = Error::Database(DbError::unique_violation("reviews", "reviews_userid_businessid_unique"));
        assert_eq!(err.user_message(), "Review already posted by this user for this business");

        let err = Error::Database(DbError::unique_violation("photos", "photos_id_unique"));
        assert_eq!(err.user_message(), "Resource already exists");
    }
}
