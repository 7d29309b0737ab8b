use crate::db::errors::DbError;
use crate::validation::FieldErrors;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
    /// Authentication required but not provided, or the presented token is unknown
    #[error("Not authenticated")]
    Unauthenticated { message: Option<String> },

    /// Login with an unknown email, a user without a password, or a wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Password change where the current password did not verify
    #[error("Old password is incorrect")]
    IncorrectPassword,

    /// Authenticated actor is not allowed to perform the operation
    #[error("Permission denied")]
    Forbidden,

    /// Field-level validation failures
    #[error("Validation failed: {errors}")]
    Validation { errors: FieldErrors },

    /// Invalid request data that is not tied to a single field
    #[error("{message}")]
    BadRequest { message: String },

    /// Logout requested but the actor holds no token
    #[error("No token to revoke")]
    LogoutFailed,

    /// Generic internal service error
    #[error("Failed to {operation}")]
    Internal { operation: String },

    /// Database operation error
    #[error(transparent)]
    Database(#[from] DbError),

    /// Unexpected error with full context chain
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Unauthenticated { .. } | Error::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Error::IncorrectPassword | Error::Validation { .. } | Error::BadRequest { .. } | Error::LogoutFailed => {
                StatusCode::BAD_REQUEST
            }
            Error::Forbidden => StatusCode::FORBIDDEN,
            Error::Internal { .. } | Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Database(db_err) => match db_err {
                DbError::NotFound => StatusCode::NOT_FOUND,
                DbError::UniqueViolation { .. } | DbError::ForeignKeyViolation { .. } | DbError::CheckViolation { .. } => {
                    StatusCode::BAD_REQUEST
                }
                DbError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Returns a user-safe error message, without leaking internal implementation details
    pub fn user_message(&self) -> String {
        match self {
            Error::Unauthenticated { message } => message
                .clone()
                .unwrap_or_else(|| "Authentication credentials were not provided.".to_string()),
            Error::InvalidCredentials => "Invalid credentials".to_string(),
            Error::IncorrectPassword => "Old password is incorrect".to_string(),
            Error::Forbidden => "You do not have permission to perform this action.".to_string(),
            Error::Validation { errors } => errors.to_string(),
            Error::BadRequest { message } => message.clone(),
            Error::LogoutFailed => "Error logging out".to_string(),
            Error::Internal { .. } | Error::Other(_) => "Internal server error".to_string(),
            Error::Database(db_err) => match db_err {
                DbError::NotFound => "Resource not found".to_string(),
                DbError::UniqueViolation { .. } => "Resource already exists".to_string(),
                DbError::ForeignKeyViolation { .. } => "Invalid reference to related resource".to_string(),
                DbError::CheckViolation { .. } => "Invalid data provided".to_string(),
                DbError::Other(_) => "Internal server error".to_string(),
            },
        }
    }

    /// Field errors for this error, if it is reported per field.
    ///
    /// A unique violation on a user column is reported against that column, the same way a
    /// failed pre-condition check would be.
    pub fn field_errors(&self) -> Option<FieldErrors> {
        match self {
            Error::Validation { errors } => Some(errors.clone()),
            Error::Database(db_err) => db_err
                .conflicting_user_field()
                .map(|field| FieldErrors::single(field, format!("A user with that {field} already exists."))),
            _ => None,
        }
    }
}

impl From<FieldErrors> for Error {
    fn from(errors: FieldErrors) -> Self {
        Error::Validation { errors }
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
                tracing::warn!("Database constraint error: {}", self);
            }
            Error::Unauthenticated { .. } | Error::InvalidCredentials | Error::IncorrectPassword | Error::Forbidden => {
                tracing::info!("Authorization error: {}", self);
            }
            Error::Validation { .. } | Error::BadRequest { .. } | Error::LogoutFailed => {
                tracing::debug!("Client error: {}", self);
            }
        }

        let status = self.status_code();
        let body = match self.field_errors() {
            Some(errors) => json!(errors),
            None => json!({ "error": self.user_message() }),
        };
        (status, Json(body)).into_response()
    }
}

/// Convert from String errors (e.g., from external functions)
impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Internal { operation: msg }
    }
}

/// Type alias for service operation results
pub type Result<T> = std::result::Result<T, Error>;
