//! Error handling for the inventory API.
//!
//! Every failure surfaces as an [`ApiError`], which maps to an HTTP status code
//! and a sanitized JSON body of the shape `{"success": false, "error": "..."}`
//! (validation failures additionally carry a `details` array). Internal causes
//! such as database errors are logged via `tracing` but never sent to clients.
//!
//! Status mapping:
//! - invalid input and constraint violations (duplicate VIN, dangling
//!   references) return 400
//! - unknown ids return 404
//! - a missing or wrong bearer token returns 401
//! - database connectivity problems return 503
//! - everything else returns 500

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use std::fmt;

/// API error type with automatic logging and sanitized responses.
#[derive(Debug)]
pub enum ApiError {
    /// 404 Not Found - resource doesn't exist
    NotFound {
        /// Resource type (e.g. "car", "part")
        resource: String,
        /// Optional id that wasn't found
        id: Option<String>,
    },

    /// 400 Bad Request - invalid input from the client
    BadRequest {
        /// User-facing error message
        message: String,
    },

    /// 401 Unauthorized - missing or invalid bearer token
    Unauthorized {
        /// User-facing error message
        message: String,
    },

    /// 400 Bad Request - one or more field validations failed
    ValidationFailed {
        /// User-facing validation errors, one per field problem
        errors: Vec<String>,
    },

    /// 503 Service Unavailable - the database cannot be reached
    Unavailable {
        /// User-facing generic message
        message: String,
        /// Internal error (logged, not sent to the client)
        internal: DbErr,
    },

    /// 500 Internal Server Error - database error (details logged, not exposed)
    Database {
        /// User-facing generic message
        message: String,
        /// Internal error (logged, not sent to the client)
        internal: DbErr,
    },

    /// 500 Internal Server Error - generic internal error
    Internal {
        /// User-facing generic message
        message: String,
        /// Internal error details (logged, not sent to the client)
        internal: Option<String>,
    },
}

impl ApiError {
    pub fn not_found(resource: impl Into<String>, id: Option<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn validation_failed(errors: Vec<String>) -> Self {
        Self::ValidationFailed { errors }
    }

    pub fn database(err: DbErr) -> Self {
        Self::Database {
            message: "a database error occurred".to_string(),
            internal: err,
        }
    }

    pub fn internal(message: impl Into<String>, internal: Option<String>) -> Self {
        Self::Internal {
            message: message.into(),
            internal,
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::BadRequest { .. } | Self::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database { .. } | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// User-facing error message (sanitized).
    fn user_message(&self) -> String {
        match self {
            Self::NotFound { resource, id } => {
                if let Some(id) = id {
                    format!("{resource} with id '{id}' not found")
                } else {
                    format!("{resource} not found")
                }
            }
            Self::BadRequest { message }
            | Self::Unauthorized { message }
            | Self::Unavailable { message, .. }
            | Self::Database { message, .. }
            | Self::Internal { message, .. } => message.clone(),
            Self::ValidationFailed { errors } => {
                if errors.len() == 1 {
                    errors[0].clone()
                } else {
                    format!("validation failed: {}", errors.join(", "))
                }
            }
        }
    }

    /// Log internal error details that are not part of the response body.
    fn log_internal(&self) {
        match self {
            Self::Unavailable { internal, .. } => {
                tracing::error!(error = ?internal, "database unavailable");
            }
            Self::Database { internal, .. } => {
                tracing::error!(error = ?internal, "database error occurred");
            }
            Self::Internal {
                internal: Some(details),
                ..
            } => {
                tracing::error!(details = %details, "internal error occurred");
            }
            _ => {
                tracing::debug!(
                    error = %self.user_message(),
                    status = %self.status_code(),
                    "api error"
                );
            }
        }
    }
}

/// Error body sent to clients (sanitized).
#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log_internal();

        let status = self.status_code();
        let body = match &self {
            Self::ValidationFailed { errors } => ErrorBody {
                success: false,
                error: self.user_message(),
                details: Some(errors.clone()),
            },
            _ => ErrorBody {
                success: false,
                error: self.user_message(),
                details: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for ApiError {}

/// Convert a `SeaORM` `DbErr` into an `ApiError`.
///
/// Conversion rules:
/// - unique constraint violations → 400 (a duplicate value was submitted)
/// - foreign key violations → 400 (the payload references a missing record,
///   or a record that is still referenced was deleted)
/// - `DbErr::RecordNotFound` → 404
/// - connection errors → 503
/// - everything else → 500, logged internally and sanitized for clients
impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        if let Some(sql_err) = err.sql_err() {
            return match sql_err {
                SqlErr::UniqueConstraintViolation(_) => Self::BadRequest {
                    message: "a record with the same unique value already exists".to_string(),
                },
                SqlErr::ForeignKeyConstraintViolation(_) => Self::BadRequest {
                    message: "the request references a record that does not exist or is still in use"
                        .to_string(),
                },
                _ => Self::database(err),
            };
        }

        match err {
            DbErr::RecordNotFound(msg) => {
                let resource = msg.split_whitespace().next().unwrap_or("resource");
                Self::NotFound {
                    resource: resource.to_string(),
                    id: None,
                }
            }
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => Self::Unavailable {
                message: "the database is currently unavailable".to_string(),
                internal: err,
            },
            _ => Self::database(err),
        }
    }
}
