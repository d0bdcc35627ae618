use crate::errors::{error::ErrorResponse, repository::RepositoryError, service::ServiceError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;

#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    ServiceUnavailable(String),
    Internal(String),
    /// A business-rule rejection that carries machine-readable context,
    /// e.g. remaining seats or a stock shortfall.
    Rejected {
        status: StatusCode,
        message: String,
        details: Value,
    },
}

impl From<RepositoryError> for HttpError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => HttpError::NotFound("Not found".into()),
            RepositoryError::Conflict(msg) => HttpError::Conflict(msg),
            RepositoryError::ForeignKey(msg) => {
                HttpError::BadRequest(format!("Foreign key violation: {msg}"))
            }
            RepositoryError::Sqlx(_) | RepositoryError::Custom(_) => {
                HttpError::Internal("Repository error".into())
            }
        }
    }
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Repo(repo_err) => HttpError::from(repo_err),
            ServiceError::NotFound(msg) => HttpError::NotFound(msg),
            ServiceError::Validation(errors) => {
                HttpError::BadRequest(format!("Validation failed: {}", errors.join("; ")))
            }
            ServiceError::Internal(msg) => HttpError::Internal(msg),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, msg, details) = match self {
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            HttpError::Conflict(msg) => (StatusCode::CONFLICT, msg, None),
            HttpError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg, None),
            HttpError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, None),
            HttpError::Rejected {
                status,
                message,
                details,
            } => (status, message, Some(details)),
        };

        let body = Json(ErrorResponse {
            status: "error".into(),
            message: msg,
            details,
        });

        (status, body).into_response()
    }
}
