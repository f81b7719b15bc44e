// src/error.rs
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;

/// One entry of the `errors` array in a failed response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl FieldError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into(), path: None }
    }

    pub fn at(path: &str, msg: impl Into<String>) -> Self {
        Self { msg: msg.into(), path: Some(path.to_string()) }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    SqlxMigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Environment variable error: {0}")]
    EnvVarError(#[from] std::env::VarError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Password hashing failed")]
    PasswordHashingError,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    TokenError(#[from] jsonwebtoken::errors::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("QR code error: {0}")]
    QrCodeError(String),

    #[error("Template error: {0}")]
    TemplateError(#[from] askama::Error),

    #[error("Validation failed: {0:?}")]
    Validation(Vec<FieldError>),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Unexpected internal error")]
    InternalServerError,
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(vec![FieldError::new(rejection.body_text())])
    }
}

impl AppError {
    pub fn validation(path: &str, msg: impl Into<String>) -> Self {
        AppError::Validation(vec![FieldError::at(path, msg)])
    }

    /// True when the underlying database error is a UNIQUE constraint violation.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            AppError::SqlxError(sqlx::Error::Database(db_err)) => db_err.is_unique_violation(),
            _ => false,
        }
    }

    fn status_and_errors(&self) -> (StatusCode, Vec<FieldError>) {
        match self {
            AppError::Validation(errors) => (StatusCode::BAD_REQUEST, errors.clone()),
            AppError::Conflict(msg) | AppError::NotFound(msg) | AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, vec![FieldError::new(msg.clone())])
            }
            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, vec![FieldError::new(msg.clone())])
            }
            // Same message for unknown email and wrong password
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                vec![FieldError::new("Invalid credentials")],
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                vec![FieldError::new("Server error")],
            ),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    errors: Vec<FieldError>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, errors) = self.status_and_errors();

        if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self);
        } else {
            tracing::warn!("Request rejected ({}): {}", status.as_u16(), self);
        }

        (status, Json(ErrorBody { success: false, errors })).into_response()
    }
}

pub type AppResult<T = ()> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_keep_their_message() {
        let (status, errors) = AppError::Conflict("Student already exists".into()).status_and_errors();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(errors, vec![FieldError::new("Student already exists")]);
    }

    #[test]
    fn server_errors_hide_details() {
        let (status, errors) =
            AppError::QrCodeError("data too long".into()).status_and_errors();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(errors[0].msg, "Server error");
    }

    #[test]
    fn field_errors_serialize_without_empty_path() {
        let json = serde_json::to_value(FieldError::new("Invalid hostel")).unwrap();
        assert_eq!(json, serde_json::json!({ "msg": "Invalid hostel" }));

        let json = serde_json::to_value(FieldError::at("email", "Invalid email")).unwrap();
        assert_eq!(json["path"], "email");
    }
}
