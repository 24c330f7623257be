use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use tracing::error;

use super::dto::ErrorMessage;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Every handler failure, rendered as `{"error": "..."}` with its status code.
#[derive(Debug)]
pub struct Error {
    pub code: StatusCode,
    pub body: Json<ErrorMessage>,
}

impl Error {
    pub fn new(code: StatusCode, message: &str) -> Self {
        Self {
            code,
            body: Json(ErrorMessage::new(message)),
        }
    }

    pub fn invalid_input(message: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: &str) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: &str) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: &str) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn internal(message: &str) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn message(&self) -> &str {
        &self.body.error
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        if self.code.is_server_error() {
            error!(status = %self.code, error = %self.body.error, "request failed");
        }
        (self.code, self.body).into_response()
    }
}

impl From<(StatusCode, &str)> for Error {
    fn from((code, msg): (StatusCode, &str)) -> Self {
        Self::new(code, msg)
    }
}

/// Unique and foreign-key violations map to 409, so a registration that loses
/// the race on `users.email` still answers "conflict". Anything else is a 500.
impl From<sqlx::error::Error> for Error {
    fn from(error: sqlx::error::Error) -> Self {
        if let sqlx::Error::Database(db_error) = &error {
            match db_error.code().as_deref() {
                Some(UNIQUE_VIOLATION) => {
                    return Self::conflict(&format!("Duplicate record: {}", db_error.message()))
                }
                Some(FOREIGN_KEY_VIOLATION) => {
                    return Self::conflict(&format!(
                        "Record is still referenced: {}",
                        db_error.message()
                    ))
                }
                _ => {}
            }
        }
        Self::internal(&error.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for Error {
    fn from(error: jsonwebtoken::errors::Error) -> Self {
        Self::internal(&error.to_string())
    }
}

impl From<argon2::password_hash::errors::Error> for Error {
    fn from(error: argon2::password_hash::errors::Error) -> Self {
        Self::internal(&error.to_string())
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Self::invalid_input(&format!("Invalid request body: {}", rejection.body_text()))
    }
}
