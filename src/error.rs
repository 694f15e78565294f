use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("invalid form: {0}")]
    InvalidForm(&'static str),

    /// A file arrived under a field other than the image field, or more than once
    #[error("unexpected file in field {0:?}")]
    UnexpectedFile(String),

    #[error(transparent)]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Template(#[from] askama::Error),

    #[error("password hashing failed: {0}")]
    Password(#[from] argon2::password_hash::Error),

    #[error(transparent)]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidForm(_) | AppError::UnexpectedFile(_) => StatusCode::BAD_REQUEST,
            AppError::Multipart(err) => err.status(),
            AppError::Io(_)
            | AppError::Json(_)
            | AppError::Template(_)
            | AppError::Password(_)
            | AppError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, %status, "request rejected");
        }

        (status, status.canonical_reason().unwrap_or_default()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_bad_request() {
        assert_eq!(
            AppError::InvalidForm("title").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::UnexpectedFile("avatar".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn io_errors_are_server_errors() {
        // a missing uploads directory surfaces as NotFound from the OS
        let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");

        assert_eq!(
            AppError::from(missing).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
