use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::views;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("User already exists")]
    UserAlreadyExists,
}

/// Infrastructure failures are logged and answered with a generic page;
/// nothing about the cause reaches the browser.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::PasswordHash(ref e) => {
                tracing::error!("Password hashing error: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::TaskJoin(ref e) => {
                tracing::error!("Task join error: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Session(ref e) => {
                tracing::error!("Session error: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::UserAlreadyExists => StatusCode::CONFLICT,
        };

        (status, views::error_page(status)).into_response()
    }
}

/// Result type alias for application results
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_database_error_is_generic_500() {
        let response = AppError::from(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(body.contains("Something went wrong"));
        assert!(!body.contains("pool"));
    }
}
