use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

/// Failures that turn into HTTP error responses. Validation rejections never
/// land here; they travel back to the form page as flash banners.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("template error: {0}")]
    Render(#[from] tera::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // The cause goes to the log; the body stays generic so connection
        // strings and SQL never reach a browser.
        error!(error = %self, "request failed");

        let (status, message) = match self {
            AppError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "The order database is unavailable right now.",
            ),
            AppError::Render(_) | AppError::Csv(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong building the page.",
            ),
        };

        (status, message).into_response()
    }
}
