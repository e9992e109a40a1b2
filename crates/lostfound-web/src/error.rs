use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("malformed form submission: {0}")]
    Multipart(#[from] MultipartError),

    #[error("spawn_blocking join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Multipart(e) => {
                warn!("Rejected submission: {}", e);
                (e.status(), e.body_text()).into_response()
            }
            other => {
                error!("{}", other);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
