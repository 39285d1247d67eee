use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::config::NOT_FOUND_BODY;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No route for {method} {path}")]
    NotFound { method: String, path: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::NotFound { method, path } => {
                tracing::debug!(%method, %path, "No matching route");
                (
                    StatusCode::NOT_FOUND,
                    [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                    NOT_FOUND_BODY,
                )
                    .into_response()
            }
        }
    }
}
