//! HTTP API
//!
//! This module organizes the routes into submodules:
//! - `media`: upload, download, metadata and delete endpoints

pub mod media;

use crate::app::AppState;
use crate::config::{INTERNAL_ERROR_DETAIL, MEDIA_NOT_FOUND_DETAIL};
use crate::error::{AppError, Result};
use crate::models::ErrorResponse;
use axum::extract::multipart::MultipartError;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::future::Future;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Failed request, rendered as `{"detail": ...}`
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn new<S: Into<String>>(status: StatusCode, detail: S) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::MediaNotFound(_) => Self::new(StatusCode::NOT_FOUND, MEDIA_NOT_FOUND_DETAIL),
            AppError::InvalidUpload(msg) => Self::new(StatusCode::BAD_REQUEST, msg),
            other => {
                tracing::error!("Request failed: {:?}", other);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_DETAIL)
            }
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::new(err.status(), err.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let payload = Json(ErrorResponse {
            detail: self.detail,
        });
        (self.status, payload).into_response()
    }
}

/// Build the API router over the given state
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/upload", post(media::upload_media))
        .route(
            "/media/:media_id",
            get(media::get_media).delete(media::delete_media),
        )
        .route("/media/:media_id/info", get(media::get_media_info))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the API on `listener` until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    tracing::info!("Media API listening on {}", listener.local_addr()?);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let err = ApiError::from(AppError::MediaNotFound("abc".to_string()));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.detail, "Media not found");
    }

    #[test]
    fn test_invalid_upload_maps_to_400() {
        let err = ApiError::from(AppError::InvalidUpload("no file".to_string()));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_io_maps_to_500() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = ApiError::from(AppError::Io(io));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.detail, "Internal server error");
    }

    #[test]
    fn test_missing_blob_detail_hides_internals() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "/srv/media/x.png gone");
        let err = ApiError::from(AppError::BlobMissing {
            id: "x.png".to_string(),
            source,
        });
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.detail.contains("/srv/media"));
    }
}
