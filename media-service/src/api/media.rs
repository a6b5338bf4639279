//! Media endpoints
//!
//! Upload, download, metadata lookup and deletion of stored media.

use super::ApiError;
use crate::app::AppState;
use crate::config::{
    DEFAULT_CONTENT_TYPE, DEFAULT_UPLOAD_FILENAME, MEDIA_DELETED_MESSAGE, UPLOAD_FIELD_NAME,
};
use crate::error::AppError;
use crate::models::{MediaRecord, MessageResponse, UploadResponse};
use axum::extract::{Multipart, Path as AxumPath, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

/// POST /upload - Store the multipart `file` field
pub async fn upload_media(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD_NAME) {
            continue;
        }

        let original_name = field
            .file_name()
            .unwrap_or(DEFAULT_UPLOAD_FILENAME)
            .to_string();
        let content_type = field
            .content_type()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let data = field.bytes().await?;

        let (media_id, metadata) = state
            .media_service
            .save_media(&original_name, &content_type, &data)
            .await?;

        return Ok(Json(UploadResponse { media_id, metadata }));
    }

    Err(AppError::InvalidUpload(format!("missing multipart field '{}'", UPLOAD_FIELD_NAME)).into())
}

/// GET /media/:media_id - Stream back the stored bytes
pub async fn get_media(
    State(state): State<AppState>,
    AxumPath(media_id): AxumPath<String>,
) -> Result<Response, ApiError> {
    let (record, data) = state.media_service.get_media(&media_id, None).await?;

    let content_type = HeaderValue::from_str(&record.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_CONTENT_TYPE));
    let disposition = HeaderValue::from_str(&content_disposition(&record.original_name))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        data,
    )
        .into_response())
}

/// GET /media/:media_id/info - Return the stored record
pub async fn get_media_info(
    State(state): State<AppState>,
    AxumPath(media_id): AxumPath<String>,
) -> Result<Json<MediaRecord>, ApiError> {
    state
        .media_service
        .get_media_info(&media_id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::MediaNotFound(media_id).into())
}

/// DELETE /media/:media_id - Remove the blob and its record
pub async fn delete_media(
    State(state): State<AppState>,
    AxumPath(media_id): AxumPath<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.media_service.delete_media(&media_id).await?;

    Ok(Json(MessageResponse {
        message: MEDIA_DELETED_MESSAGE.to_string(),
    }))
}

/// Build an `attachment` disposition naming the original file.
///
/// Names that do not survive quoting as-is also get an RFC 5987
/// `filename*` parameter carrying the exact UTF-8 name.
fn content_disposition(original_name: &str) -> String {
    let fallback = header_safe_filename(original_name);

    if fallback == original_name {
        format!("attachment; filename=\"{}\"", fallback)
    } else {
        format!(
            "attachment; filename=\"{}\"; filename*=UTF-8''{}",
            fallback,
            urlencoding::encode(original_name)
        )
    }
}

/// Strip characters that cannot appear inside a quoted header filename
fn header_safe_filename(filename: &str) -> String {
    filename
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | '"' | '\0'))
        .map(|c| if c.is_ascii_graphic() || c == ' ' { c } else { '_' })
        .take(255)
        .collect()
}
