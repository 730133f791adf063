pub mod courses;
pub mod stream;
pub mod videos;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
};
use shared::UpstreamError;

use crate::{ApiError, AppState};

pub async fn health() -> &'static str {
    "ok"
}

pub async fn ready(State(state): State<AppState>) -> Result<&'static str, StatusCode> {
    state.upstream.probe().await.map_err(|e| {
        tracing::warn!("upstream not reachable: {}", e);
        StatusCode::SERVICE_UNAVAILABLE
    })?;
    Ok("ok")
}

/// `/api/courses/` with the id left out.
pub async fn missing_course_id() -> ApiError {
    ApiError::MissingCourseId
}

/// `/api/courses/{id}/videos/` with the video id left out.
pub async fn missing_video_id(Path(id): Path<String>) -> ApiError {
    match course_id(&id) {
        Ok(_) => ApiError::MissingVideoId,
        Err(e) => e,
    }
}

pub(crate) fn course_id(raw: &str) -> Result<&str, ApiError> {
    let id = raw.trim();
    if id.is_empty() {
        return Err(ApiError::MissingCourseId);
    }
    Ok(id)
}

pub(crate) fn video_id(raw: &str) -> Result<&str, ApiError> {
    let id = raw.trim();
    if id.is_empty() {
        return Err(ApiError::MissingVideoId);
    }
    Ok(id)
}

pub(crate) fn course_path(id: &str) -> String {
    format!("/courses/{}", urlencoding::encode(id))
}

pub(crate) fn videos_path(id: &str) -> String {
    format!("{}/videos", course_path(id))
}

pub(crate) fn video_path(id: &str, video_id: &str) -> String {
    format!("{}/{}", videos_path(id), urlencoding::encode(video_id))
}

/// Relays an upstream JSON body as-is. An empty body becomes `null`.
pub(crate) async fn json_body(
    res: reqwest::Response,
    status: StatusCode,
) -> Result<Response, UpstreamError> {
    let mut body = res.bytes().await?;
    if body.is_empty() {
        body = Bytes::from_static(b"null");
    }
    Ok((status, [(CONTENT_TYPE, "application/json")], body).into_response())
}
