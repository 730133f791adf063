use axum::{
    body::Bytes,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, Path, Query, State,
    },
    http::{header::ACCEPT, Method, StatusCode},
    response::{IntoResponse, Response},
};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use super::{course_id, json_body, video_id, video_path, videos_path};
use crate::{ApiError, AppState};

const LIST_FAILED: &str = "Erro ao buscar vídeos do curso";
const UPLOAD_FAILED: &str = "Erro ao enviar o vídeo";
const UPLOAD_INCOMPLETE: &str = "Título e vídeo são obrigatórios";
const DETAIL_REJECTED: &str = "Failed to fetch video details";
const DETAIL_FAILED: &str = "Error fetching video details";
const UPDATE_FAILED: &str = "Error updating video";
const DELETE_FAILED: &str = "Error deleting video";

#[derive(Debug, Default, Deserialize)]
pub struct VideoListQuery {
    pub page: Option<String>,
    pub per_page: Option<String>,
}

/// One part of an inbound multipart body, buffered.
#[derive(Debug)]
pub(crate) struct FormField {
    name: String,
    file_name: Option<String>,
    content_type: Option<String>,
    data: Bytes,
}

impl FormField {
    fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.data).ok()
    }

    /// Outbound copy of this part. An unparseable content type is dropped.
    fn to_part(&self) -> Part {
        match self.content_type.as_deref() {
            Some(ct) => self.bare_part().mime_str(ct).unwrap_or_else(|_| self.bare_part()),
            None => self.bare_part(),
        }
    }

    fn bare_part(&self) -> Part {
        let len = self.data.len() as u64;
        let part = Part::stream_with_length(reqwest::Body::from(self.data.clone()), len);
        match &self.file_name {
            Some(file_name) => part.file_name(file_name.clone()),
            None => part,
        }
    }
}

async fn read_fields(mut multipart: Multipart) -> Result<Vec<FormField>, MultipartError> {
    let mut fields = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await?;
        fields.push(FormField {
            name,
            file_name,
            content_type,
            data,
        });
    }
    Ok(fields)
}

pub async fn list_videos(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<VideoListQuery>,
) -> Result<Response, ApiError> {
    let id = course_id(&id)?;
    let page = query
        .page
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| "1".to_string());
    let per_page = query
        .per_page
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| "10".to_string());
    let params = [("page", page), ("per_page", per_page)];

    let res = state
        .upstream
        .get(&videos_path(id), &params)
        .await
        .map_err(ApiError::upstream(LIST_FAILED))?;
    json_body(res, StatusCode::OK)
        .await
        .map_err(ApiError::upstream(LIST_FAILED))
}

pub async fn upload_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let id = course_id(&id)?;
    let multipart = multipart.map_err(ApiError::unreadable(UPLOAD_FAILED))?;
    let fields = read_fields(multipart)
        .await
        .map_err(ApiError::unreadable(UPLOAD_FAILED))?;

    let mut title = None;
    let mut video = None;
    for field in fields {
        let name = field.name.clone();
        match name.as_str() {
            "title" => title = field.text().map(str::to_string),
            "video" if !field.data.is_empty() => video = Some(field),
            _ => {}
        }
    }
    // Blank titles are rejected, but the title is forwarded as typed.
    let (title, video) = match (title.filter(|t| !t.trim().is_empty()), video) {
        (Some(title), Some(video)) => (title, video),
        _ => return Err(ApiError::BadRequest(UPLOAD_INCOMPLETE)),
    };

    tracing::info!(course_id = %id, title = %title, bytes = video.data.len(), "uploading video");
    let form = Form::new()
        .part("file", video.to_part())
        .text("title", title);
    let res = state
        .upstream
        .send_multipart(Method::POST, &videos_path(id), form)
        .await
        .map_err(ApiError::upstream(UPLOAD_FAILED))?;
    json_body(res, StatusCode::CREATED)
        .await
        .map_err(ApiError::upstream(UPLOAD_FAILED))
}

pub async fn get_video(
    State(state): State<AppState>,
    Path((id, video)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let id = course_id(&id)?;
    let video = video_id(&video)?;
    let req = state
        .upstream
        .request(Method::GET, &video_path(id, video))
        .header(ACCEPT, "application/json");
    let res = state
        .upstream
        .send(req)
        .await
        .map_err(ApiError::passthrough(DETAIL_REJECTED, DETAIL_FAILED))?;
    json_body(res, StatusCode::OK)
        .await
        .map_err(ApiError::passthrough(DETAIL_REJECTED, DETAIL_FAILED))
}

pub async fn update_video(
    State(state): State<AppState>,
    Path((id, video)): Path<(String, String)>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let id = course_id(&id)?;
    let video = video_id(&video)?;
    let unreadable = |e: String| {
        tracing::warn!("unreadable video update: {}", e);
        ApiError::Text {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: UPDATE_FAILED,
        }
    };
    let multipart = multipart.map_err(|e| unreadable(e.to_string()))?;
    let fields = read_fields(multipart)
        .await
        .map_err(|e| unreadable(e.to_string()))?;

    // Forwarded as received: title plus an optional replacement file.
    let form = fields
        .iter()
        .fold(Form::new(), |form, field| form.part(field.name.clone(), field.to_part()));
    let res = state
        .upstream
        .send_multipart(Method::PUT, &video_path(id, video), form)
        .await
        .map_err(ApiError::text(UPDATE_FAILED))?;
    json_body(res, StatusCode::OK)
        .await
        .map_err(ApiError::text(UPDATE_FAILED))
}

pub async fn delete_video(
    State(state): State<AppState>,
    Path((id, video)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let id = course_id(&id)?;
    let video = video_id(&video)?;
    state
        .upstream
        .delete(&video_path(id, video))
        .await
        .map_err(ApiError::text(DELETE_FAILED))?;
    tracing::info!(course_id = %id, video_id = %video, "video deleted");
    Ok(StatusCode::NO_CONTENT.into_response())
}
