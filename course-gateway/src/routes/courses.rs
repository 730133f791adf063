use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{Method, StatusCode},
    response::Response,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{course_id, course_path, json_body};
use crate::{ApiError, AppState};

const LIST_FAILED: &str = "Erro ao buscar os cursos";
const CREATE_FAILED: &str = "Erro ao criar o curso";
const GET_FAILED: &str = "Erro ao buscar o curso";
const UPDATE_FAILED: &str = "Erro ao atualizar o curso";
const DELETE_FAILED: &str = "Erro ao excluir o curso";
const DELETED: &str = "Curso excluído com sucesso";

#[derive(Debug, Default, Deserialize)]
pub struct CourseListQuery {
    pub title: Option<String>,
    pub description: Option<String>,
    pub page: Option<String>,
}

/// Fields forwarded upstream on create and update, whatever their JSON type.
/// Absent fields are omitted.
#[derive(Debug, Deserialize, Serialize)]
pub struct CoursePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Value>,
}

pub async fn list_courses(
    State(state): State<AppState>,
    Query(query): Query<CourseListQuery>,
) -> Result<Response, ApiError> {
    let page = query
        .page
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| "1".to_string());
    let params = [
        ("q[title_cont]", query.title.unwrap_or_default()),
        ("q[description_cont]", query.description.unwrap_or_default()),
        ("page", page),
    ];

    let res = state
        .upstream
        .get("/courses", &params)
        .await
        .map_err(ApiError::upstream(LIST_FAILED))?;
    json_body(res, StatusCode::OK)
        .await
        .map_err(ApiError::upstream(LIST_FAILED))
}

pub async fn create_course(
    State(state): State<AppState>,
    body: Result<Json<CoursePayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = body.map_err(ApiError::unreadable(CREATE_FAILED))?;
    let res = state
        .upstream
        .send_json(Method::POST, "/courses", &body)
        .await
        .map_err(ApiError::upstream(CREATE_FAILED))?;
    json_body(res, StatusCode::OK)
        .await
        .map_err(ApiError::upstream(CREATE_FAILED))
}

pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = course_id(&id)?;
    let res = state
        .upstream
        .get(&course_path(id), &[] as &[(&str, &str)])
        .await
        .map_err(ApiError::upstream(GET_FAILED))?;
    json_body(res, StatusCode::OK)
        .await
        .map_err(ApiError::upstream(GET_FAILED))
}

pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<CoursePayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let id = course_id(&id)?;
    let Json(body) = body.map_err(ApiError::unreadable(UPDATE_FAILED))?;
    let res = state
        .upstream
        .send_json(Method::PUT, &course_path(id), &body)
        .await
        .map_err(ApiError::upstream(UPDATE_FAILED))?;
    json_body(res, StatusCode::OK)
        .await
        .map_err(ApiError::upstream(UPDATE_FAILED))
}

pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = course_id(&id)?;
    state
        .upstream
        .delete(&course_path(id))
        .await
        .map_err(ApiError::upstream(DELETE_FAILED))?;
    tracing::info!(course_id = %id, "course deleted");
    Ok(Json(json!({ "message": DELETED })))
}
