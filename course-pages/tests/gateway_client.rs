use axum::{
    extract::{Multipart, Path, Query},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use course_pages::{
    pages::{CourseDetailPage, VideoDetailPage},
    ClientError, CourseFilter, CoursesApi, GatewayClient, Id, VideoFile,
};
use serde_json::{json, Value};
use std::collections::HashMap;

async fn list_courses(Query(q): Query<HashMap<String, String>>) -> Json<Value> {
    let page: u32 = q.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    Json(json!({
        "courses": [{
            "id": 1,
            "title": q.get("title").cloned().unwrap_or_default(),
            "description": q.get("description").cloned().unwrap_or_default(),
            "total_duration": 90,
            "start_date": "2024-01-01",
            "end_date": "2024-02-01"
        }],
        "total_pages": 4,
        "current_page": page
    }))
}

async fn get_course(Path(id): Path<String>) -> Json<Value> {
    Json(json!({ "id": id.parse::<u64>().unwrap(), "title": "Rust", "description": "Ownership" }))
}

async fn delete_course() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Erro ao excluir o curso" })),
    )
}

async fn list_videos(
    Path(id): Path<String>,
    Query(q): Query<HashMap<String, String>>,
) -> Json<Value> {
    let page: u32 = q["page"].parse().unwrap();
    let per_page: u32 = q["per_page"].parse().unwrap();
    Json(json!({
        "videos": [{ "id": 11, "title": "Intro", "course_id": id, "duration": 30 }],
        "total_pages": 3,
        "current_page": page,
        "per_page": per_page
    }))
}

async fn upload_video(mut multipart: Multipart) -> (StatusCode, Json<Value>) {
    let mut names = Vec::new();
    let mut title = String::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap().to_string();
        if name == "title" {
            title = field.text().await.unwrap();
        } else {
            field.bytes().await.unwrap();
        }
        names.push(name);
    }
    names.sort();
    (
        StatusCode::CREATED,
        Json(json!({ "id": 12, "title": format!("{} [{}]", title, names.join(",")), "duration": 0 })),
    )
}

async fn get_video() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Failed to fetch video details")
}

async fn spawn_gateway() -> GatewayClient {
    let router = Router::new()
        .route("/api/courses", get(list_courses))
        .route("/api/courses/:id", get(get_course).delete(delete_course))
        .route(
            "/api/courses/:id/videos",
            get(list_videos).post(upload_video),
        )
        .route("/api/courses/:id/videos/:video_id", get(get_video));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    GatewayClient::new(format!("http://{}/", addr)).unwrap()
}

#[tokio::test]
async fn course_list_sends_filters_and_page() {
    let client = spawn_gateway().await;
    let filter = CourseFilter {
        title: "rust".to_string(),
        description: "intro".to_string(),
    };

    let page = client.list_courses(&filter, 3).await.unwrap();

    assert_eq!(page.current_page, 3);
    assert_eq!(page.total_pages, 4);
    assert_eq!(page.courses[0].title, "rust");
    assert_eq!(page.courses[0].description, "intro");
    assert_eq!(page.courses[0].duration_label(), "1m 30s");
}

#[tokio::test]
async fn detail_page_reflects_gateway_paging() {
    let client = spawn_gateway().await;
    let mut page = CourseDetailPage::new(Id::from(5));

    page.load(&client, 2).await;

    assert!(page.state.is_loaded());
    assert_eq!(page.current_page, 2);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.videos[0].course_id, Some(Id::from("5")));
}

#[tokio::test]
async fn gateway_error_message_is_surfaced() {
    let client = spawn_gateway().await;

    let err = client.delete_course(&Id::from(1)).await.unwrap_err();

    match err {
        ClientError::Status { status, message } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(message, "Erro ao excluir o curso");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn upload_sends_video_and_title_fields() {
    let client = spawn_gateway().await;
    let file = VideoFile {
        file_name: "clip.mp4".to_string(),
        content_type: "video/mp4".to_string(),
        bytes: b"mp4".to_vec(),
    };

    let video = client
        .upload_video(&Id::from(1), "Intro", &file)
        .await
        .unwrap();

    assert_eq!(video.title, "Intro [course_id,title,video]");
}

#[tokio::test]
async fn video_detail_failure_uses_status_text() {
    let client = spawn_gateway().await;
    let mut page = VideoDetailPage::new(Id::from(1), Id::from(99));

    page.load(&client).await;

    assert_eq!(page.state.error(), Some("Erro ao buscar dados: Not Found"));
    assert!(client
        .stream_url(&Id::from(1), &Id::from(99))
        .ends_with("/api/courses/1/videos/99/stream"));
}

#[tokio::test]
async fn path_unsafe_ids_reach_the_same_route() {
    let client = spawn_gateway().await;

    let err = client.delete_course(&Id::from("a/b")).await.unwrap_err();

    match err {
        ClientError::Status { status, message } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(message, "Erro ao excluir o curso");
        }
        other => panic!("unexpected error {:?}", other),
    }
}
