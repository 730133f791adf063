mod error;
mod routes;

pub use error::ApiError;

use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};
use shared::{Config, UpstreamClient};
use std::sync::Arc;
use tower::ServiceBuilder;

#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<UpstreamClient>,
}

pub fn app(config: &Config, upstream: Arc<UpstreamClient>) -> Router {
    let stream = if config.stream_rewrite {
        get(routes::stream::relay_stream)
    } else {
        get(routes::stream::stream_video)
    };

    Router::new()
        .route("/health", get(routes::health))
        .route("/ready", get(routes::ready))
        .route(
            "/api/courses",
            get(routes::courses::list_courses).post(routes::courses::create_course),
        )
        .route(
            "/api/courses/",
            get(routes::missing_course_id)
                .put(routes::missing_course_id)
                .delete(routes::missing_course_id),
        )
        .route(
            "/api/courses/:id",
            get(routes::courses::get_course)
                .put(routes::courses::update_course)
                .delete(routes::courses::delete_course),
        )
        .route(
            "/api/courses/:id/videos",
            get(routes::videos::list_videos).post(routes::videos::upload_video),
        )
        .route(
            "/api/courses/:id/videos/",
            get(routes::missing_video_id)
                .put(routes::missing_video_id)
                .delete(routes::missing_video_id),
        )
        .route(
            "/api/courses/:id/videos/:video_id",
            get(routes::videos::get_video)
                .put(routes::videos::update_video)
                .delete(routes::videos::delete_video),
        )
        .route("/api/courses/:id/videos/:video_id/stream", stream)
        .with_state(AppState { upstream })
        .layer(
            ServiceBuilder::new()
                .layer(tower_http::trace::TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(config.max_upload_bytes)),
        )
}
