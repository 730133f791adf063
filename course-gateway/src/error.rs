use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::UpstreamError;
use thiserror::Error;

pub const MISSING_COURSE_ID: &str = "ID do curso não fornecido";
pub const MISSING_VIDEO_ID: &str = "ID do vídeo não fornecido";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing course id")]
    MissingCourseId,

    #[error("missing video id")]
    MissingVideoId,

    #[error("bad request: {0}")]
    BadRequest(&'static str),

    /// Inbound body could not be read. Answered like an upstream failure.
    #[error("{message}: unreadable body")]
    Unreadable { message: &'static str },

    /// Failure on a JSON route. Always answered with 500.
    #[error("{message}: {source}")]
    Upstream {
        message: &'static str,
        #[source]
        source: UpstreamError,
    },

    /// Failure on a plain-text route, answered with `status`.
    #[error("{message} ({status})")]
    Text {
        status: StatusCode,
        message: &'static str,
    },
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
}

impl ApiError {
    /// For `map_err` on JSON routes.
    pub fn upstream(message: &'static str) -> impl FnOnce(UpstreamError) -> ApiError {
        move |source| ApiError::Upstream { message, source }
    }

    /// For `map_err` on a rejected inbound body of a JSON route.
    pub fn unreadable<E: std::fmt::Display>(message: &'static str) -> impl FnOnce(E) -> ApiError {
        move |rejection| {
            tracing::warn!(%rejection, "{}", message);
            ApiError::Unreadable { message }
        }
    }

    /// Plain-text 500 regardless of what went wrong upstream.
    pub fn text(message: &'static str) -> impl FnOnce(UpstreamError) -> ApiError {
        move |source| {
            tracing::warn!(error = %source, "{}", message);
            ApiError::Text {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message,
            }
        }
    }

    /// Plain text carrying the upstream status when there was one; `unreachable`
    /// (500) when the upstream never answered.
    pub fn passthrough(
        rejected: &'static str,
        unreachable: &'static str,
    ) -> impl FnOnce(UpstreamError) -> ApiError {
        move |source| {
            tracing::warn!(error = %source, "upstream call failed");
            match source.status() {
                Some(status) => ApiError::Text {
                    status,
                    message: rejected,
                },
                None => ApiError::Text {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: unreachable,
                },
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::MissingCourseId => (StatusCode::BAD_REQUEST, MISSING_COURSE_ID),
            ApiError::MissingVideoId => (StatusCode::BAD_REQUEST, MISSING_VIDEO_ID),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unreadable { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
            ApiError::Upstream { message, source } => {
                tracing::error!(error = %source, "{}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
            ApiError::Text { status, message } => return (status, message).into_response(),
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}
