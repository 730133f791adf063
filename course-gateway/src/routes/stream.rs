//! Video byte relay. The upstream body is never buffered: it is handed to the
//! outbound response as a live stream, so range responses pass through intact.

use axum::{
    body::Body,
    extract::{Path, RawQuery, State},
    http::{
        header::{
            ACCEPT_RANGES, CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_RANGE, CONTENT_TYPE, ETAG,
            IF_RANGE, LAST_MODIFIED, RANGE,
        },
        HeaderMap, HeaderName, HeaderValue, Method, StatusCode,
    },
    response::{IntoResponse, Response},
};
use shared::UpstreamError;

use super::{course_id, video_id, video_path};
use crate::{ApiError, AppState};

const STREAM_REJECTED: &str = "Failed to fetch video";
const STREAM_FAILED: &str = "Error fetching video";
const DEFAULT_CONTENT_TYPE: &str = "video/mp4";
const DEFAULT_DISPOSITION: &str = "inline; filename=\"video.mp4\"";

const FORWARDED_REQUEST_HEADERS: [HeaderName; 2] = [RANGE, IF_RANGE];
const RELAYED_RESPONSE_HEADERS: [HeaderName; 5] =
    [CONTENT_LENGTH, CONTENT_RANGE, ACCEPT_RANGES, ETAG, LAST_MODIFIED];

fn stream_path(id: &str, video: &str) -> String {
    format!("{}/stream", video_path(id, video))
}

fn unreachable(err: UpstreamError) -> ApiError {
    tracing::warn!(error = %err, "video stream unavailable");
    ApiError::Text {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: STREAM_FAILED,
    }
}

fn is_hop_by_hop(name: &HeaderName) -> bool {
    matches!(
        name.as_str(),
        "connection"
            | "keep-alive"
            | "proxy-authenticate"
            | "proxy-authorization"
            | "te"
            | "trailer"
            | "transfer-encoding"
            | "upgrade"
            | "host"
    )
}

/// `GET /api/courses/{id}/videos/{video_id}/stream`
///
/// Accepts 200 and 206 from upstream. Content type and disposition fall back to
/// an inline mp4 when upstream leaves them out.
pub async fn stream_video(
    State(state): State<AppState>,
    Path((id, video)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let id = course_id(&id)?;
    let video = video_id(&video)?;

    let mut req = state
        .upstream
        .request(Method::GET, &stream_path(id, video));
    for name in FORWARDED_REQUEST_HEADERS {
        if let Some(value) = headers.get(&name) {
            req = req.header(name, value.clone());
        }
    }

    let res = state.upstream.send_unchecked(req).await.map_err(unreachable)?;
    let status = res.status();
    if status != StatusCode::OK && status != StatusCode::PARTIAL_CONTENT {
        tracing::warn!(course_id = %id, video_id = %video, %status, "upstream refused stream");
        return Err(ApiError::Text {
            status,
            message: STREAM_REJECTED,
        });
    }

    let upstream = res.headers();
    let mut out = HeaderMap::new();
    out.insert(
        CONTENT_TYPE,
        upstream
            .get(CONTENT_TYPE)
            .cloned()
            .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_CONTENT_TYPE)),
    );
    out.insert(
        CONTENT_DISPOSITION,
        upstream
            .get(CONTENT_DISPOSITION)
            .cloned()
            .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_DISPOSITION)),
    );
    for name in RELAYED_RESPONSE_HEADERS {
        if let Some(value) = upstream.get(&name) {
            out.insert(name, value.clone());
        }
    }

    Ok((status, out, Body::from_stream(res.bytes_stream())).into_response())
}

/// Rewrite mode: the stream path is relayed verbatim. Every end-to-end header
/// goes both ways and the upstream status is kept whatever it is.
pub async fn relay_stream(
    State(state): State<AppState>,
    Path((id, video)): Path<(String, String)>,
    RawQuery(query): RawQuery,
    method: Method,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let id = course_id(&id)?;
    let video = video_id(&video)?;

    let mut path = stream_path(id, video);
    if let Some(query) = query {
        path.push('?');
        path.push_str(&query);
    }

    let mut req = state.upstream.request(method, &path);
    for (name, value) in headers.iter().filter(|(name, _)| !is_hop_by_hop(name)) {
        req = req.header(name, value);
    }

    let res = state.upstream.send_unchecked(req).await.map_err(unreachable)?;
    let status = res.status();
    let mut out = HeaderMap::new();
    for (name, value) in res.headers().iter().filter(|(name, _)| !is_hop_by_hop(name)) {
        out.append(name, value.clone());
    }

    Ok((status, out, Body::from_stream(res.bytes_stream())).into_response())
}
