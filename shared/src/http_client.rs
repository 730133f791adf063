//! HTTP client for the upstream course API.
//!
//! Calls are made once: no retries, no circuit breaker and no timeouts beyond
//! reqwest's own defaults. Failures are reported to the caller, which maps them
//! to a fixed response.

use reqwest::{multipart::Form, Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use thiserror::Error;

/// Error type for outbound calls to the upstream API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream responded with {0}")]
    Status(StatusCode),
}

impl UpstreamError {
    /// Status reported by the upstream, if it answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            UpstreamError::Status(status) => Some(*status),
            UpstreamError::Transport(_) => None,
        }
    }
}

/// Shared reqwest client. No request timeout is set.
pub fn default_client() -> Result<Client, reqwest::Error> {
    Client::builder().build()
}

#[derive(Clone, Debug)]
pub struct UpstreamClient {
    client: Client,
    base_url: String,
}

impl UpstreamClient {
    /// base_url e.g. http://api:3000 (a trailing slash is dropped)
    pub fn new(base_url: impl Into<String>) -> Result<Self, UpstreamError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client: default_client()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// path e.g. /courses/{id}/videos
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.url(path))
    }

    /// Sends the request and requires a 2xx answer.
    pub async fn send(&self, req: RequestBuilder) -> Result<Response, UpstreamError> {
        let res = self.send_unchecked(req).await?;
        if !res.status().is_success() {
            return Err(UpstreamError::Status(res.status()));
        }
        Ok(res)
    }

    /// Sends the request and hands back whatever status the upstream chose.
    pub async fn send_unchecked(&self, req: RequestBuilder) -> Result<Response, UpstreamError> {
        let res = req.send().await?;
        tracing::debug!(url = %res.url(), status = %res.status(), "upstream response");
        Ok(res)
    }

    pub async fn get<Q>(&self, path: &str, query: &Q) -> Result<Response, UpstreamError>
    where
        Q: Serialize + ?Sized,
    {
        self.send(self.request(Method::GET, path).query(query)).await
    }

    pub async fn send_json<B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Response, UpstreamError>
    where
        B: Serialize + ?Sized,
    {
        self.send(self.request(method, path).json(body)).await
    }

    pub async fn send_multipart(
        &self,
        method: Method,
        path: &str,
        form: Form,
    ) -> Result<Response, UpstreamError> {
        self.send(self.request(method, path).multipart(form)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Response, UpstreamError> {
        self.send(self.request(Method::DELETE, path)).await
    }

    /// Transport-level reachability of the base URL; any HTTP answer counts.
    pub async fn probe(&self) -> Result<StatusCode, UpstreamError> {
        let res = self
            .send_unchecked(self.client.request(Method::GET, &self.base_url))
            .await?;
        Ok(res.status())
    }
}
