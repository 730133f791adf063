use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client, Response, StatusCode,
};
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;

use crate::model::{Course, CourseFilter, CourseForm, CoursePage, Id, Video, VideoFile, VideoPage};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("invalid file: {0}")]
    InvalidFile(String),
}

impl ClientError {
    /// Short reason, as a browser's `statusText` would give it.
    pub fn reason(&self) -> String {
        match self {
            ClientError::Status { status, .. } => status
                .canonical_reason()
                .unwrap_or(status.as_str())
                .to_string(),
            other => other.to_string(),
        }
    }
}

/// The gateway's `/api` surface as seen by the pages.
#[async_trait]
pub trait CoursesApi: Send + Sync {
    async fn list_courses(&self, filter: &CourseFilter, page: u32)
        -> Result<CoursePage, ClientError>;

    async fn get_course(&self, id: &Id) -> Result<Course, ClientError>;

    async fn create_course(&self, form: &CourseForm) -> Result<Course, ClientError>;

    async fn update_course(&self, id: &Id, form: &CourseForm) -> Result<Course, ClientError>;

    async fn delete_course(&self, id: &Id) -> Result<(), ClientError>;

    async fn list_videos(
        &self,
        course_id: &Id,
        page: u32,
        per_page: u32,
    ) -> Result<VideoPage, ClientError>;

    async fn get_video(&self, course_id: &Id, video_id: &Id) -> Result<Video, ClientError>;

    async fn upload_video(
        &self,
        course_id: &Id,
        title: &str,
        file: &VideoFile,
    ) -> Result<Video, ClientError>;

    async fn update_video(
        &self,
        course_id: &Id,
        video_id: &Id,
        title: &str,
        file: Option<&VideoFile>,
    ) -> Result<Video, ClientError>;

    async fn delete_video(&self, course_id: &Id, video_id: &Id) -> Result<(), ClientError>;
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Talks to a running gateway over HTTP.
#[derive(Clone, Debug)]
pub struct GatewayClient {
    http: Client,
    base_url: String,
}

impl GatewayClient {
    /// base_url e.g. http://localhost:8080 (the gateway, not the upstream API)
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Ok(Self {
            http: Client::builder().build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    fn course_url(&self, id: &Id) -> String {
        self.url(&format!("/courses/{}", urlencoding::encode(id.as_str())))
    }

    fn videos_url(&self, course_id: &Id) -> String {
        format!("{}/videos", self.course_url(course_id))
    }

    fn video_url(&self, course_id: &Id, video_id: &Id) -> String {
        format!(
            "{}/{}",
            self.videos_url(course_id),
            urlencoding::encode(video_id.as_str())
        )
    }

    /// Address the `<video>` element plays from.
    pub fn stream_url(&self, course_id: &Id, video_id: &Id) -> String {
        format!("{}/stream", self.video_url(course_id, video_id))
    }

    async fn check(res: Response) -> Result<Response, ClientError> {
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }
        let text = res.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or(text);
        tracing::debug!(%status, %message, "gateway refused request");
        Err(ClientError::Status { status, message })
    }

    async fn json<T: DeserializeOwned>(res: Response) -> Result<T, ClientError> {
        Ok(Self::check(res).await?.json().await?)
    }
}

fn file_part(file: &VideoFile) -> Result<Part, ClientError> {
    Part::bytes(file.bytes.clone())
        .file_name(file.file_name.clone())
        .mime_str(&file.content_type)
        .map_err(|_| ClientError::InvalidFile(file.content_type.clone()))
}

#[async_trait]
impl CoursesApi for GatewayClient {
    async fn list_courses(
        &self,
        filter: &CourseFilter,
        page: u32,
    ) -> Result<CoursePage, ClientError> {
        let page = page.to_string();
        let query = [
            ("title", filter.title.as_str()),
            ("description", filter.description.as_str()),
            ("page", page.as_str()),
        ];
        let res = self.http.get(self.url("/courses")).query(&query).send().await?;
        Self::json(res).await
    }

    async fn get_course(&self, id: &Id) -> Result<Course, ClientError> {
        let res = self
            .http
            .get(self.course_url(id))
            .send()
            .await?;
        Self::json(res).await
    }

    async fn create_course(&self, form: &CourseForm) -> Result<Course, ClientError> {
        let res = self
            .http
            .post(self.url("/courses"))
            .json(form)
            .send()
            .await?;
        Self::json(res).await
    }

    async fn update_course(&self, id: &Id, form: &CourseForm) -> Result<Course, ClientError> {
        let res = self
            .http
            .put(self.course_url(id))
            .json(form)
            .send()
            .await?;
        Self::json(res).await
    }

    async fn delete_course(&self, id: &Id) -> Result<(), ClientError> {
        let res = self
            .http
            .delete(self.course_url(id))
            .send()
            .await?;
        Self::check(res).await?;
        Ok(())
    }

    async fn list_videos(
        &self,
        course_id: &Id,
        page: u32,
        per_page: u32,
    ) -> Result<VideoPage, ClientError> {
        let res = self
            .http
            .get(self.videos_url(course_id))
            .query(&[("page", page), ("per_page", per_page)])
            .send()
            .await?;
        Self::json(res).await
    }

    async fn get_video(&self, course_id: &Id, video_id: &Id) -> Result<Video, ClientError> {
        let res = self
            .http
            .get(self.video_url(course_id, video_id))
            .send()
            .await?;
        Self::json(res).await
    }

    async fn upload_video(
        &self,
        course_id: &Id,
        title: &str,
        file: &VideoFile,
    ) -> Result<Video, ClientError> {
        let form = Form::new()
            .text("title", title.to_string())
            .part("video", file_part(file)?)
            .text("course_id", course_id.to_string());
        let res = self
            .http
            .post(self.videos_url(course_id))
            .multipart(form)
            .send()
            .await?;
        Self::json(res).await
    }

    async fn update_video(
        &self,
        course_id: &Id,
        video_id: &Id,
        title: &str,
        file: Option<&VideoFile>,
    ) -> Result<Video, ClientError> {
        let mut form = Form::new().text("title", title.to_string());
        if let Some(file) = file {
            form = form.part("file", file_part(file)?);
        }
        let res = self
            .http
            .put(self.video_url(course_id, video_id))
            .multipart(form)
            .send()
            .await?;
        Self::json(res).await
    }

    async fn delete_video(&self, course_id: &Id, video_id: &Id) -> Result<(), ClientError> {
        let res = self
            .http
            .delete(self.video_url(course_id, video_id))
            .send()
            .await?;
        Self::check(res).await?;
        Ok(())
    }
}
