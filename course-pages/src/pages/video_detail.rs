use crate::client::CoursesApi;
use crate::model::{Id, Video};

use super::LoadState;

/// `/courses/{id}/videos/{video_id}`: player page.
#[derive(Clone, Debug)]
pub struct VideoDetailPage {
    pub course_id: Id,
    pub video_id: Id,
    pub video: Option<Video>,
    pub state: LoadState,
}

impl VideoDetailPage {
    pub fn new(course_id: Id, video_id: Id) -> Self {
        Self {
            course_id,
            video_id,
            video: None,
            state: LoadState::Idle,
        }
    }

    pub async fn load(&mut self, api: &dyn CoursesApi) {
        self.state = LoadState::Loading;
        match api.get_video(&self.course_id, &self.video_id).await {
            Ok(video) => {
                self.video = Some(video);
                self.state = LoadState::Loaded;
            }
            Err(e) => {
                tracing::warn!(video_id = %self.video_id, "video detail failed: {}", e);
                self.state = LoadState::Failed(format!("Erro ao buscar dados: {}", e.reason()));
            }
        }
    }

    /// Path the player streams from, relative to the gateway.
    pub fn stream_path(&self) -> String {
        format!(
            "/api/courses/{}/videos/{}/stream",
            self.course_id, self.video_id
        )
    }
}
