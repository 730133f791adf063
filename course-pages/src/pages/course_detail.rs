use crate::client::{ClientError, CoursesApi};
use crate::model::{Course, Id, Video};

use super::{page_after_removal, LoadState, Notice};

const LOAD_FAILED: &str = "Erro ao buscar dados";
const PER_PAGE: u32 = 10;
const DELETED: Notice = Notice::success("Video excluído.", "O video foi excluído com sucesso.");
const DELETE_FAILED: Notice = Notice::error(
    "Erro ao excluir video.",
    "Não foi possível excluir o video. Tente novamente.",
);

/// `/courses/{id}`: course header plus a paginated table of its videos.
#[derive(Clone, Debug)]
pub struct CourseDetailPage {
    pub course_id: Id,
    pub course: Option<Course>,
    pub videos: Vec<Video>,
    pub current_page: u32,
    pub total_pages: u32,
    pub state: LoadState,
    pub notice: Option<Notice>,
}

impl CourseDetailPage {
    pub fn new(course_id: Id) -> Self {
        Self {
            course_id,
            course: None,
            videos: Vec::new(),
            current_page: 1,
            total_pages: 1,
            state: LoadState::Idle,
            notice: None,
        }
    }

    /// Course and video page are requested together; either failing fails the page.
    pub async fn load(&mut self, api: &dyn CoursesApi, page: u32) {
        self.state = LoadState::Loading;
        let (course, videos) = tokio::join!(
            api.get_course(&self.course_id),
            api.list_videos(&self.course_id, page.max(1), PER_PAGE),
        );
        match (course, videos) {
            (Ok(course), Ok(videos)) => {
                self.course = Some(course);
                self.videos = videos.videos;
                self.total_pages = videos.total_pages.max(1);
                self.current_page = videos.current_page.max(1);
                self.state = LoadState::Loaded;
            }
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!(course_id = %self.course_id, "course detail failed: {}", e);
                self.state = LoadState::Failed(LOAD_FAILED.to_string());
            }
        }
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub async fn next_page(&mut self, api: &dyn CoursesApi) {
        if self.has_next() {
            self.load(api, self.current_page + 1).await;
        }
    }

    pub async fn previous_page(&mut self, api: &dyn CoursesApi) {
        if self.has_previous() {
            self.load(api, self.current_page - 1).await;
        }
    }

    /// One DELETE, then one re-fetch if it succeeded.
    pub async fn delete_video(&mut self, api: &dyn CoursesApi, video_id: &Id) -> Result<(), ClientError> {
        match api.delete_video(&self.course_id, video_id).await {
            Ok(()) => {
                let page = page_after_removal(self.current_page, self.videos.len());
                self.load(api, page).await;
                self.notice = Some(DELETED);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(course_id = %self.course_id, video_id = %video_id, "video delete failed: {}", e);
                self.notice = Some(DELETE_FAILED);
                Err(e)
            }
        }
    }
}
