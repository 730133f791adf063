use crate::client::{ClientError, CoursesApi};
use crate::model::{Course, CourseFilter, Id};

use super::{page_after_removal, LoadState, Notice};

const LOAD_FAILED: &str = "Erro ao buscar cursos";
const DELETED: Notice = Notice::success("Curso excluído.", "O curso foi excluído com sucesso.");
const DELETE_FAILED: Notice = Notice::error(
    "Erro ao excluir curso.",
    "Não foi possível excluir o curso. Tente novamente.",
);

/// `/courses`: filterable, paginated course table.
#[derive(Clone, Debug)]
pub struct CourseListPage {
    pub filter: CourseFilter,
    pub courses: Vec<Course>,
    pub current_page: u32,
    pub total_pages: u32,
    pub state: LoadState,
    pub notice: Option<Notice>,
}

impl Default for CourseListPage {
    fn default() -> Self {
        Self {
            filter: CourseFilter::default(),
            courses: Vec::new(),
            current_page: 1,
            total_pages: 1,
            state: LoadState::Idle,
            notice: None,
        }
    }
}

impl CourseListPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches `page` with the current filter. On failure the previous rows
    /// stay on screen.
    pub async fn load(&mut self, api: &dyn CoursesApi, page: u32) {
        self.state = LoadState::Loading;
        match api.list_courses(&self.filter, page.max(1)).await {
            Ok(list) => {
                self.courses = list.courses;
                self.total_pages = list.total_pages.max(1);
                self.current_page = list.current_page.max(1);
                self.state = LoadState::Loaded;
            }
            Err(e) => {
                tracing::warn!("course list failed: {}", e);
                self.state = LoadState::Failed(LOAD_FAILED.to_string());
            }
        }
    }

    /// Replaces the filter and goes back to the first page.
    pub async fn apply_filter(&mut self, api: &dyn CoursesApi, title: &str, description: &str) {
        self.filter = CourseFilter {
            title: title.trim().to_string(),
            description: description.trim().to_string(),
        };
        self.load(api, 1).await;
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

    /// One DELETE, then one re-fetch of the current page if it succeeded.
    pub async fn delete_course(&mut self, api: &dyn CoursesApi, id: &Id) -> Result<(), ClientError> {
        match api.delete_course(id).await {
            Ok(()) => {
                let page = page_after_removal(self.current_page, self.courses.len());
                self.load(api, page).await;
                self.notice = Some(DELETED);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(course_id = %id, "course delete failed: {}", e);
                self.notice = Some(DELETE_FAILED);
                Err(e)
            }
        }
    }
}
