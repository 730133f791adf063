pub mod course_detail;
pub mod course_form;
pub mod course_list;
pub mod report;
pub mod video_detail;
pub mod video_form;

pub use course_detail::CourseDetailPage;
pub use course_form::CourseFormPage;
pub use course_list::CourseListPage;
pub use report::{DurationReport, DurationSlice, ReportPage};
pub use video_detail::VideoDetailPage;
pub use video_form::VideoFormPage;

/// Request lifecycle of a page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

impl LoadState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadState::Loaded)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient notification shown after an action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: &'static str,
    pub description: &'static str,
}

impl Notice {
    pub const fn success(title: &'static str, description: &'static str) -> Self {
        Self {
            kind: NoticeKind::Success,
            title,
            description,
        }
    }

    pub const fn error(title: &'static str, description: &'static str) -> Self {
        Self {
            kind: NoticeKind::Error,
            title,
            description,
        }
    }
}

/// Page to reload once a row of `current_page` is deleted: the previous page
/// when that row was the only one left on it.
pub(crate) fn page_after_removal(current_page: u32, rows_on_page: usize) -> u32 {
    if rows_on_page <= 1 && current_page > 1 {
        current_page - 1
    } else {
        current_page.max(1)
    }
}
