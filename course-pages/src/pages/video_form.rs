use crate::client::CoursesApi;
use crate::model::{Id, Video, VideoFile};

use super::{LoadState, Notice};

const UPLOAD_INCOMPLETE: &str = "Preencha o título e selecione um vídeo.";
const EDIT_INCOMPLETE: &str = "Preencha o título.";
const PREFILL_FAILED: &str = "Erro ao carregar os dados do vídeo.";
const UPLOAD_FAILED: &str = "Erro ao enviar o vídeo.";
const UPDATE_FAILED: &str = "Erro ao atualizar o vídeo.";

const UPLOADED: Notice = Notice::success("Vídeo adicionado.", "O vídeo foi adicionado ao curso.");
const UPLOAD_REFUSED: Notice = Notice::error(
    "Erro ao adicionar o vídeo.",
    "Não foi possível adicionar o vídeo. Tente novamente.",
);
const UPDATED: Notice = Notice::success("Vídeo editado.", "O vídeo foi editado.");
const UPDATE_REFUSED: Notice = Notice::error(
    "Erro ao editar o vídeo.",
    "Não foi possível editar o vídeo. Tente novamente.",
);

/// `/courses/{id}/videos/new` (`video_id` is `None`) and
/// `/courses/{id}/videos/{video_id}/edit`.
#[derive(Clone, Debug)]
pub struct VideoFormPage {
    pub course_id: Id,
    pub video_id: Option<Id>,
    pub title: String,
    pub file: Option<VideoFile>,
    pub state: LoadState,
    pub error: Option<String>,
    pub notice: Option<Notice>,
}

impl VideoFormPage {
    pub fn upload(course_id: Id) -> Self {
        Self {
            course_id,
            video_id: None,
            title: String::new(),
            file: None,
            state: LoadState::Loaded,
            error: None,
            notice: None,
        }
    }

    pub fn edit(course_id: Id, video_id: Id) -> Self {
        Self {
            video_id: Some(video_id),
            state: LoadState::Idle,
            ..Self::upload(course_id)
        }
    }

    pub async fn load(&mut self, api: &dyn CoursesApi) {
        let Some(video_id) = &self.video_id else {
            return;
        };
        self.state = LoadState::Loading;
        match api.get_video(&self.course_id, video_id).await {
            Ok(video) => {
                self.title = video.title;
                self.state = LoadState::Loaded;
            }
            Err(e) => {
                tracing::warn!(video_id = %video_id, "video prefill failed: {}", e);
                self.error = Some(PREFILL_FAILED.to_string());
                self.state = LoadState::Failed(PREFILL_FAILED.to_string());
            }
        }
    }

    /// Uploads requires title and file; edits require a title, the file is optional.
    pub async fn submit(&mut self, api: &dyn CoursesApi) -> Option<Video> {
        let title = self.title.trim().to_string();
        let result = match (&self.video_id, &self.file) {
            (None, Some(file)) if !title.is_empty() => {
                api.upload_video(&self.course_id, &title, file).await
            }
            (None, _) => {
                self.error = Some(UPLOAD_INCOMPLETE.to_string());
                return None;
            }
            (Some(_), _) if title.is_empty() => {
                self.error = Some(EDIT_INCOMPLETE.to_string());
                return None;
            }
            (Some(video_id), file) => {
                api.update_video(&self.course_id, video_id, &title, file.as_ref())
                    .await
            }
        };

        let (ok, refused, failed) = match self.video_id {
            None => (UPLOADED, UPLOAD_REFUSED, UPLOAD_FAILED),
            Some(_) => (UPDATED, UPDATE_REFUSED, UPDATE_FAILED),
        };
        match result {
            Ok(video) => {
                self.error = None;
                self.notice = Some(ok);
                Some(video)
            }
            Err(e) => {
                tracing::warn!(course_id = %self.course_id, "video submit failed: {}", e);
                self.error = Some(failed.to_string());
                self.notice = Some(refused);
                None
            }
        }
    }
}
