use crate::client::CoursesApi;
use crate::model::{Course, CourseForm, Id};

use super::{LoadState, Notice};

const INCOMPLETE: &str = "Preencha todos os campos.";
const PREFILL_FAILED: &str = "Erro ao carregar os dados do curso.";
const CREATE_FAILED: &str = "Erro ao criar o curso.";
const UPDATE_FAILED: &str = "Erro ao atualizar o curso.";

const CREATED: Notice = Notice::success("Curso criado.", "O curso foi criado com sucesso.");
const CREATE_REFUSED: Notice = Notice::error(
    "Erro ao criar curso.",
    "Não foi possível criar o curso. Tente novamente.",
);
const UPDATED: Notice = Notice::success("Curso atualizado.", "O curso foi atualizado com sucesso.");
const UPDATE_REFUSED: Notice =
    Notice::error("Erro ao atualizar o curso.", "Tente novamente mais tarde.");

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(Id),
}

/// `/courses/new` and `/courses/{id}/edit`.
#[derive(Clone, Debug)]
pub struct CourseFormPage {
    pub mode: FormMode,
    pub form: CourseForm,
    pub state: LoadState,
    pub error: Option<String>,
    pub notice: Option<Notice>,
}

impl CourseFormPage {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            form: CourseForm::default(),
            state: LoadState::Loaded,
            error: None,
            notice: None,
        }
    }

    pub fn edit(id: Id) -> Self {
        Self {
            mode: FormMode::Edit(id),
            form: CourseForm::default(),
            state: LoadState::Idle,
            error: None,
            notice: None,
        }
    }

    /// Pre-fills an edit form from the stored course. No-op when creating.
    pub async fn load(&mut self, api: &dyn CoursesApi) {
        let FormMode::Edit(id) = &self.mode else {
            return;
        };
        self.state = LoadState::Loading;
        match api.get_course(id).await {
            Ok(course) => {
                self.form = CourseForm::from_course(&course);
                self.state = LoadState::Loaded;
            }
            Err(e) => {
                tracing::warn!(course_id = %id, "course prefill failed: {}", e);
                self.error = Some(PREFILL_FAILED.to_string());
                self.state = LoadState::Failed(PREFILL_FAILED.to_string());
            }
        }
    }

    /// Validates and sends the form. Returns the stored course when the caller
    /// should navigate back to the list.
    pub async fn submit(&mut self, api: &dyn CoursesApi) -> Option<Course> {
        if !self.form.is_complete() {
            self.error = Some(INCOMPLETE.to_string());
            return None;
        }
        self.error = None;

        let result = match &self.mode {
            FormMode::Create => api.create_course(&self.form).await,
            FormMode::Edit(id) => api.update_course(id, &self.form).await,
        };
        let (ok, refused, failed) = match self.mode {
            FormMode::Create => (CREATED, CREATE_REFUSED, CREATE_FAILED),
            FormMode::Edit(_) => (UPDATED, UPDATE_REFUSED, UPDATE_FAILED),
        };
        match result {
            Ok(course) => {
                self.notice = Some(ok);
                Some(course)
            }
            Err(e) => {
                tracing::warn!("course submit failed: {}", e);
                self.error = Some(failed.to_string());
                self.notice = Some(refused);
                None
            }
        }
    }
}
