use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::format::{format_date, format_duration};

/// Upstream identifier. The API hands out numbers for ids and strings for
/// foreign keys; both are kept as text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Id(pub String);

impl Id {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Id(s.to_string())
    }
}

impl From<u64> for Id {
    fn from(n: u64) -> Self {
        Id(n.to_string())
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(serde_json::Number),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Id(n.to_string()),
            Raw::Text(s) => Id(s),
        })
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Course {
    pub id: Id,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Seconds, summed upstream over the course's videos.
    #[serde(default)]
    pub total_duration: f64,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Course {
    pub fn duration_label(&self) -> String {
        format_duration(self.total_duration)
    }

    pub fn end_date_label(&self) -> String {
        format_date(&self.end_date)
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Video {
    pub id: Id,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub course_id: Option<Id>,
    /// Seconds.
    #[serde(default)]
    pub duration: f64,
}

impl Video {
    pub fn duration_label(&self) -> String {
        format_duration(self.duration)
    }
}

fn first_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    10
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CoursePage {
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default = "first_page")]
    pub total_pages: u32,
    #[serde(default = "first_page")]
    pub current_page: u32,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct VideoPage {
    #[serde(default)]
    pub videos: Vec<Video>,
    #[serde(default = "first_page")]
    pub total_pages: u32,
    #[serde(default = "first_page")]
    pub current_page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CourseFilter {
    pub title: String,
    pub description: String,
}

/// Body of course create and update calls.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct CourseForm {
    pub title: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
}

impl CourseForm {
    pub fn from_course(course: &Course) -> Self {
        Self {
            title: course.title.clone(),
            description: course.description.clone(),
            start_date: course.start_date.clone(),
            end_date: course.end_date.clone(),
        }
    }

    pub fn is_complete(&self) -> bool {
        [
            &self.title,
            &self.description,
            &self.start_date,
            &self.end_date,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }
}

/// A video file picked for upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_accept_numbers_and_strings() {
        let video: Video =
            serde_json::from_str(r#"{"id":11,"title":"Intro","course_id":"3","duration":30}"#)
                .unwrap();
        assert_eq!(video.id, Id::from(11));
        assert_eq!(video.course_id, Some(Id::from("3")));
        assert_eq!(video.duration, 30.0);
    }

    #[test]
    fn paging_fields_default_when_missing() {
        let page: VideoPage = serde_json::from_str(r#"{"videos":[]}"#).unwrap();
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.per_page, 10);
    }

    #[test]
    fn course_form_requires_every_field() {
        let mut form = CourseForm {
            title: "Rust".into(),
            description: "Ownership".into(),
            start_date: "2024-01-01".into(),
            end_date: "2024-02-01".into(),
        };
        assert!(form.is_complete());
        form.end_date = " ".into();
        assert!(!form.is_complete());
    }

    #[test]
    fn course_labels() {
        let course: Course = serde_json::from_str(
            r#"{"id":1,"title":"Rust","description":"","total_duration":125,"start_date":"2024-01-01","end_date":"2024-03-09"}"#,
        )
        .unwrap();
        assert_eq!(course.duration_label(), "2m 5s");
        assert_eq!(course.end_date_label(), "09/03/2024");
    }
}
