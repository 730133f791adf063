//! Page flows of the course catalog front-end.
//!
//! Each page keeps its transient state in a plain struct and talks to the
//! gateway's `/api` surface through a [`CoursesApi`] implementation, usually
//! [`GatewayClient`].

pub mod client;
pub mod format;
pub mod model;
pub mod pages;

pub use client::{ClientError, CoursesApi, GatewayClient};
pub use model::{Course, CourseFilter, CourseForm, CoursePage, Id, Video, VideoFile, VideoPage};
pub use pages::{LoadState, Notice, NoticeKind};
