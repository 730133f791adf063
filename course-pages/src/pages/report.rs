//! Per-course analytics. The only report is the share of the course's total
//! running time taken by each video, drawn as a pie chart.

use crate::client::{ClientError, CoursesApi};
use crate::model::{Id, Video};

use super::LoadState;

const LOAD_FAILED: &str = "Erro ao buscar dados dos vídeos";
const FIRST_PAGE_SIZE: u32 = 10;

/// Slice colors, assigned by position so a chart renders the same every time.
pub const PALETTE: [&str; 10] = [
    "#4E79A7", "#F28E2B", "#E15759", "#76B7B2", "#59A14F", "#EDC948", "#B07AA1", "#FF9DA7",
    "#9C755F", "#BAB0AC",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportKind {
    VideoDuration,
}

impl ReportKind {
    pub const ALL: [ReportKind; 1] = [ReportKind::VideoDuration];

    pub fn id(self) -> &'static str {
        match self {
            ReportKind::VideoDuration => "video-duration",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ReportKind::VideoDuration => "Duração dos Vídeos",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DurationSlice {
    pub label: String,
    pub duration: f64,
    /// Share of the summed durations, 0..=100.
    pub percent: f64,
    pub color: &'static str,
}

impl DurationSlice {
    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.percent)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DurationReport {
    pub slices: Vec<DurationSlice>,
}

impl DurationReport {
    /// Zero total duration gives every slice 0%.
    pub fn from_videos(videos: &[Video]) -> Self {
        let total: f64 = videos.iter().map(|v| v.duration.max(0.0)).sum();
        let slices = videos
            .iter()
            .enumerate()
            .map(|(i, video)| {
                let duration = video.duration.max(0.0);
                DurationSlice {
                    label: video.title.clone(),
                    duration,
                    percent: if total > 0.0 {
                        duration * 100.0 / total
                    } else {
                        0.0
                    },
                    color: PALETTE[i % PALETTE.len()],
                }
            })
            .collect();
        Self { slices }
    }

    pub fn total_duration(&self) -> f64 {
        self.slices.iter().map(|s| s.duration).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

/// Every video of a course. The API has no "all items" mode, so a course
/// spanning several pages costs a second call sized to hold everything.
pub async fn fetch_all_videos(api: &dyn CoursesApi, course_id: &Id) -> Result<Vec<Video>, ClientError> {
    let first = api.list_videos(course_id, 1, FIRST_PAGE_SIZE).await?;
    if first.total_pages <= 1 {
        return Ok(first.videos);
    }
    let per_page = first.per_page.max(1).saturating_mul(first.total_pages);
    tracing::debug!(course_id = %course_id, per_page, "fetching all videos in one page");
    Ok(api.list_videos(course_id, 1, per_page).await?.videos)
}

/// `/courses/{id}/reports`
#[derive(Clone, Debug)]
pub struct ReportPage {
    pub course_id: Id,
    pub selected: ReportKind,
    pub report: DurationReport,
    pub state: LoadState,
}

impl ReportPage {
    pub fn new(course_id: Id) -> Self {
        Self {
            course_id,
            selected: ReportKind::VideoDuration,
            report: DurationReport::default(),
            state: LoadState::Idle,
        }
    }

    pub async fn select(&mut self, api: &dyn CoursesApi, kind: ReportKind) {
        self.selected = kind;
        self.load(api).await;
    }

    pub async fn load(&mut self, api: &dyn CoursesApi) {
        self.state = LoadState::Loading;
        match self.selected {
            ReportKind::VideoDuration => match fetch_all_videos(api, &self.course_id).await {
                Ok(videos) => {
                    self.report = DurationReport::from_videos(&videos);
                    self.state = LoadState::Loaded;
                }
                Err(e) => {
                    tracing::warn!(course_id = %self.course_id, "duration report failed: {}", e);
                    self.state = LoadState::Failed(LOAD_FAILED.to_string());
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::fake::{video, Call, FakeApi};

    #[test]
    fn shares_of_total_duration() {
        let report = DurationReport::from_videos(&[
            video(1, "a", 30.0),
            video(2, "b", 60.0),
            video(3, "c", 10.0),
        ]);

        let percents: Vec<f64> = report.slices.iter().map(|s| s.percent).collect();
        assert_eq!(percents, vec![30.0, 60.0, 10.0]);
        assert_eq!(percents.iter().sum::<f64>(), 100.0);
        let labels: Vec<String> = report.slices.iter().map(|s| s.percent_label()).collect();
        assert_eq!(labels, vec!["30.0%", "60.0%", "10.0%"]);
        assert_eq!(report.total_duration(), 100.0);
    }

    #[test]
    fn one_decimal_for_display() {
        let report = DurationReport::from_videos(&[video(1, "a", 1.0), video(2, "b", 2.0)]);
        assert_eq!(report.slices[0].percent_label(), "33.3%");
        assert_eq!(report.slices[1].percent_label(), "66.7%");
    }

    #[test]
    fn zero_total_gives_zero_shares() {
        let report = DurationReport::from_videos(&[video(1, "a", 0.0), video(2, "b", 0.0)]);
        assert!(report.slices.iter().all(|s| s.percent == 0.0));
    }

    #[test]
    fn colors_are_deterministic() {
        let videos: Vec<Video> = (1..=12).map(|i| video(i, "v", 1.0)).collect();
        let first = DurationReport::from_videos(&videos);
        let second = DurationReport::from_videos(&videos);
        assert_eq!(first, second);
        assert_eq!(first.slices[0].color, PALETTE[0]);
        assert_eq!(first.slices[10].color, PALETTE[0]);
    }

    #[tokio::test]
    async fn single_page_course_needs_one_call() {
        let api = FakeApi {
            videos: (1..=4).map(|i| video(i, "v", 10.0)).collect(),
            ..FakeApi::default()
        };
        let mut page = ReportPage::new(Id::from(1));

        page.load(&api).await;

        assert_eq!(page.report.slices.len(), 4);
        assert_eq!(api.calls().len(), 1);
    }

    #[tokio::test]
    async fn multi_page_course_is_fetched_in_one_sized_page() {
        let api = FakeApi {
            videos: (1..=25).map(|i| video(i, "v", 4.0)).collect(),
            ..FakeApi::default()
        };
        let mut page = ReportPage::new(Id::from(1));

        page.load(&api).await;

        assert_eq!(page.report.slices.len(), 25);
        assert_eq!(
            api.calls(),
            vec![
                Call::ListVideos {
                    course_id: Id::from(1),
                    page: 1,
                    per_page: 10
                },
                Call::ListVideos {
                    course_id: Id::from(1),
                    page: 1,
                    per_page: 30
                },
            ]
        );
        assert!(page.report.slices.iter().all(|s| s.percent == 4.0));
    }

    #[tokio::test]
    async fn failure_is_reported() {
        let api = FakeApi {
            fail_reads: true,
            ..FakeApi::default()
        };
        let mut page = ReportPage::new(Id::from(1));

        page.select(&api, ReportKind::VideoDuration).await;

        assert_eq!(page.state.error(), Some(LOAD_FAILED));
        assert!(page.report.is_empty());
    }
}
