//! Student tiles on the class page.
//!
//! Each student gets a small "Average Quiz" chart, and the tile that is
//! selected expands into a "Level Progression" chart. Tile data is embedded
//! in the page rather than fetched.

use crate::bucket::Bucket;
use crate::chart::{ChartBackend, ChartKind, ChartRegistry, ChartSpec, LegendPosition};
use crate::error::Result;
use crate::palette;
use crate::series::{build_single_series, ordinal, SeriesDescriptor};
use serde::{Deserialize, Serialize};
use std::rc::Rc;

pub const PROGRESSION_CHART_ID: &str = "student-progression-chart";
const PROGRESSION_MAX: f64 = 15.0;
const QUIZ_MAX: f64 = 100.0;
const QUIZ_COLOR: &str = "#9BD0F5";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentSummary {
    pub username: String,
    #[serde(default)]
    pub successful_runs: Vec<f64>,
    #[serde(default)]
    pub failed_runs: Vec<f64>,
    #[serde(default, alias = "average_quizzes_runs_per_level")]
    pub average_quiz: Vec<f64>,
}

/// A level of the tile charts, given by the host page as a number or as a
/// label such as `"3"` or `"L3"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TileLevel {
    Number(i64),
    Label(String),
}

impl TileLevel {
    /// Level number of this entry. Labels without a number fall back to
    /// their 1-based `position`.
    pub fn number(&self, position: usize) -> i64 {
        let fallback = i64::try_from(position + 1).unwrap_or(i64::MAX);
        match self {
            TileLevel::Number(n) => *n,
            TileLevel::Label(label) => {
                let label = label.trim();
                label
                    .parse()
                    .ok()
                    .or_else(|| ordinal(label))
                    .unwrap_or(fallback)
            }
        }
    }
}

/// Tile data of a class page. Per-student vectors are indexed like `levels`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TilePage {
    #[serde(default)]
    pub levels: Vec<TileLevel>,
    #[serde(default)]
    pub students: Vec<StudentSummary>,
}

impl TilePage {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn student(&self, username: &str) -> Option<&StudentSummary> {
        self.students.iter().find(|s| s.username == username)
    }

    /// One bucket per level carrying the given per-level columns.
    /// Columns shorter than `levels` leave the remaining levels without a value.
    fn level_buckets(&self, columns: &[(&str, &[f64])]) -> Rc<Vec<Bucket>> {
        let buckets = self
            .levels
            .iter()
            .enumerate()
            .map(|(i, level)| {
                columns
                    .iter()
                    .fold(Bucket::for_level(level.number(i)), |bucket, (name, values)| {
                        match values.get(i) {
                            Some(v) => bucket.with(name, *v),
                            None => bucket,
                        }
                    })
            })
            .collect();
        Rc::new(buckets)
    }

    pub fn progression_series(&self, student: &StudentSummary) -> Vec<SeriesDescriptor> {
        let buckets = self.level_buckets(&[
            ("successful_runs", student.successful_runs.as_slice()),
            ("failed_runs", student.failed_runs.as_slice()),
        ]);
        vec![
            build_single_series("Successful runs", &buckets, "data.successful_runs", palette::SUCCESS, false),
            build_single_series("Failed runs", &buckets, "data.failed_runs", palette::FAIL, false),
        ]
    }

    pub fn quiz_series(&self, student: &StudentSummary) -> Vec<SeriesDescriptor> {
        let buckets = self.level_buckets(&[("average_quiz", student.average_quiz.as_slice())]);
        vec![build_single_series(
            "Average quiz per level (%)",
            &buckets,
            "data.average_quiz",
            QUIZ_COLOR,
            false,
        )]
    }
}

pub fn progression_spec() -> ChartSpec {
    ChartSpec::new(PROGRESSION_CHART_ID, ChartKind::Bar, "Level Progression", "Levels")
        .legend(LegendPosition::Top)
        .stacked()
        .y_max(PROGRESSION_MAX)
}

pub fn quiz_chart_id(username: &str) -> String {
    format!("canvas-{username}")
}

pub fn quiz_spec(username: &str) -> ChartSpec {
    ChartSpec::new(&quiz_chart_id(username), ChartKind::Line, "Average Quiz", "Levels")
        .legend(LegendPosition::Top)
        .stacked()
        .y_max(QUIZ_MAX)
}

/// Create the average quiz chart of every student that does not have one yet.
/// Returns how many charts were created.
pub fn load_quiz_charts<B: ChartBackend>(charts: &mut ChartRegistry<B>, page: &TilePage) -> Result<usize> {
    let mut created = 0;
    for student in &page.students {
        let spec = quiz_spec(&student.username);
        if charts.is_registered(&spec.id) {
            continue;
        }
        let id = spec.id.clone();
        charts.create_chart(spec);
        charts.replace_series(&id, page.quiz_series(student))?;
        created += 1;
    }
    Ok(created)
}

/// What a tile click should do to the expanded tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileAction {
    Expand(String),
    Collapse,
}

/// At most one selected tile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileSelection {
    selected: Option<String>,
}

impl TileSelection {
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Clicking the selected tile deselects it; any other tile becomes selected.
    pub fn click(&mut self, username: &str) -> TileAction {
        if self.selected.as_deref() == Some(username) {
            self.selected = None;
            TileAction::Collapse
        } else {
            self.selected = Some(username.to_string());
            TileAction::Expand(username.to_string())
        }
    }
}

/// Rebuild the progression chart for `username`, replacing the previous one.
/// Unknown students leave the chart untouched and return `false`.
pub fn show_progression<B: ChartBackend>(
    charts: &mut ChartRegistry<B>,
    page: &TilePage,
    username: &str,
) -> Result<bool> {
    let Some(student) = page.student(username) else {
        log::warn!("no tile data for student {username}");
        return Ok(false);
    };
    charts.create_chart(progression_spec());
    charts.replace_series(PROGRESSION_CHART_ID, page.progression_series(student))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::testing::RecordingBackend;

    fn page() -> TilePage {
        TilePage::from_json(
            r#"{
                "levels": [1, 2, 3],
                "students": [
                    {"username": "alice", "successful_runs": [4, 2, 1], "failed_runs": [1, 0], "average_quizzes_runs_per_level": [80, 90, 100]},
                    {"username": "bob"}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn selecting_twice_collapses() {
        let mut selection = TileSelection::default();
        assert_eq!(selection.click("alice"), TileAction::Expand("alice".to_string()));
        assert_eq!(selection.click("bob"), TileAction::Expand("bob".to_string()));
        assert_eq!(selection.selected(), Some("bob"));
        assert_eq!(selection.click("bob"), TileAction::Collapse);
        assert_eq!(selection.selected(), None);
    }

    #[test]
    fn progression_series_follow_levels() {
        let page = page();
        let alice = page.student("alice").unwrap();
        let series = page.progression_series(alice);
        assert_eq!(series[0].points(), vec![(1, Some(4.0)), (2, Some(2.0)), (3, Some(1.0))]);
        assert_eq!(series[1].points(), vec![(1, Some(1.0)), (2, Some(0.0)), (3, None)]);
        assert_eq!(series[1].color, palette::FAIL);
    }

    #[test]
    fn levels_may_be_labels() {
        let page = TilePage::from_json(
            r#"{"levels": ["1", "L2", 3, "extra"], "students": [{"username": "dan", "successful_runs": [1, 2, 3, 4]}]}"#,
        )
        .unwrap();
        let dan = page.student("dan").unwrap();
        let xs: Vec<i64> = page.progression_series(dan)[0].points().iter().map(|(x, _)| *x).collect();
        assert_eq!(xs, vec![1, 2, 3, 4]);
    }

    #[test]
    fn expanding_replaces_progression_chart() {
        let page = page();
        let mut charts = ChartRegistry::new(RecordingBackend::default());
        assert!(show_progression(&mut charts, &page, "alice").unwrap());
        assert!(show_progression(&mut charts, &page, "bob").unwrap());
        assert!(!show_progression(&mut charts, &page, "nobody").unwrap());
        assert_eq!(charts.len(), 1);
        assert_eq!(charts.backend().destroyed, vec![PROGRESSION_CHART_ID.to_string()]);
        assert_eq!(charts.spec(PROGRESSION_CHART_ID).and_then(|s| s.y_max), Some(15.0));
    }

    #[test]
    fn quiz_charts_load_once() {
        let page = page();
        let mut charts = ChartRegistry::new(RecordingBackend::default());
        assert_eq!(load_quiz_charts(&mut charts, &page).unwrap(), 2);
        assert_eq!(load_quiz_charts(&mut charts, &page).unwrap(), 0);
        let alice = charts.series(&quiz_chart_id("alice")).unwrap();
        assert_eq!(alice[0].points()[2], (3, Some(100.0)));
        assert!(charts.series("canvas-bob").unwrap()[0].points().iter().all(|(_, y)| y.is_none()));
    }
}
