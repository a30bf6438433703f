//! Chart specifications and the registry of live chart instances.
//!
//! Rendering itself is delegated to a [`ChartBackend`]; in the browser that
//! is Chart.js, in tests an in-memory recorder. The registry owns the series
//! each chart currently shows so legend clicks can flip their visibility.

use crate::error::{Result, StatsError};
use crate::series::SeriesDescriptor;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
}

/// Placement of the charting library's built-in legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    Bottom,
    Left,
    Right,
}

/// Static description of one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub id: String,
    pub kind: ChartKind,
    pub title: String,
    pub x_title: String,
    /// `None` hides the built-in legend; a shared legend is used instead.
    pub legend: Option<LegendPosition>,
    pub percent: bool,
    pub stacked: bool,
    pub y_max: Option<f64>,
    /// CSS class of the canvas, used to address charts sharing a legend.
    pub group: Option<String>,
}

impl ChartSpec {
    pub fn new(id: &str, kind: ChartKind, title: &str, x_title: &str) -> Self {
        Self {
            id: id.to_string(),
            kind,
            title: title.to_string(),
            x_title: x_title.to_string(),
            legend: None,
            percent: false,
            stacked: false,
            y_max: None,
            group: None,
        }
    }

    pub fn legend(mut self, position: LegendPosition) -> Self {
        self.legend = Some(position);
        self
    }

    pub fn percent(mut self) -> Self {
        self.percent = true;
        self
    }

    pub fn stacked(mut self) -> Self {
        self.stacked = true;
        self
    }

    pub fn y_max(mut self, max: f64) -> Self {
        self.y_max = Some(max);
        self
    }

    pub fn group(mut self, class: &str) -> Self {
        self.group = Some(class.trim_start_matches('.').to_string());
        self
    }

    /// Whether this chart is addressed by a class selector like `.admin-runs-chart`.
    pub fn matches(&self, selector: &str) -> bool {
        self.group
            .as_deref()
            .is_some_and(|g| g == selector.trim().trim_start_matches('.'))
    }

    /// Chart.js configuration with an empty dataset list.
    ///
    /// The `%` tick formatter of percent charts is a JS callback and is
    /// installed by the bridge; here the axis is only bounded and titled.
    pub fn to_chartjs_config(&self) -> serde_json::Value {
        let mut y = json!({
            "beginAtZero": true,
            "stacked": self.stacked,
            "title": {
                "display": self.percent,
                "text": if self.percent { "Percentage" } else { "" },
            },
        });
        if self.percent {
            y["min"] = json!(0);
            y["max"] = json!(100);
        } else if let Some(max) = self.y_max {
            y["max"] = json!(max);
        }

        json!({
            "type": self.kind,
            "data": { "datasets": [] },
            "options": {
                "plugins": {
                    "title": { "display": true, "text": self.title },
                    "legend": {
                        "display": self.legend.is_some(),
                        "position": self.legend.unwrap_or(LegendPosition::Top),
                    },
                },
                "scales": {
                    "y": y,
                    "x": {
                        "title": { "display": true, "text": self.x_title },
                        "offset": true,
                        "stacked": self.stacked,
                    },
                },
            },
        })
    }
}

/// The external charting component.
pub trait ChartBackend {
    type Handle;

    fn create(&mut self, spec: &ChartSpec) -> Self::Handle;
    /// Replace the drawn series and redraw.
    fn update(&mut self, handle: &Self::Handle, series: &[SeriesDescriptor]);
    fn destroy(&mut self, handle: Self::Handle);
}

struct LiveChart<H> {
    spec: ChartSpec,
    handle: H,
    series: Vec<SeriesDescriptor>,
}

/// Live chart instances keyed by id.
pub struct ChartRegistry<B: ChartBackend> {
    backend: B,
    charts: HashMap<String, LiveChart<B::Handle>>,
}

impl<B: ChartBackend> ChartRegistry<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            charts: HashMap::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Register a chart under `spec.id`, releasing any chart already there.
    pub fn create_chart(&mut self, spec: ChartSpec) {
        if let Some(old) = self.charts.remove(&spec.id) {
            log::debug!("replacing chart {}", spec.id);
            self.backend.destroy(old.handle);
        }
        let handle = self.backend.create(&spec);
        self.charts.insert(
            spec.id.clone(),
            LiveChart {
                spec,
                handle,
                series: Vec::new(),
            },
        );
    }

    /// Swap the full series list of a chart and redraw it.
    pub fn replace_series(&mut self, id: &str, series: Vec<SeriesDescriptor>) -> Result<()> {
        let chart = self
            .charts
            .get_mut(id)
            .ok_or_else(|| StatsError::ChartNotFound(id.to_string()))?;
        chart.series = series;
        self.backend.update(&chart.handle, &chart.series);
        Ok(())
    }

    pub fn destroy_chart(&mut self, id: &str) -> Result<()> {
        let chart = self
            .charts
            .remove(id)
            .ok_or_else(|| StatsError::ChartNotFound(id.to_string()))?;
        self.backend.destroy(chart.handle);
        Ok(())
    }

    /// Release every chart, e.g. when a view is torn down.
    pub fn clear(&mut self) {
        for (_, chart) in self.charts.drain() {
            self.backend.destroy(chart.handle);
        }
    }

    /// Flip the visibility of every series labelled `label` (compared
    /// trimmed) and redraw. Returns how many series were toggled.
    pub fn toggle_series(&mut self, id: &str, label: &str) -> Result<usize> {
        let chart = self
            .charts
            .get_mut(id)
            .ok_or_else(|| StatsError::ChartNotFound(id.to_string()))?;
        let label = label.trim();
        let mut toggled = 0;
        for series in chart.series.iter_mut().filter(|s| s.label.trim() == label) {
            series.hidden = !series.hidden;
            toggled += 1;
        }
        self.backend.update(&chart.handle, &chart.series);
        Ok(toggled)
    }

    pub fn series(&self, id: &str) -> Result<&[SeriesDescriptor]> {
        self.charts
            .get(id)
            .map(|c| c.series.as_slice())
            .ok_or_else(|| StatsError::ChartNotFound(id.to_string()))
    }

    pub fn spec(&self, id: &str) -> Option<&ChartSpec> {
        self.charts.get(id).map(|c| &c.spec)
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.charts.contains_key(id)
    }

    /// Ids of the charts addressed by a class selector, sorted.
    pub fn charts_in_group(&self, selector: &str) -> Vec<String> {
        let mut ids: Vec<String> = self
            .charts
            .values()
            .filter(|c| c.spec.matches(selector))
            .map(|c| c.spec.id.clone())
            .collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Backend that records every call instead of drawing.
    #[derive(Default)]
    pub struct RecordingBackend {
        pub created: Vec<String>,
        pub destroyed: Vec<String>,
        /// (chart id, labels of visible series) per redraw.
        pub redraws: Vec<(String, Vec<String>)>,
    }

    impl ChartBackend for RecordingBackend {
        type Handle = String;

        fn create(&mut self, spec: &ChartSpec) -> String {
            self.created.push(spec.id.clone());
            spec.id.clone()
        }

        fn update(&mut self, handle: &String, series: &[SeriesDescriptor]) {
            let visible = series
                .iter()
                .filter(|s| !s.hidden)
                .map(|s| s.label.clone())
                .collect();
            self.redraws.push((handle.clone(), visible));
        }

        fn destroy(&mut self, handle: String) {
            self.destroyed.push(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingBackend;
    use super::*;
    use crate::bucket::Bucket;
    use crate::palette;
    use crate::series::build_single_series;
    use std::rc::Rc;

    fn series(label: &str) -> SeriesDescriptor {
        let buckets = Rc::new(vec![Bucket::for_level(1).with("failed_runs", 1.0)]);
        build_single_series(label, &buckets, "data.failed_runs", palette::FAIL, false)
    }

    fn registry() -> ChartRegistry<RecordingBackend> {
        ChartRegistry::new(RecordingBackend::default())
    }

    #[test]
    fn replace_series_on_registered_chart_redraws() {
        let mut charts = registry();
        charts.create_chart(ChartSpec::new("x", ChartKind::Bar, "X", "Level #"));
        charts.replace_series("x", vec![series("A"), series("B")]).unwrap();
        assert_eq!(charts.series("x").unwrap().len(), 2);
        assert_eq!(
            charts.backend().redraws,
            vec![("x".to_string(), vec!["A".to_string(), "B".to_string()])]
        );
    }

    #[test]
    fn destroyed_chart_is_not_found() {
        let mut charts = registry();
        charts.create_chart(ChartSpec::new("x", ChartKind::Line, "X", "Week #"));
        charts.destroy_chart("x").unwrap();
        let err = charts.replace_series("x", vec![series("A")]).unwrap_err();
        assert!(matches!(err, StatsError::ChartNotFound(id) if id == "x"));
        assert!(charts.destroy_chart("x").is_err());
        assert_eq!(charts.backend().destroyed, vec!["x".to_string()]);
    }

    #[test]
    fn unknown_chart_is_not_found() {
        let mut charts = registry();
        assert!(matches!(
            charts.replace_series("nope", Vec::new()),
            Err(StatsError::ChartNotFound(_))
        ));
        assert!(charts.series("nope").is_err());
        assert!(charts.toggle_series("nope", "A").is_err());
    }

    #[test]
    fn recreating_releases_previous_instance() {
        let mut charts = registry();
        charts.create_chart(ChartSpec::new("x", ChartKind::Bar, "Old", "Level #"));
        charts.replace_series("x", vec![series("A")]).unwrap();
        charts.create_chart(ChartSpec::new("x", ChartKind::Bar, "New", "Level #"));
        assert_eq!(charts.backend().created, vec!["x".to_string(), "x".to_string()]);
        assert_eq!(charts.backend().destroyed, vec!["x".to_string()]);
        assert_eq!(charts.len(), 1);
        assert!(charts.series("x").unwrap().is_empty());
        assert_eq!(charts.spec("x").map(|s| s.title.as_str()), Some("New"));
    }

    #[test]
    fn toggle_matches_trimmed_labels() {
        let mut charts = registry();
        charts.create_chart(ChartSpec::new("x", ChartKind::Line, "X", "Level #"));
        charts
            .replace_series("x", vec![series(" Errors "), series("Errors"), series("Other")])
            .unwrap();
        assert_eq!(charts.toggle_series("x", "Errors").unwrap(), 2);
        let hidden: Vec<bool> = charts.series("x").unwrap().iter().map(|s| s.hidden).collect();
        assert_eq!(hidden, vec![true, true, false]);
        assert_eq!(charts.toggle_series("x", "errors").unwrap(), 0);
    }

    #[test]
    fn groups_by_class_selector() {
        let mut charts = registry();
        charts.create_chart(ChartSpec::new("b", ChartKind::Bar, "B", "Week #").group("runs-chart"));
        charts.create_chart(ChartSpec::new("a", ChartKind::Bar, "A", "Week #").group(".runs-chart"));
        charts.create_chart(ChartSpec::new("c", ChartKind::Bar, "C", "Week #"));
        assert_eq!(charts.charts_in_group(".runs-chart"), vec!["a", "b"]);
        assert!(charts.charts_in_group(".other").is_empty());
    }

    #[test]
    fn clear_destroys_everything() {
        let mut charts = registry();
        charts.create_chart(ChartSpec::new("a", ChartKind::Bar, "A", "Week #"));
        charts.create_chart(ChartSpec::new("b", ChartKind::Bar, "B", "Week #"));
        charts.clear();
        assert!(charts.is_empty());
        assert_eq!(charts.backend().destroyed.len(), 2);
    }

    #[test]
    fn percent_config() {
        let config = ChartSpec::new("e", ChartKind::Line, "Error rate per level", "Level #")
            .legend(LegendPosition::Top)
            .percent()
            .to_chartjs_config();
        assert_eq!(config["type"], "line");
        assert_eq!(config["options"]["plugins"]["legend"]["display"], true);
        assert_eq!(config["options"]["plugins"]["legend"]["position"], "top");
        assert_eq!(config["options"]["scales"]["y"]["max"], 100);
        assert_eq!(config["options"]["scales"]["y"]["title"]["text"], "Percentage");
        assert_eq!(config["options"]["scales"]["x"]["title"]["text"], "Level #");
    }

    #[test]
    fn stacked_config_without_legend() {
        let config = ChartSpec::new("s", ChartKind::Bar, "Runs", "Week #")
            .stacked()
            .to_chartjs_config();
        assert_eq!(config["type"], "bar");
        assert_eq!(config["options"]["plugins"]["legend"]["display"], false);
        assert_eq!(config["options"]["scales"]["y"]["stacked"], true);
        assert_eq!(config["options"]["scales"]["x"]["stacked"], true);
        assert!(config["options"]["scales"]["y"].get("max").is_none());
        assert_eq!(config["data"]["datasets"], serde_json::json!([]));
    }
}
