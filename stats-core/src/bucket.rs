//! Aggregation buckets as returned by the stats endpoints.
//!
//! A bucket is one row of an aggregate, keyed by either a level number or a
//! week number, holding a sparse mapping from metric name to value. Some
//! metrics are plain numbers (`successful_runs: 5`), others are themselves
//! keyed by level or student (`successful_runs: {"L1": 3, "L2": 5}`).
//! A metric that did not occur is simply absent.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The discrete x-axis a bucket collection is aggregated over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Level,
    Week,
}

impl Axis {
    /// Name of the bucket field holding the axis value.
    pub fn field_name(&self) -> &'static str {
        match self {
            Axis::Level => "level",
            Axis::Week => "week",
        }
    }

    /// Default x-axis title for charts over this axis.
    pub fn title(&self) -> &'static str {
        match self {
            Axis::Level => "Level #",
            Axis::Week => "Week #",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// A single entry of a bucket's `data` mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    /// Sub-metrics keyed by level (`L3`), student name, and so on.
    /// A `null` sub-value is kept so its key is still discoverable.
    Nested(BTreeMap<String, Option<f64>>),
    /// Anything else the server sends (null, strings). Treated as absent.
    Other(serde_json::Value),
}

impl MetricValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            MetricValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_nested(&self) -> Option<&BTreeMap<String, Option<f64>>> {
        match self {
            MetricValue::Nested(map) => Some(map),
            _ => None,
        }
    }
}

/// One aggregation row keyed by level or week.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week: Option<i64>,
    #[serde(default)]
    pub data: BTreeMap<String, MetricValue>,
}

impl Bucket {
    /// Empty bucket for the given level.
    pub fn for_level(level: i64) -> Self {
        Self {
            level: Some(level),
            ..Self::default()
        }
    }

    /// Empty bucket for the given week.
    pub fn for_week(week: i64) -> Self {
        Self {
            week: Some(week),
            ..Self::default()
        }
    }

    /// Add a plain numeric metric.
    pub fn with(mut self, metric: &str, value: f64) -> Self {
        self.data
            .insert(metric.to_string(), MetricValue::Number(value));
        self
    }

    /// Add a metric keyed by sub-key (level, student, ...).
    pub fn with_nested<'a>(
        mut self,
        metric: &str,
        entries: impl IntoIterator<Item = (&'a str, f64)>,
    ) -> Self {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), Some(v)))
            .collect();
        self.data.insert(metric.to_string(), MetricValue::Nested(map));
        self
    }

    pub fn axis_value(&self, axis: Axis) -> Option<i64> {
        match axis {
            Axis::Level => self.level,
            Axis::Week => self.week,
        }
    }

    pub fn metric(&self, name: &str) -> Option<&MetricValue> {
        self.data.get(name)
    }

    /// Resolve a dotted path such as `data.successful_runs.L3` or `week`.
    ///
    /// Empty segments are ignored, so `data.quiz_score_max.` resolves the
    /// same as `data.quiz_score_max`. Anything missing or of the wrong
    /// shape resolves to `None`.
    pub fn resolve(&self, path: &str) -> Option<f64> {
        let mut segments = path.split('.').filter(|s| !s.is_empty());
        let head = segments.next()?;
        match head {
            "level" => self.level.map(|v| v as f64).filter(|_| segments.next().is_none()),
            "week" => self.week.map(|v| v as f64).filter(|_| segments.next().is_none()),
            "data" => {
                let value = self.data.get(segments.next()?)?;
                match (value, segments.next(), segments.next()) {
                    (MetricValue::Number(n), None, _) => Some(*n),
                    (MetricValue::Nested(map), Some(key), None) => map.get(key).copied().flatten(),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn week_bucket() -> Bucket {
        serde_json::from_str(
            r#"{"week": 3, "data": {"successful_runs": {"L1": 4, "L2": null}, "error_rate": 12.5, "note": "x"}}"#,
        )
        .unwrap()
    }

    #[test]
    fn deserializes_mixed_metric_shapes() {
        let bucket = week_bucket();
        assert_eq!(bucket.week, Some(3));
        assert_eq!(bucket.level, None);
        assert_eq!(bucket.metric("error_rate"), Some(&MetricValue::Number(12.5)));
        let nested = bucket.metric("successful_runs").and_then(|m| m.as_nested()).unwrap();
        assert_eq!(nested.len(), 2);
        assert!(matches!(bucket.metric("note"), Some(MetricValue::Other(_))));
    }

    #[test]
    fn missing_data_defaults_to_empty() {
        let bucket: Bucket = serde_json::from_str(r#"{"level": 2}"#).unwrap();
        assert_eq!(bucket.level, Some(2));
        assert!(bucket.data.is_empty());
    }

    #[test]
    fn resolves_paths() {
        let bucket = week_bucket();
        assert_eq!(bucket.resolve("week"), Some(3.0));
        assert_eq!(bucket.resolve("level"), None);
        assert_eq!(bucket.resolve("data.error_rate"), Some(12.5));
        assert_eq!(bucket.resolve("data.successful_runs.L1"), Some(4.0));
        assert_eq!(bucket.resolve("data.successful_runs.L2"), None);
        assert_eq!(bucket.resolve("data.successful_runs.L9"), None);
        assert_eq!(bucket.resolve("data.successful_runs"), None);
        assert_eq!(bucket.resolve("data.error_rate."), Some(12.5));
        assert_eq!(bucket.resolve("data.missing"), None);
        assert_eq!(bucket.resolve("data.note"), None);
        assert_eq!(bucket.resolve(""), None);
    }

    #[test]
    fn builder_matches_parsed_shape() {
        let built = Bucket::for_week(3)
            .with("error_rate", 12.5)
            .with_nested("successful_runs", [("L1", 4.0)]);
        assert_eq!(built.resolve("data.successful_runs.L1"), Some(4.0));
        assert_eq!(built.axis_value(Axis::Week), Some(3));
        assert_eq!(built.axis_value(Axis::Level), None);
    }

    #[test]
    fn serializes_without_absent_axis() {
        let json = serde_json::to_value(Bucket::for_level(1).with("failed_runs", 2.0)).unwrap();
        assert_eq!(json, serde_json::json!({"level": 1, "data": {"failed_runs": 2.0}}));
    }
}
