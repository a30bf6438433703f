//! Turning discovered keys into chart-ready series.

use crate::bucket::{Axis, Bucket};
use crate::palette;
use serde::Serialize;
use std::rc::Rc;

/// Which bucket fields a series plots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AxisKeys {
    #[serde(rename = "xAxisKey")]
    pub x: Axis,
    #[serde(rename = "yAxisKey")]
    pub y: String,
}

/// One line or bar series.
///
/// The series keeps a handle to the whole bucket collection; points are
/// resolved through `keys` when drawn, not materialized up front.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesDescriptor {
    pub label: String,
    pub color: String,
    pub data: Rc<Vec<Bucket>>,
    pub keys: AxisKeys,
    pub border_width: u8,
    pub hidden: bool,
}

impl SeriesDescriptor {
    /// Resolve the (x, y) points of this series. Buckets without an x value
    /// are skipped; a missing y value is `None`.
    pub fn points(&self) -> Vec<(i64, Option<f64>)> {
        self.data
            .iter()
            .filter_map(|b| {
                b.axis_value(self.keys.x)
                    .map(|x| (x, b.resolve(&self.keys.y)))
            })
            .collect()
    }

    /// Dataset object in the shape Chart.js expects.
    pub fn to_chartjs(&self) -> serde_json::Value {
        serde_json::json!({
            "label": self.label,
            "data": self.data,
            "parsing": self.keys,
            "backgroundColor": self.color,
            "borderColor": self.color,
            "borderWidth": self.border_width,
            "hidden": self.hidden,
        })
    }
}

fn border_width(stroke: bool) -> u8 {
    if stroke {
        2
    } else {
        0
    }
}

/// Integer following the first character of a key, e.g. `3` for `L3`.
///
/// Only the leading digits count, so `L1_exception` has ordinal 1.
pub fn ordinal(key: &str) -> Option<i64> {
    let mut chars = key.chars();
    chars.next()?;
    let rest = chars.as_str();
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..end].parse().ok()
}

/// Order keys by their embedded ordinal, numerically.
///
/// Keys without an ordinal keep their relative order and come last.
pub fn sort_by_ordinal<K: AsRef<str>>(keys: &mut [K]) {
    keys.sort_by_key(|k| match ordinal(k.as_ref()) {
        Some(n) => (0, n),
        None => (1, 0),
    });
}

/// Build one series per key, sorted by ordinal, with palette colors.
///
/// Each series reads `y_prefix + key` from every bucket of `buckets`.
/// An empty palette yields no series.
pub fn build_series<K, F>(
    keys: impl IntoIterator<Item = K>,
    buckets: &Rc<Vec<Bucket>>,
    x: Axis,
    y_prefix: &str,
    colors: &[&'static str],
    stroke: bool,
    label: F,
) -> Vec<SeriesDescriptor>
where
    K: AsRef<str>,
    F: Fn(&str) -> String,
{
    let mut keys: Vec<K> = keys.into_iter().collect();
    sort_by_ordinal(&mut keys);

    keys.iter()
        .enumerate()
        .filter_map(|(index, key)| {
            let key = key.as_ref();
            palette::cycle(colors, index).map(|color| SeriesDescriptor {
                label: label(key),
                color: color.to_string(),
                data: Rc::clone(buckets),
                keys: AxisKeys {
                    x,
                    y: format!("{y_prefix}{key}"),
                },
                border_width: border_width(stroke),
                hidden: false,
            })
        })
        .collect()
}

/// Build a single per-level series for a metric that is not keyed.
pub fn build_single_series(
    label: &str,
    buckets: &Rc<Vec<Bucket>>,
    y_path: &str,
    color: &str,
    stroke: bool,
) -> SeriesDescriptor {
    SeriesDescriptor {
        label: label.to_string(),
        color: color.to_string(),
        data: Rc::clone(buckets),
        keys: AxisKeys {
            x: Axis::Level,
            y: y_path.to_string(),
        },
        border_width: border_width(stroke),
        hidden: false,
    }
}

/// Label mappers from metric key to legend text.
pub mod labels {
    const EXCEPTION_SUFFIX: &str = "exception";

    pub fn identity(key: &str) -> String {
        key.to_string()
    }

    /// `ParseException` -> `Parse`, `L1_exception` -> `L1`.
    pub fn exception(key: &str) -> String {
        let stem = match key.len().checked_sub(EXCEPTION_SUFFIX.len()) {
            Some(cut)
                if key.is_char_boundary(cut)
                    && key[cut..].eq_ignore_ascii_case(EXCEPTION_SUFFIX) =>
            {
                &key[..cut]
            }
            _ => key,
        };
        stem.strip_suffix('_').unwrap_or(stem).to_string()
    }

    pub fn user_type(key: &str) -> String {
        match key {
            "anonymous_runs" => "Anonymous users",
            "logged_runs" => "Logged users",
            "student_runs" => "Student users",
            _ => "Unknown type users",
        }
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::{discover_keys, discover_keys_flat, is_exception_key, is_level_key};
    use crate::palette::{CHART_COLORS, LEVEL_COLORS};
    use std::collections::BTreeSet;

    fn weeks() -> Rc<Vec<Bucket>> {
        Rc::new(vec![
            Bucket::for_week(2).with_nested("successful_runs", [("L2", 1.0), ("L10", 7.0)]),
            Bucket::for_week(1).with_nested("successful_runs", [("L1", 4.0)]),
        ])
    }

    #[test]
    fn orders_keys_numerically() {
        let series = build_series(
            ["L2", "L10", "L1"],
            &weeks(),
            Axis::Week,
            "data.successful_runs.",
            LEVEL_COLORS,
            false,
            labels::identity,
        );
        let labels: Vec<&str> = series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["L1", "L2", "L10"]);
        assert_eq!(series[2].keys.y, "data.successful_runs.L10");
        assert_eq!(series[2].keys.x, Axis::Week);
    }

    #[test]
    fn keys_without_ordinal_keep_their_order_last() {
        let mut keys = vec!["student_runs", "L3", "anonymous_runs", "L1"];
        sort_by_ordinal(&mut keys);
        assert_eq!(keys, vec!["L1", "L3", "student_runs", "anonymous_runs"]);
    }

    #[test]
    fn ordinal_reads_leading_digits_after_first_char() {
        assert_eq!(ordinal("L3"), Some(3));
        assert_eq!(ordinal("L12_exception"), Some(12));
        assert_eq!(ordinal("ParseException"), None);
        assert_eq!(ordinal(""), None);
        assert_eq!(ordinal("L"), None);
    }

    #[test]
    fn palette_wraps_for_long_key_lists() {
        let keys: Vec<String> = (1..=20).map(|n| format!("L{n}")).collect();
        let series = build_series(
            &keys,
            &weeks(),
            Axis::Week,
            "data.failed_runs.",
            CHART_COLORS,
            true,
            labels::identity,
        );
        assert_eq!(series.len(), 20);
        for (i, s) in series.iter().enumerate() {
            assert_eq!(s.color, CHART_COLORS[i % CHART_COLORS.len()]);
            assert_eq!(s.border_width, 2);
        }
    }

    #[test]
    fn empty_inputs_give_empty_series() {
        let none: [&str; 0] = [];
        assert!(build_series(none, &weeks(), Axis::Week, "data.", CHART_COLORS, false, labels::identity).is_empty());
        assert!(build_series(["L1"], &weeks(), Axis::Week, "data.", &[], false, labels::identity).is_empty());
    }

    #[test]
    fn identity_labels_recover_key_set() {
        let buckets = weeks();
        let keys = discover_keys(&buckets, &["successful_runs"], is_level_key);
        let series = build_series(
            &keys,
            &buckets,
            Axis::Week,
            "data.successful_runs.",
            LEVEL_COLORS,
            false,
            labels::identity,
        );
        let recovered: BTreeSet<String> = series.into_iter().map(|s| s.label).collect();
        assert_eq!(recovered, keys);
    }

    #[test]
    fn exception_scenario() {
        let buckets = Rc::new(vec![
            Bucket::for_level(1)
                .with("successful_runs", 5.0)
                .with("L1_exception", 2.0),
            Bucket::for_level(2).with("successful_runs", 3.0),
        ]);
        let keys = discover_keys_flat(&buckets, is_exception_key);
        let series = build_series(
            &keys,
            &buckets,
            Axis::Level,
            "data.",
            CHART_COLORS,
            true,
            labels::exception,
        );
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].label, "L1");
        assert_eq!(series[0].points(), vec![(1, Some(2.0)), (2, None)]);
    }

    #[test]
    fn label_mappers() {
        assert_eq!(labels::exception("ParseException"), "Parse");
        assert_eq!(labels::exception("L1_exception"), "L1");
        assert_eq!(labels::exception("Oops"), "Oops");
        assert_eq!(labels::user_type("logged_runs"), "Logged users");
        assert_eq!(labels::user_type("whatever"), "Unknown type users");
    }

    #[test]
    fn single_series_is_per_level() {
        let buckets = Rc::new(vec![
            Bucket::for_level(2).with("error_rate", 25.0),
            Bucket::for_level(1).with("error_rate", 10.0),
        ]);
        let series = build_single_series("Error rate", &buckets, "data.error_rate", palette::FAIL, true);
        assert_eq!(series.keys.x, Axis::Level);
        assert_eq!(series.border_width, 2);
        assert_eq!(series.points(), vec![(2, Some(25.0)), (1, Some(10.0))]);
        assert!(Rc::ptr_eq(&series.data, &buckets));
    }

    #[test]
    fn chartjs_dataset_shape() {
        let buckets = Rc::new(vec![Bucket::for_level(1).with("failed_runs", 3.0)]);
        let series = build_single_series("Failed runs", &buckets, "data.failed_runs", palette::FAIL, false);
        let json = series.to_chartjs();
        assert_eq!(json["label"], "Failed runs");
        assert_eq!(json["parsing"]["xAxisKey"], "level");
        assert_eq!(json["parsing"]["yAxisKey"], "data.failed_runs");
        assert_eq!(json["backgroundColor"], "#fd7f6f");
        assert_eq!(json["borderWidth"], 0);
        assert_eq!(json["hidden"], false);
        assert_eq!(json["data"][0]["level"], 1);
    }
}
