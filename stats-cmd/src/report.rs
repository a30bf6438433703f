//! Rendering a dashboard plan for the terminal.

use serde_json::{json, Value};
use stats_core::dashboard::DashboardPlan;
use stats_core::series::SeriesDescriptor;
use std::fmt::Write;

fn series_json(series: &SeriesDescriptor) -> Value {
    json!({
        "label": series.label,
        "color": series.color,
        "x": series.keys.x.field_name(),
        "y": series.keys.y,
        "points": series.points(),
    })
}

/// The plan with every series resolved to its points.
pub fn to_json(plan: &DashboardPlan) -> Value {
    let charts: Vec<Value> = plan
        .charts
        .iter()
        .map(|(id, series)| {
            json!({
                "id": id,
                "series": series.iter().map(series_json).collect::<Vec<_>>(),
            })
        })
        .collect();
    let legends: Vec<Value> = plan
        .legends
        .iter()
        .map(|legend| {
            json!({
                "container": legend.container_id,
                "group": legend.group,
                "entries": legend.series.iter().map(|s| json!({"label": s.label, "color": s.color})).collect::<Vec<_>>(),
            })
        })
        .collect();
    json!({ "charts": charts, "legends": legends })
}

/// One line per chart and legend, listing series labels.
pub fn summary(plan: &DashboardPlan) -> String {
    let mut out = String::new();
    for (id, series) in &plan.charts {
        let labels: Vec<&str> = series.iter().map(|s| s.label.as_str()).collect();
        let _ = writeln!(out, "{id:<40} {:>3} series  {}", series.len(), labels.join(", "));
    }
    for legend in &plan.legends {
        let labels: Vec<&str> = legend.series.iter().map(|s| s.label.as_str()).collect();
        let _ = writeln!(
            out,
            "legend {} ({}): {}",
            legend.container_id,
            legend.group,
            labels.join(", ")
        );
    }
    out
}

pub fn print(plan: &DashboardPlan, as_json: bool) -> anyhow::Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(&to_json(plan))?);
    } else {
        print!("{}", summary(plan));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stats_core::dashboard::{admin_plan, ADMIN_EXCEPTIONS_LEGEND};
    use stats_core::response::ProgramStats;

    fn plan() -> DashboardPlan {
        let stats = ProgramStats::from_json(
            r#"{
                "per_level": [
                    {"level": 1, "data": {"successful_runs": 5, "failed_runs": 2, "ParseException": 2}},
                    {"level": 2, "data": {"successful_runs": 1, "failed_runs": 0}}
                ],
                "per_week": [
                    {"week": 10, "data": {"successful_runs": {"L2": 1, "L1": 4}, "failed_runs": {"L1": 2}}}
                ]
            }"#,
        )
        .unwrap();
        admin_plan(&stats)
    }

    #[test]
    fn json_resolves_points() {
        let value = to_json(&plan());
        let runs = value["charts"]
            .as_array()
            .unwrap()
            .iter()
            .find(|c| c["id"] == "successful-runs-per-week")
            .unwrap();
        assert_eq!(runs["series"][0]["label"], "L1");
        assert_eq!(runs["series"][0]["x"], "week");
        assert_eq!(runs["series"][0]["points"], json!([[10, 4.0]]));
        assert_eq!(runs["series"][1]["label"], "L2");
    }

    #[test]
    fn summary_lists_legends() {
        let text = summary(&plan());
        assert!(text.contains("program-runs-per-level"));
        assert!(text
            .lines()
            .any(|l| l.starts_with(&format!("legend {ADMIN_EXCEPTIONS_LEGEND}")) && l.ends_with("Parse")));
    }
}
