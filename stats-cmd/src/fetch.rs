//! Obtaining stats responses, either over HTTP or from a saved file.

use anyhow::Context;
use chrono::Local;
use log::info;
use stats_core::dashboard::{admin_plan, class_plan as class_dashboard_plan, DashboardPlan};
use stats_core::response::{class_stats_path, program_stats_path, ClassStats, ProgramStats, StatsQuery};
use std::time::Duration;

/// GET `server` + `path` and return the body.
pub async fn get(server: &str, path: &str) -> anyhow::Result<String> {
    let url = format!("{}{}", server.trim_end_matches('/'), path);
    info!("Fetching {}", url);

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(60))
        .build()?;
    let response = client
        .get(&url)
        .send()
        .await
        .with_context(|| format!("GET {url} failed"))?;
    if !response.status().is_success() {
        anyhow::bail!("GET {} returned {}", url, response.status());
    }
    Ok(response.text().await?)
}

/// The body of a saved response, or a freshly fetched one.
async fn body(server: &str, path: &str, input: Option<&str>) -> anyhow::Result<String> {
    match input {
        Some(file) => {
            info!("Reading saved response from {}", file);
            std::fs::read_to_string(file).with_context(|| format!("reading {file}"))
        }
        None => get(server, path).await,
    }
}

fn query(weeks_back: u32) -> StatsQuery {
    StatsQuery::weeks_back(Local::now().date_naive(), weeks_back)
}

pub async fn program_plan(server: &str, weeks_back: u32, input: Option<&str>) -> anyhow::Result<DashboardPlan> {
    let path = program_stats_path(&query(weeks_back));
    let body = body(server, &path, input).await?;
    let stats = ProgramStats::from_json(&body).context("decoding program stats")?;
    info!(
        "{} level buckets, {} week buckets",
        stats.per_level.len(),
        stats.per_week.len()
    );
    Ok(admin_plan(&stats))
}

pub async fn class_plan(
    server: &str,
    class_id: &str,
    weeks_back: u32,
    input: Option<&str>,
) -> anyhow::Result<DashboardPlan> {
    let path = class_stats_path(class_id, &query(weeks_back));
    let body = body(server, &path, input).await?;
    let stats = ClassStats::from_json(&body).with_context(|| format!("decoding stats of class {class_id}"))?;
    Ok(class_dashboard_plan(&stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn saved(json: &str, name: &str) -> String {
        let path = std::env::temp_dir().join(format!("stats-cmd-{}-{name}.json", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(json.as_bytes()).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[tokio::test]
    async fn program_plan_reads_saved_response() {
        let input = saved(
            r#"{"per_level": [{"level": 1, "data": {"successful_runs": 3, "failed_runs": 1}}], "per_week": []}"#,
            "program",
        );
        let plan = program_plan("http://unused", 4, Some(&input)).await.unwrap();
        let runs = plan.series("program-runs-per-level").unwrap();
        assert_eq!(runs[0].points(), vec![(1, Some(3.0))]);
        std::fs::remove_file(input).unwrap();
    }

    #[tokio::test]
    async fn malformed_saved_response_is_an_error() {
        let input = saved("{not json", "class");
        assert!(class_plan("http://unused", "7", 4, Some(&input)).await.is_err());
        std::fs::remove_file(input).unwrap();
    }

    #[tokio::test]
    async fn missing_input_file_is_an_error() {
        assert!(program_plan("http://unused", 4, Some("/nonexistent/stats.json")).await.is_err());
    }
}
