//! Usage statistics of one class
//!
//! The host page renders `<div id="class-stats-root" data-class-id="...">`
//! and, optionally, the student tile data as JSON in
//! `<script type="application/json" id="student-tiles">`.
//!
//! Data flow:
//! 1. On mount: load the Chart.js glue and register every chart of the class
//!    layout.
//! 2. Select the default period, which fetches `/class-stats/<id>`.
//! 3. The response is reshaped into a dashboard plan and applied.
//! 4. Student tiles are drawn from the embedded data once and are not
//!    affected by the period.

use dioxus::prelude::*;
use stats_chart_ui::components::{ChartSection, LoadingSpinner, PeriodToggle, SectionHeader, StudentTiles};
use stats_chart_ui::loader::{select_period, PERIODS};
use stats_chart_ui::state::AppState;
use stats_chart_ui::{api, js_bridge};
use stats_core::dashboard::{self, pick, CLASS_EXCEPTIONS_LEGEND, CLASS_RUNS_LEGEND, STUDENT_LEGEND};
use stats_core::tile::TilePage;

const ROOT_ID: &str = "class-stats-root";
const CLASS_ID_ATTRIBUTE: &str = "data-class-id";
const TILES_ID: &str = "student-tiles";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname(ROOT_ID))
        .launch(App);
}

fn tile_page() -> Option<TilePage> {
    let json = api::embedded_text(TILES_ID)?;
    match TilePage::from_json(&json) {
        Ok(page) => Some(page),
        Err(e) => {
            log::error!("invalid student tile data: {e}");
            None
        }
    }
}

fn load(state: AppState, class_id: String, weeks: u32) {
    select_period(state, weeks, move |query| api::load_class_plan(class_id, query));
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);
    let layout = use_hook(dashboard::class_layout);
    let class_id = use_hook(|| api::element_attribute(ROOT_ID, CLASS_ID_ATTRIBUTE));
    let tiles = use_hook(tile_page);

    let initial = layout.clone();
    let initial_class = class_id.clone();
    use_effect(move || {
        js_bridge::init_charts();
        state.create_charts(initial.clone());
        match (initial_class.clone(), PERIODS.first()) {
            (Some(id), Some(period)) => load(state, id, period.weeks),
            (None, _) => log::error!("#{ROOT_ID} has no {CLASS_ID_ATTRIBUTE}"),
            _ => {}
        }
    });

    let loading = state.period.read().loading;
    let data_style = if loading { "display: none;" } else { "display: block;" };

    let student_ids: Vec<&str> = layout
        .iter()
        .filter(|s| s.id.starts_with("student-"))
        .map(|s| s.id.as_str())
        .collect();
    let sections = vec![
        (
            "Class runs",
            pick(
                &layout,
                &[
                    "class-program-runs-per-level",
                    "class-error-rate-per-level",
                    "class-successful-runs-per-week",
                    "class-failed-runs-per-week",
                ],
            ),
            Some(CLASS_RUNS_LEGEND.to_string()),
        ),
        (
            "Exceptions",
            pick(&layout, &["class-exceptions-per-level", "class-exceptions-per-week"]),
            Some(CLASS_EXCEPTIONS_LEGEND.to_string()),
        ),
        ("Students", pick(&layout, &student_ids), Some(STUDENT_LEGEND.to_string())),
    ];

    rsx! {
        div {
            style: "max-width: 1200px; margin: 0 auto; padding: 8px; font-family: system-ui, -apple-system, sans-serif;",

            PeriodToggle {
                on_select: move |weeks| {
                    if let Some(id) = class_id.clone() {
                        load(state, id, weeks);
                    }
                },
            }

            if loading {
                LoadingSpinner {}
            }

            div {
                class: "stats-data",
                style: "{data_style}",
                for (title, specs, legend) in sections {
                    ChartSection { key: "{title}", title: title.to_string(), specs, legend }
                }
            }

            if let Some(page) = tiles {
                SectionHeader {
                    title: "Student progress".to_string(),
                    description: "Click a student to see their level progression.".to_string(),
                }
                StudentTiles { page }
            }
        }
    }
}
