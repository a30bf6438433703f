//! Program-wide usage statistics
//!
//! Data flow:
//! 1. On mount: load the Chart.js glue and register every chart of the admin
//!    layout against its canvas.
//! 2. Select the default period, which fetches `/program-stats` for that window.
//! 3. The response is reshaped into a dashboard plan and applied: series are
//!    replaced in place and the shared legends are rebuilt.
//! 4. Each period toggle repeats steps 2-3 for its window.

use dioxus::prelude::*;
use stats_chart_ui::components::{ChartSection, LoadingSpinner, PeriodToggle};
use stats_chart_ui::loader::{select_period, PERIODS};
use stats_chart_ui::state::AppState;
use stats_chart_ui::{api, js_bridge};
use stats_core::dashboard::{self, pick, ADMIN_EXCEPTIONS_LEGEND, ADMIN_QUIZ_LEGEND, ADMIN_RUNS_LEGEND};

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("admin-stats-root"))
        .launch(App);
}

fn load(state: AppState, weeks: u32) {
    select_period(state, weeks, api::load_admin_plan);
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);
    let layout = use_hook(dashboard::admin_layout);

    let initial = layout.clone();
    use_effect(move || {
        js_bridge::init_charts();
        log::info!("registering {} admin charts", initial.len());
        state.create_charts(initial.clone());
        if let Some(period) = PERIODS.first() {
            load(state, period.weeks);
        }
    });

    let loading = state.period.read().loading;
    let data_style = if loading { "display: none;" } else { "display: block;" };

    let sections = vec![
        (
            "Program runs",
            pick(
                &layout,
                &[
                    "program-runs-per-level",
                    "error-rate-per-level",
                    "successful-runs-per-week",
                    "failed-runs-per-week",
                ],
            ),
            Some(ADMIN_RUNS_LEGEND.to_string()),
        ),
        (
            "Exceptions",
            pick(&layout, &["exceptions-per-level", "exceptions-per-week"]),
            Some(ADMIN_EXCEPTIONS_LEGEND.to_string()),
        ),
        (
            "User types",
            pick(&layout, &["users-per-level", "users-per-week"]),
            None,
        ),
        (
            "Quizzes",
            pick(
                &layout,
                &[
                    "completed-quiz-per-level",
                    "completed-quiz-per-week",
                    "abandoned-quiz-per-level",
                    "abandoned-quiz-per-week",
                    "max-score-per-level",
                    "max-score-per-week",
                    "min-score-per-level",
                    "min-score-per-week",
                    "avg-score-per-level",
                    "avg-score-per-week",
                ],
            ),
            Some(ADMIN_QUIZ_LEGEND.to_string()),
        ),
    ];

    rsx! {
        div {
            style: "max-width: 1200px; margin: 0 auto; padding: 8px; font-family: system-ui, -apple-system, sans-serif;",

            PeriodToggle { on_select: move |weeks| load(state, weeks) }

            if loading {
                LoadingSpinner {}
            }

            // Canvases stay mounted while loading so live charts keep their targets.
            div {
                class: "stats-data",
                style: "{data_style}",
                for (title, specs, legend) in sections {
                    ChartSection { key: "{title}", title: title.to_string(), specs, legend }
                }
            }
        }
    }
}
