//! Chart layouts of the admin and class dashboards, and the reshaping of a
//! stats response into the series each chart shows.

use crate::bucket::Axis;
use crate::chart::{ChartBackend, ChartKind, ChartRegistry, ChartSpec, LegendPosition};
use crate::discovery::{
    any_key, discover_keys, discover_keys_flat, is_exception_key, is_level_key, MetricKey,
};
use crate::legend::LegendBoard;
use crate::palette::{self, CHART_COLORS, LEVEL_COLORS};
use crate::response::{ClassStats, ProgramStats};
use crate::series::{build_series, build_single_series, labels, SeriesDescriptor};
use std::collections::BTreeSet;

pub const ADMIN_RUNS_LEGEND: &str = "admin-program-runs-legend";
pub const ADMIN_EXCEPTIONS_LEGEND: &str = "admin-exceptions-legend";
pub const ADMIN_QUIZ_LEGEND: &str = "admin-quiz-legend";
pub const CLASS_RUNS_LEGEND: &str = "class-program-runs-legend";
pub const CLASS_EXCEPTIONS_LEGEND: &str = "class-exceptions-legend";
pub const STUDENT_LEGEND: &str = "student-legend";

const ADMIN_RUNS_GROUP: &str = ".admin-runs-chart";
const ADMIN_EXCEPTIONS_GROUP: &str = ".admin-exceptions-chart";
const ADMIN_QUIZ_GROUP: &str = ".admin-quiz-chart";
const CLASS_RUNS_GROUP: &str = ".class-runs-chart";
const CLASS_EXCEPTIONS_GROUP: &str = ".class-exceptions-chart";
const STUDENT_GROUP: &str = ".student-chart";

const RUN_FIELDS: &[&str] = &["successful_runs", "failed_runs"];
const QUIZ_FIELDS: &[&str] = &["completed_quizzes", "abandoned_quizzes"];
const USER_TYPES: &[&str] = &["anonymous_runs", "logged_runs", "student_runs", "user_type_unknown_runs"];

/// Quiz metrics keyed by level or student, with their chart id stems.
const QUIZ_METRICS: &[(&str, &str)] = &[
    ("completed-quiz", "completed_quizzes"),
    ("abandoned-quiz", "abandoned_quizzes"),
    ("max-score", "quiz_score_max"),
    ("min-score", "quiz_score_min"),
    ("avg-score", "quiz_score_avg"),
];

fn bar(id: &str, title: &str, axis: Axis) -> ChartSpec {
    ChartSpec::new(id, ChartKind::Bar, title, axis.title())
}

fn line(id: &str, title: &str, axis: Axis) -> ChartSpec {
    ChartSpec::new(id, ChartKind::Line, title, axis.title())
}

/// Charts of the program-wide admin dashboard.
pub fn admin_layout() -> Vec<ChartSpec> {
    use Axis::{Level, Week};
    vec![
        bar("program-runs-per-level", "Program runs per level", Level)
            .legend(LegendPosition::Top)
            .stacked(),
        line("error-rate-per-level", "Error rate per level", Level)
            .legend(LegendPosition::Top)
            .percent(),
        bar("successful-runs-per-week", "Successful runs per week", Week).group(ADMIN_RUNS_GROUP),
        bar("failed-runs-per-week", "Failed runs per week", Week).group(ADMIN_RUNS_GROUP),
        line("exceptions-per-level", "Exceptions per level", Level).group(ADMIN_EXCEPTIONS_GROUP),
        line("exceptions-per-week", "Exceptions per week", Week).group(ADMIN_EXCEPTIONS_GROUP),
        bar("users-per-level", "User types per level", Level)
            .legend(LegendPosition::Top)
            .stacked(),
        bar("users-per-week", "User types per week", Week)
            .legend(LegendPosition::Top)
            .stacked(),
        bar("completed-quiz-per-level", "Completed quizzes per level", Level),
        bar("completed-quiz-per-week", "Completed quizzes per week", Week).group(ADMIN_QUIZ_GROUP),
        bar("abandoned-quiz-per-level", "Abandoned quizzes per level", Level),
        bar("abandoned-quiz-per-week", "Abandoned quizzes per week", Week).group(ADMIN_QUIZ_GROUP),
        line("max-score-per-level", "Max quiz score per level", Level),
        line("max-score-per-week", "Max quiz score per week", Week).group(ADMIN_QUIZ_GROUP),
        line("min-score-per-level", "Min quiz score per level", Level),
        line("min-score-per-week", "Min quiz score per week", Week).group(ADMIN_QUIZ_GROUP),
        line("avg-score-per-level", "Avg quiz score per level", Level),
        line("avg-score-per-week", "Avg quiz score per week", Week).group(ADMIN_QUIZ_GROUP),
    ]
}

/// Charts of the class dashboard: the class as a whole, then per student.
pub fn class_layout() -> Vec<ChartSpec> {
    use Axis::{Level, Week};
    let mut charts = vec![
        bar("class-program-runs-per-level", "Program runs per level", Level)
            .legend(LegendPosition::Top)
            .stacked(),
        line("class-error-rate-per-level", "Error rate per level", Level)
            .legend(LegendPosition::Top)
            .percent(),
        bar("class-successful-runs-per-week", "Successful runs per week", Week).group(CLASS_RUNS_GROUP),
        bar("class-failed-runs-per-week", "Failed runs per week", Week).group(CLASS_RUNS_GROUP),
        line("class-exceptions-per-level", "Exceptions per level", Level).group(CLASS_EXCEPTIONS_GROUP),
        line("class-exceptions-per-week", "Exceptions per week", Week).group(CLASS_EXCEPTIONS_GROUP),
    ];
    for axis in [Level, Week] {
        let per = axis.field_name();
        charts.push(bar(&format!("student-successful-runs-per-{per}"), &format!("Successful runs per {per}"), axis));
        charts.push(bar(&format!("student-failed-runs-per-{per}"), &format!("Failed runs per {per}"), axis));
        charts.push(line(&format!("student-error-rate-per-{per}"), &format!("Error rate per {per}"), axis).percent());
        charts.push(bar(&format!("student-completed-quiz-per-{per}"), &format!("Completed quizzes per {per}"), axis));
        charts.push(bar(&format!("student-abandoned-quiz-per-{per}"), &format!("Abandoned quizzes per {per}"), axis));
        charts.push(line(&format!("student-max-score-per-{per}"), &format!("Max quiz score per {per}"), axis));
        charts.push(line(&format!("student-min-score-per-{per}"), &format!("Min quiz score per {per}"), axis));
        charts.push(line(&format!("student-avg-score-per-{per}"), &format!("Avg quiz score per {per}"), axis));
    }
    charts
        .into_iter()
        .map(|c| if c.id.starts_with("student-") { c.group(STUDENT_GROUP) } else { c })
        .collect()
}

/// The specs of `layout` whose ids are listed, in listed order.
/// Unknown ids are skipped.
pub fn pick(layout: &[ChartSpec], ids: &[&str]) -> Vec<ChartSpec> {
    ids.iter()
        .filter_map(|id| layout.iter().find(|s| s.id == *id).cloned())
        .collect()
}

/// Shared legend content derived from a response.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendPlan {
    pub container_id: String,
    pub group: String,
    pub series: Vec<SeriesDescriptor>,
}

/// Everything one stats response changes on a dashboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardPlan {
    pub charts: Vec<(String, Vec<SeriesDescriptor>)>,
    pub legends: Vec<LegendPlan>,
}

impl DashboardPlan {
    fn chart(&mut self, id: impl Into<String>, series: Vec<SeriesDescriptor>) {
        self.charts.push((id.into(), series));
    }

    fn legend(&mut self, container_id: &str, group: &str, series: &[SeriesDescriptor]) {
        self.legends.push(LegendPlan {
            container_id: container_id.to_string(),
            group: group.to_string(),
            series: series.to_vec(),
        });
    }

    pub fn series(&self, id: &str) -> Option<&[SeriesDescriptor]> {
        self.charts
            .iter()
            .find(|(chart, _)| chart == id)
            .map(|(_, series)| series.as_slice())
    }

    /// Push every chart's series into the registry and rebuild the legends.
    ///
    /// A chart that is not registered is skipped with a warning; the other
    /// charts and all legends are still updated. Returns how many charts
    /// were updated.
    pub fn apply<B: ChartBackend>(&self, charts: &mut ChartRegistry<B>, legends: &mut LegendBoard) -> usize {
        let mut applied = 0;
        for (id, series) in &self.charts {
            match charts.replace_series(id, series.clone()) {
                Ok(()) => applied += 1,
                Err(e) => log::warn!("skipping chart update: {e}"),
            }
        }
        for legend in &self.legends {
            legends.render_legend(&legend.container_id, &legend.series, &legend.group);
        }
        log::debug!(
            "applied {} of {} charts and {} legends",
            applied,
            self.charts.len(),
            self.legends.len()
        );
        applied
    }
}

/// Series shared by the admin page and the class section of the class page.
fn population_plan(
    plan: &mut DashboardPlan,
    stats: &ProgramStats,
    prefix: &str,
    runs_legend: (&str, &str),
    exceptions_legend: (&str, &str),
) {
    let per_level = &stats.per_level;
    let per_week = &stats.per_week;

    plan.chart(
        format!("{prefix}program-runs-per-level"),
        vec![
            build_single_series("Successful runs", per_level, "data.successful_runs", palette::SUCCESS, false),
            build_single_series("Failed runs", per_level, "data.failed_runs", palette::FAIL, false),
        ],
    );
    plan.chart(
        format!("{prefix}error-rate-per-level"),
        vec![build_single_series("Error rate", per_level, "data.error_rate", palette::FAIL, true)],
    );

    let levels = discover_keys(per_week, RUN_FIELDS, is_level_key);
    let successful = build_series(&levels, per_week, Axis::Week, "data.successful_runs.", LEVEL_COLORS, false, labels::identity);
    let failed = build_series(&levels, per_week, Axis::Week, "data.failed_runs.", LEVEL_COLORS, false, labels::identity);
    plan.legend(runs_legend.0, runs_legend.1, &successful);
    plan.chart(format!("{prefix}successful-runs-per-week"), successful);
    plan.chart(format!("{prefix}failed-runs-per-week"), failed);

    let exceptions = discover_keys_flat(per_level, is_exception_key);
    let per_level_ex = build_series(&exceptions, per_level, Axis::Level, "data.", CHART_COLORS, true, labels::exception);
    let per_week_ex = build_series(&exceptions, per_week, Axis::Week, "data.", CHART_COLORS, true, labels::exception);
    plan.legend(exceptions_legend.0, exceptions_legend.1, &per_level_ex);
    plan.chart(format!("{prefix}exceptions-per-level"), per_level_ex);
    plan.chart(format!("{prefix}exceptions-per-week"), per_week_ex);
}

/// Reshape a `/program-stats` response for the admin dashboard.
pub fn admin_plan(stats: &ProgramStats) -> DashboardPlan {
    let mut plan = DashboardPlan::default();
    population_plan(
        &mut plan,
        stats,
        "",
        (ADMIN_RUNS_LEGEND, ADMIN_RUNS_GROUP),
        (ADMIN_EXCEPTIONS_LEGEND, ADMIN_EXCEPTIONS_GROUP),
    );
    let per_level = &stats.per_level;
    let per_week = &stats.per_week;

    plan.chart(
        "users-per-level",
        USER_TYPES
            .iter()
            .zip(CHART_COLORS)
            .map(|(key, color)| {
                build_single_series(&labels::user_type(key), per_level, &format!("data.{key}"), color, false)
            })
            .collect(),
    );
    plan.chart(
        "users-per-week",
        build_series(USER_TYPES, per_week, Axis::Week, "data.", CHART_COLORS, true, labels::user_type),
    );

    plan.chart(
        "completed-quiz-per-level",
        vec![build_single_series("Completed quizzes", per_level, "data.completed_quizzes", palette::SUCCESS, true)],
    );
    plan.chart(
        "abandoned-quiz-per-level",
        vec![build_single_series("Abandoned quizzes", per_level, "data.abandoned_quizzes", palette::FAIL, true)],
    );
    plan.chart(
        "max-score-per-level",
        vec![build_single_series("Max score", per_level, "data.quiz_score_max", palette::SUCCESS, false)],
    );
    plan.chart(
        "min-score-per-level",
        vec![build_single_series("Min score", per_level, "data.quiz_score_min", palette::FAIL, false)],
    );
    plan.chart(
        "avg-score-per-level",
        vec![build_single_series("Avg score", per_level, "data.quiz_score_avg", palette::NEUTRAL, false)],
    );

    let quiz_levels = discover_keys(per_week, QUIZ_FIELDS, is_level_key);
    for (stem, metric) in QUIZ_METRICS {
        let series = build_series(
            &quiz_levels,
            per_week,
            Axis::Week,
            &format!("data.{metric}."),
            CHART_COLORS,
            false,
            labels::identity,
        );
        if *metric == "completed_quizzes" {
            plan.legend(ADMIN_QUIZ_LEGEND, ADMIN_QUIZ_GROUP, &series);
        }
        plan.chart(format!("{stem}-per-week"), series);
    }
    plan
}

/// Reshape a `/class-stats/<id>` response for the class dashboard.
pub fn class_plan(stats: &ClassStats) -> DashboardPlan {
    let mut plan = DashboardPlan::default();
    population_plan(
        &mut plan,
        &stats.class,
        "class-",
        (CLASS_RUNS_LEGEND, CLASS_RUNS_GROUP),
        (CLASS_EXCEPTIONS_LEGEND, CLASS_EXCEPTIONS_GROUP),
    );

    // Quiz charts of both axes are keyed by students of the per-level
    // buckets: per level by run keys, per week by quiz keys.
    let students = &stats.students;
    let level_students = discover_keys(&students.per_level, RUN_FIELDS, any_key);
    let week_students = discover_keys(&students.per_week, RUN_FIELDS, any_key);
    let week_quiz_students = discover_keys(&students.per_level, QUIZ_FIELDS, any_key);

    for (axis, buckets, run_keys, quiz_keys) in [
        (Axis::Level, &students.per_level, &level_students, &level_students),
        (Axis::Week, &students.per_week, &week_students, &week_quiz_students),
    ] {
        let per = axis.field_name();
        let keyed = |keys: &BTreeSet<MetricKey>, prefix: &str, stroke: bool| {
            build_series(keys, buckets, axis, prefix, CHART_COLORS, stroke, labels::identity)
        };

        plan.chart(format!("student-successful-runs-per-{per}"), keyed(run_keys, "data.successful_runs.", false));
        plan.chart(format!("student-failed-runs-per-{per}"), keyed(run_keys, "data.failed_runs.", false));
        let error_rate = keyed(run_keys, "data.error_rate.", true);
        if axis == Axis::Level {
            plan.legend(STUDENT_LEGEND, STUDENT_GROUP, &error_rate);
        }
        plan.chart(format!("student-error-rate-per-{per}"), error_rate);
        for (stem, metric) in QUIZ_METRICS {
            plan.chart(
                format!("student-{stem}-per-{per}"),
                keyed(quiz_keys, &format!("data.{metric}."), false),
            );
        }
    }
    plan
}
