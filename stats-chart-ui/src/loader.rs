//! Period selection and the fetch-then-redraw cycle.

use crate::state::AppState;
use chrono::Local;
use dioxus::prelude::*;
use stats_core::dashboard::DashboardPlan;
use stats_core::response::StatsQuery;
use std::future::Future;

pub use stats_core::period::{Period, PERIODS};

/// Activate the period of `weeks` and reload the dashboard with `load`.
///
/// Selecting the already active period does nothing. Whatever the outcome
/// of `load`, the loading state is cleared afterwards; failures are only
/// logged. Responses are not sequenced, so a slow earlier request can
/// overwrite a newer one.
pub fn select_period<F, Fut>(mut state: AppState, weeks: u32, load: F)
where
    F: FnOnce(StatsQuery) -> Fut + 'static,
    Fut: Future<Output = anyhow::Result<DashboardPlan>> + 'static,
{
    let mut period = *state.period.peek();
    let Some(query) = period.begin(weeks, Local::now().date_naive()) else {
        return;
    };
    state.period.set(period);
    log::info!("loading stats since {}", query.start_param());

    spawn(async move {
        let outcome = load(query).await;
        let mut charts = state.charts.write();
        let mut legends = state.legends.write();
        state.period.write().finish(outcome, &mut *charts, &mut *legends);
    });
}
