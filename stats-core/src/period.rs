//! Period toggles and the loading state of a dashboard.
//!
//! Selecting a period starts a load; finishing it, successfully or not,
//! always clears the loading flag. Failures are logged and leave the charts
//! as they were.

use crate::chart::{ChartBackend, ChartRegistry};
use crate::dashboard::DashboardPlan;
use crate::legend::LegendBoard;
use crate::response::StatsQuery;
use chrono::NaiveDate;
use std::fmt::Display;

/// A selectable stats period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub weeks: u32,
    pub label: &'static str,
}

pub const PERIODS: &[Period] = &[
    Period { weeks: 1, label: "Last week" },
    Period { weeks: 4, label: "Last 4 weeks" },
    Period { weeks: 12, label: "Last 12 weeks" },
    Period { weeks: 52, label: "Last year" },
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodState {
    /// Weeks back of the active toggle
    pub active: Option<u32>,
    /// Whether a stats request is outstanding
    pub loading: bool,
}

impl PeriodState {
    /// Activate the period of `weeks` and return the query to fetch.
    ///
    /// Selecting the already active period does nothing and returns `None`.
    pub fn begin(&mut self, weeks: u32, today: NaiveDate) -> Option<StatsQuery> {
        if self.active == Some(weeks) {
            return None;
        }
        self.active = Some(weeks);
        self.loading = true;
        Some(StatsQuery::weeks_back(today, weeks))
    }

    /// Apply the outcome of a load and clear the loading flag.
    /// Returns whether a plan was applied.
    pub fn finish<B, E>(
        &mut self,
        outcome: std::result::Result<DashboardPlan, E>,
        charts: &mut ChartRegistry<B>,
        legends: &mut LegendBoard,
    ) -> bool
    where
        B: ChartBackend,
        E: Display,
    {
        self.loading = false;
        match outcome {
            Ok(plan) => {
                plan.apply(charts, legends);
                true
            }
            Err(e) => {
                log::error!("failed to load stats: {e:#}");
                false
            }
        }
    }
}
