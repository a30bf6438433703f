//! Response shapes of the `/program-stats` and `/class-stats/<id>` endpoints
//! and the query they are requested with.

use crate::bucket::Bucket;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Per-level and per-week aggregates for one population (the whole program,
/// one class, or the students of a class).
///
/// Bucket collections are shared with every series built from them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgramStats {
    #[serde(default)]
    pub per_level: Rc<Vec<Bucket>>,
    #[serde(default)]
    pub per_week: Rc<Vec<Bucket>>,
}

/// Response of `/class-stats/<class id>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassStats {
    #[serde(default)]
    pub class: ProgramStats,
    #[serde(default)]
    pub students: ProgramStats,
}

impl ProgramStats {
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl ClassStats {
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Query parameters of a stats request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsQuery {
    pub start: NaiveDate,
}

impl StatsQuery {
    /// Query covering the last `weeks_back` weeks, counting the current one.
    ///
    /// One week back starts today; each further week moves the start seven
    /// days earlier. Zero is treated as one.
    pub fn weeks_back(today: NaiveDate, weeks_back: u32) -> Self {
        let days = u64::from(weeks_back.saturating_sub(1)) * 7;
        let start = today.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN);
        Self { start }
    }

    /// ISO `YYYY-MM-DD` form of the start date.
    pub fn start_param(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    /// Query string including the leading `?`.
    pub fn to_query_string(&self) -> String {
        format!("?start={}", self.start_param())
    }
}

/// Path of the program-wide stats endpoint.
pub fn program_stats_path(query: &StatsQuery) -> String {
    format!("/program-stats{}", query.to_query_string())
}

/// Path of the per-class stats endpoint. The class id is percent-encoded
/// so it always stays a single path segment.
pub fn class_stats_path(class_id: &str, query: &StatsQuery) -> String {
    format!(
        "/class-stats/{}{}",
        urlencoding::encode(class_id),
        query.to_query_string()
    )
}
