//! Core of the usage statistics dashboards.
//!
//! This crate provides:
//! - `response` / `bucket`: typed stats responses with sparse, dynamically keyed metrics
//! - `discovery`: extraction of the level, exception and student keys present in a response
//! - `series`: chart-ready series built from discovered keys
//! - `chart`: chart specifications and the registry of live chart instances
//! - `legend`: shared legends toggling series across a group of charts
//! - `dashboard`: admin and class dashboard layouts and response reshaping
//! - `period`: period toggles and the loading state of a dashboard
//! - `tile`: student tiles of the class page

pub mod bucket;
pub mod chart;
pub mod dashboard;
pub mod discovery;
pub mod error;
pub mod legend;
pub mod palette;
pub mod period;
pub mod response;
pub mod series;
pub mod tile;

pub use error::{Result, StatsError};
