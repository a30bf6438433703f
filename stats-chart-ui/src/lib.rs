//! Shared Dioxus components and Chart.js bridge for the stats dashboards.
//!
//! This crate provides:
//! - `js_bridge`: the Chart.js backend of the chart registry, via `js_sys::eval()`
//! - `api`: fetching stats responses and reading data embedded in the page
//! - `state`: Reactive AppState with Dioxus Signals
//! - `loader`: period selection and the fetch-then-redraw cycle
//! - `components`: Reusable RSX components (canvases, legends, toggles, tiles)

pub mod api;
pub mod components;
pub mod js_bridge;
pub mod loader;
pub mod state;
