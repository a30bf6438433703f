//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.

use crate::js_bridge::JsChartBackend;
use dioxus::prelude::*;
use stats_core::chart::{ChartRegistry, ChartSpec};
use stats_core::legend::LegendBoard;
use stats_core::period::PeriodState;

/// Shared application state for both dashboards.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Active period toggle and whether a stats request is outstanding
    pub period: Signal<PeriodState>,
    /// Live Chart.js instances
    pub charts: Signal<ChartRegistry<JsChartBackend>>,
    /// Shared legends of the page
    pub legends: Signal<LegendBoard>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            period: Signal::new(PeriodState::default()),
            charts: Signal::new(ChartRegistry::new(JsChartBackend)),
            legends: Signal::new(LegendBoard::new()),
        }
    }

    /// Register every chart of a layout. Canvases must already be rendered
    /// or appear shortly; the bridge waits for them.
    pub fn create_charts(&mut self, layout: Vec<ChartSpec>) {
        let mut charts = self.charts.write();
        for spec in layout {
            charts.create_chart(spec);
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
