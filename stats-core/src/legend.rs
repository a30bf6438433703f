//! Shared legends rendered outside the charts they control.
//!
//! One legend drives every chart of a group: clicking an entry strikes it
//! through and flips the series with the same label in each of those charts.
//! Rebuilding a legend starts all entries visible again.

use crate::chart::{ChartBackend, ChartRegistry};
use crate::error::{Result, StatsError};
use crate::series::SeriesDescriptor;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
    /// Class selector of the charts this entry controls.
    pub group: String,
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedLegend {
    pub container_id: String,
    pub entries: Vec<LegendEntry>,
}

/// All shared legends of a page, keyed by container id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegendBoard {
    legends: HashMap<String, SharedLegend>,
}

impl LegendBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents of `container_id` with one entry per series, in order.
    pub fn render_legend(&mut self, container_id: &str, series: &[SeriesDescriptor], group: &str) {
        let entries = series
            .iter()
            .map(|s| LegendEntry {
                label: s.label.clone(),
                color: s.color.clone(),
                group: group.to_string(),
                hidden: false,
            })
            .collect();
        self.legends.insert(
            container_id.to_string(),
            SharedLegend {
                container_id: container_id.to_string(),
                entries,
            },
        );
    }

    pub fn legend(&self, container_id: &str) -> Option<&SharedLegend> {
        self.legends.get(container_id)
    }

    /// Handle a click on entry `index` of `container_id`.
    ///
    /// Every chart in the entry's group has its series of the same label
    /// toggled and redrawn.
    pub fn click<B: ChartBackend>(
        &mut self,
        container_id: &str,
        index: usize,
        charts: &mut ChartRegistry<B>,
    ) -> Result<()> {
        let entry = self
            .legends
            .get_mut(container_id)
            .and_then(|l| l.entries.get_mut(index))
            .ok_or_else(|| StatsError::LegendNotFound {
                container: container_id.to_string(),
                index,
            })?;
        entry.hidden = !entry.hidden;

        for id in charts.charts_in_group(&entry.group) {
            match charts.toggle_series(&id, &entry.label) {
                Ok(0) => log::debug!("chart {} has no series '{}'", id, entry.label),
                Ok(_) => {}
                Err(e) => log::warn!("legend {container_id}: {e}"),
            }
        }
        Ok(())
    }
}
