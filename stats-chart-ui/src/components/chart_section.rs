//! A titled block of charts, optionally with the shared legend driving them.

use crate::components::{ChartCanvas, SectionHeader, SharedLegend};
use dioxus::prelude::*;
use stats_core::chart::ChartSpec;

#[derive(Props, Clone, PartialEq)]
pub struct ChartSectionProps {
    pub title: String,
    pub specs: Vec<ChartSpec>,
    /// Container id of the shared legend shown above the charts
    #[props(default)]
    pub legend: Option<String>,
}

#[component]
pub fn ChartSection(props: ChartSectionProps) -> Element {
    let canvases: Vec<(String, String)> = props
        .specs
        .iter()
        .map(|s| (s.id.clone(), s.group.clone().unwrap_or_default()))
        .collect();

    rsx! {
        section {
            SectionHeader { title: props.title.clone() }
            if let Some(container_id) = props.legend.clone() {
                SharedLegend { container_id }
            }
            div {
                style: "display: grid; grid-template-columns: repeat(auto-fill, minmax(420px, 1fr)); gap: 16px;",
                for (id, group) in canvases {
                    ChartCanvas { key: "{id}", id: id.clone(), group }
                }
            }
        }
    }
}

