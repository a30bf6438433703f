//! Legend rendered outside the charts, toggling a series across a chart group.

use crate::state::AppState;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct SharedLegendProps {
    /// Legend container id, as used by the dashboard plan
    pub container_id: String,
}

#[component]
pub fn SharedLegend(props: SharedLegendProps) -> Element {
    let mut state = use_context::<AppState>();
    let entries = state
        .legends
        .read()
        .legend(&props.container_id)
        .map(|l| l.entries.clone())
        .unwrap_or_default();

    let items: Vec<_> = entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let style = if entry.hidden {
                "cursor: pointer; text-decoration: line-through;"
            } else {
                "cursor: pointer;"
            };
            (index, entry, style, props.container_id.clone())
        })
        .collect();

    rsx! {
        ul {
            id: "{props.container_id}",
            class: "stats-legend",
            style: "list-style: none; display: flex; flex-wrap: wrap; gap: 12px; padding: 0;",
            for (index, entry, style, container_id) in items {
                li {
                    key: "{index}",
                    class: "stats-legend-item",
                    "data-chart-class": "{entry.group}",
                    style: "{style}",
                    onclick: move |_| {
                        let mut charts = state.charts.write();
                        if let Err(e) = state.legends.write().click(&container_id, index, &mut *charts) {
                            log::warn!("legend click ignored: {e}");
                        }
                    },
                    div {
                        class: "stats-legend-color-box",
                        style: "display: inline-block; width: 12px; height: 12px; margin-right: 4px; background-color: {entry.color};",
                    }
                    "{entry.label}"
                }
            }
        }
    }
}
