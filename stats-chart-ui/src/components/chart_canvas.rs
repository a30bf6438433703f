//! Canvas a registered chart draws into.

use dioxus::prelude::*;

/// Props for ChartCanvas
#[derive(Props, Clone, PartialEq)]
pub struct ChartCanvasProps {
    /// The DOM id of the canvas, equal to the chart id in the registry
    pub id: String,
    /// Group class, e.g. `admin-runs-chart`, addressed by a shared legend
    #[props(default = String::new())]
    pub group: String,
    /// Optional minimum height in pixels
    #[props(default = 300)]
    pub min_height: u32,
}

/// A container div holding one Chart.js canvas.
#[component]
pub fn ChartCanvas(props: ChartCanvasProps) -> Element {
    let style = format!(
        "min-height: {}px; position: relative; width: 100%;",
        props.min_height
    );

    rsx! {
        div {
            style: "{style}",
            canvas {
                id: "{props.id}",
                class: "{props.group}",
            }
        }
    }
}
