//! Loading spinner component.

use dioxus::prelude::*;

/// Shown instead of the chart area while stats are loading.
#[component]
pub fn LoadingSpinner() -> Element {
    rsx! {
        div {
            class: "stats-spinner",
            style: "display: flex; justify-content: center; align-items: center; padding: 40px; color: #666;",
            "Loading statistics..."
        }
    }
}
