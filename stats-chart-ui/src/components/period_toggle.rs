//! Row of period toggles selecting how many weeks of stats to show.

use crate::loader::PERIODS;
use crate::state::AppState;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct PeriodToggleProps {
    /// Called with the weeks back of a clicked, inactive period
    pub on_select: EventHandler<u32>,
}

#[component]
pub fn PeriodToggle(props: PeriodToggleProps) -> Element {
    let state = use_context::<AppState>();
    let active = state.period.read().active;
    let on_select = props.on_select;

    let toggles: Vec<(u32, &'static str, &'static str)> = PERIODS
        .iter()
        .map(|p| {
            let class = if active == Some(p.weeks) {
                "stats-period-toggle active"
            } else {
                "stats-period-toggle"
            };
            (p.weeks, p.label, class)
        })
        .collect();

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; gap: 8px;",
            for (weeks, label, class) in toggles {
                button {
                    key: "{weeks}",
                    class: "{class}",
                    onclick: move |_| {
                        if active != Some(weeks) {
                            on_select.call(weeks);
                        }
                    },
                    "{label}"
                }
            }
        }
    }
}
