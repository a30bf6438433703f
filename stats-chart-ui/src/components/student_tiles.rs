//! Student tiles of the class page.
//!
//! Every tile shows the student's average quiz chart; clicking a tile expands
//! the level progression chart below the grid, clicking it again collapses it.

use crate::components::ChartCanvas;
use crate::state::AppState;
use dioxus::prelude::*;
use stats_core::tile::{self, TileAction, TilePage, TileSelection, PROGRESSION_CHART_ID};
use std::collections::HashSet;

#[derive(Props, Clone, PartialEq)]
pub struct StudentTilesProps {
    pub page: TilePage,
}

#[component]
pub fn StudentTiles(props: StudentTilesProps) -> Element {
    let mut state = use_context::<AppState>();
    let mut selection = use_signal(TileSelection::default);
    let mut hidden_quizzes = use_signal(HashSet::<String>::new);

    let page = props.page.clone();
    use_effect(move || {
        match tile::load_quiz_charts(&mut *state.charts.write(), &page) {
            Ok(n) => log::debug!("created {n} quiz charts"),
            Err(e) => log::error!("failed to create quiz charts: {e}"),
        }
    });

    let page = props.page.clone();
    let on_tile_click = use_callback(move |username: String| {
        let action = selection.write().click(&username);
        if let TileAction::Expand(student) = action {
            if let Err(e) = tile::show_progression(&mut *state.charts.write(), &page, &student) {
                log::error!("failed to show progression of {student}: {e}");
            }
        }
    });
    let on_toggle_quiz = use_callback(move |username: String| {
        let mut hidden = hidden_quizzes.write();
        if !hidden.remove(&username) {
            hidden.insert(username);
        }
    });

    let selected = selection.read().selected().map(str::to_string);
    let tiles: Vec<(String, bool, bool)> = props
        .page
        .students
        .iter()
        .map(|s| {
            (
                s.username.clone(),
                selected.as_deref() == Some(s.username.as_str()),
                hidden_quizzes.read().contains(&s.username),
            )
        })
        .collect();
    let expanded_style = if selected.is_some() { "margin-top: 16px;" } else { "display: none;" };
    let student_name = selected.unwrap_or_default();

    rsx! {
        div {
            style: "display: grid; grid-template-columns: repeat(auto-fill, minmax(220px, 1fr)); gap: 12px;",
            for (username, selected, quiz_hidden) in tiles {
                StudentTile {
                    key: "{username}",
                    username: username.clone(),
                    selected,
                    quiz_hidden,
                    on_click: on_tile_click,
                    on_toggle_quiz,
                }
            }
        }
        div {
            id: "expanded-student-tile",
            style: "{expanded_style}",
            h3 { id: "student-name", "{student_name}" }
            ChartCanvas { id: PROGRESSION_CHART_ID.to_string(), min_height: 320 }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct StudentTileProps {
    username: String,
    selected: bool,
    quiz_hidden: bool,
    on_click: EventHandler<String>,
    on_toggle_quiz: EventHandler<String>,
}

#[component]
fn StudentTile(props: StudentTileProps) -> Element {
    let class = if props.selected { "student-tile selected" } else { "student-tile" };
    let quiz_style = if props.quiz_hidden { "display: none;" } else { "display: block;" };
    let toggle_label = if props.quiz_hidden { "Show quiz" } else { "Hide quiz" };
    let canvas_id = tile::quiz_chart_id(&props.username);

    let username = props.username.clone();
    let on_click = props.on_click;
    let toggle_username = props.username.clone();
    let on_toggle_quiz = props.on_toggle_quiz;

    rsx! {
        div {
            class: "{class}",
            style: "border: 1px solid #e0e0e0; border-radius: 4px; padding: 8px; cursor: pointer;",
            onclick: move |_| on_click.call(username.clone()),
            strong { "{props.username}" }
            button {
                style: "margin-left: 8px; font-size: 11px;",
                onclick: move |evt: Event<MouseData>| {
                    evt.stop_propagation();
                    on_toggle_quiz.call(toggle_username.clone());
                },
                "{toggle_label}"
            }
            div {
                id: "static-student-tile-{props.username}",
                style: "{quiz_style}",
                ChartCanvas { id: canvas_id, min_height: 160 }
            }
        }
    }
}
