//! Task list component

use dioxus::prelude::*;

use tick_core::view::empty_state;

use crate::state::AppState;
use crate::components::TaskRow;

/// The filtered task list, its per-filter empty state, and the footer
/// summary line
#[component]
pub fn TaskList() -> Element {
    let state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let filter = (state.view)().filter;
    let visible = state.filtered_tasks();
    let empty = empty_state(filter);
    let summary = state.stats().remaining_summary().unwrap_or_default();

    rsx! {
        div {
            class: "task-list",
            style: "
                border: 1px solid {colors.border};
                border-radius: 12px;
                background: {colors.bg_secondary};
                overflow: hidden;
            ",

            if visible.is_empty() {
                div {
                    style: "padding: 48px 16px; text-align: center;",
                    div {
                        style: "font-size: 48px; margin-bottom: 12px;",
                        "{empty.icon}"
                    }
                    div {
                        style: "font-size: 16px; font-weight: 500; margin-bottom: 4px;",
                        "{empty.headline}"
                    }
                    div {
                        style: "font-size: 13px; color: {colors.text_muted};",
                        "{empty.hint}"
                    }
                }
            } else {
                for task in visible {
                    TaskRow { key: "{task.id}", task: task.clone() }
                }
            }
        }

        if !summary.is_empty() {
            div {
                style: "
                    margin-top: 14px;
                    text-align: center;
                    font-size: 13px;
                    color: {colors.text_secondary};
                ",
                "{summary}"
            }
        }
    }
}
