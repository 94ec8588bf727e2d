//! Task counters

use dioxus::prelude::*;

use crate::state::AppState;

/// Total / Active / Done cards, computed over the unfiltered list
#[component]
pub fn StatsRow() -> Element {
    let state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let stats = state.stats();

    rsx! {
        div {
            class: "stats-row",
            style: "display: grid; grid-template-columns: repeat(3, 1fr); gap: 12px;",

            StatCard {
                value: stats.total,
                label: "Total Tasks",
                background: colors.bg_secondary.to_string(),
                color: colors.text_primary.to_string(),
            }
            StatCard {
                value: stats.active,
                label: "Active",
                background: colors.accent.to_string(),
                color: colors.accent_text.to_string(),
            }
            StatCard {
                value: stats.completed,
                label: "Done",
                background: colors.success.to_string(),
                color: colors.accent_text.to_string(),
            }
        }
    }
}

#[component]
fn StatCard(value: usize, label: &'static str, background: String, color: String) -> Element {
    rsx! {
        div {
            style: "
                padding: 14px 16px;
                border-radius: 12px;
                background: {background};
                color: {color};
            ",
            div {
                style: "font-size: 24px; font-weight: 700;",
                "{value}"
            }
            div {
                style: "font-size: 12px; opacity: 0.8; margin-top: 2px;",
                "{label}"
            }
        }
    }
}
