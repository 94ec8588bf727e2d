//! Home view - main application screen

use dioxus::prelude::*;

use tick_core::sync::SyncState;

use crate::components::{Composer, FilterTabs, Header, StatsRow, TaskList};
use crate::state::AppState;

/// Home view component - the signed-in screen
#[component]
pub fn Home() -> Element {
    let state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let feed_lost = (state.sync_state)() == SyncState::Lost;

    rsx! {
        div {
            class: "home-container",
            style: "min-height: 100vh; display: flex; flex-direction: column;",

            Header {}

            // the live feed failed; changes still save, the list just stops
            // following them until the feed is reopened
            if feed_lost {
                div {
                    class: "sync-lost-banner",
                    style: "
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        gap: 12px;
                        padding: 10px 16px;
                        background: {colors.bg_tertiary};
                        color: {colors.danger};
                        font-size: 13px;
                    ",
                    "Live sync was interrupted."
                    button {
                        style: "
                            padding: 4px 12px;
                            border: 1px solid {colors.danger};
                            border-radius: 6px;
                            background: none;
                            cursor: pointer;
                            color: {colors.danger};
                        ",
                        onclick: move |_| state.request_retry(),
                        "Retry"
                    }
                }
            }

            main {
                class: "main-content",
                style: "
                    width: 100%;
                    max-width: 720px;
                    margin: 0 auto;
                    padding: 24px 16px;
                    display: flex;
                    flex-direction: column;
                    gap: 20px;
                    box-sizing: border-box;
                ",

                StatsRow {}
                Composer {}
                FilterTabs {}
                TaskList {}
            }
        }
    }
}
