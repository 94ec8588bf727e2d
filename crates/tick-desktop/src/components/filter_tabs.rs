//! Filter tabs

use dioxus::prelude::*;

use tick_core::view::Filter;

use crate::state::AppState;

/// All / Active / Done tabs; the selection only affects the visible list,
/// never the counters
#[component]
pub fn FilterTabs() -> Element {
    let mut state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let active = (state.view)().filter;

    rsx! {
        div {
            class: "filter-tabs",
            style: "
                display: flex;
                gap: 8px;
                padding: 8px;
                border: 1px solid {colors.border};
                border-radius: 12px;
                background: {colors.bg_secondary};
            ",

            for filter in Filter::ALL {
                {
                    let label = filter.label();
                    let style = if filter == active {
                        format!(
                            "flex: 1; padding: 10px; border: none; border-radius: 8px; cursor: pointer; font-weight: 500; background: {}; color: {};",
                            colors.accent, colors.accent_text
                        )
                    } else {
                        format!(
                            "flex: 1; padding: 10px; border: none; border-radius: 8px; cursor: pointer; background: none; color: {};",
                            colors.text_secondary
                        )
                    };

                    rsx! {
                        button {
                            key: "{label}",
                            style: "{style}",
                            onclick: move |_| state.view.write().set_filter(filter),
                            "{label}"
                        }
                    }
                }
            }
        }
    }
}
