//! Header with the user menu

use dioxus::prelude::*;

use crate::services::{dialogs, Preferences};
use crate::state::AppState;

/// App header: title, signed-in identity, and the user menu with the theme
/// toggle and sign-out
#[component]
pub fn Header() -> Element {
    let mut state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let email = (state.identity)()
        .and_then(|identity| identity.email)
        .unwrap_or_else(|| "Signed in".to_string());
    let initial = email
        .chars()
        .next()
        .map_or('?', |c| c.to_ascii_uppercase());
    let menu_open = (state.view)().menu_open;
    let dark = (state.theme)().is_dark();

    let on_toggle_theme = move |_| {
        let next = (state.theme)().toggled();
        state.theme.set(next);
        state.view.write().close_menu();
        let prefs = Preferences {
            dark_mode: next.is_dark(),
        };
        if let Err(e) = prefs.save() {
            tracing::warn!("Failed to persist theme preference: {}", e);
        }
    };

    let on_sign_out = move |_| {
        state.view.write().close_menu();
        if !dialogs::confirm_sign_out() {
            return;
        }
        let auth = (state.auth)();
        spawn(async move {
            if let Some(auth) = auth {
                if let Err(e) = auth.sign_out().await {
                    tracing::error!("Sign-out failed: {}", e);
                    dialogs::notify_error("Sign out", "Failed to sign out. Please try again.");
                }
            }
        });
    };

    rsx! {
        header {
            class: "app-header",
            style: "
                display: flex;
                align-items: center;
                justify-content: space-between;
                padding: 12px 20px;
                border-bottom: 1px solid {colors.border};
                background: {colors.bg_secondary};
            ",

            div {
                style: "display: flex; align-items: center; gap: 10px;",
                div {
                    style: "
                        width: 32px;
                        height: 32px;
                        border-radius: 8px;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        background: {colors.accent};
                        color: {colors.accent_text};
                        font-weight: 700;
                    ",
                    "✓"
                }
                div {
                    div {
                        style: "font-size: 16px; font-weight: 600;",
                        "My Tasks"
                    }
                    div {
                        style: "font-size: 12px; color: {colors.text_secondary};",
                        "{email}"
                    }
                }
            }

            div {
                style: "position: relative;",
                button {
                    class: "user-menu-button",
                    style: "
                        width: 32px;
                        height: 32px;
                        border-radius: 50%;
                        border: none;
                        cursor: pointer;
                        background: {colors.accent};
                        color: {colors.accent_text};
                        font-weight: 600;
                    ",
                    onclick: move |_| state.view.write().toggle_menu(),
                    "{initial}"
                }

                if menu_open {
                    div {
                        class: "user-menu",
                        style: "
                            position: absolute;
                            right: 0;
                            top: 40px;
                            min-width: 180px;
                            border: 1px solid {colors.border};
                            border-radius: 8px;
                            background: {colors.bg_secondary};
                            box-shadow: 0 4px 12px rgba(0, 0, 0, 0.15);
                            z-index: 50;
                        ",
                        button {
                            style: "
                                display: block;
                                width: 100%;
                                padding: 10px 14px;
                                border: none;
                                background: none;
                                cursor: pointer;
                                text-align: left;
                                color: {colors.text_primary};
                            ",
                            onclick: on_toggle_theme,
                            if dark { "Light mode" } else { "Dark mode" }
                        }
                        button {
                            style: "
                                display: block;
                                width: 100%;
                                padding: 10px 14px;
                                border: none;
                                background: none;
                                cursor: pointer;
                                text-align: left;
                                color: {colors.danger};
                            ",
                            onclick: on_sign_out,
                            "Sign out"
                        }
                    }
                }
            }
        }
    }
}
