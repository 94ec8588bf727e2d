//! Sign-in screen
//!
//! A thin front on the managed auth endpoint: e-mail plus password, nothing
//! else. Account management lives on the provider's hosted pages.

use dioxus::prelude::*;

use crate::state::AppState;

#[component]
pub fn SignIn() -> Element {
    let state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let submit = move || {
        if busy() {
            return;
        }
        busy.set(true);
        error.set(None);
        let auth = (state.auth)();
        spawn(async move {
            let Some(auth) = auth else {
                error.set(Some("Backend is not configured".to_string()));
                busy.set(false);
                return;
            };
            match auth.sign_in(&email(), &password()).await {
                Ok(identity) => {
                    tracing::info!("Signed in as {}", identity.id);
                    password.set(String::new());
                }
                Err(e) => {
                    tracing::warn!("Sign-in failed: {}", e);
                    error.set(Some("Sign-in failed. Check your credentials.".to_string()));
                }
            }
            busy.set(false);
        });
    };

    let error_message = error().unwrap_or_default();
    let input_style = format!(
        "width: 100%; padding: 10px 12px; border: 1px solid {}; border-radius: 8px; background: {}; color: {}; outline: none; box-sizing: border-box;",
        colors.border, colors.bg_primary, colors.text_primary
    );

    rsx! {
        div {
            class: "sign-in",
            style: "
                min-height: 100vh;
                display: flex;
                align-items: center;
                justify-content: center;
            ",

            div {
                style: "
                    width: 340px;
                    padding: 28px;
                    border: 1px solid {colors.border};
                    border-radius: 16px;
                    background: {colors.bg_secondary};
                ",

                div {
                    style: "font-size: 20px; font-weight: 700; margin-bottom: 4px;",
                    "My Tasks"
                }
                div {
                    style: "font-size: 13px; color: {colors.text_secondary}; margin-bottom: 20px;",
                    "Sign in to sync your tasks"
                }

                if !error_message.is_empty() {
                    div {
                        style: "
                            padding: 8px 12px;
                            margin-bottom: 12px;
                            border-radius: 8px;
                            font-size: 13px;
                            background: {colors.bg_tertiary};
                            color: {colors.danger};
                        ",
                        "{error_message}"
                    }
                }

                input {
                    r#type: "email",
                    placeholder: "E-mail",
                    value: "{email}",
                    oninput: move |evt| email.set(evt.value()),
                    style: "{input_style} margin-bottom: 10px;",
                }
                input {
                    r#type: "password",
                    placeholder: "Password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                    onkeydown: move |evt| {
                        if evt.key() == Key::Enter {
                            submit();
                        }
                    },
                    style: "{input_style} margin-bottom: 16px;",
                }

                button {
                    disabled: busy(),
                    onclick: move |_| submit(),
                    style: "
                        width: 100%;
                        padding: 10px;
                        border: none;
                        border-radius: 8px;
                        cursor: pointer;
                        font-weight: 600;
                        background: {colors.accent};
                        color: {colors.accent_text};
                    ",
                    if busy() { "Signing in..." } else { "Sign in" }
                }
            }
        }
    }
}
