//! Composer for new tasks

use dioxus::prelude::*;

use crate::services::dialogs;
use crate::state::AppState;

/// Single-line input plus submit button
///
/// The busy flag guards against duplicate submissions; the draft is cleared
/// only once the store confirms the create.
#[component]
pub fn Composer() -> Element {
    let mut state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let view = (state.view)();
    let busy = view.composer_busy;
    let draft = view.composer.clone();
    let can_submit = !busy && !draft.trim().is_empty();

    let submit = move || {
        let text = (state.view)().composer.clone();
        if text.trim().is_empty() {
            return;
        }
        if !state.view.write().begin_submit() {
            return;
        }
        let service = (state.service)();
        let owner = (state.identity)().map(|identity| identity.id);
        spawn(async move {
            let (Some(service), Some(owner)) = (service, owner) else {
                state.view.write().finish_submit(false);
                return;
            };
            match service.create(&owner, &text).await {
                Ok(Some(id)) => {
                    tracing::debug!("Added task {}", id);
                    state.view.write().finish_submit(true);
                }
                Ok(None) => state.view.write().finish_submit(false),
                Err(e) => {
                    tracing::error!("Failed to add task: {}", e);
                    dialogs::notify_error("Add task", "Failed to add task. Please try again.");
                    state.view.write().finish_submit(false);
                }
            }
        });
    };

    rsx! {
        div {
            class: "composer",
            style: "
                display: flex;
                gap: 10px;
                padding: 16px;
                border: 1px solid {colors.border};
                border-radius: 12px;
                background: {colors.bg_secondary};
            ",

            input {
                r#type: "text",
                placeholder: "What needs to be done?",
                value: "{draft}",
                disabled: busy,
                oninput: move |evt| state.view.write().set_composer(evt.value()),
                onkeydown: move |evt| {
                    if evt.key() == Key::Enter {
                        submit();
                    }
                },
                style: "
                    flex: 1;
                    padding: 10px 12px;
                    border: 1px solid {colors.border};
                    border-radius: 8px;
                    background: {colors.bg_primary};
                    color: {colors.text_primary};
                    outline: none;
                ",
            }

            button {
                disabled: !can_submit,
                onclick: move |_| submit(),
                style: "
                    padding: 10px 20px;
                    border: none;
                    border-radius: 8px;
                    cursor: pointer;
                    font-weight: 500;
                    background: {colors.accent};
                    color: {colors.accent_text};
                ",
                if busy { "..." } else { "+ Add" }
            }
        }
    }
}
