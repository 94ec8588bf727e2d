//! A single task row

use dioxus::prelude::*;

use tick_core::models::Task;
use tick_core::service::SaveOutcome;
use tick_core::view::EditMode;
use tick_core::Error;

use crate::services::dialogs;
use crate::state::AppState;

/// Checkbox, text, and the per-row actions; switches into an inline editor
/// while the row is the edit target
#[component]
pub fn TaskRow(task: Task) -> Element {
    let mut state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let editing = (state.view)().is_editing(&task.id);
    let draft = match (state.view)().edit {
        EditMode::Editing { ref id, ref draft } if *id == task.id => draft.clone(),
        _ => String::new(),
    };

    let on_toggle = {
        let task = task.clone();
        move |_| {
            let service = (state.service)();
            let task = task.clone();
            spawn(async move {
                let Some(service) = service else { return };
                if let Err(e) = service.toggle(&task).await {
                    tracing::error!("Failed to toggle task {}: {}", task.id, e);
                    dialogs::notify_error(
                        "Update task",
                        "Failed to update task. Please try again.",
                    );
                }
            });
        }
    };

    let on_begin_edit = {
        let task = task.clone();
        move |_| state.view.write().begin_edit(&task)
    };
    let on_begin_edit_dblclick = on_begin_edit.clone();

    let on_delete = {
        let id = task.id.clone();
        move |_| {
            if !dialogs::confirm_delete() {
                return;
            }
            let service = (state.service)();
            let id = id.clone();
            spawn(async move {
                let Some(service) = service else { return };
                if let Err(e) = service.delete(&id).await {
                    tracing::error!("Failed to delete task {}: {}", id, e);
                    dialogs::notify_error(
                        "Delete task",
                        "Failed to delete task. Please try again.",
                    );
                }
            });
        }
    };

    let save = {
        let id = task.id.clone();
        move || {
            let EditMode::Editing {
                id: editing_id,
                draft,
            } = (state.view)().edit
            else {
                return;
            };
            if editing_id != id {
                return;
            }
            let service = (state.service)();
            let id = id.clone();
            spawn(async move {
                let Some(service) = service else { return };
                match service.save_edit(&id, &draft).await {
                    Ok(SaveOutcome::Saved) => state.view.write().end_edit(),
                    // target vanished mid-edit: drop the draft quietly
                    Ok(SaveOutcome::TargetMissing) => state.view.write().end_edit(),
                    Err(Error::InvalidInput(_)) => {
                        dialogs::notify_error("Edit task", "Task text cannot be empty.");
                    }
                    Err(e) => {
                        tracing::error!("Failed to save task {}: {}", id, e);
                        dialogs::notify_error(
                            "Edit task",
                            "Failed to save changes. Please try again.",
                        );
                    }
                }
            });
        }
    };
    let save_on_key = save.clone();

    let checkbox_style = if task.completed {
        format!(
            "width: 22px; height: 22px; border-radius: 6px; border: 2px solid {0}; background: {0}; color: {1}; cursor: pointer; flex-shrink: 0;",
            colors.success, colors.accent_text
        )
    } else {
        format!(
            "width: 22px; height: 22px; border-radius: 6px; border: 2px solid {}; background: none; cursor: pointer; flex-shrink: 0;",
            colors.border
        )
    };
    let text_style = if task.completed {
        format!(
            "flex: 1; text-decoration: line-through; color: {};",
            colors.text_muted
        )
    } else {
        format!("flex: 1; color: {};", colors.text_primary)
    };
    let row_button_style = format!(
        "padding: 6px 10px; border: 1px solid {}; border-radius: 6px; background: none; cursor: pointer; color: {};",
        colors.border, colors.text_secondary
    );
    let delete_button_style = format!(
        "padding: 6px 10px; border: 1px solid {}; border-radius: 6px; background: none; cursor: pointer; color: {};",
        colors.border, colors.danger
    );

    rsx! {
        div {
            class: "task-row",
            style: "
                display: flex;
                align-items: center;
                gap: 12px;
                padding: 14px 16px;
                border-bottom: 1px solid {colors.border_light};
            ",

            button {
                class: "task-checkbox",
                style: "{checkbox_style}",
                onclick: on_toggle,
                if task.completed { "✓" }
            }

            if editing {
                input {
                    r#type: "text",
                    value: "{draft}",
                    autofocus: true,
                    oninput: move |evt| state.view.write().set_edit_draft(evt.value()),
                    onkeydown: move |evt| {
                        if evt.key() == Key::Enter {
                            save_on_key();
                        } else if evt.key() == Key::Escape {
                            state.view.write().end_edit();
                        }
                    },
                    style: "
                        flex: 1;
                        padding: 8px 10px;
                        border: 1px solid {colors.accent};
                        border-radius: 6px;
                        background: {colors.bg_primary};
                        color: {colors.text_primary};
                        outline: none;
                    ",
                }
                button {
                    style: "{row_button_style}",
                    onclick: move |_| save(),
                    "Save"
                }
                button {
                    style: "{row_button_style}",
                    onclick: move |_| state.view.write().end_edit(),
                    "Cancel"
                }
            } else {
                span {
                    style: "{text_style}",
                    ondoubleclick: on_begin_edit_dblclick,
                    "{task.text}"
                }
                button {
                    style: "{row_button_style}",
                    onclick: on_begin_edit,
                    "Edit"
                }
                button {
                    style: "{delete_button_style}",
                    onclick: on_delete,
                    "Delete"
                }
            }
        }
    }
}
