//! Main application component

use dioxus::prelude::*;
use tokio::sync::mpsc;

use tick_core::service::TaskService;
use tick_core::session::SessionProvider;
use tick_core::store::RestTaskStore;
use tick_core::sync::{ListSynchronizer, SyncState};
use tick_core::view::ViewState;

use crate::components::SignIn;
use crate::services::{AuthService, DesktopConfig, Preferences};
use crate::state::{AppState, SyncCommand};
use crate::theme::Theme;
use crate::views::Home;

/// What woke the reconciliation loop
enum Wake {
    Identity,
    Retry,
    Feed(SyncState),
}

/// Root application component
#[component]
pub fn App() -> Element {
    // State signals
    let mut tasks = use_signal(Vec::new);
    let view = use_signal(ViewState::default);
    let mut sync_state = use_signal(|| SyncState::Idle);
    let mut identity = use_signal(|| None);
    let mut auth = use_signal(|| None);
    let mut service = use_signal(|| None);
    let mut sync_commands = use_signal(|| None);
    let theme = use_signal(|| Theme::from_dark_flag(Preferences::load().dark_mode));
    let mut initialized = use_signal(|| false);

    // Initialize services and run the reconciliation loop (only once)
    use_effect(move || {
        if initialized() {
            return;
        }
        initialized.set(true); // Mark immediately to prevent double init

        spawn(async move {
            let config = match DesktopConfig::from_env() {
                Ok(config) => config,
                Err(e) => {
                    tracing::error!("Backend is not configured: {}", e);
                    return;
                }
            };
            let auth_service = match AuthService::new(&config) {
                Ok(auth_service) => auth_service,
                Err(e) => {
                    tracing::error!("Failed to initialize auth: {}", e);
                    return;
                }
            };

            // subscribe before restore so the restored identity is observed
            let mut identity_rx = auth_service.watch_identity();
            auth.set(Some(auth_service.clone()));

            match auth_service.restore().await {
                Ok(Some(restored)) => tracing::info!("Restored session for {}", restored.id),
                Ok(None) => tracing::info!("No persisted session"),
                Err(e) => tracing::warn!("Session restore failed: {}", e),
            }

            let (command_tx, mut command_rx) = mpsc::unbounded_channel();
            sync_commands.set(Some(command_tx));

            // One synchronizer per signed-in identity. The previous feed is
            // torn down and the list cleared before the next one opens.
            let mut sync: Option<ListSynchronizer<RestTaskStore>> = None;
            loop {
                let wake = match sync.as_mut().filter(|s| s.state() == SyncState::Live) {
                    Some(live) => tokio::select! {
                        changed = identity_rx.changed() => {
                            if changed.is_err() {
                                break;
                            }
                            Wake::Identity
                        }
                        command = command_rx.recv() => match command {
                            Some(SyncCommand::Retry) => Wake::Retry,
                            None => break,
                        },
                        state = live.next() => Wake::Feed(state),
                    },
                    None => tokio::select! {
                        changed = identity_rx.changed() => {
                            if changed.is_err() {
                                break;
                            }
                            Wake::Identity
                        }
                        command = command_rx.recv() => match command {
                            Some(SyncCommand::Retry) => Wake::Retry,
                            None => break,
                        },
                    },
                };

                match wake {
                    Wake::Identity => {
                        let current = identity_rx.borrow_and_update().clone();
                        identity.set(current.clone());
                        sync = None;
                        tasks.write().clear();
                        service.set(None);
                        sync_state.set(SyncState::Idle);

                        let Some(current) = current else { continue };
                        match auth_service.task_store(&config) {
                            Ok(store) => {
                                service.set(Some(TaskService::new(store.clone())));
                                let mut synchronizer = ListSynchronizer::new(store);
                                match synchronizer.set_identity(Some(&current)).await {
                                    Ok(()) => sync_state.set(SyncState::Live),
                                    Err(e) => {
                                        tracing::error!("Failed to open task feed: {}", e);
                                        sync_state.set(SyncState::Lost);
                                    }
                                }
                                sync = Some(synchronizer);
                            }
                            Err(e) => tracing::error!("Failed to build task store: {}", e),
                        }
                    }
                    Wake::Retry => {
                        if let Some(synchronizer) = sync.as_mut() {
                            if synchronizer.state() != SyncState::Live {
                                match synchronizer.resubscribe().await {
                                    Ok(()) => sync_state.set(SyncState::Live),
                                    Err(e) => tracing::error!("Feed retry failed: {}", e),
                                }
                            }
                        }
                    }
                    Wake::Feed(state) => {
                        if let Some(synchronizer) = sync.as_ref() {
                            tasks.set(synchronizer.tasks().to_vec());
                        }
                        sync_state.set(state);
                    }
                }
            }
        });
    });

    use_context_provider(|| AppState {
        tasks,
        view,
        sync_state,
        identity,
        auth,
        service,
        sync_commands,
        theme,
    });

    let current_theme = theme();
    let colors = current_theme.palette();
    let theme_attr = if current_theme.is_dark() { "dark" } else { "light" };

    rsx! {
        div {
            class: "app-container",
            "data-theme": "{theme_attr}",
            style: "
                min-height: 100vh;
                font-family: system-ui, -apple-system, sans-serif;
                font-size: 14px;
                background: {colors.bg_primary};
                color: {colors.text_primary};
            ",
            if identity().is_some() {
                Home {}
            } else {
                SignIn {}
            }
        }
    }
}
