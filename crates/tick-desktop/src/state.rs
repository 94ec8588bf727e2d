//! Application state management
//!
//! Global state accessible via Dioxus context providers.

use dioxus::prelude::*;
use tokio::sync::mpsc;

use tick_core::models::Task;
use tick_core::service::TaskService;
use tick_core::session::Identity;
use tick_core::store::RestTaskStore;
use tick_core::sync::SyncState;
use tick_core::view::{self, TaskStats, ViewState};

use crate::services::AuthService;
use crate::theme::Theme;

/// Commands the UI sends to the background reconciliation loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncCommand {
    /// Re-open the feed after it was lost
    Retry,
}

/// Global application state
#[derive(Clone, Copy)]
pub struct AppState {
    /// Ordered task list mirrored from the remote store
    pub tasks: Signal<Vec<Task>>,
    /// Ephemeral view state (filter, composer, edit mode, menu)
    pub view: Signal<ViewState>,
    /// State of the live feed
    pub sync_state: Signal<SyncState>,
    /// Current identity; `None` while signed out
    pub identity: Signal<Option<Identity>>,
    /// Auth service once the backend is configured
    pub auth: Signal<Option<AuthService>>,
    /// Mutation service for the current session
    pub service: Signal<Option<TaskService<RestTaskStore>>>,
    /// Channel into the reconciliation loop
    pub sync_commands: Signal<Option<mpsc::UnboundedSender<SyncCommand>>>,
    /// Resolved theme
    pub theme: Signal<Theme>,
}

impl AppState {
    /// Tasks matching the active filter, in list order
    #[must_use]
    pub fn filtered_tasks(&self) -> Vec<Task> {
        let filter = (self.view)().filter;
        view::filtered(&(self.tasks)(), filter)
    }

    /// Counters over the unfiltered list
    #[must_use]
    pub fn stats(&self) -> TaskStats {
        TaskStats::of(&(self.tasks)())
    }

    /// Ask the reconciliation loop to re-open a lost feed
    pub fn request_retry(&self) {
        if let Some(tx) = (self.sync_commands)() {
            let _ = tx.send(SyncCommand::Retry);
        }
    }
}
