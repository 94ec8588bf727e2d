//! Remote task store abstraction
//!
//! The store is an external collaborator: a document collection keyed by
//! task id, each document tagged with its owner. It supports a live
//! subscription filtered by owner plus point mutations. Concurrent writes
//! are resolved last-write-wins per field by the store itself.

mod memory;
mod rest;

pub use memory::MemoryTaskStore;
pub use rest::RestTaskStore;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::{Error, Result};
use crate::models::{NewTask, OwnerId, Task, TaskId};

/// A complete point-in-time set of task documents for one owner
///
/// Delivery order within a snapshot is irrelevant; consumers impose their
/// own order. Each snapshot supersedes every prior one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub tasks: Vec<Task>,
}

/// Events delivered on a live subscription
#[derive(Debug)]
pub enum SyncEvent {
    /// A fresh authoritative snapshot
    Snapshot(Snapshot),
    /// The feed failed; nothing further arrives until a resubscribe
    Lost(Error),
}

/// Handle to a live snapshot feed
///
/// Dropping the handle (or calling [`close`](Self::close)) tears the feed
/// down, so a stale owner's data can never be delivered into a newer
/// session's state.
#[derive(Debug)]
pub struct Subscription {
    rx: mpsc::Receiver<SyncEvent>,
    task: Option<JoinHandle<()>>,
}

impl Subscription {
    pub(crate) fn new(rx: mpsc::Receiver<SyncEvent>, task: Option<JoinHandle<()>>) -> Self {
        Self { rx, task }
    }

    /// Wait for the next event; `None` once the feed has closed
    pub async fn recv(&mut self) -> Option<SyncEvent> {
        self.rx.recv().await
    }

    /// Tear the feed down explicitly
    pub fn close(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.rx.close();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Point operations and live subscription over the remote task collection
#[allow(async_fn_in_trait)]
pub trait TaskStore {
    /// Open a live snapshot feed scoped to `owner`
    async fn subscribe(&self, owner: &OwnerId) -> Result<Subscription>;

    /// Create a task; the store assigns the id and both timestamps
    async fn create(&self, new_task: NewTask) -> Result<TaskId>;

    /// Set the completion flag, refreshing the update timestamp
    async fn set_completed(&self, id: &TaskId, completed: bool) -> Result<()>;

    /// Replace the task text, refreshing the update timestamp
    async fn update_text(&self, id: &TaskId, text: &str) -> Result<()>;

    /// Delete the task unconditionally
    async fn delete(&self, id: &TaskId) -> Result<()>;
}
