//! In-process task store used by tests and offline development

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{NewTask, OwnerId, Task, TaskId};
use crate::store::{Snapshot, Subscription, SyncEvent, TaskStore};

const FEED_CHANNEL_CAPACITY: usize = 8;

/// A `TaskStore` held entirely in process memory
///
/// Behaves like the managed backend as far as consumers can tell: ids and
/// timestamps are assigned at write time (timestamps strictly monotonic),
/// and every live subscription receives a fresh owner-scoped snapshot after
/// each mutation.
#[derive(Clone, Default)]
pub struct MemoryTaskStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    tasks: HashMap<TaskId, Task>,
    watchers: Vec<Watcher>,
    clock: i64,
}

struct Watcher {
    owner: OwnerId,
    tx: mpsc::Sender<SyncEvent>,
}

impl Inner {
    /// Strictly monotonic write timestamp, tracking the wall clock when it
    /// is ahead
    fn next_timestamp(&mut self) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        self.clock = (self.clock + 1).max(now);
        self.clock
    }

    fn snapshot_for(&self, owner: &OwnerId) -> Snapshot {
        Snapshot {
            tasks: self
                .tasks
                .values()
                .filter(|task| &task.owner_id == owner)
                .cloned()
                .collect(),
        }
    }

    /// Push the owner's current snapshot to every live watcher, pruning
    /// watchers whose feed has closed
    async fn broadcast(&mut self, owner: &OwnerId) {
        let snapshot = self.snapshot_for(owner);
        let mut kept = Vec::with_capacity(self.watchers.len());
        for watcher in self.watchers.drain(..) {
            if &watcher.owner != owner {
                kept.push(watcher);
                continue;
            }
            if watcher
                .tx
                .send(SyncEvent::Snapshot(snapshot.clone()))
                .await
                .is_ok()
            {
                kept.push(watcher);
            }
        }
        self.watchers = kept;
    }
}

impl MemoryTaskStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a task by id (test observation point)
    pub async fn get(&self, id: &TaskId) -> Option<Task> {
        self.inner.lock().await.tasks.get(id).cloned()
    }
}

impl TaskStore for MemoryTaskStore {
    async fn subscribe(&self, owner: &OwnerId) -> Result<Subscription> {
        let (tx, rx) = mpsc::channel(FEED_CHANNEL_CAPACITY);
        let mut inner = self.inner.lock().await;

        // the store delivers the current state immediately on subscribe
        let initial = inner.snapshot_for(owner);
        tx.send(SyncEvent::Snapshot(initial))
            .await
            .map_err(|_| Error::Subscription("feed closed before first snapshot".into()))?;

        inner.watchers.push(Watcher {
            owner: owner.clone(),
            tx,
        });
        Ok(Subscription::new(rx, None))
    }

    async fn create(&self, new_task: NewTask) -> Result<TaskId> {
        let mut inner = self.inner.lock().await;
        let id = TaskId::new(Uuid::now_v7().to_string());
        let now = inner.next_timestamp();
        let owner = new_task.owner_id.clone();

        inner.tasks.insert(
            id.clone(),
            Task {
                id: id.clone(),
                owner_id: new_task.owner_id,
                text: new_task.text,
                completed: new_task.completed,
                created_at: Some(now),
                updated_at: Some(now),
            },
        );

        inner.broadcast(&owner).await;
        Ok(id)
    }

    async fn set_completed(&self, id: &TaskId, completed: bool) -> Result<()> {
        let mut inner = self.inner.lock().await;
        let now = inner.next_timestamp();
        let task = inner
            .tasks
            .get_mut(id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        task.completed = completed;
        task.updated_at = Some(now);
        let owner = task.owner_id.clone();

        inner.broadcast(&owner).await;
        Ok(())
    }

    async fn update_text(&self, id: &TaskId, text: &str) -> Result<()> {
        let mut inner = self.inner.lock().await;
        let now = inner.next_timestamp();
        let task = inner
            .tasks
            .get_mut(id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        task.text = text.to_string();
        task.updated_at = Some(now);
        let owner = task.owner_id.clone();

        inner.broadcast(&owner).await;
        Ok(())
    }

    async fn delete(&self, id: &TaskId) -> Result<()> {
        let mut inner = self.inner.lock().await;
        // deletes are unconditional; a missing document is not an error
        let Some(task) = inner.tasks.remove(id) else {
            return Ok(());
        };
        let owner = task.owner_id;
        inner.broadcast(&owner).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn owner() -> OwnerId {
        OwnerId::new("user-1")
    }

    fn new_task(text: &str) -> NewTask {
        NewTask::from_text(owner(), text).unwrap()
    }

    async fn recv_snapshot(subscription: &mut Subscription) -> Snapshot {
        match subscription.recv().await {
            Some(SyncEvent::Snapshot(snapshot)) => snapshot,
            other => panic!("expected snapshot, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_monotonic_timestamps() {
        let store = MemoryTaskStore::new();
        let first = store.create(new_task("one")).await.unwrap();
        let second = store.create(new_task("two")).await.unwrap();
        assert_ne!(first, second);

        let first = store.get(&first).await.unwrap();
        let second = store.get(&second).await.unwrap();
        assert_eq!(first.created_at, first.updated_at);
        assert!(second.created_at_ms() > first.created_at_ms());
    }

    #[tokio::test]
    async fn test_set_completed_refreshes_update_timestamp() {
        let store = MemoryTaskStore::new();
        let id = store.create(new_task("one")).await.unwrap();
        let before = store.get(&id).await.unwrap();

        store.set_completed(&id, true).await.unwrap();
        let after = store.get(&id).await.unwrap();
        assert!(after.completed);
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at > before.updated_at);
    }

    #[tokio::test]
    async fn test_subscription_sees_initial_and_updated_snapshots() {
        let store = MemoryTaskStore::new();
        let mut subscription = store.subscribe(&owner()).await.unwrap();
        assert_eq!(recv_snapshot(&mut subscription).await.tasks.len(), 0);

        store.create(new_task("one")).await.unwrap();
        let snapshot = recv_snapshot(&mut subscription).await;
        assert_eq!(snapshot.tasks.len(), 1);
        assert_eq!(snapshot.tasks[0].text, "one");
    }

    #[tokio::test]
    async fn test_subscription_is_scoped_to_owner() {
        let store = MemoryTaskStore::new();
        let mut subscription = store.subscribe(&owner()).await.unwrap();
        recv_snapshot(&mut subscription).await;

        store
            .create(NewTask::from_text(OwnerId::new("user-2"), "theirs").unwrap())
            .await
            .unwrap();
        store.create(new_task("mine")).await.unwrap();

        let snapshot = recv_snapshot(&mut subscription).await;
        assert_eq!(snapshot.tasks.len(), 1);
        assert_eq!(snapshot.tasks[0].text, "mine");
    }

    #[tokio::test]
    async fn test_update_missing_task_is_not_found() {
        let store = MemoryTaskStore::new();
        let missing = TaskId::new("nope");
        assert!(store
            .update_text(&missing, "x")
            .await
            .unwrap_err()
            .is_not_found());
        assert!(store
            .set_completed(&missing, true)
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn test_delete_missing_task_is_silent() {
        let store = MemoryTaskStore::new();
        assert!(store.delete(&TaskId::new("nope")).await.is_ok());
    }
}
