//! List synchronization between the remote store and local state
//!
//! The synchronizer owns the live subscription for the current identity and
//! an ordered in-memory copy of that identity's tasks. Every delivered
//! snapshot wholesale-replaces the list; no diffing, no patching. Snapshots
//! may interleave arbitrarily with in-flight mutations; whichever snapshot
//! arrives is authoritative.

use crate::error::Result;
use crate::models::{sort_snapshot, OwnerId, Task};
use crate::session::Identity;
use crate::store::{Snapshot, Subscription, SyncEvent, TaskStore};

/// Connection state of the live feed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncState {
    /// No identity, no feed
    Idle,
    /// Feed open, snapshots flowing
    Live,
    /// The feed failed; waiting for a manual retry
    Lost,
}

/// Keeps a local ordered task list consistent with the remote store
pub struct ListSynchronizer<S: TaskStore> {
    store: S,
    owner: Option<OwnerId>,
    subscription: Option<Subscription>,
    tasks: Vec<Task>,
    state: SyncState,
}

impl<S: TaskStore> ListSynchronizer<S> {
    pub const fn new(store: S) -> Self {
        Self {
            store,
            owner: None,
            subscription: None,
            tasks: Vec::new(),
            state: SyncState::Idle,
        }
    }

    /// The current ordered task list
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[must_use]
    pub const fn state(&self) -> SyncState {
        self.state
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// React to an identity change
    ///
    /// The previous feed is always torn down and the list cleared before a
    /// feed for the new identity opens, so stale-owner data can never leak
    /// into the new session's state.
    pub async fn set_identity(&mut self, identity: Option<&Identity>) -> Result<()> {
        self.teardown();
        let Some(identity) = identity else {
            return Ok(());
        };
        self.owner = Some(identity.id.clone());
        self.resubscribe().await
    }

    /// Open (or, after `Lost`, re-open) the feed for the current owner
    pub async fn resubscribe(&mut self) -> Result<()> {
        let Some(owner) = self.owner.clone() else {
            return Ok(());
        };
        self.subscription = Some(self.store.subscribe(&owner).await?);
        self.state = SyncState::Live;
        Ok(())
    }

    /// Wait for the next feed event and apply it; returns the new state
    ///
    /// Returns immediately with `Idle` when no feed is open.
    pub async fn next(&mut self) -> SyncState {
        let Some(subscription) = self.subscription.as_mut() else {
            self.state = if self.state == SyncState::Lost {
                SyncState::Lost
            } else {
                SyncState::Idle
            };
            return self.state;
        };

        match subscription.recv().await {
            Some(SyncEvent::Snapshot(snapshot)) => self.apply(snapshot),
            Some(SyncEvent::Lost(error)) => {
                tracing::error!("Live task feed lost: {}", error);
                self.subscription = None;
                self.state = SyncState::Lost;
            }
            None => {
                self.subscription = None;
                self.state = SyncState::Idle;
            }
        }
        self.state
    }

    /// Replace the local list with a delivered snapshot, re-sorted
    fn apply(&mut self, snapshot: Snapshot) {
        let mut tasks = snapshot.tasks;
        sort_snapshot(&mut tasks);
        tracing::debug!("Applied snapshot with {} tasks", tasks.len());
        self.tasks = tasks;
    }

    fn teardown(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.close();
        }
        self.tasks.clear();
        self.owner = None;
        self.state = SyncState::Idle;
    }
}
