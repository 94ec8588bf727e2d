//! Mutation operations issued directly against the remote store
//!
//! None of these update local state: the change becomes visible only once
//! the live subscription re-delivers the owner's snapshot. Validation that
//! must block a remote call happens here; everything else is the store's
//! business.

use crate::error::{Error, Result};
use crate::models::{NewTask, OwnerId, Task, TaskId};
use crate::store::TaskStore;

/// Outcome of an edit-save against a possibly-vanished target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The text was written; edit mode should exit
    Saved,
    /// The target was deleted underneath the edit; nothing was written
    TargetMissing,
}

/// Thin operation layer between the UI and a `TaskStore`
#[derive(Clone)]
pub struct TaskService<S: TaskStore> {
    store: S,
}

impl<S: TaskStore> TaskService<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Submit the composer draft as a new task
    ///
    /// An empty or whitespace-only draft is a no-op (`Ok(None)`): no store
    /// mutation, no error surfaced.
    pub async fn create(&self, owner: &OwnerId, text: &str) -> Result<Option<TaskId>> {
        let Ok(new_task) = NewTask::from_text(owner.clone(), text) else {
            return Ok(None);
        };
        let id = self.store.create(new_task).await?;
        tracing::debug!("Created task {}", id);
        Ok(Some(id))
    }

    /// Flip the completion flag of `task`
    ///
    /// Submits the negation of the flag as currently known locally; rapid
    /// repeat calls race at the store, last write wins.
    pub async fn toggle(&self, task: &Task) -> Result<()> {
        self.store.set_completed(&task.id, !task.completed).await
    }

    /// Save an edit draft over the task's text
    ///
    /// An empty or whitespace-only draft is a validation error and makes no
    /// remote call; the caller stays in edit mode. A target deleted since
    /// the edit began reports [`SaveOutcome::TargetMissing`].
    pub async fn save_edit(&self, id: &TaskId, draft: &str) -> Result<SaveOutcome> {
        let draft = draft.trim();
        if draft.is_empty() {
            return Err(Error::InvalidInput("task text cannot be empty".into()));
        }

        match self.store.update_text(id, draft).await {
            Ok(()) => Ok(SaveOutcome::Saved),
            Err(error) if error.is_not_found() => {
                tracing::debug!("Edit target {} vanished before save", id);
                Ok(SaveOutcome::TargetMissing)
            }
            Err(error) => Err(error),
        }
    }

    /// Delete a task
    ///
    /// The confirmation step lives with the caller; once invoked, the
    /// delete is issued unconditionally.
    pub async fn delete(&self, id: &TaskId) -> Result<()> {
        self.store.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::store::MemoryTaskStore;

    fn owner() -> OwnerId {
        OwnerId::new("user-1")
    }

    fn service() -> TaskService<MemoryTaskStore> {
        TaskService::new(MemoryTaskStore::new())
    }

    #[tokio::test]
    async fn test_create_trims_and_persists() {
        let service = service();
        let id = service.create(&owner(), "  buy milk ").await.unwrap().unwrap();
        let task = service.store().get(&id).await.unwrap();
        assert_eq!(task.text, "buy milk");
        assert!(!task.completed);
        assert_eq!(task.owner_id, owner());
    }

    #[tokio::test]
    async fn test_create_empty_text_is_a_no_op() {
        let service = service();
        assert_eq!(service.create(&owner(), "   ").await.unwrap(), None);
        assert_eq!(service.create(&owner(), "").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_toggle_is_an_involution() {
        let service = service();
        let id = service.create(&owner(), "task").await.unwrap().unwrap();

        let original = service.store().get(&id).await.unwrap();
        service.toggle(&original).await.unwrap();
        let flipped = service.store().get(&id).await.unwrap();
        assert_eq!(flipped.completed, !original.completed);

        service.toggle(&flipped).await.unwrap();
        let restored = service.store().get(&id).await.unwrap();
        assert_eq!(restored.completed, original.completed);
    }

    #[tokio::test]
    async fn test_save_edit_rejects_empty_draft_without_store_call() {
        let service = service();
        let id = service.create(&owner(), "before").await.unwrap().unwrap();

        let result = service.save_edit(&id, "  ").await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert_eq!(service.store().get(&id).await.unwrap().text, "before");
    }

    #[tokio::test]
    async fn test_save_edit_trims_draft() {
        let service = service();
        let id = service.create(&owner(), "before").await.unwrap().unwrap();

        let outcome = service.save_edit(&id, " after \n").await.unwrap();
        assert_eq!(outcome, SaveOutcome::Saved);
        assert_eq!(service.store().get(&id).await.unwrap().text, "after");
    }

    #[tokio::test]
    async fn test_save_edit_on_deleted_target_reports_missing() {
        let service = service();
        let id = service.create(&owner(), "doomed").await.unwrap().unwrap();
        service.delete(&id).await.unwrap();

        let outcome = service.save_edit(&id, "anything").await.unwrap();
        assert_eq!(outcome, SaveOutcome::TargetMissing);
    }
}
