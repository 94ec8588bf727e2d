//! Task item model

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::error::{Error, Result};

/// An opaque task identifier, assigned by the remote store at creation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(String);

impl TaskId {
    /// Wrap a store-assigned identifier
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The authenticated identity a task belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(String);

impl OwnerId {
    /// Wrap an identity string from the session provider
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A task item in the remote collection
///
/// Timestamps are Unix milliseconds, assigned by the store at write time.
/// They are `None` for the brief window where a snapshot re-delivers a
/// document before the server clock has been applied; such items sort as
/// the oldest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,
    /// Owning identity; the subscription filter guarantees it matches the
    /// current session
    pub owner_id: OwnerId,
    /// Task text (non-empty once persisted)
    pub text: String,
    /// Completion flag
    pub completed: bool,
    /// Creation timestamp (Unix ms)
    #[serde(default)]
    pub created_at: Option<i64>,
    /// Last update timestamp (Unix ms), refreshed on text or completion change
    #[serde(default)]
    pub updated_at: Option<i64>,
}

impl Task {
    /// Creation timestamp for ordering; missing timestamps count as oldest
    #[must_use]
    pub fn created_at_ms(&self) -> i64 {
        self.created_at.unwrap_or(0)
    }
}

/// Fields submitted when creating a task
///
/// The store assigns the id and both timestamps at write time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub owner_id: OwnerId,
    pub text: String,
    pub completed: bool,
}

impl NewTask {
    /// Build a create submission from composer text
    ///
    /// The text is trimmed; an empty or whitespace-only draft is rejected
    /// before any remote call is made.
    pub fn from_text(owner: OwnerId, text: &str) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::InvalidInput("task text cannot be empty".into()));
        }
        Ok(Self {
            owner_id: owner,
            text: text.to_string(),
            completed: false,
        })
    }
}

/// Apply the total snapshot order: incomplete items before completed ones,
/// newest creation first within each group.
pub fn sort_snapshot(tasks: &mut [Task]) {
    tasks.sort_by(compare);
}

fn compare(a: &Task, b: &Task) -> Ordering {
    a.completed
        .cmp(&b.completed)
        .then_with(|| b.created_at_ms().cmp(&a.created_at_ms()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn task(id: &str, text: &str, completed: bool, created_at: i64) -> Task {
        Task {
            id: TaskId::new(id),
            owner_id: OwnerId::new("user-1"),
            text: text.to_string(),
            completed,
            created_at: Some(created_at),
            updated_at: Some(created_at),
        }
    }

    #[test]
    fn test_new_task_trims_text() {
        let new_task = NewTask::from_text(OwnerId::new("user-1"), "  buy milk  ").unwrap();
        assert_eq!(new_task.text, "buy milk");
        assert!(!new_task.completed);
    }

    #[test]
    fn test_new_task_rejects_empty_text() {
        assert!(NewTask::from_text(OwnerId::new("user-1"), "").is_err());
        assert!(NewTask::from_text(OwnerId::new("user-1"), "   \t ").is_err());
    }

    #[test]
    fn test_sort_incomplete_before_completed() {
        let mut tasks = vec![task("1", "a", true, 50), task("2", "b", false, 10)];
        sort_snapshot(&mut tasks);
        assert_eq!(tasks[0].id, TaskId::new("2"));
        assert_eq!(tasks[1].id, TaskId::new("1"));
    }

    #[test]
    fn test_sort_newest_first_within_group() {
        let mut tasks = vec![
            task("1", "a", false, 10),
            task("2", "b", true, 20),
            task("3", "c", false, 30),
        ];
        sort_snapshot(&mut tasks);
        let order: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(order, vec!["3", "1", "2"]);
    }

    #[test]
    fn test_sort_missing_timestamp_counts_as_oldest() {
        let mut tasks = vec![task("1", "a", false, 0), task("2", "b", false, 5)];
        tasks[0].created_at = None;
        sort_snapshot(&mut tasks);
        assert_eq!(tasks[0].id, TaskId::new("2"));
        assert_eq!(tasks[1].id, TaskId::new("1"));
    }

    #[test]
    fn test_task_wire_shape() {
        let json = r#"{"id":"t-1","ownerId":"user-1","text":"a","completed":false}"#;
        let parsed: Task = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.id, TaskId::new("t-1"));
        assert_eq!(parsed.created_at, None);
        assert_eq!(parsed.created_at_ms(), 0);
    }
}
