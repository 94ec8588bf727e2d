//! Session identity plumbing
//!
//! The session provider is an external collaborator: it pushes the current
//! authenticated identity (or none) and offers a sign-out action. Identity
//! changes are modeled as a `tokio::sync::watch` channel so consumers can
//! react without polling.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::error::Result;
use crate::models::OwnerId;

/// The authenticated identity whose tasks are visible
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque user id; doubles as the subscription filter key
    pub id: OwnerId,
    /// E-mail for display, when the provider exposes one
    pub email: Option<String>,
}

/// Source of the current authenticated identity
#[allow(async_fn_in_trait)]
pub trait SessionProvider {
    /// Reactive view of the current identity; `None` means signed out
    fn watch_identity(&self) -> watch::Receiver<Option<Identity>>;

    /// Terminate the current session
    async fn sign_out(&self) -> Result<()>;
}

/// In-process identity channel backing a `SessionProvider` implementation
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: watch::Sender<Option<Identity>>,
}

impl SessionHandle {
    /// Create a handle with no identity (signed out)
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Publish an identity change to every watcher
    pub fn set(&self, identity: Option<Identity>) {
        // send_replace never fails; plain send would when no receiver is alive
        let _ = self.tx.send_replace(identity);
    }

    /// Subscribe to identity changes
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<Option<Identity>> {
        self.tx.subscribe()
    }

    /// The identity right now, without subscribing
    #[must_use]
    pub fn current(&self) -> Option<Identity> {
        self.tx.borrow().clone()
    }
}

impl Default for SessionHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn identity(id: &str) -> Identity {
        Identity {
            id: OwnerId::new(id),
            email: Some(format!("{id}@example.com")),
        }
    }

    #[test]
    fn test_handle_starts_signed_out() {
        let handle = SessionHandle::new();
        assert_eq!(handle.current(), None);
    }

    #[tokio::test]
    async fn test_watchers_see_identity_changes() {
        let handle = SessionHandle::new();
        let mut rx = handle.watch();

        handle.set(Some(identity("user-1")));
        rx.changed().await.unwrap();
        assert_eq!(
            rx.borrow_and_update().as_ref().map(|i| i.id.clone()),
            Some(OwnerId::new("user-1"))
        );

        handle.set(None);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), None);
    }
}
