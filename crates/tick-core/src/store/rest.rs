//! REST client for the managed tasks API

use std::time::Duration;

use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::auth::parse_api_error;
use crate::error::{Error, Result};
use crate::models::{NewTask, OwnerId, Task, TaskId};
use crate::store::{Snapshot, Subscription, SyncEvent, TaskStore};

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);
const FEED_CHANNEL_CAPACITY: usize = 8;

/// Task store backed by the managed tasks API
///
/// The API exposes no push channel, so the live subscription is a polling
/// loop that re-fetches the owner's collection and forwards a snapshot
/// whenever its content changed. A fetch failure ends the feed with
/// [`SyncEvent::Lost`]; reconnecting is the consumer's decision.
#[derive(Clone)]
pub struct RestTaskStore {
    base_url: String,
    client: Client,
    bearer_token: String,
    poll_interval: Duration,
}

impl RestTaskStore {
    pub fn new(base_url: impl AsRef<str>, bearer_token: impl Into<String>) -> Result<Self> {
        let bearer_token = bearer_token.into().trim().to_string();
        if bearer_token.is_empty() {
            return Err(Error::InvalidInput("bearer token must not be empty".into()));
        }

        Ok(Self {
            base_url: normalize_base_url(base_url.as_ref())?,
            client: Client::builder().build()?,
            bearer_token,
            poll_interval: DEFAULT_POLL_INTERVAL,
        })
    }

    /// Override the feed poll interval (mainly for tests)
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    async fn fetch_snapshot(&self, owner: &OwnerId) -> Result<Snapshot> {
        let response = self
            .client
            .get(format!("{}/v1/tasks", self.base_url))
            .query(&[("owner", owner.as_str())])
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;

        let response = check_status(response).await?;
        let tasks = response.json::<Vec<Task>>().await?;
        Ok(Snapshot { tasks })
    }
}

impl TaskStore for RestTaskStore {
    async fn subscribe(&self, owner: &OwnerId) -> Result<Subscription> {
        let (tx, rx) = mpsc::channel(FEED_CHANNEL_CAPACITY);
        let store = self.clone();
        let owner = owner.clone();

        let task = tokio::spawn(async move {
            let mut last_sent: Option<Snapshot> = None;
            loop {
                match store.fetch_snapshot(&owner).await {
                    Ok(snapshot) => {
                        if last_sent.as_ref() != Some(&snapshot) {
                            last_sent = Some(snapshot.clone());
                            if tx.send(SyncEvent::Snapshot(snapshot)).await.is_err() {
                                return;
                            }
                        }
                    }
                    Err(error) => {
                        tracing::warn!("Task feed for {} failed: {}", owner, error);
                        let _ = tx
                            .send(SyncEvent::Lost(Error::Subscription(error.to_string())))
                            .await;
                        return;
                    }
                }
                tokio::time::sleep(store.poll_interval).await;
            }
        });

        Ok(Subscription::new(rx, Some(task)))
    }

    async fn create(&self, new_task: NewTask) -> Result<TaskId> {
        let response = self
            .client
            .post(format!("{}/v1/tasks", self.base_url))
            .bearer_auth(&self.bearer_token)
            .json(&new_task)
            .send()
            .await?;

        let response = check_status(response).await?;
        let created = response.json::<CreatedResponse>().await?;
        Ok(TaskId::new(created.id))
    }

    async fn set_completed(&self, id: &TaskId, completed: bool) -> Result<()> {
        self.patch(id, &TaskPatch {
            text: None,
            completed: Some(completed),
        })
        .await
    }

    async fn update_text(&self, id: &TaskId, text: &str) -> Result<()> {
        self.patch(id, &TaskPatch {
            text: Some(text),
            completed: None,
        })
        .await
    }

    async fn delete(&self, id: &TaskId) -> Result<()> {
        let response = self
            .client
            .delete(format!("{}/v1/tasks/{}", self.base_url, id))
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }
}

impl RestTaskStore {
    async fn patch(&self, id: &TaskId, patch: &TaskPatch<'_>) -> Result<()> {
        let response = self
            .client
            .patch(format!("{}/v1/tasks/{}", self.base_url, id))
            .bearer_auth(&self.bearer_token)
            .json(patch)
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }
}

/// Partial update body; the store refreshes the update timestamp on write
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TaskPatch<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    completed: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct CreatedResponse {
    id: String,
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(Error::from_status(status, parse_api_error(status, &body)))
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(Error::InvalidInput("API base URL must not be empty".into()));
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(Error::InvalidInput(
            "API base URL must include http:// or https://".into(),
        ));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("https://api.example.com/").unwrap(),
            "https://api.example.com"
        );
        assert!(normalize_base_url("api.example.com").is_err());
        assert!(normalize_base_url("  ").is_err());
    }

    #[test]
    fn test_new_rejects_empty_token() {
        assert!(RestTaskStore::new("https://api.example.com", "  ").is_err());
    }

    #[test]
    fn test_patch_serializes_only_set_fields() {
        let patch = TaskPatch {
            text: None,
            completed: Some(true),
        };
        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(json, r#"{"completed":true}"#);

        let patch = TaskPatch {
            text: Some("new text"),
            completed: None,
        };
        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(json, r#"{"text":"new text"}"#);
    }
}
