//! Managed auth service wiring the core client to desktop session storage

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;

use tick_core::auth::{AuthSession, RestAuthClient};
use tick_core::session::{Identity, SessionHandle, SessionProvider};
use tick_core::store::RestTaskStore;
use tick_core::{Error, Result};

use super::config::DesktopConfig;
use super::session_store::KeyringSessionStore;

/// Desktop session provider: REST auth client + keyring persistence,
/// publishing identity changes on a watch channel
#[derive(Clone)]
pub struct AuthService {
    client: RestAuthClient<KeyringSessionStore>,
    session: SessionHandle,
    current: Arc<Mutex<Option<AuthSession>>>,
}

impl AuthService {
    pub fn new(config: &DesktopConfig) -> Result<Self> {
        Ok(Self {
            client: RestAuthClient::new(&config.auth_url, KeyringSessionStore::default())?,
            session: SessionHandle::new(),
            current: Arc::new(Mutex::new(None)),
        })
    }

    /// Restore a persisted session at startup; `None` means signed out
    pub async fn restore(&self) -> Result<Option<Identity>> {
        let restored = self.client.restore_session().await?;
        Ok(self.publish(restored))
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Identity> {
        let session = self.client.sign_in(email, password).await?;
        let identity = session.identity.clone();
        self.publish(Some(session));
        Ok(identity)
    }

    /// Revoke the current session and publish the signed-out state
    ///
    /// Local state is cleared even when the endpoint cannot be reached; a
    /// sign-out must never leave the UI signed in.
    pub async fn sign_out(&self) -> Result<()> {
        let token = self
            .access_token()
            .ok_or_else(|| Error::PermissionDenied("no active session".to_string()))?;
        let result = self.client.sign_out(&token).await;
        self.publish(None);
        result
    }

    /// Bearer token of the active session, while signed in
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|session| session.access_token.clone())
    }

    /// Build a tasks-API store authenticated as the current session
    pub fn task_store(&self, config: &DesktopConfig) -> Result<RestTaskStore> {
        let token = self
            .access_token()
            .ok_or_else(|| Error::PermissionDenied("no active session".to_string()))?;
        RestTaskStore::new(&config.api_base_url, token)
    }

    fn publish(&self, session: Option<AuthSession>) -> Option<Identity> {
        let identity = session.as_ref().map(|session| session.identity.clone());
        *self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = session;
        self.session.set(identity.clone());
        identity
    }
}

impl SessionProvider for AuthService {
    fn watch_identity(&self) -> watch::Receiver<Option<Identity>> {
        self.session.watch()
    }

    async fn sign_out(&self) -> Result<()> {
        // resolves to the inherent method
        self.sign_out().await
    }
}
