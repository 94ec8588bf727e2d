//! Managed auth client
//!
//! A thin wrapper around the hosted auth endpoint: password sign-in,
//! session restore/refresh, and sign-out. Everything else (sign-up,
//! confirmation mails, password reset) lives on the provider's own pages
//! and is not part of this client.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::OwnerId;
use crate::session::Identity;

const EXPIRY_SKEW_SECONDS: i64 = 60;

/// An authenticated session issued by the auth endpoint
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
    pub identity: Identity,
}

impl AuthSession {
    /// Whether the access token is expired (with a small skew allowance)
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= unix_timestamp_now() + EXPIRY_SKEW_SECONDS
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AuthSession")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .field("identity", &self.identity)
            .finish()
    }
}

/// Where restored sessions are kept between launches
pub trait SessionPersistence: Clone + Send + Sync + 'static {
    fn load_session(&self) -> Result<Option<AuthSession>>;
    fn save_session(&self, session: &AuthSession) -> Result<()>;
    fn clear_session(&self) -> Result<()>;
}

/// REST client for the managed auth endpoint
#[derive(Clone)]
pub struct RestAuthClient<S: SessionPersistence> {
    auth_url: String,
    client: Client,
    store: S,
}

impl<S: SessionPersistence> RestAuthClient<S> {
    pub fn new(url: impl AsRef<str>, store: S) -> Result<Self> {
        Ok(Self {
            auth_url: normalize_auth_url(url.as_ref())?,
            client: Client::builder().build()?,
            store,
        })
    }

    /// Restore a persisted session, refreshing it when expired.
    ///
    /// A session whose refresh fails is cleared rather than propagated; the
    /// caller lands on the signed-out path and can sign in again.
    pub async fn restore_session(&self) -> Result<Option<AuthSession>> {
        let Some(stored_session) = self.store.load_session()? else {
            return Ok(None);
        };

        if !stored_session.is_expired() {
            return Ok(Some(stored_session));
        }

        match self.refresh_session(&stored_session.refresh_token).await {
            Ok(refreshed) => {
                self.store.save_session(&refreshed)?;
                Ok(Some(refreshed))
            }
            Err(error) => {
                tracing::warn!("Failed to refresh persisted session: {}", error);
                self.store.clear_session()?;
                Ok(None)
            }
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        validate_credentials(email, password)?;

        let payload = serde_json::json!({
            "email": email,
            "password": password,
        });
        let response = self
            .client
            .post(format!("{}/token", self.auth_url))
            .query(&[("grant_type", "password")])
            .json(&payload)
            .send()
            .await?;

        let session = parse_session_response(response).await?;
        self.store.save_session(&session)?;
        Ok(session)
    }

    pub async fn refresh_session(&self, refresh_token: &str) -> Result<AuthSession> {
        if refresh_token.trim().is_empty() {
            return Err(Error::InvalidInput("refresh token must not be empty".into()));
        }

        let payload = serde_json::json!({
            "refresh_token": refresh_token,
        });
        let response = self
            .client
            .post(format!("{}/token", self.auth_url))
            .query(&[("grant_type", "refresh_token")])
            .json(&payload)
            .send()
            .await?;

        let session = parse_session_response(response).await?;
        self.store.save_session(&session)?;
        Ok(session)
    }

    /// Revoke the session at the endpoint and clear local persistence.
    ///
    /// An already-invalid token still clears local state.
    pub async fn sign_out(&self, access_token: &str) -> Result<()> {
        let response = self
            .client
            .post(format!("{}/logout", self.auth_url))
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if !(status.is_success() || status == StatusCode::UNAUTHORIZED) {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::from_status(status, parse_api_error(status, &body)));
        }

        self.store.clear_session()?;
        Ok(())
    }
}

async fn parse_session_response(response: reqwest::Response) -> Result<AuthSession> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::from_status(status, parse_api_error(status, &body)));
    }
    let payload = response.json::<TokenResponse>().await?;
    payload.try_into()
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_at: Option<i64>,
    expires_in: Option<i64>,
    user: Option<TokenUser>,
}

#[derive(Debug, Deserialize)]
struct TokenUser {
    id: String,
    email: Option<String>,
}

impl TryFrom<TokenResponse> for AuthSession {
    type Error = Error;

    fn try_from(value: TokenResponse) -> Result<Self> {
        let expires_at = value.expires_at.or_else(|| {
            value
                .expires_in
                .map(|expires_in| unix_timestamp_now().saturating_add(expires_in))
        });

        match (value.access_token, value.refresh_token, expires_at, value.user) {
            (Some(access_token), Some(refresh_token), Some(expires_at), Some(user)) => Ok(Self {
                access_token,
                refresh_token,
                expires_at,
                identity: Identity {
                    id: OwnerId::new(user.id),
                    email: user.email,
                },
            }),
            _ => Err(Error::Remote(
                "auth response did not include enough session fields".to_string(),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// Extract a readable message from an API error body, falling back to the
/// raw text or bare status code.
pub(crate) fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ApiErrorBody>(body) {
        if let Some(message) = payload.message.or(payload.error) {
            return format!("{} ({})", message.trim(), status.as_u16());
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", trimmed, status.as_u16())
    }
}

pub(crate) fn normalize_auth_url(url: &str) -> Result<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(Error::InvalidInput("auth URL must not be empty".into()));
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(Error::InvalidInput(
            "auth URL must include http:// or https://".into(),
        ));
    }
    Ok(trimmed.to_string())
}

fn validate_credentials(email: &str, password: &str) -> Result<()> {
    if email.trim().is_empty() {
        return Err(Error::InvalidInput("email is required".into()));
    }
    if password.trim().is_empty() {
        return Err(Error::InvalidInput("password is required".into()));
    }
    Ok(())
}

fn unix_timestamp_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| {
            i64::try_from(duration.as_secs()).unwrap_or(i64::MAX)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_auth_url_rejects_invalid_values() {
        assert!(normalize_auth_url("").is_err());
        assert!(normalize_auth_url("auth.example.com").is_err());
        assert_eq!(
            normalize_auth_url("https://auth.example.com/").unwrap(),
            "https://auth.example.com"
        );
    }

    #[test]
    fn test_auth_session_debug_redacts_tokens() {
        let session = AuthSession {
            access_token: "secret-access".to_string(),
            refresh_token: "secret-refresh".to_string(),
            expires_at: 123,
            identity: Identity {
                id: OwnerId::new("user-1"),
                email: None,
            },
        };
        let debug = format!("{session:?}");
        assert!(!debug.contains("secret-access"));
        assert!(!debug.contains("secret-refresh"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_token_response_derives_expiry_from_expires_in() {
        let response = TokenResponse {
            access_token: Some("a".to_string()),
            refresh_token: Some("r".to_string()),
            expires_at: None,
            expires_in: Some(3600),
            user: Some(TokenUser {
                id: "user-1".to_string(),
                email: None,
            }),
        };
        let session = AuthSession::try_from(response).unwrap();
        assert!(session.expires_at > unix_timestamp_now());
    }

    #[test]
    fn test_token_response_missing_fields_is_an_error() {
        let response = TokenResponse {
            access_token: Some("a".to_string()),
            refresh_token: None,
            expires_at: Some(1),
            expires_in: None,
            user: None,
        };
        assert!(AuthSession::try_from(response).is_err());
    }

    #[test]
    fn test_parse_api_error_prefers_message_field() {
        let parsed = parse_api_error(
            StatusCode::BAD_REQUEST,
            r#"{"message":"bad credentials"}"#,
        );
        assert_eq!(parsed, "bad credentials (400)");
    }

    #[test]
    fn test_validate_credentials() {
        assert!(validate_credentials("", "pw").is_err());
        assert!(validate_credentials("a@b.c", " ").is_err());
        assert!(validate_credentials("a@b.c", "pw").is_ok());
    }
}
