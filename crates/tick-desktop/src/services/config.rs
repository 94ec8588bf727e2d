//! Runtime configuration from the environment
//!
//! These are safe-to-ship public endpoints required to reach the managed
//! backend. Secret credentials never live here.

use tick_core::{Error, Result};

/// Endpoints of the managed backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopConfig {
    /// Base URL of the tasks API
    pub api_base_url: String,
    /// Base URL of the auth endpoint
    pub auth_url: String,
}

impl DesktopConfig {
    /// Read configuration from `TICK_API_BASE_URL` and `TICK_AUTH_URL`
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_base_url: require_env("TICK_API_BASE_URL")?,
            auth_url: require_env("TICK_AUTH_URL")?,
        })
    }
}

fn require_env(name: &str) -> Result<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| Error::InvalidInput(format!("{name} is not set")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_env_rejects_blank_values() {
        std::env::set_var("TICK_TEST_BLANK", "   ");
        assert!(require_env("TICK_TEST_BLANK").is_err());
        assert!(require_env("TICK_TEST_UNSET_NAME").is_err());

        std::env::set_var("TICK_TEST_SET", " https://api.example.com ");
        assert_eq!(
            require_env("TICK_TEST_SET").unwrap(),
            "https://api.example.com"
        );
    }
}
