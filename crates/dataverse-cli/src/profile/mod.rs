//! Connection profile: resolves the environment URL and token for a command.

pub mod storage;

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use dataverse_core::{ClientConfig, OrgUrl, StaticTokenCredential};
use dataverse_webapi::WebApiClient;

use crate::cli::ConnectionArgs;

/// A saved connection.
#[derive(Clone, Serialize, Deserialize)]
pub struct Profile {
    pub url: String,
    pub token: String,
}

impl fmt::Debug for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Profile")
            .field("url", &self.url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Build a client from flags, environment and the saved profile, in that order.
pub async fn client(args: &ConnectionArgs) -> Result<WebApiClient> {
    let saved = storage::load_profile().await.context("Failed to load profile")?;

    let url = args
        .url
        .clone()
        .or_else(|| saved.as_ref().map(|p| p.url.clone()))
        .context("No environment URL. Pass --url or run 'dataverse connect' first.")?;
    let token = args
        .token
        .clone()
        .or_else(|| saved.as_ref().map(|p| p.token.clone()))
        .context("No token. Pass --token or run 'dataverse connect' first.")?;

    let org = OrgUrl::new(&url).context("Invalid environment URL")?;
    let config = load_config(args.config.as_deref())?;
    tracing::debug!(org = %org, api_version = %config.api_version, "connecting");

    WebApiClient::new(org, StaticTokenCredential::new(token), config)
        .context("Failed to create client")
}

/// Read client settings; missing fields keep their defaults.
pub fn load_config(path: Option<&Path>) -> Result<ClientConfig> {
    let Some(path) = path else {
        return Ok(ClientConfig::default());
    };

    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    serde_json::from_str(&json).context("Invalid config file")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn profile_debug_hides_token() {
        let profile = Profile {
            url: "https://contoso.crm.dynamics.com".to_string(),
            token: "secret-token".to_string(),
        };
        let debug = format!("{:?}", profile);
        assert!(debug.contains("contoso.crm.dynamics.com"));
        assert!(!debug.contains("secret-token"));
    }

    #[test]
    fn missing_config_path_uses_defaults() {
        assert_eq!(load_config(None).unwrap(), ClientConfig::default());
    }

    #[test]
    fn config_file_overrides_selected_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"http_retries": 0, "readiness_delays_secs": [0, 1]}"#).unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.http_retries, 0);
        assert_eq!(
            config.readiness_delays,
            vec![Duration::ZERO, Duration::from_secs(1)]
        );
        assert_eq!(config.api_version, "v9.2");
    }

    #[test]
    fn malformed_config_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{").unwrap();

        assert!(load_config(Some(&path)).is_err());
    }
}
