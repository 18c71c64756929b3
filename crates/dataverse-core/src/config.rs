//! Client configuration.

use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::retry::{RetryPolicy, TRANSIENT_STATUSES};

/// Settings shared by every component of a client.
///
/// Built once and passed in at construction; nothing reads hidden globals.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use dataverse_core::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_language_code(1031)
///     .with_http_retries(0);
/// assert_eq!(config.request_retry_policy().max_attempts(), 1);
/// assert_eq!(config.readiness_policy().delays()[1], Duration::from_secs(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Web API version segment, e.g. `v9.2`.
    pub api_version: String,
    /// Locale id used for metadata labels.
    pub language_code: u32,
    /// Name of the server-side SQL query procedure.
    pub sql_api_name: String,
    /// Per-request timeout.
    #[serde(rename = "http_timeout_secs", deserialize_with = "secs")]
    pub http_timeout: Duration,
    /// Retries after the first attempt for transient request failures.
    pub http_retries: u32,
    /// First retry delay; doubles on each further retry.
    #[serde(rename = "http_backoff_ms", deserialize_with = "millis")]
    pub http_backoff: Duration,
    /// Waits before each readiness lookup after creating a table.
    #[serde(rename = "readiness_delays_secs", deserialize_with = "secs_list")]
    pub readiness_delays: Vec<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_version: "v9.2".to_string(),
            language_code: 1033,
            sql_api_name: "mcp_ExecuteSqlQuery".to_string(),
            http_timeout: Duration::from_secs(120),
            http_retries: 5,
            http_backoff: Duration::from_millis(500),
            readiness_delays: [0, 2, 5, 10, 20, 30]
                .into_iter()
                .map(Duration::from_secs)
                .collect(),
        }
    }
}

impl ClientConfig {
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    pub fn with_language_code(mut self, code: u32) -> Self {
        self.language_code = code;
        self
    }

    pub fn with_sql_api_name(mut self, name: impl Into<String>) -> Self {
        self.sql_api_name = name.into();
        self
    }

    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }

    pub fn with_http_retries(mut self, retries: u32) -> Self {
        self.http_retries = retries;
        self
    }

    pub fn with_http_backoff(mut self, backoff: Duration) -> Self {
        self.http_backoff = backoff;
        self
    }

    pub fn with_readiness_delays(mut self, delays: Vec<Duration>) -> Self {
        self.readiness_delays = delays;
        self
    }

    /// Policy applied to every single HTTP exchange: exponential backoff on
    /// throttling, gateway errors and network failures.
    pub fn request_retry_policy(&self) -> RetryPolicy {
        RetryPolicy::exponential(self.http_retries, self.http_backoff)
            .retry_on_statuses(TRANSIENT_STATUSES)
            .retry_if(|err| err.is_network())
    }

    /// Policy for polling a newly created table until it is queryable.
    pub fn readiness_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.readiness_delays.iter().copied())
            .retry_if(|err| err.kind() == crate::ErrorKind::NotReady)
    }
}

fn secs<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    u64::deserialize(deserializer).map(Duration::from_secs)
}

fn millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    u64::deserialize(deserializer).map(Duration::from_millis)
}

fn secs_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Duration>, D::Error> {
    let secs = Vec::<u64>::deserialize(deserializer)?;
    Ok(secs.into_iter().map(Duration::from_secs).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_version, "v9.2");
        assert_eq!(config.language_code, 1033);
        assert_eq!(config.request_retry_policy().max_attempts(), 6);
        assert_eq!(config.readiness_policy().max_attempts(), 6);
    }

    #[test]
    fn deserializes_partial_overrides() {
        let config: ClientConfig = serde_json::from_str(
            r#"{"language_code": 1031, "http_backoff_ms": 250, "readiness_delays_secs": [0, 1]}"#,
        )
        .unwrap();
        assert_eq!(config.language_code, 1031);
        assert_eq!(config.http_backoff, Duration::from_millis(250));
        assert_eq!(config.readiness_delays, vec![Duration::ZERO, Duration::from_secs(1)]);
        assert_eq!(config.api_version, "v9.2");
    }

    #[test]
    fn readiness_policy_retries_only_not_ready() {
        use crate::error::{ProvisioningError, ServiceError, TransportError};

        let policy = ClientConfig::default().readiness_policy();
        let not_ready = ProvisioningError::NotReady {
            schema_name: "new_Item".to_string(),
        };
        assert!(policy.should_retry(&not_ready.into()));

        let forbidden = TransportError::Status(ServiceError::new(403, None, None));
        assert!(!policy.should_retry(&forbidden.into()));
    }

    #[test]
    fn request_policy_retries_throttling() {
        use crate::error::{ServiceError, TransportError};

        let policy = ClientConfig::default().request_retry_policy();
        let throttled = TransportError::Status(ServiceError::new(429, None, None));
        assert!(policy.should_retry(&throttled.into()));
        let bad_request = TransportError::Status(ServiceError::new(400, None, None));
        assert!(!policy.should_retry(&bad_request.into()));
    }
}
