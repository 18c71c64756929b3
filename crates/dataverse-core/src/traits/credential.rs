//! Credential trait.

use std::fmt;

use async_trait::async_trait;

use crate::{AccessToken, Result};

/// Source of bearer tokens for a scope.
///
/// Interactive and OAuth flows live outside this crate; implementations
/// only need to hand back a token valid for `scope`.
#[async_trait]
pub trait TokenCredential: Send + Sync {
    /// Acquire a token for the given scope (e.g. `https://org.crm.dynamics.com/.default`).
    async fn acquire_token(&self, scope: &str) -> Result<AccessToken>;
}

/// A credential that always returns one pre-acquired token.
///
/// # Example
///
/// ```
/// use dataverse_core::StaticTokenCredential;
///
/// let credential = StaticTokenCredential::new("eyJ0eXAi...");
/// assert!(format!("{:?}", credential).contains("[REDACTED]"));
/// ```
#[derive(Clone)]
pub struct StaticTokenCredential {
    token: AccessToken,
}

impl StaticTokenCredential {
    /// Create a credential from a raw bearer token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: AccessToken::new(token),
        }
    }
}

#[async_trait]
impl TokenCredential for StaticTokenCredential {
    async fn acquire_token(&self, _scope: &str) -> Result<AccessToken> {
        Ok(self.token.clone())
    }
}

// Intentionally hide the token in Debug output
impl fmt::Debug for StaticTokenCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticTokenCredential")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_credential_ignores_scope() {
        let credential = StaticTokenCredential::new("secret-token");
        let token = credential
            .acquire_token("https://contoso.crm.dynamics.com/.default")
            .await
            .unwrap();
        assert_eq!(token.secret(), "secret-token");
    }

    #[test]
    fn static_credential_hides_token_in_debug() {
        let credential = StaticTokenCredential::new("secret-token");
        let debug = format!("{:?}", credential);
        assert!(!debug.contains("secret-token"));
    }
}
