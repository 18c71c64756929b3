//! Organization URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated Dataverse organization base URL.
///
/// Network URLs must use HTTPS, or HTTP for localhost. A trailing slash is
/// dropped so derived endpoints never contain `//`.
///
/// # Example
///
/// ```
/// use dataverse_core::OrgUrl;
///
/// let org = OrgUrl::new("https://contoso.crm.dynamics.com/").unwrap();
/// assert_eq!(org.api_url("v9.2"), "https://contoso.crm.dynamics.com/api/data/v9.2");
/// assert_eq!(org.token_scope(), "https://contoso.crm.dynamics.com/.default");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OrgUrl(Url);

impl OrgUrl {
    /// Create a new organization URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is empty, not absolute, or uses plain
    /// HTTP against a non-local host.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref().trim();
        if s.is_empty() {
            return Err(InvalidInputError::OrgUrl {
                value: s.to_string(),
                reason: "base URL is required".to_string(),
            }
            .into());
        }

        let url = Url::parse(s).map_err(|e| InvalidInputError::OrgUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        let normalized = if url.path() == "/" {
            let mut u = url.clone();
            u.set_path("");
            u
        } else {
            url
        };

        Ok(Self(normalized))
    }

    /// Returns the base URL without a trailing slash.
    pub fn base(&self) -> &str {
        self.0.as_str().trim_end_matches('/')
    }

    /// Returns the Web API root for the given version (e.g. `v9.2`).
    pub fn api_url(&self, version: &str) -> String {
        format!("{}/api/data/{}", self.base(), version)
    }

    /// Returns the OAuth scope used to acquire tokens for this organization.
    pub fn token_scope(&self) -> String {
        format!("{}/.default", self.base())
    }

    /// Returns the URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::OrgUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        let scheme = url.scheme();
        let is_localhost = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "[::1]");

        if scheme != "https" && !(scheme == "http" && is_localhost) {
            return Err(InvalidInputError::OrgUrl {
                value: original.to_string(),
                reason: "must use HTTPS (HTTP allowed only for localhost)".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidInputError::OrgUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for OrgUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base())
    }
}

impl FromStr for OrgUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for OrgUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.base())
    }
}

impl<'de> Deserialize<'de> for OrgUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        OrgUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for OrgUrl {
    fn as_ref(&self) -> &str {
        self.base()
    }
}
