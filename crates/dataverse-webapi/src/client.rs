//! Web API client.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, instrument, trace};

use dataverse_core::traits::{HttpRequest, HttpResponse, Method, Transport};
use dataverse_core::{ClientConfig, OrgUrl, Result, RetryPolicy, TokenCredential};

use crate::endpoints::*;
use crate::transport::HttpTransport;

/// Client for one Dataverse organization.
///
/// Cheap to clone; clones share the transport, credential and
/// configuration. Nothing is mutated after construction.
///
/// # Example
///
/// ```no_run
/// use dataverse_core::{ClientConfig, OrgUrl, StaticTokenCredential};
/// use dataverse_webapi::WebApiClient;
///
/// # async fn example() -> dataverse_core::Result<()> {
/// let org = OrgUrl::new("https://contoso.crm.dynamics.com")?;
/// let client = WebApiClient::new(org, StaticTokenCredential::new("token"), ClientConfig::default())?;
///
/// let rows = client.query_sql("SELECT TOP 5 name FROM account").await?;
/// println!("{} rows", rows.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct WebApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    org: OrgUrl,
    api_url: String,
    config: ClientConfig,
    request_policy: RetryPolicy,
    transport: Arc<dyn Transport>,
    credential: Arc<dyn TokenCredential>,
}

impl WebApiClient {
    /// Create a client using the reqwest transport.
    pub fn new(
        org: OrgUrl,
        credential: impl TokenCredential + 'static,
        config: ClientConfig,
    ) -> Result<Self> {
        let transport = HttpTransport::new(config.http_timeout)?;
        Ok(Self::with_transport(org, credential, config, transport))
    }

    /// Create a client over a caller-supplied transport.
    pub fn with_transport(
        org: OrgUrl,
        credential: impl TokenCredential + 'static,
        config: ClientConfig,
        transport: impl Transport + 'static,
    ) -> Self {
        let api_url = org.api_url(&config.api_version);
        let request_policy = config.request_retry_policy();
        Self {
            inner: Arc::new(ClientInner {
                org,
                api_url,
                config,
                request_policy,
                transport: Arc::new(transport),
                credential: Arc::new(credential),
            }),
        }
    }

    pub fn org(&self) -> &OrgUrl {
        &self.inner.org
    }

    /// Web API root, `<base>/api/data/<version>`.
    pub fn api_url(&self) -> &str {
        &self.inner.api_url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.inner.api_url, path)
    }

    /// A request carrying a fresh bearer token and the standard OData headers.
    pub(crate) async fn request(&self, method: Method, url: String) -> Result<HttpRequest> {
        let scope = self.inner.org.token_scope();
        let token = self.inner.credential.acquire_token(&scope).await?;
        trace!(%scope, "token acquired");

        Ok(HttpRequest::new(method, url)
            .bearer(token)
            .header(HEADER_ACCEPT, APPLICATION_JSON)
            .header(HEADER_CONTENT_TYPE, APPLICATION_JSON)
            .header(HEADER_ODATA_MAX_VERSION, ODATA_VERSION)
            .header(HEADER_ODATA_VERSION, ODATA_VERSION))
    }

    /// Send through the request retry policy; non-success statuses are errors.
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    pub(crate) async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let transport = &self.inner.transport;
        let response = self
            .inner
            .request_policy
            .run(|| {
                let request = request.clone();
                async move { transport.send(request).await?.error_for_status() }
            })
            .await?;
        debug!(status = response.status, "request completed");
        Ok(response)
    }
}

impl fmt::Debug for WebApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebApiClient")
            .field("api_url", &self.inner.api_url)
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}
