//! Household services API client

pub mod admin;
pub mod auth;
pub mod customer;
pub mod error;
mod interceptor;
pub mod misc;
pub mod professional;
pub mod request;
pub mod scope;

pub use request::PendingRequest;
pub use scope::Scope;

use bytes::Bytes;
use error::ClientError;
use household_core::{ClientConfig, MemorySessionStore, Navigator, NoopNavigator, SessionStore};
use interceptor::Outcome;
use reqwest::{Client, ClientBuilder};
use std::sync::Arc;
use std::time::Duration;

/// API gateway client
///
/// Cloning is cheap; clones share the connection pool, the session store and
/// the navigator.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    /// Create a new client with default configuration
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a new client builder
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    /// Start a request; its credential scope is derived from the path
    pub fn request(&self, method: reqwest::Method, path: impl Into<String>) -> PendingRequest {
        PendingRequest::new(method, path)
    }

    /// Execute a request and decode its JSON body
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: PendingRequest,
    ) -> Result<T, ClientError> {
        let response = self.dispatch(request).await?;
        Ok(response.json().await?)
    }

    /// Execute a request and return its raw body
    pub async fn execute_bytes(&self, request: PendingRequest) -> Result<Bytes, ClientError> {
        let response = self.dispatch(request).await?;
        Ok(response.bytes().await?)
    }

    /// Send a request through both interceptors
    async fn dispatch(&self, mut request: PendingRequest) -> Result<reqwest::Response, ClientError> {
        loop {
            let response = self.send(&request).await?;
            let error = match Self::check(response).await {
                Ok(response) => return Ok(response),
                Err(error) => error,
            };

            match self.intercept_failure(&mut request, error).await {
                Outcome::Retry => {
                    debug!(path = request.path(), "Retrying request with refreshed token");
                }
                Outcome::Fail(error) => return Err(error),
            }
        }
    }

    /// Build the wire request, run the request interceptor and send it
    async fn send(&self, request: &PendingRequest) -> Result<reqwest::Response, ClientError> {
        let builder = request.build(&self.client, &self.base_url)?;
        let builder = self.attach_token(request, builder);
        Ok(builder.send().await?)
    }

    /// Turn a non-success status into an error
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            Err(ClientError::from_status(status, message))
        }
    }
}

/// Builder for ApiClient
#[derive(Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    session: Option<Arc<dyn SessionStore>>,
    navigator: Option<Arc<dyn Navigator>>,
}

impl ApiClientBuilder {
    /// Apply base URL, timeout and user agent from a loaded configuration
    pub fn config(mut self, config: &ClientConfig) -> Self {
        self.base_url = Some(config.base_url.clone());
        self.timeout = (config.timeout_secs > 0).then(|| Duration::from_secs(config.timeout_secs));
        self.user_agent = Some(config.user_agent.clone());
        self
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Set the store holding the role tokens (in-memory by default)
    pub fn session_store(mut self, session: Arc<dyn SessionStore>) -> Self {
        self.session = Some(session);
        self
    }

    /// Set the receiver of navigation intents (discarded by default)
    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<ApiClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();
        url::Url::parse(&base_url)
            .map_err(|e| ClientError::Configuration(format!("invalid base_url {base_url}: {e}")))?;

        let mut client_builder = ClientBuilder::new();

        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        client_builder = client_builder.user_agent(
            self.user_agent
                .unwrap_or_else(|| concat!("household-client/", env!("CARGO_PKG_VERSION")).into()),
        );

        let client = client_builder.build()?;

        Ok(ApiClient {
            client,
            base_url,
            session: self
                .session
                .unwrap_or_else(|| Arc::new(MemorySessionStore::new())),
            navigator: self.navigator.unwrap_or_else(|| Arc::new(NoopNavigator)),
        })
    }
}
