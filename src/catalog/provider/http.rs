use crate::catalog::{CatalogError, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("moviedeck/", env!("CARGO_PKG_VERSION"));

/// HTTP client wrapper for the metadata API
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        let base_url: String = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the underlying reqwest client
    #[must_use]
    pub const fn inner(&self) -> &Client {
        &self.client
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build full URL from endpoint
    #[must_use]
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Execute GET request with query parameters and decode the JSON body
    pub async fn get_with_params<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = self.url(endpoint);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(CatalogError::Transport)?;

        Self::handle_response(response).await
    }

    /// Map non-2xx statuses to `Api` and undecodable bodies to `Parse`
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let status_code = status.as_u16();
            let message = response.text().await.unwrap_or_default();

            return Err(CatalogError::Api {
                status: status_code,
                message,
            });
        }

        let body = response.text().await.map_err(CatalogError::Transport)?;
        serde_json::from_str::<T>(&body)
            .map_err(|e| CatalogError::Parse(format!("JSON parse error: {e}")))
    }
}
