//! HTTP option source backed by the finance app REST API
//!
//! `GET {base_url}/api/subcategorias/{id}` answers with a JSON array of
//! `{ "id": ..., "nome": ... }` objects in display order.

use async_trait::async_trait;
use finweb_config::Config;
use finweb_core::{parse_options, LoadError, OptionSource, SelectOption};
use std::time::Duration;

/// Fetches subcategories over HTTP
#[derive(Debug, Clone)]
pub struct HttpOptionSource {
    client: reqwest::Client,
    config: Config,
}

impl HttpOptionSource {
    pub fn new(config: Config) -> Result<Self, LoadError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.api.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(|e| LoadError::NetworkFailure {
            message: format!("failed to build HTTP client: {}", e),
        })?;

        Ok(Self::with_client(config, client))
    }

    /// Use an already configured client
    pub fn with_client(config: Config, client: reqwest::Client) -> Self {
        Self { client, config }
    }

    /// Endpoint for a parent id
    pub fn url_for(&self, parent_id: &str) -> String {
        self.config.subcategories_url(&urlencoding::encode(parent_id))
    }
}

#[async_trait]
impl OptionSource for HttpOptionSource {
    async fn fetch(&self, parent_id: &str) -> Result<Vec<SelectOption>, LoadError> {
        let url = self.url_for(parent_id);
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| LoadError::NetworkFailure { message: e.to_string() })?;

        let status = response.status();
        log::debug!("{} for {}", status, url);
        if !status.is_success() {
            return Err(LoadError::ServerError { status: status.as_u16() });
        }

        let body = response
            .text()
            .await
            .map_err(|e| LoadError::NetworkFailure { message: e.to_string() })?;

        parse_options(&body)
    }
}
