//! HTTP access to the directory API.
//!
//! [`SearchFetcher`] is the seam the search session depends on;
//! [`HttpSearchClient`] implements it over `reqwest`, and tests substitute
//! their own implementations.

use async_trait::async_trait;
use bizdir_persistence::types::{
    FilterOptions, PageRequest, RecordFilter, RecordStats, SearchEnvelope,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::query_string::encode_query;

/// Executes one search request.
#[async_trait]
pub trait SearchFetcher: Send + Sync {
    /// Fetches one page of matches.
    async fn search(&self, filter: &RecordFilter, page: &PageRequest)
    -> ClientResult<SearchEnvelope>;
}

/// `reqwest`-backed client for the directory API.
///
/// # Example
///
/// ```rust,ignore
/// use bizdir_client::{ClientConfig, HttpSearchClient};
///
/// let client = HttpSearchClient::new(ClientConfig::new("http://127.0.0.1:8080"))?;
/// let options = client.filter_options().await?;
/// let stats = client.stats().await?;
/// ```
#[derive(Debug, Clone)]
pub struct HttpSearchClient {
    http: Client,
    base_url: Url,
}

impl HttpSearchClient {
    /// Creates a client for the configured base URL.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let http = Client::builder().timeout(config.request_timeout).build()?;
        Self::with_client(http, &config.base_url)
    }

    /// Creates a client around an existing `reqwest::Client`.
    pub fn with_client(http: Client, base_url: &str) -> ClientResult<Self> {
        let mut base_url = Url::parse(base_url)?;
        // Keep any path prefix when joining endpoint paths
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { http, base_url })
    }

    /// The base URL endpoints are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetches the distinct state, status and entity type values.
    pub async fn filter_options(&self) -> ClientResult<FilterOptions> {
        self.get_json(self.endpoint("companies/filter-options", None)?)
            .await
    }

    /// Fetches the dashboard statistics.
    pub async fn stats(&self) -> ClientResult<RecordStats> {
        self.get_json(self.endpoint("companies/stats", None)?).await
    }

    fn endpoint(&self, path: &str, query: Option<&str>) -> ClientResult<Url> {
        let mut url = self.base_url.join(path)?;
        url.set_query(query);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> ClientResult<T> {
        debug!(%url, "Sending directory request");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error")?.as_str().map(str::to_string));
            warn!(status = status.as_u16(), ?message, "Directory request failed");
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&body).map_err(|e| ClientError::Decode {
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl SearchFetcher for HttpSearchClient {
    async fn search(
        &self,
        filter: &RecordFilter,
        page: &PageRequest,
    ) -> ClientResult<SearchEnvelope> {
        let query = encode_query(filter, page);
        self.get_json(self.endpoint("companies", Some(&query))?).await
    }
}
