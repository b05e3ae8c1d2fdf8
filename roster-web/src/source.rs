//! Content API client
//!
//! Fetches the member and group photo collections with GROQ queries against
//! the content API's query endpoint. Each query answers
//! `{ "result": [ ... ] }`; any non-2xx status, transport failure or
//! undecodable body fails the fetch. No retries.

use async_trait::async_trait;
use reqwest::{header, Client};
use roster_common::config::RosterConfig;
use roster_common::model::QueryResponse;
use roster_common::{Error, RawGroupPhoto, RawMember, Result};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// GROQ query for member records
pub const MEMBER_QUERY: &str = r#"*[_type=="member"]"#;

/// GROQ query for group photo records
pub const GROUP_PHOTO_QUERY: &str = r#"*[_type=="groupImage"]"#;

const USER_AGENT: &str = concat!("roster-web/", env!("CARGO_PKG_VERSION"));

/// Where roster records come from
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch_members(&self) -> Result<Vec<RawMember>>;

    async fn fetch_group_photos(&self) -> Result<Vec<RawGroupPhoto>>;
}

/// [`RecordSource`] backed by the content API's query endpoint
pub struct ContentApiClient {
    http_client: Client,
    endpoint: String,
}

impl ContentApiClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::USER_AGENT, header::HeaderValue::from_static(USER_AGENT));

        let http_client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &RosterConfig) -> Result<Self> {
        Self::new(
            config.query_endpoint(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn query<T: DeserializeOwned>(&self, groq: &str) -> Result<Vec<T>> {
        debug!(endpoint = %self.endpoint, query = groq, "Querying content API");

        let response = self
            .http_client
            .get(&self.endpoint)
            .query(&[("query", groq)])
            .send()
            .await
            .map_err(|e| Error::Network(format!("Content API request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http {
                url: response.url().to_string(),
                status: status.as_u16(),
            });
        }

        let body: QueryResponse<T> = response
            .json()
            .await
            .map_err(|e| Error::Decode(format!("Failed to parse content API response: {}", e)))?;

        debug!(query = groq, records = body.result.len(), "Content API query complete");
        Ok(body.result)
    }
}

#[async_trait]
impl RecordSource for ContentApiClient {
    async fn fetch_members(&self) -> Result<Vec<RawMember>> {
        self.query(MEMBER_QUERY).await
    }

    async fn fetch_group_photos(&self) -> Result<Vec<RawGroupPhoto>> {
        self.query(GROUP_PHOTO_QUERY).await
    }
}
