//! GBFS HTTP client.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::error::FetchError;
use super::types::{FeedResponse, StationInformationResponse, StationStatusResponse};
use crate::domain::{StationInfo, StationStatus};

/// Default feed: Oslo Bysykkel.
pub const DEFAULT_BASE_URL: &str = "https://gbfs.urbansharing.com/oslobysykkel.no";

/// Default value of the `Client-Identifier` header.
const DEFAULT_CLIENT_IDENTIFIER: &str = "bikeshare-dev";

const STATION_INFORMATION: &str = "station_information.json";
const STATION_STATUS: &str = "station_status.json";

/// Configuration for the GBFS client.
#[derive(Debug, Clone)]
pub struct GbfsConfig {
    /// Base URL the feed documents live under
    pub base_url: String,
    /// Sent as `Client-Identifier` on every request
    pub client_identifier: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GbfsConfig {
    /// Create a config for the default feed.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            client_identifier: DEFAULT_CLIENT_IDENTIFIER.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the identifier sent to the publisher.
    pub fn with_client_identifier(mut self, id: impl Into<String>) -> Self {
        self.client_identifier = id.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for GbfsConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for a GBFS publisher.
///
/// Each call is a single round trip with no retries and no caching.
#[derive(Debug, Clone)]
pub struct GbfsClient {
    http: reqwest::Client,
    base_url: String,
}

impl GbfsClient {
    /// Create a new client.
    pub fn new(config: GbfsConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();

        let identifier = HeaderValue::from_str(&config.client_identifier).map_err(|_| {
            FetchError::InvalidConfig(format!(
                "client identifier {:?} is not a valid header value",
                config.client_identifier
            ))
        })?;
        headers.insert(HeaderName::from_static("client-identifier"), identifier);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        info!(base_url = %config.base_url, "initialised GBFS client");

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Full URL of a document under the base URL.
    pub fn url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// Fetch `station_information.json`.
    pub async fn get_station_information(&self) -> Result<StationInformationResponse, FetchError> {
        let doc: StationInformationResponse = self.get_json(STATION_INFORMATION).await?;
        log_freshness(STATION_INFORMATION, &doc);
        Ok(doc)
    }

    /// Fetch `station_status.json`.
    pub async fn get_station_status(&self) -> Result<StationStatusResponse, FetchError> {
        let doc: StationStatusResponse = self.get_json(STATION_STATUS).await?;
        log_freshness(STATION_STATUS, &doc);
        Ok(doc)
    }

    /// Fetch station metadata.
    pub async fn fetch_information(&self) -> Result<Vec<StationInfo>, FetchError> {
        Ok(self.get_station_information().await?.data.stations)
    }

    /// Fetch live station status.
    pub async fn fetch_status(&self) -> Result<Vec<StationStatus>, FetchError> {
        Ok(self.get_station_status().await?.data.stations)
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, FetchError> {
        let url = self.url(endpoint);
        info!("GET {url}");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        debug!("GET {url} -> {status}");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| FetchError::Json {
            message: e.to_string(),
        })
    }
}

fn log_freshness<T>(endpoint: &str, doc: &FeedResponse<T>) {
    debug!(
        endpoint,
        last_updated = %doc.last_updated,
        ttl = ?doc.ttl,
        "feed document freshness"
    );
}
