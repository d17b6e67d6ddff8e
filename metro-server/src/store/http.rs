//! REST document store client.
//!
//! Collections are served as JSON arrays at `{base_url}/{collection}`.
//! Single waypoints are fetched from `{base_url}/waypoints/{id}`, with the id
//! percent-encoded as one path segment, and station-scoped waypoints with a
//! `station_id` query filter.
//!
//! A 404 on a collection is a store failure. Only the line-stop collection
//! is optional, and only single-record lookups map 404 to "not found".

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::collections::{NETWORK, POIS, STATIONS, WAYPOINTS};
use super::{DocumentStore, StoreError};
use crate::domain::{LineStop, Poi, Station, Waypoint};

/// Configuration for the HTTP store client.
#[derive(Debug, Clone)]
pub struct HttpStoreConfig {
    /// Base URL of the document service
    pub base_url: String,
    /// Optional key sent as `x-apikey`
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl HttpStoreConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout_secs: 30,
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

#[derive(Debug, Clone)]
pub struct HttpStore {
    http: reqwest::Client,
    base_url: String,
}

impl HttpStore {
    pub fn new(config: HttpStoreConfig) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();

        if let Some(key) = &config.api_key {
            let value = HeaderValue::from_str(key)
                .map_err(|_| StoreError::NotConfigured("invalid API key format".to_string()))?;
            headers.insert(HeaderName::from_static("x-apikey"), value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// URL of one record, or `None` for ids that cannot name a record.
    fn record_url(&self, collection: &str, id: &str) -> Result<Option<Url>, StoreError> {
        if id.is_empty() || id == "." || id == ".." {
            return Ok(None);
        }

        let invalid = || StoreError::NotConfigured(format!("invalid store URL: {}", self.base_url));
        let mut url = Url::parse(&self.url(collection)).map_err(|_| invalid())?;
        url.path_segments_mut().map_err(|_| invalid())?.push(id);
        Ok(Some(url))
    }

    /// Send a request and decode the body. `Ok(None)` on 404.
    async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        collection: &'static str,
    ) -> Result<Option<T>, StoreError> {
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| StoreError::Json {
                collection,
                message: e.to_string(),
            })
    }

    /// A required collection. 404 is an error.
    async fn collection<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        collection: &'static str,
    ) -> Result<Vec<T>, StoreError> {
        self.fetch::<Vec<T>>(request, collection)
            .await?
            .ok_or_else(|| StoreError::Api {
                status: StatusCode::NOT_FOUND.as_u16(),
                message: format!("collection '{collection}' not found"),
            })
    }

    fn get(&self, collection: &str) -> RequestBuilder {
        self.http.get(self.url(collection))
    }
}

impl DocumentStore for HttpStore {
    async fn stations(&self) -> Result<Vec<Station>, StoreError> {
        self.collection(self.get(STATIONS), STATIONS).await
    }

    async fn line_stops(&self) -> Result<Vec<LineStop>, StoreError> {
        Ok(self
            .fetch::<Vec<LineStop>>(self.get(NETWORK), NETWORK)
            .await?
            .unwrap_or_default())
    }

    async fn waypoints(&self) -> Result<Vec<Waypoint>, StoreError> {
        self.collection(self.get(WAYPOINTS), WAYPOINTS).await
    }

    async fn pois(&self) -> Result<Vec<Poi>, StoreError> {
        self.collection(self.get(POIS), POIS).await
    }

    async fn waypoint(&self, id: &str) -> Result<Option<Waypoint>, StoreError> {
        let Some(url) = self.record_url(WAYPOINTS, id)? else {
            debug!(id, "waypoint id cannot name a record");
            return Ok(None);
        };
        let waypoint = self.fetch::<Waypoint>(self.http.get(url), WAYPOINTS).await?;
        debug!(id, found = waypoint.is_some(), "fetched waypoint");
        Ok(waypoint)
    }

    async fn waypoints_in_station(&self, station_id: &str) -> Result<Vec<Waypoint>, StoreError> {
        let request = self.get(WAYPOINTS).query(&[("station_id", station_id)]);
        self.collection(request, WAYPOINTS).await
    }
}
