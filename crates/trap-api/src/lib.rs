//! # trap-api
//!
//! HTTP client for the trap inventory API.
//!
//! Both collections (traps, samplings) are served by page-oriented endpoints:
//! an unparameterized GET reports the collection size in a `total-count`
//! header, and `?page=<n>&size=<s>` returns one JSON array page. The client:
//! - probes a collection and pages through it sequentially, keeping server order
//! - decodes the concatenated pages into typed records
//! - falls back to the local endpoints when the primary host is unreachable
//! - fetches both collections concurrently for a query invocation

mod error;
mod fallback;
mod http;
#[cfg(feature = "test-support")]
pub mod testing;

pub use error::ApiError;
pub use fallback::{Endpoints, Snapshot};
pub use http::{TOTAL_COUNT_HEADER, page_count, page_url};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use trap_config::{ApiConfig, ConfigError};
use trap_core::entities::decode_records;
use trap_core::{Sampling, Trap};

use crate::http::{check_response, total_count};

// ── Types ──────────────────────────────────────────────────────────

/// The two collections served by the inventory API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Traps,
    Samplings,
}

impl Collection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Traps => "traps",
            Self::Samplings => "samplings",
        }
    }
}

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client for the inventory API, built once per invocation from an
/// explicit [`ApiConfig`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    page_size: u32,
    primary: Endpoints,
    fallback: Endpoints,
}

impl ApiClient {
    /// Create a client from the API configuration.
    ///
    /// Every request carries the configured credential header and is bounded
    /// by the configured request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the page size is unset or zero, or the
    /// credential header cannot be expressed as an HTTP header, and
    /// [`ApiError::Http`] if the underlying `reqwest::Client` fails to build.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let page_size = config.page_size()?;

        let name = HeaderName::from_bytes(config.api_key_header.as_bytes()).map_err(|e| {
            ConfigError::InvalidValue {
                field: "api.api_key_header".into(),
                reason: e.to_string(),
            }
        })?;
        let value =
            HeaderValue::from_str(&config.api_key).map_err(|e| ConfigError::InvalidValue {
                field: "api.api_key".into(),
                reason: e.to_string(),
            })?;
        let mut headers = HeaderMap::new();
        headers.insert(name, value);

        let http = reqwest::Client::builder()
            .user_agent("trapline/0.1")
            .default_headers(headers)
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            http,
            page_size,
            primary: Endpoints::primary(config),
            fallback: Endpoints::fallback(config),
        })
    }

    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Issue the unparameterized probe request and return the collection size.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Connectivity`] if the host cannot be reached,
    /// [`ApiError::Api`] for a non-success status and [`ApiError::Parse`] if
    /// the `total-count` header is missing or invalid.
    pub async fn probe(&self, base_url: &str) -> Result<u64, ApiError> {
        let resp = self
            .http
            .get(base_url)
            .send()
            .await
            .map_err(|e| ApiError::from_transport(base_url, e))?;
        let resp = check_response(resp).await?;
        total_count(&resp)
    }

    /// Retrieve a whole collection: probe for its size, then request pages
    /// `1..=ceil(total / page_size)` one after another and concatenate them.
    ///
    /// A failing page aborts the fetch; no partial result is returned.
    ///
    /// # Errors
    ///
    /// See [`Self::probe`]; page requests fail the same way, and a page body
    /// that is not a JSON array yields [`ApiError::Parse`].
    pub async fn fetch_all(&self, base_url: &str) -> Result<Vec<Value>, ApiError> {
        let total = self.probe(base_url).await?;
        let pages = page_count(total, self.page_size);
        tracing::debug!(url = base_url, total, pages, "fetching collection");

        let mut records = Vec::with_capacity(usize::try_from(total).unwrap_or(0));
        for page in 1..=pages {
            let url = page_url(base_url, page, self.page_size);
            let resp = self
                .http
                .get(&url)
                .send()
                .await
                .map_err(|e| ApiError::from_transport(&url, e))?;
            let resp = check_response(resp).await?;
            let body = resp
                .bytes()
                .await
                .map_err(|e| ApiError::from_transport(&url, e))?;
            let items: Vec<Value> = serde_json::from_slice(&body)
                .map_err(|e| ApiError::Parse(format!("page {page} of {base_url}: {e}")))?;
            tracing::debug!(page, received = items.len(), "fetched page");
            records.extend(items);
        }
        Ok(records)
    }

    /// Fetch and decode the traps collection at `base_url`.
    ///
    /// # Errors
    ///
    /// See [`Self::fetch_all`]; undecodable records yield [`ApiError::Record`].
    pub async fn fetch_traps(&self, base_url: &str) -> Result<Vec<Trap>, ApiError> {
        let items = self.fetch_all(base_url).await?;
        Ok(decode_records(Collection::Traps.as_str(), items)?)
    }

    /// Fetch and decode the samplings collection at `base_url`.
    ///
    /// # Errors
    ///
    /// See [`Self::fetch_all`]; undecodable records yield [`ApiError::Record`].
    pub async fn fetch_samplings(&self, base_url: &str) -> Result<Vec<Sampling>, ApiError> {
        let items = self.fetch_all(base_url).await?;
        Ok(decode_records(Collection::Samplings.as_str(), items)?)
    }
}
