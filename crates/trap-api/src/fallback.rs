//! Endpoint resolution and the two-collection snapshot.
//!
//! The primary endpoints come from configuration. When the primary traps
//! endpoint cannot be reached at all, both collections switch to the local
//! fallback endpoints for the rest of the invocation. A failure on the
//! fallback propagates.

use trap_config::ApiConfig;
use trap_core::{Sampling, Trap};

use crate::{ApiClient, ApiError, Collection};

/// Base URLs of both collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub traps: String,
    pub samplings: String,
}

impl Endpoints {
    #[must_use]
    pub fn primary(config: &ApiConfig) -> Self {
        Self {
            traps: config.traps_url.clone(),
            samplings: config.samplings_url.clone(),
        }
    }

    #[must_use]
    pub fn fallback(config: &ApiConfig) -> Self {
        Self {
            traps: config.fallback_traps_url.clone(),
            samplings: config.fallback_samplings_url.clone(),
        }
    }

    #[must_use]
    pub fn get(&self, collection: Collection) -> &str {
        match collection {
            Collection::Traps => &self.traps,
            Collection::Samplings => &self.samplings,
        }
    }
}

/// Both collections as fetched for one invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub traps: Vec<Trap>,
    pub samplings: Vec<Sampling>,
}

impl ApiClient {
    /// Probe the primary traps endpoint and pick the endpoint pair to use.
    ///
    /// # Errors
    ///
    /// Any probe failure other than [`ApiError::Connectivity`] is returned
    /// as-is.
    pub async fn resolve_endpoints(&self) -> Result<Endpoints, ApiError> {
        match self.probe(&self.primary.traps).await {
            Ok(_) => Ok(self.primary.clone()),
            Err(e) if e.is_connectivity() => {
                tracing::info!(%e, fallback = %self.fallback.traps, "primary API unreachable, using fallback endpoints");
                Ok(self.fallback.clone())
            }
            Err(e) => Err(e),
        }
    }

    /// Resolve endpoints, then fetch traps and samplings concurrently.
    ///
    /// # Errors
    ///
    /// The first failure of either fetch aborts the snapshot.
    pub async fn fetch_snapshot(&self) -> Result<Snapshot, ApiError> {
        let endpoints = self.resolve_endpoints().await?;
        let (traps, samplings) = tokio::try_join!(
            self.fetch_traps(&endpoints.traps),
            self.fetch_samplings(&endpoints.samplings),
        )?;
        tracing::debug!(
            traps = traps.len(),
            samplings = samplings.len(),
            "snapshot fetched"
        );
        Ok(Snapshot { traps, samplings })
    }

    /// Fetch the traps collection, retrying once on the fallback endpoint if
    /// the primary one is unreachable.
    ///
    /// # Errors
    ///
    /// Non-connectivity failures and any fallback failure are returned.
    pub async fn fetch_traps_with_fallback(&self) -> Result<Vec<Trap>, ApiError> {
        match self.fetch_traps(&self.primary.traps).await {
            Err(e) if e.is_connectivity() => {
                tracing::info!(%e, "traps endpoint unreachable, using fallback");
                self.fetch_traps(&self.fallback.traps).await
            }
            other => other,
        }
    }

    /// Fetch the samplings collection, retrying once on the fallback endpoint
    /// if the primary one is unreachable.
    ///
    /// # Errors
    ///
    /// Non-connectivity failures and any fallback failure are returned.
    pub async fn fetch_samplings_with_fallback(&self) -> Result<Vec<Sampling>, ApiError> {
        match self.fetch_samplings(&self.primary.samplings).await {
            Err(e) if e.is_connectivity() => {
                tracing::info!(%e, "samplings endpoint unreachable, using fallback");
                self.fetch_samplings(&self.fallback.samplings).await
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_from_config() {
        let config = ApiConfig {
            traps_url: "https://a/v1/traps".into(),
            samplings_url: "https://a/v1/samplings".into(),
            ..Default::default()
        };
        let primary = Endpoints::primary(&config);
        let fallback = Endpoints::fallback(&config);

        assert_eq!(primary.get(Collection::Traps), "https://a/v1/traps");
        assert_eq!(primary.get(Collection::Samplings), "https://a/v1/samplings");
        assert_eq!(fallback.traps, "http://localhost:8080/v1/traps");
        assert_eq!(fallback.samplings, "http://localhost:8080/v1/samplings");
    }
}
