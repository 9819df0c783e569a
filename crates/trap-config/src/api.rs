//! Upstream inventory API configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Local traps endpoint used when the primary host cannot be reached.
fn default_fallback_traps_url() -> String {
    String::from("http://localhost:8080/v1/traps")
}

/// Local samplings endpoint used when the primary host cannot be reached.
fn default_fallback_samplings_url() -> String {
    String::from("http://localhost:8080/v1/samplings")
}

fn default_api_key_header() -> String {
    String::from("API_KEY")
}

fn default_api_key() -> String {
    String::from("ROLE_ADMINISTRATOR")
}

const fn default_request_timeout_secs() -> u64 {
    30
}

const fn default_invocation_deadline_secs() -> u64 {
    120
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Primary traps collection URL.
    #[serde(default)]
    pub traps_url: String,

    /// Primary samplings collection URL.
    #[serde(default)]
    pub samplings_url: String,

    #[serde(default = "default_fallback_traps_url")]
    pub fallback_traps_url: String,

    #[serde(default = "default_fallback_samplings_url")]
    pub fallback_samplings_url: String,

    /// Name of the header carrying the credential.
    #[serde(default = "default_api_key_header")]
    pub api_key_header: String,

    /// Credential sent on every request.
    #[serde(default = "default_api_key")]
    pub api_key: String,

    /// Records requested per page. No default: it must match what the
    /// upstream deployment serves.
    #[serde(default)]
    pub page_size: Option<u32>,

    /// Timeout applied to each HTTP request.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Upper bound on a whole query invocation, fetches included.
    #[serde(default = "default_invocation_deadline_secs")]
    pub invocation_deadline_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            traps_url: String::new(),
            samplings_url: String::new(),
            fallback_traps_url: default_fallback_traps_url(),
            fallback_samplings_url: default_fallback_samplings_url(),
            api_key_header: default_api_key_header(),
            api_key: default_api_key(),
            page_size: None,
            request_timeout_secs: default_request_timeout_secs(),
            invocation_deadline_secs: default_invocation_deadline_secs(),
        }
    }
}

impl ApiConfig {
    /// Check if both primary collection URLs are set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.traps_url.is_empty() && !self.samplings_url.is_empty()
    }

    /// The configured page size.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::PageSize`] when the page size is unset or zero.
    pub fn page_size(&self) -> Result<u32, ConfigError> {
        match self.page_size {
            Some(size) if size > 0 => Ok(size),
            Some(size) => Err(ConfigError::PageSize {
                found: size.to_string(),
            }),
            None => Err(ConfigError::PageSize {
                found: "unset".into(),
            }),
        }
    }

    /// Check everything a query invocation needs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingUrl`] when a primary URL is empty,
    /// [`ConfigError::PageSize`] for a bad page size and
    /// [`ConfigError::InvalidValue`] for zero timeouts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.traps_url.is_empty() {
            return Err(ConfigError::missing_traps_url());
        }
        if self.samplings_url.is_empty() {
            return Err(ConfigError::missing_samplings_url());
        }
        self.page_size()?;
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.request_timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.invocation_deadline_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.invocation_deadline_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    #[must_use]
    pub const fn invocation_deadline(&self) -> Duration {
        Duration::from_secs(self.invocation_deadline_secs)
    }
}
