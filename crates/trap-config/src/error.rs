//! Errors raised while loading or checking the Trapline configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or a value has the wrong type.
    #[error("failed to load trapline configuration: {0}")]
    Figment(#[from] figment::Error),

    /// A primary collection URL is empty.
    #[error(
        "no {collection} URL configured: set api.{key} in .trapline/config.toml, \
         TRAPLINE_API__{env_key} or {legacy}"
    )]
    MissingUrl {
        collection: &'static str,
        key: &'static str,
        env_key: &'static str,
        legacy: &'static str,
    },

    /// The page size is unset or zero, so the page count cannot be computed.
    #[error(
        "page size is {found}: set api.page_size, TRAPLINE_API__PAGE_SIZE or \
         pageRequestSize to a positive number"
    )]
    PageSize { found: String },

    /// Any other value the API client cannot work with.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

impl ConfigError {
    pub(crate) const fn missing_traps_url() -> Self {
        Self::MissingUrl {
            collection: "traps",
            key: "traps_url",
            env_key: "TRAPS_URL",
            legacy: "URLTraps",
        }
    }

    pub(crate) const fn missing_samplings_url() -> Self {
        Self::MissingUrl {
            collection: "samplings",
            key: "samplings_url",
            env_key: "SAMPLINGS_URL",
            legacy: "URLSamplings",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_url_names_every_way_to_set_it() {
        let message = ConfigError::missing_samplings_url().to_string();
        assert!(message.contains("api.samplings_url"));
        assert!(message.contains("TRAPLINE_API__SAMPLINGS_URL"));
        assert!(message.contains("URLSamplings"));
    }

    #[test]
    fn page_size_names_the_legacy_variable() {
        let message = ConfigError::PageSize {
            found: "unset".into(),
        }
        .to_string();
        assert!(message.starts_with("page size is unset"));
        assert!(message.contains("pageRequestSize"));
    }
}
