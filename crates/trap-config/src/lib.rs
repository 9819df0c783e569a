//! # trap-config
//!
//! Layered configuration loading for Trapline using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TRAPLINE_*` prefix, `__` as separator)
//! 2. Legacy deployment variables (`URLTraps`, `URLSamplings`, `pageRequestSize`)
//! 3. Project-level `.trapline/config.toml`
//! 4. User-level `~/.config/trapline/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TRAPLINE_API__TRAPS_URL` -> `api.traps_url`,
//! `TRAPLINE_API__PAGE_SIZE` -> `api.page_size`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//! use trap_config::TrapConfig;
//!
//! let config = TrapConfig::load_from(Path::new(".")).expect("config");
//!
//! if config.api.is_configured() {
//!     println!("Traps URL: {}", config.api.traps_url);
//! }
//! ```

mod api;
mod error;
mod general;

pub use api::ApiConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Variable names used by existing dashboard deployments, and
/// the config keys they populate.
const LEGACY_ENV_KEYS: [(&str, &str); 3] = [
    ("URLTraps", "api.traps_url"),
    ("URLSamplings", "api.samplings_url"),
    ("pageRequestSize", "api.page_size"),
];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TrapConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl TrapConfig {
    /// Load configuration for an explicit project root, layering
    /// `<root>/.trapline/config.toml` over the user config.
    ///
    /// `.env` files are not read here; the caller loads them first so the
    /// variables are visible to the environment layers.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed or a
    /// value has the wrong type.
    pub fn load_from(project_root: &Path) -> Result<Self, ConfigError> {
        Self::figment_for(project_root)
            .extract()
            .map_err(ConfigError::from)
    }

    /// Build the figment provider chain for `project_root`.
    pub fn figment_for(project_root: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = project_root.join(".trapline").join("config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Legacy deployment variables
        figment = figment.merge(Self::legacy_env());

        // Layer 4: Environment variables (highest priority)
        figment.merge(Env::prefixed("TRAPLINE_").split("__"))
    }

    /// Env provider that only picks up [`LEGACY_ENV_KEYS`], matched exactly.
    fn legacy_env() -> Env {
        Env::raw().filter_map(|key| {
            LEGACY_ENV_KEYS
                .iter()
                .find(|(legacy, _)| key.as_str() == *legacy)
                .map(|(_, mapped)| (*mapped).into())
        })
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("trapline").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = TrapConfig::default();
        assert!(!config.api.is_configured());
        assert!(config.api.page_size.is_none());
        assert_eq!(config.general.default_format, "json");
    }

    #[test]
    fn legacy_keys_map_into_api_section() {
        assert!(
            LEGACY_ENV_KEYS
                .iter()
                .all(|(_, mapped)| mapped.starts_with("api."))
        );
    }
}
