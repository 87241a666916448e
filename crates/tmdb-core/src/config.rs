//! Provider constants and HTTP client settings.
//!
//! [`ClientSettings`] is deserialized from TOML and tunes how the remote API
//! client talks to TMDB. Every field defaults sensibly so an empty file is
//! valid. The API key is deliberately not part of the settings: it is
//! resolved from the host's declared configuration and the environment.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Provider type name, the namespace prefix of every data source.
pub const PROVIDER_TYPE_NAME: &str = "tmdb";

/// Name of the provider-level attribute carrying the API key.
pub const API_KEY_ATTRIBUTE: &str = "key";

/// Environment variable consulted when no key is declared.
pub const API_KEY_ENV: &str = "TMDB_KEY";

/// Default TMDB v3 REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Settings for the TMDB HTTP client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// API root, without a trailing slash.
    pub base_url: String,
    /// ISO-639-1 language tag sent with every request, e.g. `en-US`.
    pub language: String,
    /// Client-side rate limit.
    pub requests_per_second: u32,
    /// Transport timeout for a single request.
    pub timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            language: "en-US".into(),
            requests_per_second: 30,
            timeout_secs: 30,
        }
    }
}

impl ClientSettings {
    /// Deserialize settings from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| {
            Error::invalid_config("Invalid Client Settings", format!("settings parse error: {e}"))
        })
    }

    /// Load settings from a file path, falling back to defaults if the path
    /// is `None` or the file does not exist. A file that exists but cannot
    /// be read or parsed is an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No settings file at {}; using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(Error::invalid_config(
                "Invalid Client Settings",
                format!("failed to read {}: {e}", path.display()),
            )),
        }
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.base_url.is_empty() {
            warnings.push("base_url is empty; the default endpoint will be used".into());
        } else if self.base_url.ends_with('/') {
            warnings.push("base_url has a trailing slash; it will be trimmed".into());
        }

        if self.requests_per_second == 0 {
            warnings.push("requests_per_second is 0; falling back to 1".into());
        }

        if self.timeout_secs == 0 {
            warnings.push("timeout_secs is 0; requests will not time out".into());
        }

        if self.language.is_empty() {
            warnings.push("language is empty; TMDB will answer in its default language".into());
        }

        warnings
    }
}
