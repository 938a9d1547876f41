//! Client configuration.
//!
//! # Design
//! `ClientConfig` is plain data the host application owns: it can be built in
//! code or deserialized from the host's own settings file. The library reads
//! no environment variables. The master API key never appears in `Debug`
//! output.

use std::fmt;

use serde::Deserialize;

/// Production endpoint used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.flagsmith.com/api/v1";

/// Connection settings for a `FlagsmithClient`.
///
/// Deserializable so a host application can embed it in its own settings
/// file. An empty `base_url` selects `DEFAULT_BASE_URL`.
#[derive(Clone, Default, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub base_url: String,
    pub master_api_key: String,
}

impl ClientConfig {
    pub fn new(master_api_key: &str, base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            master_api_key: master_api_key.to_string(),
        }
    }

    /// The base URL requests are built from, without a trailing slash.
    pub fn resolved_base_url(&self) -> String {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            DEFAULT_BASE_URL.to_string()
        } else {
            trimmed.to_string()
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("master_api_key", &"<redacted>")
            .finish()
    }
}
