//! Object storage settings for attachment uploads.

use super::ConfigError;
use serde::{Deserialize, Serialize};

fn default_public_base_url() -> String {
    "https://files.projexa.local".to_owned()
}

const fn default_upload_url_ttl_secs() -> u64 {
    900
}

/// Object storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Base URL under which uploaded objects are publicly readable.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    /// Lifetime of presigned upload URLs in seconds.
    #[serde(default = "default_upload_url_ttl_secs")]
    pub upload_url_ttl_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            public_base_url: default_public_base_url(),
            upload_url_ttl_secs: default_upload_url_ttl_secs(),
        }
    }
}

impl StorageConfig {
    pub(super) fn validate(&self) -> Result<(), ConfigError> {
        let url = self.public_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "storage.public_base_url",
                reason: format!("'{url}' must start with 'http://' or 'https://'"),
            });
        }
        if self.upload_url_ttl_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "storage.upload_url_ttl_secs",
                reason: "must be greater than zero".to_owned(),
            });
        }
        Ok(())
    }
}
