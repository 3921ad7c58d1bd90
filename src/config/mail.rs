//! Transactional email settings.

use super::ConfigError;
use serde::{Deserialize, Serialize};

fn default_product_name() -> String {
    "ProJexa".to_owned()
}

/// Email rendering settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MailConfig {
    /// Product name shown in email subjects and signatures.
    #[serde(default = "default_product_name")]
    pub product_name: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            product_name: default_product_name(),
        }
    }
}

impl MailConfig {
    pub(super) fn validate(&self) -> Result<(), ConfigError> {
        if self.product_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "mail.product_name",
                reason: "must not be empty".to_owned(),
            });
        }
        Ok(())
    }
}
