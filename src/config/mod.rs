//! Layered configuration for ProJexa services.
//!
//! Sources, highest priority first:
//! 1. Environment variables with the `PROJEXA_` prefix, `__` separating
//!    nested sections (`PROJEXA_LIFECYCLE__CHILD_DELETION=cascade`)
//! 2. `projexa.toml` in the working directory, or an explicit file
//! 3. Built-in defaults

mod error;
mod lifecycle;
mod logging;
mod mail;
mod storage;

pub use error::ConfigError;
pub use lifecycle::{ChildDeletionPolicy, LifecycleConfig};
pub use logging::LoggingConfig;
pub use mail::MailConfig;
pub use storage::StorageConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "projexa.toml";

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "PROJEXA_";

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProjexaConfig {
    /// Issue and sprint lifecycle rules.
    #[serde(default)]
    pub lifecycle: LifecycleConfig,
    /// Object storage for attachments.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Transactional email rendering.
    #[serde(default)]
    pub mail: MailConfig,
    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ProjexaConfig {
    /// Loads configuration from defaults, `projexa.toml` and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source cannot be parsed or a value is
    /// invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Loads configuration from defaults, the given TOML file and the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source cannot be parsed or a value is
    /// invalid.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment_with_file(path.as_ref()))
    }

    /// Builds the provider chain using [`DEFAULT_CONFIG_FILE`].
    #[must_use]
    pub fn figment() -> Figment {
        Self::figment_with_file(Path::new(DEFAULT_CONFIG_FILE))
    }

    fn figment_with_file(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment
            .extract()
            .map_err(|err| ConfigError::from(Box::new(err)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field constraints serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.storage.validate()?;
        self.mail.validate()?;
        self.logging.validate()
    }
}
