//! Namespace visibility configuration.
//!
//! Applications load [`MetaschemaConfig`] from `config/config.toml` or environment
//! variables using `MetaschemaConfig::load()`, once, when the host schema is built.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

const CONFIG_PATH: &str = "config/config.toml";
const ENV_PREFIX: &str = "METASCHEMA";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MetaschemaConfig {
    /// Namespaces whose ordinary tables are listed under `_meta.tables`
    #[serde(default = "default_schemas")]
    pub schemas: Vec<String>,
}

fn default_schemas() -> Vec<String> {
    vec!["public".to_string()]
}

impl Default for MetaschemaConfig {
    fn default() -> Self {
        Self {
            schemas: default_schemas(),
        }
    }
}

fn environment() -> Environment {
    // METASCHEMA__SCHEMAS=public,app
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("schemas")
        .try_parsing(true)
}

impl MetaschemaConfig {
    pub fn new<I, S>(schemas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            schemas: schemas.into_iter().map(Into::into).collect(),
        }
    }

    /// Load the configuration from `config/config.toml`, falling back to env vars.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(CONFIG_PATH)
    }

    /// Load the configuration from a TOML file (optional) overlaid with env vars.
    ///
    /// Only an absent file falls back to env vars and defaults. A file that exists but
    /// cannot be read or parsed is an error, since the namespace list gates visibility.
    ///
    /// Empty entries are dropped, so `METASCHEMA__SCHEMAS=` means no visible namespaces.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let settings = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(environment())
            .build()
            .map_err(|err| {
                log::error!("Failed to load metaschema config from {}: {}", path.display(), err);
                ConfigError::Message(format!(
                    "Failed to load configuration from {} and env: {}",
                    path.display(),
                    err
                ))
            })?;

        let mut config = settings.try_deserialize::<MetaschemaConfig>().map_err(|e| {
            ConfigError::Message(format!(
                "Metaschema configuration could not be loaded from file or environment: {}",
                e
            ))
        })?;
        config.schemas.retain(|schema| !schema.is_empty());
        Ok(config)
    }

    /// Whether tables in `namespace` may be listed
    pub fn is_visible(&self, namespace: &str) -> bool {
        self.schemas.iter().any(|schema| schema == namespace)
    }
}
