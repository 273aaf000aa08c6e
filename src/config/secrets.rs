use crate::domain::ports::SecretStore;
use crate::utils::error::{Result, SummarizerError};
use std::collections::HashMap;
use std::path::Path;

/// Reads secrets from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSecretStore;

impl SecretStore for EnvSecretStore {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Flat `KEY = "value"` TOML file. Non-string values are ignored.
#[derive(Debug, Clone, Default)]
pub struct TomlSecretStore {
    values: HashMap<String, String>,
}

impl TomlSecretStore {
    /// A missing file is an empty store.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No secrets file at {}", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: toml::Table =
            toml::from_str(content).map_err(|e| SummarizerError::ConfigValidationError {
                field: "secrets".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;

        let values = table
            .into_iter()
            .filter_map(|(key, value)| match value {
                toml::Value::String(s) => Some((key, s)),
                _ => None,
            })
            .collect();

        Ok(Self { values })
    }
}

impl SecretStore for TomlSecretStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Asks each store in order and returns the first non-blank hit.
#[derive(Default)]
pub struct ChainedSecretStore {
    stores: Vec<Box<dyn SecretStore>>,
}

impl ChainedSecretStore {
    pub fn new(stores: Vec<Box<dyn SecretStore>>) -> Self {
        Self { stores }
    }
}

impl SecretStore for ChainedSecretStore {
    fn get(&self, key: &str) -> Option<String> {
        self.stores
            .iter()
            .filter_map(|store| store.get(key))
            .find(|value| !value.trim().is_empty())
    }
}
