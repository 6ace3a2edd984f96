use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::*;
use crate::error::{RegistryError, Result};
use crate::pipeline::patches::{builtin_patches, DataPatch};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Where the registry export is downloaded from
    pub source_url: String,
    /// Cache directory for downloaded files
    pub data_dir: PathBuf,
    /// File name of the export inside `data_dir`
    pub data_file: String,
    /// Corrections applied on top of the built-in ones
    pub patches: Vec<DataPatch>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            data_file: DEFAULT_DATA_FILE.to_string(),
            patches: Vec::new(),
        }
    }
}

impl Config {
    /// Load `dae_registry.toml` from the working directory if present, then
    /// apply environment overrides (`.env` included).
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let path = Path::new(CONFIG_FILE);
        let config = if path.exists() {
            Self::load_from(path)?
        } else {
            debug!("No {} found, using defaults", CONFIG_FILE);
            Self::default()
        };

        Ok(config.with_env_overrides())
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            RegistryError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(ENV_SOURCE_URL) {
            if !url.trim().is_empty() {
                self.source_url = url;
            }
        }
        if let Ok(dir) = std::env::var(ENV_DATA_DIR) {
            if !dir.trim().is_empty() {
                self.data_dir = PathBuf::from(dir);
            }
        }
        self
    }

    fn validate(&self) -> Result<()> {
        if self.data_file.trim().is_empty() {
            return Err(RegistryError::Config("data_file must not be empty".to_string()));
        }
        if let Some(patch) = self.patches.iter().find(|p| p.key.trim().is_empty()) {
            return Err(RegistryError::Config(format!(
                "patch on column {} has an empty key",
                patch.column
            )));
        }
        Ok(())
    }

    /// Path of the cached registry export
    pub fn data_path(&self) -> PathBuf {
        self.data_dir.join(&self.data_file)
    }

    /// Built-in corrections followed by the configured ones
    pub fn all_patches(&self) -> Vec<DataPatch> {
        let mut patches = builtin_patches();
        patches.extend(self.patches.iter().cloned());
        patches
    }
}
