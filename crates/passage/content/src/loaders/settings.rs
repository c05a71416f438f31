//! Plugin settings loader.
//!
//! Settings live in one TOML file with a `[passage]` and a `[translucency]`
//! table. Both tables and every key are optional; values accept numbers,
//! arrays, or the plugin-manager style strings (`"3, 4"`).

use std::path::Path;

use passage_core::{PassageConfig, PassageParams, TranslucencyConfig, TranslucencyParams};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Raw settings as read from disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub passage: PassageParams,
    pub translucency: TranslucencyParams,
}

impl Settings {
    pub fn passage_config(&self) -> PassageConfig {
        PassageConfig::from_params(&self.passage)
    }

    pub fn translucency_config(&self) -> TranslucencyConfig {
        TranslucencyConfig::from_params(&self.translucency)
    }
}

/// Loader for plugin settings from TOML files.
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> LoadResult<Settings> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid settings {}: {:#}", path.display(), e))
    }

    /// Load settings from `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> LoadResult<Settings> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Settings::default()),
        }
    }

    pub fn parse(content: &str) -> LoadResult<Settings> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse settings TOML: {}", e))
    }
}
