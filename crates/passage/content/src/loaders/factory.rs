//! Content factory for loading classifier inputs from a data directory.

use std::path::{Path, PathBuf};

use passage_core::{MapSnapshot, VariableTable};

use crate::loaders::{LoadResult, MapLoader, Settings, SettingsLoader, VariablesLoader};

/// Content factory that loads classifier inputs from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── settings.toml     (optional)
/// ├── variables.ron     (optional)
/// └── maps/
///     ├── castle.ron
///     └── forest.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load settings from `settings.toml`, falling back to defaults when the
    /// file does not exist.
    pub fn load_settings(&self) -> LoadResult<Settings> {
        let path = self.data_dir.join("settings.toml");
        SettingsLoader::load_or_default(path.exists().then_some(path.as_path()))
    }

    /// Load game variables from `variables.ron`, or an empty table when the
    /// file does not exist.
    pub fn load_variables(&self) -> LoadResult<VariableTable> {
        let path = self.data_dir.join("variables.ron");
        if !path.exists() {
            return Ok(VariableTable::new());
        }
        VariablesLoader::load(&path)
    }

    /// Load a map from `maps/{map_name}.ron`.
    pub fn load_map(&self, map_name: &str) -> LoadResult<MapSnapshot> {
        let path = self.data_dir.join("maps").join(format!("{}.ron", map_name));
        MapLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
