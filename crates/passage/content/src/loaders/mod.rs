//! Content loaders for reading classifier inputs from files.
//!
//! Each loader exposes `load(path)` for files and `parse(text)` for in-memory
//! sources; both return core types ready to hand to the classifier.

pub mod factory;
pub mod map;
pub mod settings;
pub mod variables;

pub use factory::ContentFactory;
pub use map::MapLoader;
pub use settings::{Settings, SettingsLoader};
pub use variables::VariablesLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    tracing::debug!(path = %path.display(), "reading content file");
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
