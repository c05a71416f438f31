//! Game variable loader.
//!
//! Variables are stored as a RON map from variable ID to value, e.g.
//! `{ 3: 120, 4: 50 }`. Variables not listed read as 0.

use std::path::Path;

use passage_core::VariableTable;

use crate::loaders::{LoadResult, read_file};

/// Loader for variable tables from RON files.
pub struct VariablesLoader;

impl VariablesLoader {
    pub fn load(path: &Path) -> LoadResult<VariableTable> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid variables {}: {:#}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<VariableTable> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse variables RON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use passage_core::{VariableId, VariableOracle};

    #[test]
    fn unlisted_variables_read_zero() {
        let table = VariablesLoader::parse("{ 3: 120, 4: -5 }").unwrap();
        assert_eq!(table.value(VariableId(3)), 120);
        assert_eq!(table.value(VariableId(4)), -5);
        assert_eq!(table.value(VariableId(9)), 0);
    }

    #[test]
    fn rejects_non_map_input() {
        assert!(VariablesLoader::parse("[1, 2]").is_err());
    }
}
