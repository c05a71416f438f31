//! Map data loader.
//!
//! A map file lists the tileset flags sparsely and stores every plane
//! row-major:
//!
//! ```ron
//! (
//!     dimensions: (2, 2),
//!     tileset: { 2: 0x700F, 3: 0x600F },
//!     planes: (
//!         layers: ([2, 2, 3, 3], [], [], []),
//!         regions: [0, 0, 0, 4],
//!     ),
//! )
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use passage_core::{MapDimensions, MapPlanes, MapSnapshot, TileFlags, TileId, TilesetFlags};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Map data structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MapDataRon {
    dimensions: (u32, u32),
    #[serde(default)]
    tileset: BTreeMap<u16, u16>,
    #[serde(default)]
    planes: MapPlanes,
}

/// Loader for map snapshots from RON files.
pub struct MapLoader;

impl MapLoader {
    /// Load a map snapshot from a RON file.
    pub fn load(path: &Path) -> LoadResult<MapSnapshot> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid map {}: {:#}", path.display(), e))
    }

    /// Parse a map snapshot from RON text.
    ///
    /// Tile 0 gets the no-effect flag unless the tileset lists it, so empty
    /// layers never decide passage.
    pub fn parse(content: &str) -> LoadResult<MapSnapshot> {
        let data: MapDataRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map RON: {}", e))?;

        let (width, height) = data.dimensions;
        let dimensions = MapDimensions::new(width, height);

        let mut flags = TilesetFlags::default();
        flags.set(TileId::EMPTY, TileFlags::NO_EFFECT);
        for (id, word) in data.tileset {
            flags.set(TileId(id), TileFlags::from_bits_retain(word));
        }

        let snapshot = MapSnapshot::from_planes(dimensions, flags, data.planes)?;
        tracing::debug!(width, height, "loaded map snapshot");
        Ok(snapshot)
    }
}
