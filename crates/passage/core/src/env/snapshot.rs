//! Owned map snapshots backing [`MapOracle`] outside the host engine.
//!
//! The host engine exposes its map model through [`MapOracle`] directly. Tools
//! and tests use [`MapSnapshot`], a row-major copy of the same data that can be
//! built from per-plane arrays (the shape map files store) or cell by cell.

use super::{MapDimensions, MapOracle, Position, RegionId};
use crate::error::{Plane, SnapshotError};
use crate::tile::{TileId, TileStack, TilesetFlags};

/// Everything the map stores for one cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapCell {
    pub tiles: TileStack,
    pub shadow: u8,
    pub region: RegionId,
    pub overpass: bool,
}

/// Per-plane map data as stored in map files.
///
/// Every plane is row-major. An empty plane stands for "all zero"; a non-empty
/// plane must hold exactly `width * height` entries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MapPlanes {
    pub layers: [Vec<u16>; 4],
    pub shadows: Vec<u8>,
    pub regions: Vec<u16>,
    pub overpass: Vec<Position>,
}

/// Immutable-by-convention copy of a map's tile, shadow, and region data.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapSnapshot {
    dimensions: MapDimensions,
    flags: TilesetFlags,
    cells: Vec<MapCell>,
}

impl MapSnapshot {
    /// Creates a map of empty cells.
    pub fn blank(dimensions: MapDimensions, flags: TilesetFlags) -> Result<Self, SnapshotError> {
        check_dimensions(dimensions)?;
        Ok(Self {
            dimensions,
            flags,
            cells: vec![MapCell::default(); dimensions.area()],
        })
    }

    pub fn from_cells(
        dimensions: MapDimensions,
        flags: TilesetFlags,
        cells: Vec<MapCell>,
    ) -> Result<Self, SnapshotError> {
        check_dimensions(dimensions)?;
        check_plane(Plane::Cells, dimensions, cells.len(), false)?;
        Ok(Self {
            dimensions,
            flags,
            cells,
        })
    }

    pub fn from_planes(
        dimensions: MapDimensions,
        flags: TilesetFlags,
        planes: MapPlanes,
    ) -> Result<Self, SnapshotError> {
        let mut snapshot = Self::blank(dimensions, flags)?;

        for (z, (plane, values)) in Plane::LAYERS.iter().zip(&planes.layers).enumerate() {
            if check_plane(*plane, dimensions, values.len(), true)? {
                for (cell, id) in snapshot.cells.iter_mut().zip(values) {
                    cell.tiles.0[z] = TileId(*id);
                }
            }
        }
        if check_plane(Plane::Shadows, dimensions, planes.shadows.len(), true)? {
            for (cell, bits) in snapshot.cells.iter_mut().zip(&planes.shadows) {
                cell.shadow = *bits;
            }
        }
        if check_plane(Plane::Regions, dimensions, planes.regions.len(), true)? {
            for (cell, region) in snapshot.cells.iter_mut().zip(&planes.regions) {
                cell.region = RegionId(*region);
            }
        }
        for position in planes.overpass {
            snapshot.cell_mut(position)?.overpass = true;
        }

        Ok(snapshot)
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    pub fn flags(&self) -> &TilesetFlags {
        &self.flags
    }

    pub fn flags_mut(&mut self) -> &mut TilesetFlags {
        &mut self.flags
    }

    pub fn cell(&self, position: Position) -> Option<&MapCell> {
        self.dimensions
            .index(position)
            .and_then(|index| self.cells.get(index))
    }

    pub fn cell_mut(&mut self, position: Position) -> Result<&mut MapCell, SnapshotError> {
        self.dimensions
            .index(position)
            .and_then(|index| self.cells.get_mut(index))
            .ok_or(SnapshotError::PositionOutOfBounds(position))
    }

    pub fn set_tiles(&mut self, position: Position, tiles: TileStack) -> Result<(), SnapshotError> {
        self.cell_mut(position)?.tiles = tiles;
        Ok(())
    }

    pub fn set_region(&mut self, position: Position, region: RegionId) -> Result<(), SnapshotError> {
        self.cell_mut(position)?.region = region;
        Ok(())
    }

    /// Iterates all positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let width = self.dimensions.width as i32;
        (0..self.dimensions.height as i32)
            .flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }
}

impl MapOracle for MapSnapshot {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn tileset_flags(&self) -> &TilesetFlags {
        &self.flags
    }

    fn layered_tiles(&self, position: Position) -> TileStack {
        self.cell(position).map(|cell| cell.tiles).unwrap_or_default()
    }

    fn region_id(&self, position: Position) -> RegionId {
        self.cell(position).map(|cell| cell.region).unwrap_or_default()
    }

    fn shadow_bits(&self, position: Position) -> u8 {
        self.cell(position).map(|cell| cell.shadow).unwrap_or_default()
    }

    fn is_overpass(&self, position: Position) -> bool {
        self.cell(position).is_some_and(|cell| cell.overpass)
    }
}

fn check_dimensions(dimensions: MapDimensions) -> Result<(), SnapshotError> {
    if dimensions.width == 0 || dimensions.height == 0 {
        return Err(SnapshotError::EmptyDimensions {
            width: dimensions.width,
            height: dimensions.height,
        });
    }
    Ok(())
}

/// Returns whether the plane carries data. Empty planes are accepted only when
/// `allow_empty` is set.
fn check_plane(
    plane: Plane,
    dimensions: MapDimensions,
    actual: usize,
    allow_empty: bool,
) -> Result<bool, SnapshotError> {
    let expected = dimensions.area();
    if actual == 0 && allow_empty {
        return Ok(false);
    }
    if actual != expected {
        return Err(SnapshotError::PlaneSizeMismatch {
            plane,
            expected,
            actual,
        });
    }
    Ok(true)
}
