use core::fmt;

use crate::tile::{TileId, TileStack, TilesetFlags};

/// Discrete grid position expressed in absolute map coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell `dy` rows away in the same column.
    #[inline]
    pub const fn offset_y(self, dy: i32) -> Self {
        Self {
            x: self.x,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Region painted onto a cell by the map author. Region 0 means "none".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct RegionId(pub u16);

impl RegionId {
    pub const NONE: Self = Self(0);

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    /// Number of cells in one row-major plane.
    pub const fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Row-major index of `position`, or `None` outside the map.
    pub fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.y as usize * self.width as usize + position.x as usize)
    }
}

/// Read-only view of the host's map model.
///
/// The host engine owns tile data; the classifier only reads it through this
/// trait. Implementations return empty data (no tiles, region 0) for
/// positions outside [`MapOracle::dimensions`].
pub trait MapOracle: Send + Sync {
    fn dimensions(&self) -> MapDimensions;

    /// Flag table of the tileset assigned to this map.
    fn tileset_flags(&self) -> &TilesetFlags;

    /// Tile layers of the cell, indexed by z.
    fn layered_tiles(&self, position: Position) -> TileStack;

    fn region_id(&self, position: Position) -> RegionId;

    /// Shadow bitmask painted by the editor's shadow pen.
    fn shadow_bits(&self, _position: Position) -> u8 {
        0
    }

    /// Whether the host treats the cell as a bridge/overpass whose upper
    /// layers always draw above characters.
    fn is_overpass(&self, _position: Position) -> bool {
        false
    }

    /// Tiles of the cell highest layer first, the order of the stock passage check.
    fn all_tiles(&self, position: Position) -> [TileId; 4] {
        self.layered_tiles(position).top_down()
    }

    fn contains(&self, position: Position) -> bool {
        self.dimensions().contains(position)
    }
}
