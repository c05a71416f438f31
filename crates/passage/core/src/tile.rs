//! Tile identifiers, tileset flag words, and terrain tags.
//!
//! Tile IDs follow the RPG Maker MV layout: the B–E tilesets occupy the low
//! range and the A autotile sets follow, each autotile kind spanning 48
//! shapes per pattern. The tileset flag table is indexed by tile ID and packs
//! passage bits, special-terrain bits, and the 4-bit terrain tag into one word.

use core::fmt;

use bitflags::bitflags;

/// Identifier of a tile graphic within the active tileset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct TileId(pub u16);

impl TileId {
    /// The empty tile. Layers holding it draw nothing.
    pub const EMPTY: Self = Self(0);

    pub const B: u16 = 0;
    pub const C: u16 = 256;
    pub const D: u16 = 512;
    pub const E: u16 = 768;
    pub const A5: u16 = 1536;
    pub const A1: u16 = 2048;
    pub const A2: u16 = 2816;
    pub const A3: u16 = 4352;
    pub const A4: u16 = 5888;
    pub const MAX: u16 = 8192;

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the tileset region this ID belongs to, or `None` past the last
    /// autotile.
    pub const fn kind(self) -> Option<TileKind> {
        let id = self.0;
        let kind = if id < Self::C {
            TileKind::B
        } else if id < Self::D {
            TileKind::C
        } else if id < Self::E {
            TileKind::D
        } else if id < Self::A5 {
            TileKind::E
        } else if id < Self::A1 {
            TileKind::A5
        } else if id < Self::A2 {
            TileKind::A1
        } else if id < Self::A3 {
            TileKind::A2
        } else if id < Self::A4 {
            TileKind::A3
        } else if id < Self::MAX {
            TileKind::A4
        } else {
            return None;
        };
        Some(kind)
    }

    /// A3 and A4 tiles cast the automatic wall shadow.
    pub fn is_shadowing(self) -> bool {
        matches!(self.kind(), Some(TileKind::A3 | TileKind::A4))
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tileset region of a tile ID.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileKind {
    B,
    C,
    D,
    E,
    A5,
    A1,
    A2,
    A3,
    A4,
}

bitflags! {
    /// Flag word stored per tile ID in the tileset.
    ///
    /// The four low bits block movement toward the matching direction. The
    /// high nibble is not a flag but the terrain tag; read it with
    /// [`TileFlags::terrain_tag`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct TileFlags: u16 {
        const BLOCK_DOWN           = 1 << 0;
        const BLOCK_LEFT           = 1 << 1;
        const BLOCK_RIGHT          = 1 << 2;
        const BLOCK_UP             = 1 << 3;
        /// Star passage: the layer has no say in passability.
        const NO_EFFECT            = 1 << 4;
        const LADDER               = 1 << 5;
        const BUSH                 = 1 << 6;
        /// Counter tiles; combined with an A2 tile this marks a table.
        const COUNTER              = 1 << 7;
        const DAMAGE_FLOOR         = 1 << 8;
        const BOAT_IMPASSABLE      = 1 << 9;
        const SHIP_IMPASSABLE      = 1 << 10;
        const AIRSHIP_LAND_BLOCKED = 1 << 11;
        const TERRAIN_TAG          = 0xF000;

        const BLOCK_ALL = Self::BLOCK_DOWN.bits()
            | Self::BLOCK_LEFT.bits()
            | Self::BLOCK_RIGHT.bits()
            | Self::BLOCK_UP.bits();
    }
}

impl TileFlags {
    pub const fn terrain_tag(self) -> TerrainTag {
        TerrainTag(((self.bits() & Self::TERRAIN_TAG.bits()) >> 12) as u8)
    }

    /// Returns these flags with the terrain tag nibble replaced.
    pub const fn with_terrain_tag(self, tag: TerrainTag) -> Self {
        let cleared = self.bits() & !Self::TERRAIN_TAG.bits();
        Self::from_bits_retain(cleared | ((tag.0 as u16 & 0xF) << 12))
    }
}

/// 4-bit terrain tag extracted from a tile's flag word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct TerrainTag(pub u8);

impl TerrainTag {
    /// Highest tag the map editor lets authors assign.
    pub const MAX_ASSIGNABLE: u8 = 7;

    /// Interprets a configured tag number. Values above
    /// [`Self::MAX_ASSIGNABLE`] switch the feature off.
    pub fn configured(value: i64) -> Option<Self> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= Self::MAX_ASSIGNABLE)
            .map(Self)
    }
}

impl fmt::Display for TerrainTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tileset-wide flag table indexed by tile ID.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct TilesetFlags(Vec<u16>);

impl TilesetFlags {
    pub fn new(words: Vec<u16>) -> Self {
        Self(words)
    }

    /// Flags for `tile`. IDs past the end of the table read as empty flags.
    #[inline]
    pub fn get(&self, tile: TileId) -> TileFlags {
        self.0
            .get(tile.0 as usize)
            .copied()
            .map(TileFlags::from_bits_retain)
            .unwrap_or_default()
    }

    pub fn set(&mut self, tile: TileId, flags: TileFlags) {
        let index = tile.0 as usize;
        if index >= self.0.len() {
            self.0.resize(index + 1, 0);
        }
        self.0[index] = flags.bits();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// An A2 autotile carrying the counter bit is drawn as a table.
    pub fn is_table(&self, tile: TileId) -> bool {
        matches!(tile.kind(), Some(TileKind::A2)) && self.get(tile).contains(TileFlags::COUNTER)
    }
}

/// The four stacked tile layers of one cell, indexed by z (0 = bottom).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileStack(pub [TileId; 4]);

impl TileStack {
    pub const EMPTY: Self = Self([TileId::EMPTY; 4]);

    pub const fn new(z0: u16, z1: u16, z2: u16, z3: u16) -> Self {
        Self([TileId(z0), TileId(z1), TileId(z2), TileId(z3)])
    }

    #[inline]
    pub const fn layer(&self, z: usize) -> TileId {
        self.0[z]
    }

    /// Bottom layer, the only one whose terrain tag is consulted.
    #[inline]
    pub const fn base(&self) -> TileId {
        self.0[0]
    }

    /// True when no layer holds a tile.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|tile| tile.is_empty())
    }

    /// Layers ordered highest first, the order the stock passage check walks.
    pub fn top_down(&self) -> [TileId; 4] {
        let [z0, z1, z2, z3] = self.0;
        [z3, z2, z1, z0]
    }
}
