//! The engine's stock direction-bit passage test.
//!
//! Tiles are walked highest layer first. Layers flagged
//! [`TileFlags::NO_EFFECT`] are skipped; the first remaining layer decides:
//! passable when the direction's block bit is clear, impassable when it is
//! set. A stack made only of no-effect layers is impassable.

use crate::tile::{TileFlags, TileId, TilesetFlags};

/// Movement direction, numbered like a numeric keypad.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Direction {
    Down,
    Left,
    Right,
    Up,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::Up,
    ];

    /// Keypad code: 2, 4, 6, or 8.
    pub const fn numpad(self) -> u8 {
        match self {
            Direction::Down => 2,
            Direction::Left => 4,
            Direction::Right => 6,
            Direction::Up => 8,
        }
    }

    pub const fn from_numpad(code: u8) -> Option<Self> {
        match code {
            2 => Some(Direction::Down),
            4 => Some(Direction::Left),
            6 => Some(Direction::Right),
            8 => Some(Direction::Up),
            _ => None,
        }
    }

    /// Block bit for this direction: `1 << (d / 2 - 1)`.
    pub const fn bit(self) -> TileFlags {
        TileFlags::from_bits_retain(1 << (self.numpad() / 2 - 1))
    }
}

/// Stock passage check over `tiles`, given highest layer first.
pub fn check_passage(flags: &TilesetFlags, tiles: &[TileId], bit: TileFlags) -> bool {
    for tile in tiles {
        let flag = flags.get(*tile);
        if flag.contains(TileFlags::NO_EFFECT) {
            continue;
        }
        if !flag.intersects(bit) {
            return true;
        }
        if flag.contains(bit) {
            return false;
        }
    }
    false
}

/// Stock passage check restricted to the two highest layers.
///
/// Used for wall tiles whose own block bits should not decide.
pub fn check_upper_passage(flags: &TilesetFlags, tiles: &[TileId], bit: TileFlags) -> bool {
    let upper = tiles.len().saturating_sub(2);
    check_passage(flags, &tiles[..upper], bit)
}
