//! Error types for passage-core.
//!
//! Classification itself never fails; these cover the validating entry points
//! and the construction of map snapshots.

use crate::env::{MapDimensions, Position};

/// Errors returned by the validating classification entry point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ClassifyError {
    /// Position is outside the map bounds.
    #[error("position {position} is outside the {width}x{height} map")]
    PositionOutOfBounds {
        position: Position,
        width: u32,
        height: u32,
    },
}

impl ClassifyError {
    pub fn out_of_bounds(position: Position, dimensions: MapDimensions) -> Self {
        Self::PositionOutOfBounds {
            position,
            width: dimensions.width,
            height: dimensions.height,
        }
    }
}

/// Which row-major plane of a map snapshot an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Plane {
    Layer0,
    Layer1,
    Layer2,
    Layer3,
    Shadows,
    Regions,
    Cells,
}

impl Plane {
    pub const LAYERS: [Plane; 4] = [Plane::Layer0, Plane::Layer1, Plane::Layer2, Plane::Layer3];
}

/// Errors raised while assembling a [`MapSnapshot`](crate::env::MapSnapshot).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("map dimensions must be non-zero, got {width}x{height}")]
    EmptyDimensions { width: u32, height: u32 },

    #[error("{plane} plane holds {actual} cells, expected {expected}")]
    PlaneSizeMismatch {
        plane: Plane,
        expected: usize,
        actual: usize,
    },

    #[error("position {0} is outside the map")]
    PositionOutOfBounds(Position),
}
