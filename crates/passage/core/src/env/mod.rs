//! Traits describing read-only host data.
//!
//! Oracles expose the host's map model (tiles, tileset flags, regions) and
//! its variable store. The classifier and the translucency rules depend only
//! on these traits, never on concrete host types.
mod map;
mod snapshot;
mod variables;

pub use map::{MapDimensions, MapOracle, Position, RegionId};
pub use snapshot::{MapCell, MapPlanes, MapSnapshot};
pub use variables::{VariableId, VariableOracle, VariableTable};
