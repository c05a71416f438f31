//! Tile layer classification for wall-aware passability and draw order.
//!
//! `passage-core` decides, per map cell, whether a character may stand there
//! and whether the cell's tiles are composited above or below characters.
//! Decisions are driven by terrain-tagged wall runs, region overrides, and the
//! engine's stock direction-bit check. Hosts expose their map through
//! [`MapOracle`] and receive answers from [`TileLayerClassifier`]; nothing in
//! this crate mutates host state.
pub mod baseline;
pub mod classifier;
pub mod config;
pub mod env;
pub mod error;
pub mod paint;
pub mod tile;
pub mod translucency;

pub use baseline::{Direction, check_passage, check_upper_passage};
pub use classifier::{Classification, TileLayerClassifier, TileRole, WallRun};
pub use config::{PassageConfig, PassageParams, ParamValue, RegionSet, WallBaseline};
pub use env::{
    MapCell, MapDimensions, MapOracle, MapPlanes, MapSnapshot, Position, RegionId, VariableId,
    VariableOracle, VariableTable,
};
pub use error::{ClassifyError, Plane, SnapshotError};
pub use paint::{PaintOp, PaintPlan, plan_cell};
pub use tile::{TerrainTag, TileFlags, TileId, TileKind, TileStack, TilesetFlags};
pub use translucency::{
    BehindTileOpacity, CharacterKey, CharacterView, CommandTarget, HighLayerCommand,
    HighLayerSprite, HighLayerSprites, HighLayerSwitches, HighLayerToggle, TranslucencyConfig,
    TranslucencyParams,
};
