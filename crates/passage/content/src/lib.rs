//! Data-driven inputs for the tile layer classifier.
//!
//! This crate reads the files tools and tests feed into `passage-core`:
//! - Map snapshots (tile layers, shadows, regions, tileset flags) from RON
//! - Plugin settings (`[passage]` and `[translucency]` tables) from TOML
//! - Game variable tables from RON
//!
//! Host engines that already hold this data implement the core oracle traits
//! directly and never go through these loaders.

pub mod loaders;

pub use loaders::{ContentFactory, LoadResult, MapLoader, Settings, SettingsLoader, VariablesLoader};
