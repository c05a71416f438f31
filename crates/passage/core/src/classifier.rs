//! Tile layer classification.
//!
//! Walls are modelled as a vertical run of wall-top tiles resting on a run of
//! wall-front tiles. Scanning the column around a tagged cell recovers how
//! tall the wall is, which in turn decides whether a character standing there
//! is hidden behind it (passable, drawn above) or blocked by it.
//!
//! Region overrides always win over terrain tags. The classifier holds no
//! state beyond borrowed references, so every query recomputes its answer.

use crate::baseline::{Direction, check_passage, check_upper_passage};
use crate::config::{PassageConfig, WallBaseline};
use crate::env::{MapOracle, Position};
use crate::error::ClassifyError;
use crate::tile::TerrainTag;

/// Both answers for one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Classification {
    pub passable: bool,
    pub render_above: bool,
}

/// Role a cell's terrain tag plays, in precedence order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TileRole {
    Star,
    WallFront,
    WallTop,
    Plain,
}

/// Contiguous tagged runs around a wall cell, not counting the cell itself.
///
/// For a wall-front cell `upper_front`, `upper_top` and `lower_front` are
/// scanned; for a wall-top cell `upper_top`, `lower_top` and `lower_front`.
/// Counts that do not apply stay zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WallRun {
    pub upper_front: u32,
    pub upper_top: u32,
    pub lower_top: u32,
    pub lower_front: u32,
}

impl WallRun {
    /// A front cell is passable when the front run below it is at least as
    /// long as the wall top above it.
    pub const fn front_passable(&self) -> bool {
        self.upper_top != 0 && self.lower_front >= self.upper_top
    }

    /// A front cell draws above characters when the wall top above it is
    /// longer than the front run below it.
    pub const fn front_above(&self) -> bool {
        self.upper_top != 0 && self.lower_front < self.upper_top
    }

    /// A top cell is hidden behind the wall when its distance from the wall's
    /// upper edge fits within the front run below, or within the default
    /// height when no front run exists.
    pub const fn top_occluded(&self, default_wall_height: u32) -> bool {
        if self.lower_front == 0 {
            self.upper_top < default_wall_height
        } else {
            self.upper_top < self.lower_front
        }
    }
}

/// Passage and layering decisions over a borrowed map and configuration.
pub struct TileLayerClassifier<'a, M: MapOracle + ?Sized> {
    map: &'a M,
    config: &'a PassageConfig,
}

impl<'a, M: MapOracle + ?Sized> Clone for TileLayerClassifier<'a, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, M: MapOracle + ?Sized> Copy for TileLayerClassifier<'a, M> {}

impl<'a, M: MapOracle + ?Sized> TileLayerClassifier<'a, M> {
    pub fn new(map: &'a M, config: &'a PassageConfig) -> Self {
        Self { map, config }
    }

    pub fn map(&self) -> &'a M {
        self.map
    }

    pub fn config(&self) -> &'a PassageConfig {
        self.config
    }

    /// Whether the bottom layer of `position` carries `tag`. Empty cells and
    /// disabled tags never match.
    pub fn has_tag(&self, position: Position, tag: Option<TerrainTag>) -> bool {
        let Some(tag) = tag else {
            return false;
        };
        let tiles = self.map.layered_tiles(position);
        if tiles.is_empty() {
            return false;
        }
        self.map.tileset_flags().get(tiles.base()).terrain_tag() == tag
    }

    pub fn role(&self, position: Position) -> TileRole {
        let config = self.config;
        if self.has_tag(position, config.star_tag) {
            TileRole::Star
        } else if self.has_tag(position, config.wall_front_tag) {
            TileRole::WallFront
        } else if self.has_tag(position, config.wall_top_tag) {
            TileRole::WallTop
        } else {
            TileRole::Plain
        }
    }

    /// Counts consecutive cells carrying `tag`, starting at row `start_y` and
    /// stepping by `step`, stopping at the map edge.
    fn run_length(&self, x: i32, start_y: i32, step: i32, tag: Option<TerrainTag>) -> u32 {
        let height = self.map.dimensions().height as i32;
        let mut y = start_y;
        let mut count = 0;
        while (0..height).contains(&y) && self.has_tag(Position::new(x, y), tag) {
            count += 1;
            y += step;
        }
        count
    }

    /// Scans the wall around a wall cell. Returns `None` for other roles.
    pub fn wall_run(&self, position: Position) -> Option<WallRun> {
        let Position { x, y } = position;
        let top = self.config.wall_top_tag;
        let front = self.config.wall_front_tag;

        match self.role(position) {
            TileRole::WallFront => {
                let lower_front = self.run_length(x, y + 1, 1, front);
                let upper_front = self.run_length(x, y - 1, -1, front);
                let upper_top = self.run_length(x, y - 1 - upper_front as i32, -1, top);
                Some(WallRun {
                    upper_front,
                    upper_top,
                    lower_top: 0,
                    lower_front,
                })
            }
            TileRole::WallTop => {
                let upper_top = self.run_length(x, y - 1, -1, top);
                let lower_top = self.run_length(x, y + 1, 1, top);
                let lower_front = self.run_length(x, y + 1 + lower_top as i32, 1, front);
                Some(WallRun {
                    upper_front: 0,
                    upper_top,
                    lower_top,
                    lower_front,
                })
            }
            TileRole::Star | TileRole::Plain => None,
        }
    }

    /// Stock passage check over every layer of the cell.
    pub fn baseline_passable(&self, position: Position, direction: Direction) -> bool {
        let tiles = self.map.all_tiles(position);
        check_passage(self.map.tileset_flags(), &tiles, direction.bit())
    }

    fn wall_baseline_passable(&self, position: Position, direction: Direction) -> bool {
        match self.config.wall_baseline {
            WallBaseline::AllLayers => self.baseline_passable(position, direction),
            WallBaseline::UpperLayers => {
                let tiles = self.map.all_tiles(position);
                check_upper_passage(self.map.tileset_flags(), &tiles, direction.bit())
            }
        }
    }

    /// Whether a character may move through `position` toward `direction`.
    pub fn is_passable(&self, position: Position, direction: Direction) -> bool {
        let config = self.config;
        let region = self.map.region_id(position);
        if config.star_regions.contains(region) || config.passable_regions.contains(region) {
            return true;
        }
        if config.impassable_regions.contains(region) {
            return false;
        }

        match self.role(position) {
            TileRole::Plain => self.baseline_passable(position, direction),
            TileRole::Star => true,
            TileRole::WallFront => {
                let shielded = self.wall_run(position).is_some_and(|run| run.front_passable());
                shielded || self.wall_baseline_passable(position, direction)
            }
            TileRole::WallTop => {
                let hidden = self
                    .wall_run(position)
                    .is_some_and(|run| run.top_occluded(config.default_wall_height));
                hidden || self.wall_baseline_passable(position, direction)
            }
        }
    }

    /// Whether the tiles at `position` are composited above characters.
    pub fn is_rendered_above(&self, position: Position) -> bool {
        let config = self.config;
        let below = position.offset_y(1);
        if self.map.contains(below) && config.star_regions.contains(self.map.region_id(below)) {
            return true;
        }
        let region = self.map.region_id(position);
        if config.star_regions.contains(region) || config.higher_tile_regions.contains(region) {
            return true;
        }

        match self.role(position) {
            TileRole::Star => true,
            TileRole::WallFront => self.wall_run(position).is_some_and(|run| run.front_above()),
            TileRole::WallTop => self
                .wall_run(position)
                .is_some_and(|run| run.top_occluded(config.default_wall_height)),
            TileRole::Plain => false,
        }
    }

    pub fn classify(&self, position: Position, direction: Direction) -> Classification {
        let classification = Classification {
            passable: self.is_passable(position, direction),
            render_above: self.is_rendered_above(position),
        };
        tracing::trace!(%position, %direction, ?classification, "classified tile");
        classification
    }

    /// Like [`Self::classify`], but rejects positions outside the map.
    pub fn classify_checked(
        &self,
        position: Position,
        direction: Direction,
    ) -> Result<Classification, ClassifyError> {
        let dimensions = self.map.dimensions();
        if !dimensions.contains(position) {
            return Err(ClassifyError::out_of_bounds(position, dimensions));
        }
        Ok(self.classify(position, direction))
    }

    /// Whether the host painter must split this cell's layers using the
    /// classifier instead of its default layering.
    pub fn needs_layered_paint(&self, position: Position) -> bool {
        let config = self.config;
        let region = self.map.region_id(position);
        config.star_regions.contains(region)
            || config.higher_tile_regions.contains(region)
            || self.role(position) != TileRole::Plain
    }
}
