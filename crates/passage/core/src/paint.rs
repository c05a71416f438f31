//! Draw-list planning for cells painted with classifier-driven layering.
//!
//! The host tilemap keeps two bitmaps per screen: one composited below
//! characters and one above. For cells that [`needs_layered_paint`] the tile
//! layers are split between them according to
//! [`TileLayerClassifier::is_rendered_above`]; every other cell is left to the
//! host's default painter.
//!
//! [`needs_layered_paint`]: TileLayerClassifier::needs_layered_paint

use arrayvec::ArrayVec;

use crate::classifier::TileLayerClassifier;
use crate::env::{MapOracle, Position};
use crate::tile::TileId;

/// One draw call into a tile bitmap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PaintOp {
    Tile(TileId),
    /// Wall shadow quadrants painted with the shadow pen.
    Shadow(u8),
    /// Lower edge of the table tile standing on the cell above.
    TableEdge(TileId),
}

/// Ordered draw lists for one cell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PaintPlan {
    pub render_above: bool,
    /// Composited below characters: up to four tiles, a shadow, a table edge.
    pub lower: ArrayVec<PaintOp, 6>,
    /// Composited above characters.
    pub upper: ArrayVec<PaintOp, 4>,
}

impl PaintPlan {
    fn push_tile(&mut self, tile: TileId, above: bool) {
        if tile.is_empty() {
            return;
        }
        if above {
            self.upper.push(PaintOp::Tile(tile));
        } else {
            self.lower.push(PaintOp::Tile(tile));
        }
    }
}

/// Plans the draw lists for `position`, or returns `None` when the host's
/// default painter should handle the cell.
pub fn plan_cell<M: MapOracle + ?Sized>(
    classifier: &TileLayerClassifier<'_, M>,
    position: Position,
) -> Option<PaintPlan> {
    if !classifier.needs_layered_paint(position) {
        return None;
    }

    let map = classifier.map();
    let flags = map.tileset_flags();
    let tiles = map.layered_tiles(position);
    let above = classifier.is_rendered_above(position);
    let mut plan = PaintPlan {
        render_above: above,
        ..PaintPlan::default()
    };

    plan.push_tile(tiles.layer(0), above);
    plan.push_tile(tiles.layer(1), above);

    let shadow = map.shadow_bits(position);
    if shadow != 0 {
        plan.lower.push(PaintOp::Shadow(shadow));
    }

    let upper_neighbor = position.offset_y(-1);
    let table = if map.contains(upper_neighbor) {
        map.layered_tiles(upper_neighbor).layer(1)
    } else {
        TileId::EMPTY
    };
    if flags.is_table(table) && !flags.is_table(tiles.layer(1)) && !tiles.layer(0).is_shadowing()
    {
        plan.lower.push(PaintOp::TableEdge(table));
    }

    let upper_layers_above = above || map.is_overpass(position);
    plan.push_tile(tiles.layer(2), upper_layers_above);
    plan.push_tile(tiles.layer(3), upper_layers_above);

    tracing::trace!(%position, ?plan, "planned layered paint");
    Some(plan)
}
