use passage_core::{
    ClassifyError, Direction, MapDimensions, MapSnapshot, PassageConfig, Position, RegionId,
    RegionSet, TerrainTag, TileFlags, TileId, TileLayerClassifier, TileStack, TilesetFlags,
};

const FLOOR: u16 = 1;
const TOP: u16 = 2;
const FRONT: u16 = 3;
const STAR: u16 = 4;

fn tileset() -> TilesetFlags {
    let mut flags = TilesetFlags::default();
    flags.set(TileId(0), TileFlags::NO_EFFECT);
    flags.set(TileId(FLOOR), TileFlags::empty());
    flags.set(TileId(TOP), TileFlags::BLOCK_ALL.with_terrain_tag(TerrainTag(7)));
    flags.set(TileId(FRONT), TileFlags::BLOCK_ALL.with_terrain_tag(TerrainTag(6)));
    flags.set(TileId(STAR), TileFlags::BLOCK_ALL.with_terrain_tag(TerrainTag(5)));
    flags
}

/// Builds a one-tile-wide map from base tiles listed top to bottom.
fn column(bases: &[u16]) -> MapSnapshot {
    let dimensions = MapDimensions::new(1, bases.len() as u32);
    let mut map = MapSnapshot::blank(dimensions, tileset()).expect("non-empty column");
    for (y, base) in bases.iter().enumerate() {
        map.set_tiles(Position::new(0, y as i32), TileStack::new(*base, 0, 0, 0))
            .expect("row inside column");
    }
    map
}

fn scan(map: &MapSnapshot, config: &PassageConfig) -> (Vec<bool>, Vec<bool>) {
    let classifier = TileLayerClassifier::new(map, config);
    map.positions()
        .map(|position| {
            let c = classifier.classify(position, Direction::Down);
            (c.passable, c.render_above)
        })
        .unzip()
}

#[test]
fn wall_column_end_to_end() {
    let map = column(&[TOP, TOP, FRONT, FRONT, FRONT]);
    let config = PassageConfig::new();

    let (passable, above) = scan(&map, &config);
    assert_eq!(passable, [true, true, true, false, false]);
    assert_eq!(above, [true, true, false, true, true]);
}

#[test]
fn wall_front_offsets_under_short_top() {
    let map = column(&[FLOOR, TOP, TOP, FRONT, FRONT, FRONT, FLOOR]);
    let config = PassageConfig::new();
    let classifier = TileLayerClassifier::new(&map, &config);

    let runs: Vec<_> = (3..6)
        .map(|y| classifier.wall_run(Position::new(0, y)).expect("front cell"))
        .map(|run| (run.upper_front, run.upper_top, run.lower_front))
        .collect();
    assert_eq!(runs, [(0, 2, 2), (1, 2, 1), (2, 2, 0)]);

    let (passable, above) = scan(&map, &config);
    assert_eq!(passable, [true, true, true, true, false, false, true]);
    assert_eq!(above, [false, true, true, false, true, true, false]);
}

#[test]
fn isolated_wall_top_uses_default_height() {
    let map = column(&[TOP, TOP, TOP]);
    let config = PassageConfig::new();

    let (passable, above) = scan(&map, &config);
    assert_eq!(passable, [true, true, false]);
    assert_eq!(above, [true, true, false]);

    let config = PassageConfig::new().with_default_wall_height(0);
    let (passable, _) = scan(&map, &config);
    assert_eq!(passable, [false, false, false]);
}

#[test]
fn star_tag_ignores_neighbors() {
    let map = column(&[FRONT, STAR, TOP]);
    let config = PassageConfig::new().with_star_tag(Some(TerrainTag(5)));
    let classifier = TileLayerClassifier::new(&map, &config);

    let star = Position::new(0, 1);
    for direction in Direction::ALL {
        assert!(classifier.is_passable(star, direction));
    }
    assert!(classifier.is_rendered_above(star));
}

#[test]
fn region_overrides_take_precedence() {
    let mut map = column(&[FLOOR, STAR, TOP, FRONT]);
    map.set_region(Position::new(0, 0), RegionId(2)).unwrap();
    map.set_region(Position::new(0, 1), RegionId(2)).unwrap();
    map.set_region(Position::new(0, 3), RegionId(1)).unwrap();

    let config = PassageConfig::new()
        .with_star_tag(Some(TerrainTag(5)))
        .with_passable_regions(RegionSet::from_ids([1]))
        .with_impassable_regions(RegionSet::from_ids([1, 2]));
    let classifier = TileLayerClassifier::new(&map, &config);

    // Forced impassable over a floor and over a star tile.
    assert!(!classifier.is_passable(Position::new(0, 0), Direction::Down));
    assert!(!classifier.is_passable(Position::new(0, 1), Direction::Down));
    // Passable regions are checked before impassable ones.
    assert!(classifier.is_passable(Position::new(0, 3), Direction::Down));
}

#[test]
fn star_region_lifts_the_cell_above() {
    let mut map = column(&[FLOOR, FLOOR, FLOOR]);
    map.set_region(Position::new(0, 2), RegionId(9)).unwrap();
    let config = PassageConfig::new().with_star_regions(RegionSet::from_ids([9]));
    let classifier = TileLayerClassifier::new(&map, &config);

    assert!(!classifier.is_rendered_above(Position::new(0, 0)));
    assert!(classifier.is_rendered_above(Position::new(0, 1)));
    assert!(classifier.is_rendered_above(Position::new(0, 2)));
    assert!(classifier.needs_layered_paint(Position::new(0, 2)));
    assert!(!classifier.needs_layered_paint(Position::new(0, 1)));
}

#[test]
fn scans_stop_at_map_edges() {
    let map = column(&[FRONT, FRONT]);
    let config = PassageConfig::new();
    let classifier = TileLayerClassifier::new(&map, &config);

    for y in [0, 1] {
        let run = classifier.wall_run(Position::new(0, y)).expect("front cell");
        assert_eq!(run.upper_top, 0);
        assert!(!classifier.is_rendered_above(Position::new(0, y)));
        assert!(!classifier.is_passable(Position::new(0, y), Direction::Up));
    }
}

#[test]
fn classification_is_idempotent() {
    let map = column(&[TOP, FRONT, FRONT, FLOOR]);
    let config = PassageConfig::new();
    let classifier = TileLayerClassifier::new(&map, &config);

    for position in map.positions() {
        for direction in Direction::ALL {
            assert_eq!(
                classifier.classify(position, direction),
                classifier.classify(position, direction)
            );
        }
    }
}

#[test]
fn checked_classification_rejects_outside_positions() {
    let map = column(&[FLOOR, FLOOR]);
    let config = PassageConfig::new();
    let classifier = TileLayerClassifier::new(&map, &config);

    let err = classifier
        .classify_checked(Position::new(0, 2), Direction::Down)
        .unwrap_err();
    assert!(matches!(err, ClassifyError::PositionOutOfBounds { .. }));
    assert!(
        classifier
            .classify_checked(Position::new(0, 1), Direction::Down)
            .is_ok()
    );
}
