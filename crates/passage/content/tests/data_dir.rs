use std::fs;

use passage_content::{ContentFactory, MapLoader, Settings};
use passage_core::{
    CharacterKey, Direction, Position, TileLayerClassifier, VariableId, VariableOracle,
};
use tempfile::TempDir;

const CASTLE: &str = r#"(
    dimensions: (1, 5),
    tileset: { 2: 0x700F, 3: 0x600F },
    planes: (
        layers: ([2, 2, 3, 3, 3], [], [], []),
    ),
)"#;

fn data_dir(settings: Option<&str>, variables: Option<&str>) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("maps")).unwrap();
    fs::write(dir.path().join("maps/castle.ron"), CASTLE).unwrap();
    if let Some(settings) = settings {
        fs::write(dir.path().join("settings.toml"), settings).unwrap();
    }
    if let Some(variables) = variables {
        fs::write(dir.path().join("variables.ron"), variables).unwrap();
    }
    dir
}

#[test]
fn loads_and_classifies_wall_column() {
    let dir = data_dir(None, None);
    let factory = ContentFactory::new(dir.path());

    let map = factory.load_map("castle").unwrap();
    let config = factory.load_settings().unwrap().passage_config();
    let classifier = TileLayerClassifier::new(&map, &config);

    let passable: Vec<_> = (0..5)
        .map(|y| classifier.is_passable(Position::new(0, y), Direction::Down))
        .collect();
    let above: Vec<_> = (0..5)
        .map(|y| classifier.is_rendered_above(Position::new(0, y)))
        .collect();
    assert_eq!(passable, [true, true, true, false, false]);
    assert_eq!(above, [true, true, false, true, true]);
}

#[test]
fn settings_and_variables_are_picked_up() {
    let dir = data_dir(
        Some(
            r#"
            [passage]
            wall_front_tag = 99

            [translucency]
            behind_tile_opacity_variable_id = 3
            high_layer_enabled_by_default = "false"
            "#,
        ),
        Some("{ 3: 200 }"),
    );
    let factory = ContentFactory::new(dir.path());

    let settings = factory.load_settings().unwrap();
    assert_eq!(settings.passage_config().wall_front_tag, None);

    let variables = factory.load_variables().unwrap();
    assert_eq!(variables.value(VariableId(3)), 200);

    let translucency = settings.translucency_config();
    assert_eq!(translucency.behind_tile.upper_layer_opacity(&variables), 55);
    assert!(!translucency.switches().is_enabled(CharacterKey::Player));
}

#[test]
fn missing_map_reports_path() {
    let dir = data_dir(None, None);
    let missing = dir.path().join("maps/nowhere.ron");

    let err = MapLoader::load(&missing).unwrap_err();
    assert!(err.to_string().contains("nowhere.ron"));
}

#[test]
fn optional_files_default_when_absent() {
    let dir = data_dir(None, None);
    let factory = ContentFactory::new(dir.path());

    assert_eq!(factory.load_variables().unwrap().value(VariableId(1)), 0);
    assert_eq!(factory.load_settings().unwrap(), Settings::default());
}
