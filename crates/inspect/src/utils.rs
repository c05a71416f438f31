//! Shared loading and grid rendering for tile-inspect commands

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use console::{StyledObject, style};

use passage_content::{MapLoader, Settings, SettingsLoader};
use passage_core::{MapOracle, MapSnapshot, Position};

/// Map and settings arguments shared by every command.
#[derive(Args)]
pub struct MapArgs {
    /// Map file (RON)
    #[arg(value_name = "MAP")]
    pub map: PathBuf,

    /// Settings file (TOML); defaults apply when omitted
    #[arg(short, long, value_name = "FILE")]
    pub settings: Option<PathBuf>,
}

impl MapArgs {
    pub fn load(&self) -> Result<(MapSnapshot, Settings)> {
        let map = MapLoader::load(&self.map)
            .with_context(|| format!("Failed to load map: {}", self.map.display()))?;
        let settings = SettingsLoader::load_or_default(self.settings.as_deref())?;
        Ok((map, settings))
    }
}

pub fn print_header(path: &Path, map: &MapSnapshot) {
    let dimensions = map.dimensions();
    println!(
        "{} {} ({}x{})",
        style("Map:").bold().cyan(),
        path.display(),
        dimensions.width,
        dimensions.height
    );
    println!();
}

/// Renders one line per map row, asking `cell` for each position.
pub fn render_grid<M, F>(map: &M, mut cell: F) -> Vec<String>
where
    M: MapOracle + ?Sized,
    F: FnMut(Position) -> char,
{
    let dimensions = map.dimensions();
    (0..dimensions.height as i32)
        .map(|y| {
            (0..dimensions.width as i32)
                .map(|x| cell(Position::new(x, y)))
                .collect()
        })
        .collect()
}

pub fn styled_cell(symbol: char, highlighted: bool) -> StyledObject<char> {
    if highlighted {
        style(symbol).yellow().bold()
    } else {
        style(symbol).dim()
    }
}

pub fn print_grid(rows: &[String], highlight: char) {
    for row in rows {
        let line: String = row
            .chars()
            .map(|symbol| styled_cell(symbol, symbol == highlight).to_string())
            .collect();
        println!("{line}");
    }
}
