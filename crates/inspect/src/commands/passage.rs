//! Passability grid for one movement direction.

use anyhow::Result;
use clap::Parser;
use console::style;

use passage_core::{Direction, TileLayerClassifier};

use crate::utils::{MapArgs, print_grid, print_header, render_grid};

/// Print a passability grid
#[derive(Parser)]
pub struct Passage {
    #[command(flatten)]
    args: MapArgs,

    /// Movement direction checked for every cell (down, left, right, up)
    #[arg(short, long, value_parser = parse_direction, default_value = "down")]
    direction: Direction,
}

fn parse_direction(value: &str) -> Result<Direction, String> {
    value
        .parse()
        .map_err(|_| format!("unknown direction `{value}` (expected down, left, right, or up)"))
}

impl Passage {
    pub fn execute(self) -> Result<()> {
        let (map, settings) = self.args.load()?;
        let config = settings.passage_config();
        let classifier = TileLayerClassifier::new(&map, &config);
        let direction = self.direction;

        print_header(&self.args.map, &map);
        println!("{} {}", style("Direction:").bold().cyan(), direction);
        println!();

        let rows = render_grid(&map, |position| {
            if classifier.is_passable(position, direction) {
                '.'
            } else {
                '#'
            }
        });
        print_grid(&rows, '#');

        Ok(())
    }
}
