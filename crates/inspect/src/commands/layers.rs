//! Layering grid: which cells draw above characters.

use anyhow::Result;
use clap::Parser;

use passage_core::TileLayerClassifier;

use crate::utils::{MapArgs, print_grid, print_header, render_grid};

/// Print a layering grid
#[derive(Parser)]
pub struct Layers {
    #[command(flatten)]
    args: MapArgs,
}

impl Layers {
    pub fn execute(self) -> Result<()> {
        let (map, settings) = self.args.load()?;
        let config = settings.passage_config();
        let classifier = TileLayerClassifier::new(&map, &config);

        print_header(&self.args.map, &map);
        let rows = render_grid(&map, |position| {
            if classifier.is_rendered_above(position) {
                '^'
            } else {
                '_'
            }
        });
        print_grid(&rows, '^');

        Ok(())
    }
}
