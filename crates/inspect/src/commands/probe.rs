//! Explain the classifier's decision for a single cell.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use serde::Serialize;

use passage_content::VariablesLoader;
use passage_core::{
    Direction, MapOracle, PaintPlan, Position, RegionId, TileLayerClassifier, TileRole, TileStack,
    VariableTable, WallRun, plan_cell,
};

use crate::utils::MapArgs;

/// Explain the decision for one cell
#[derive(Parser)]
pub struct Probe {
    #[command(flatten)]
    args: MapArgs,

    /// Column of the cell
    #[arg(value_name = "X", allow_negative_numbers = true)]
    x: i32,

    /// Row of the cell
    #[arg(value_name = "Y", allow_negative_numbers = true)]
    y: i32,

    /// Game variables (RON) used for translucency
    #[arg(long, value_name = "FILE")]
    variables: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Human-readable summary
    Summary,
    /// Full JSON output
    Json,
    /// Pretty-printed debug format
    Debug,
}

#[derive(Debug, Serialize)]
struct ProbeReport {
    position: Position,
    tiles: TileStack,
    region: RegionId,
    role: TileRole,
    wall_run: Option<WallRun>,
    render_above: bool,
    directions: Vec<DirectionReport>,
    paint: Option<PaintPlan>,
    upper_layer_opacity: u8,
}

#[derive(Debug, Serialize)]
struct DirectionReport {
    direction: Direction,
    passable: bool,
    baseline: bool,
}

impl Probe {
    pub fn execute(self) -> Result<()> {
        let (map, settings) = self.args.load()?;
        let variables = match &self.variables {
            Some(path) => VariablesLoader::load(path)?,
            None => VariableTable::new(),
        };
        let config = settings.passage_config();
        let translucency = settings.translucency_config();
        let classifier = TileLayerClassifier::new(&map, &config);
        let position = Position::new(self.x, self.y);

        let mut directions = Vec::with_capacity(Direction::ALL.len());
        let mut render_above = false;
        for direction in Direction::ALL {
            let classification = classifier
                .classify_checked(position, direction)
                .with_context(|| format!("Cannot probe {}", self.args.map.display()))?;
            render_above = classification.render_above;
            directions.push(DirectionReport {
                direction,
                passable: classification.passable,
                baseline: classifier.baseline_passable(position, direction),
            });
        }

        let report = ProbeReport {
            position,
            tiles: map.layered_tiles(position),
            region: map.region_id(position),
            role: classifier.role(position),
            wall_run: classifier.wall_run(position),
            render_above,
            directions,
            paint: plan_cell(&classifier, position),
            upper_layer_opacity: translucency.behind_tile.upper_layer_opacity(&variables),
        };

        match self.format {
            OutputFormat::Summary => print_summary(&report),
            OutputFormat::Json => print_json(&report)?,
            OutputFormat::Debug => println!("{report:#?}"),
        }

        Ok(())
    }
}

fn print_summary(report: &ProbeReport) {
    let [z0, z1, z2, z3] = report.tiles.0;
    println!("{} {}", style("Cell:").bold().cyan(), report.position);
    println!("  Tiles: {z0} {z1} {z2} {z3}");
    println!("  Region: {}", report.region);
    println!("  Role: {}", report.role);
    if let Some(run) = report.wall_run {
        println!(
            "  Wall run: upper front {}, upper top {}, lower top {}, lower front {}",
            run.upper_front, run.upper_top, run.lower_top, run.lower_front
        );
    }
    println!();

    println!("{}", style("Passage:").bold().yellow());
    for entry in &report.directions {
        let verdict = if entry.passable {
            style("passable").green()
        } else {
            style("blocked").red()
        };
        println!(
            "  {:<6} {} (stock check: {})",
            entry.direction.as_ref(),
            verdict,
            if entry.baseline { "passable" } else { "blocked" }
        );
    }
    println!();

    println!("{}", style("Layering:").bold().yellow());
    let layer = if report.render_above { "above" } else { "below" };
    println!("  Drawn {layer} characters");
    match &report.paint {
        Some(plan) => {
            println!("  Lower bitmap: {:?}", plan.lower.as_slice());
            println!("  Upper bitmap: {:?}", plan.upper.as_slice());
        }
        None => println!("  Default painter"),
    }
    println!("  Upper layer opacity: {}", report.upper_layer_opacity);
}

fn print_json(report: &ProbeReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    println!("{json}");
    Ok(())
}
