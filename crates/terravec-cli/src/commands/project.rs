//! `terravec project` - PCA layout of the dataset.

use anyhow::Result;
use colored::Colorize;
use terravec_core::project_pca;

use super::{split_points, DatasetArgs};

pub fn run(args: &DatasetArgs, components: usize, json: bool) -> Result<()> {
    let (embeddings, _) = split_points(args.build()?);

    let started = std::time::Instant::now();
    let projection = project_pca(&embeddings, components)?;
    tracing::info!(
        components,
        elapsed_us = started.elapsed().as_micros() as u64,
        "projected dataset"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&projection)?);
        return Ok(());
    }

    println!(
        "{} {} points onto {} components",
        "project".green().bold(),
        embeddings.len(),
        components
    );
    for (i, explained) in projection.explained_variance.iter().enumerate() {
        println!("  component {}: {:>5.1}% of variance", i + 1, explained * 100.0);
    }

    let (x_min, x_max) = extent(projection.x());
    let (y_min, y_max) = extent(projection.y());
    println!("  x range [{x_min:.3}, {x_max:.3}], y range [{y_min:.3}, {y_max:.3}]");

    Ok(())
}

fn extent(coords: &[f64]) -> (f64, f64) {
    let min = coords.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = coords.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    (min, max)
}
