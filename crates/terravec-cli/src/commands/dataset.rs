//! `terravec dataset` - generate and summarize the synthetic dataset.

use anyhow::Result;
use colored::Colorize;
use std::collections::BTreeMap;

use super::DatasetArgs;

pub fn run(args: &DatasetArgs, json: bool) -> Result<()> {
    let points = args.build()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&points)?);
        return Ok(());
    }

    println!(
        "{} {} points, {} dimensions, seed {}",
        "dataset".green().bold(),
        points.len(),
        args.dimension,
        args.seed
    );

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for p in &points {
        *counts.entry(p.label.as_str()).or_insert(0) += 1;
    }
    for (label, count) in counts {
        println!("  {:<14} {}", label.cyan(), count);
    }

    Ok(())
}
