//! `terravec similar` - top-k cosine search from a chosen point.

use anyhow::{bail, Result};
use colored::Colorize;
use serde_json::json;
use terravec_core::top_k_similar;

use super::DatasetArgs;

pub fn run(args: &DatasetArgs, point: usize, k: usize, json_output: bool) -> Result<()> {
    let points = args.build()?;
    if point >= points.len() {
        bail!(
            "--point {} is out of range (dataset has {} points)",
            point,
            points.len()
        );
    }

    let embeddings: Vec<Vec<f64>> = points.iter().map(|p| p.embedding.clone()).collect();
    let results = top_k_similar(&points[point].embedding, &embeddings, k)?;

    if json_output {
        let matches: Vec<_> = results
            .iter()
            .map(|&(i, score)| {
                json!({
                    "id": points[i].id,
                    "label": points[i].label,
                    "score": score,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    println!(
        "{} top {} matches for point {} ({})",
        "similar".green().bold(),
        k,
        point,
        points[point].label.cyan()
    );
    for (i, score) in results {
        println!("  #{:<4} {:<14} {:.4}", points[i].id, points[i].label, score);
    }

    Ok(())
}
