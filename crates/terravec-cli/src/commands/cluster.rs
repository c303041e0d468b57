//! `terravec cluster` - spherical k-means over the dataset.

use anyhow::Result;
use colored::Colorize;
use serde_json::json;
use terravec_core::{cluster_kmeans, purity, within_cluster_distance};

use super::{split_points, DatasetArgs};

pub fn run(
    args: &DatasetArgs,
    k: usize,
    max_iterations: usize,
    cluster_seed: u64,
    json_output: bool,
) -> Result<()> {
    let (embeddings, labels) = split_points(args.build()?);

    let started = std::time::Instant::now();
    let assignment = cluster_kmeans(&embeddings, k, max_iterations, cluster_seed)?;
    let score = purity(&assignment.labels, &labels);
    tracing::info!(
        k,
        iterations = assignment.iterations,
        converged = assignment.converged,
        elapsed_us = started.elapsed().as_micros() as u64,
        "clustered dataset"
    );

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "assignment": assignment,
                "purity": score,
            }))?
        );
        return Ok(());
    }

    println!(
        "{} k = {}, {} iterations{}",
        "cluster".green().bold(),
        k,
        assignment.iterations,
        if assignment.converged {
            " (converged)"
        } else {
            " (hit cap)"
        }
    );

    let mut sizes = vec![0usize; k];
    for &label in &assignment.labels {
        sizes[label] += 1;
    }
    for (i, size) in sizes.iter().enumerate() {
        println!("  cluster {i}: {size} points");
    }

    println!(
        "  purity {:.3}, within-cluster distance {:.3}",
        score,
        within_cluster_distance(&embeddings, &assignment)
    );

    Ok(())
}
