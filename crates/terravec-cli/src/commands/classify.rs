//! `terravec classify` - nearest-centroid train/test evaluation.

use anyhow::Result;
use colored::Colorize;
use terravec_core::evaluate_classifier;

use super::{split_points, DatasetArgs};

pub fn run(args: &DatasetArgs, train_ratio: f64, split_seed: u64, json: bool) -> Result<()> {
    let (embeddings, labels) = split_points(args.build()?);

    let started = std::time::Instant::now();
    let evaluation = evaluate_classifier(&embeddings, &labels, train_ratio, split_seed)?;
    tracing::info!(
        train = evaluation.train_size,
        test = evaluation.test_size,
        accuracy = evaluation.accuracy,
        elapsed_us = started.elapsed().as_micros() as u64,
        "evaluated classifier"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&evaluation)?);
        return Ok(());
    }

    println!(
        "{} {} train / {} test, accuracy {:.3}",
        "classify".green().bold(),
        evaluation.train_size,
        evaluation.test_size,
        evaluation.accuracy
    );

    // Confusion matrix: rows are true classes, columns predictions.
    let width = evaluation
        .class_labels
        .iter()
        .map(|l| l.len())
        .max()
        .unwrap_or(0)
        .max(5);
    print!("  {:width$}", "");
    for label in &evaluation.class_labels {
        print!(" {label:>width$}");
    }
    println!();
    for (label, row) in evaluation.class_labels.iter().zip(&evaluation.confusion) {
        print!("  {:>width$}", label.cyan());
        for count in row {
            print!(" {count:>width$}");
        }
        println!();
    }

    Ok(())
}
