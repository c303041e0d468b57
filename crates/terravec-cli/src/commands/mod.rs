//! CLI command implementations.

pub mod classify;
pub mod cluster;
pub mod dataset;
pub mod project;
pub mod similar;

use anyhow::{bail, Result};
use clap::Args;
use terravec_core::{generate_dataset, ClassSpec, LabeledPoint};

/// Shared dataset flags: every subcommand starts by generating the same
/// synthetic dataset the dashboard uses.
#[derive(Args, Debug)]
pub struct DatasetArgs {
    /// Number of land-cover classes (taken from the demo set, up to 6)
    #[arg(long, default_value = "6")]
    pub classes: usize,

    /// Samples per class
    #[arg(long, default_value = "40")]
    pub per_class: usize,

    /// Embedding dimension
    #[arg(long, default_value = "64")]
    pub dimension: usize,

    /// Dataset seed
    #[arg(long, default_value = "42")]
    pub seed: u64,
}

impl DatasetArgs {
    /// Generate the dataset described by these flags.
    pub fn build(&self) -> Result<Vec<LabeledPoint>> {
        let demo = ClassSpec::demo_set();
        if self.classes == 0 || self.classes > demo.len() {
            bail!("--classes must be between 1 and {}", demo.len());
        }

        let specs: Vec<ClassSpec> = demo
            .into_iter()
            .take(self.classes)
            .map(|mut spec| {
                spec.samples = self.per_class;
                spec
            })
            .collect();

        let started = std::time::Instant::now();
        let points = generate_dataset(&specs, self.dimension, self.seed)?;
        tracing::info!(
            points = points.len(),
            dimension = self.dimension,
            seed = self.seed,
            elapsed_us = started.elapsed().as_micros() as u64,
            "generated dataset"
        );
        Ok(points)
    }
}

/// Split a dataset into parallel embedding and label arrays.
pub fn split_points(points: Vec<LabeledPoint>) -> (Vec<Vec<f64>>, Vec<String>) {
    let labels = points.iter().map(|p| p.label.clone()).collect();
    let embeddings = points.into_iter().map(|p| p.embedding).collect();
    (embeddings, labels)
}
