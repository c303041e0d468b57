//! Spherical k-means clustering.
//!
//! Embeddings are directionally meaningful unit vectors, so the assignment
//! step uses cosine distance (`1 - cosine_similarity`) rather than
//! Euclidean distance, and the update step projects each centroid's
//! arithmetic member mean back onto the unit sphere (the spherical mean).
//! Iteration stops when no point changes cluster between passes, or at the
//! iteration cap.
//!
//! Degeneracy policy: a cluster that loses all members keeps its previous
//! centroid unchanged. No reseeding, no dropping; the simple policy is kept
//! for behavioral compatibility with the dashboard it reimplements.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

use crate::error::{check_dimensions, Result, TerravecError};
use crate::vector::{self, cosine_distance};

/// Result of a clustering run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterAssignment {
    /// Cluster index in `[0, k)` for each input point.
    pub labels: Vec<usize>,
    /// Unit-norm cluster centroids.
    pub centroids: Vec<Vec<f64>>,
    /// Number of assignment passes performed.
    pub iterations: usize,
    /// Whether label stability was reached before the iteration cap.
    pub converged: bool,
}

/// Partition embeddings into `k` clusters by spherical k-means.
///
/// Centroids are initialized from `k` distinct points sampled with the
/// seeded generator, so a fixed seed reproduces the exact same clustering.
pub fn cluster_kmeans(
    embeddings: &[Vec<f64>],
    k: usize,
    max_iterations: usize,
    seed: u64,
) -> Result<ClusterAssignment> {
    check_dimensions(embeddings)?;
    let n = embeddings.len();
    if k == 0 || k > n {
        return Err(TerravecError::invalid_parameter(
            "k",
            format!("must be in 1..={n}, got {k}"),
        ));
    }
    if max_iterations == 0 {
        return Err(TerravecError::invalid_parameter(
            "max_iterations",
            "must be positive".to_string(),
        ));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut centroids: Vec<Vec<f64>> = rand::seq::index::sample(&mut rng, n, k)
        .iter()
        .map(|i| vector::normalized(&embeddings[i]))
        .collect();

    let mut labels = vec![0usize; n];
    let mut iterations = 0;
    let mut converged = false;

    for _ in 0..max_iterations {
        iterations += 1;

        // Assignment: nearest centroid by cosine distance.
        let mut changed = false;
        for (label, embedding) in labels.iter_mut().zip(embeddings.iter()) {
            let nearest = nearest_centroid(embedding, &centroids);
            if *label != nearest {
                *label = nearest;
                changed = true;
            }
        }

        if !changed {
            converged = true;
            break;
        }

        // Update: spherical mean of each cluster's members.
        let mut sums = vec![vec![0.0; embeddings[0].len()]; k];
        let mut counts = vec![0usize; k];
        for (&label, embedding) in labels.iter().zip(embeddings.iter()) {
            counts[label] += 1;
            for (acc, x) in sums[label].iter_mut().zip(embedding.iter()) {
                *acc += x;
            }
        }
        for ((centroid, mut sum), &count) in centroids.iter_mut().zip(sums).zip(&counts) {
            if count > 0 {
                vector::normalize(&mut sum);
                *centroid = sum;
            }
            // Empty cluster: previous centroid stays in place.
        }
    }

    Ok(ClusterAssignment {
        labels,
        centroids,
        iterations,
        converged,
    })
}

fn nearest_centroid(embedding: &[f64], centroids: &[Vec<f64>]) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (i, centroid) in centroids.iter().enumerate() {
        let distance = cosine_distance(embedding, centroid);
        if distance < best_distance {
            best_distance = distance;
            best = i;
        }
    }
    best
}

/// Total within-cluster cosine distance of an assignment.
///
/// The quantity the alternating steps drive down; exposed for demo
/// readouts and regression tests.
pub fn within_cluster_distance(
    embeddings: &[Vec<f64>],
    assignment: &ClusterAssignment,
) -> f64 {
    assignment
        .labels
        .iter()
        .zip(embeddings.iter())
        .map(|(&label, embedding)| cosine_distance(embedding, &assignment.centroids[label]))
        .sum()
}

/// Cluster purity against ground-truth labels.
///
/// For each cluster, the most frequent true label among its members is
/// counted; the maxima are summed and divided by the number of points.
/// A quality readout for demos, not part of the clustering itself.
pub fn purity<T: Eq + Hash>(cluster_labels: &[usize], true_labels: &[T]) -> f64 {
    debug_assert_eq!(cluster_labels.len(), true_labels.len());
    if cluster_labels.is_empty() {
        return 0.0;
    }

    let mut tallies: HashMap<usize, HashMap<&T, usize>> = HashMap::new();
    for (&cluster, truth) in cluster_labels.iter().zip(true_labels.iter()) {
        *tallies.entry(cluster).or_default().entry(truth).or_insert(0) += 1;
    }

    let majority_sum: usize = tallies
        .values()
        .map(|counts| counts.values().copied().max().unwrap_or(0))
        .sum();
    majority_sum as f64 / cluster_labels.len() as f64
}
