//! # Terravec Core
//!
//! A small from-scratch numerical toolkit for demonstrating how geospatial
//! embedding models behave: synthetic labeled unit vectors, dimensionality
//! reduction, clustering, classification, and similarity search, all
//! returning plain numeric structures for a rendering layer to draw.
//!
//! - Synthetic dataset generation with seeded determinism
//! - PCA via power iteration (no covariance matrix materialized)
//! - Spherical k-means with cosine-distance assignment
//! - Nearest-centroid classification with train/test evaluation
//! - Brute-force top-k cosine search
//!
//! Everything is synchronous and pure: each call takes its own inputs and
//! returns freshly allocated outputs, with randomness supplied only through
//! explicit seeds.
//!
//! ## Usage
//!
//! ```rust
//! use terravec_core::prelude::*;
//!
//! let points = generate_dataset(&ClassSpec::demo_set(), 64, 42).unwrap();
//! let embeddings: Vec<Vec<f64>> = points.iter().map(|p| p.embedding.clone()).collect();
//!
//! let projection = project_pca(&embeddings, 2).unwrap();
//! assert_eq!(projection.x().len(), points.len());
//!
//! let clusters = cluster_kmeans(&embeddings, 6, 30, 7).unwrap();
//! assert_eq!(clusters.labels.len(), points.len());
//! ```

mod classifier;
mod error;
mod kmeans;
mod pca;
mod search;
mod synthetic;
mod vector;

pub use classifier::{evaluate_classifier, train_classifier, ClassifierModel, Evaluation};
pub use error::{Result, TerravecError};
pub use kmeans::{cluster_kmeans, purity, within_cluster_distance, ClusterAssignment};
pub use pca::{project_pca, project_pca_seeded, Projection, POWER_ITERATIONS};
pub use search::top_k_similar;
pub use synthetic::{generate_dataset, ClassSpec, LabeledPoint, BAND_COUNT, BAND_WIDTH};
pub use vector::{
    cosine_distance, cosine_similarity, dot, mean, norm, norm_squared, normalize, normalized,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{cosine_similarity, normalize, normalized};
    pub use crate::{cluster_kmeans, purity, ClusterAssignment};
    pub use crate::{evaluate_classifier, train_classifier, ClassifierModel, Evaluation};
    pub use crate::{generate_dataset, ClassSpec, LabeledPoint};
    pub use crate::{project_pca, Projection};
    pub use crate::{top_k_similar, Result, TerravecError};
}
