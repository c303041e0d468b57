//! Principal component analysis via power iteration.
//!
//! The embeddings are few (tens to hundreds) but moderately wide, so the
//! covariance matrix is never materialized: each power iteration applies
//! the covariance implicitly as `Xᵗ(Xv)` over the centered data. Components
//! are extracted one at a time; after each extraction the data is deflated
//! by subtracting its projection onto the found axis, which keeps
//! successive axes approximately orthogonal.
//!
//! This is an approximation, not exact PCA: the fixed iteration budget of
//! [`POWER_ITERATIONS`] is an empirically chosen convergence budget with no
//! guaranteed tolerance. For layout and explained-variance readouts on demo
//! data it is more than enough.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::{check_dimensions, Result, TerravecError};
use crate::vector::{self, dot, norm_squared};

/// Power iteration budget per component.
pub const POWER_ITERATIONS: usize = 50;

/// Guard for the explained-variance denominator; identical input points
/// report 0 explained variance instead of NaN.
const VARIANCE_EPSILON: f64 = 1e-12;

/// Low-dimensional projection of a set of embeddings.
///
/// `coords[j]` holds every point's coordinate along component `j`, so each
/// coordinate array has length N. `axes[j]` is the extracted unit component
/// vector in the original space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projection {
    /// Per-component coordinate arrays, each of length N.
    pub coords: Vec<Vec<f64>>,
    /// Fraction of total variance captured by each component; the sum is
    /// at most 1.
    pub explained_variance: Vec<f64>,
    /// The extracted unit component vectors.
    pub axes: Vec<Vec<f64>>,
}

impl Projection {
    /// Coordinates along the first component.
    pub fn x(&self) -> &[f64] {
        self.coords.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Coordinates along the second component.
    pub fn y(&self) -> &[f64] {
        self.coords.get(1).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Project embeddings onto their leading principal components.
///
/// Uses a fixed internal seed for the power-iteration start vectors, so
/// repeated calls over the same data produce identical layouts.
pub fn project_pca(embeddings: &[Vec<f64>], components: usize) -> Result<Projection> {
    project_pca_seeded(embeddings, components, 7)
}

/// [`project_pca`] with an explicit seed for the start vectors.
pub fn project_pca_seeded(
    embeddings: &[Vec<f64>],
    components: usize,
    seed: u64,
) -> Result<Projection> {
    let dimension = check_dimensions(embeddings)?;
    let n = embeddings.len();
    let max_components = dimension.min(n);
    if components == 0 || components > max_components {
        return Err(TerravecError::invalid_parameter(
            "components",
            format!("must be in 1..={max_components}, got {components}"),
        ));
    }

    // Center the data; all further work happens on deviations from the mean.
    let mean = vector::mean(embeddings);
    let centered: Vec<Vec<f64>> = embeddings
        .iter()
        .map(|e| e.iter().zip(mean.iter()).map(|(x, m)| x - m).collect())
        .collect();
    let total_variance = centered.iter().map(|c| norm_squared(c)).sum::<f64>() / n as f64;

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut residual = centered.clone();
    let mut axes: Vec<Vec<f64>> = Vec::with_capacity(components);
    let mut explained_variance = Vec::with_capacity(components);

    for _ in 0..components {
        let axis = dominant_direction(&residual, dimension, &mut rng);

        // Eigenvalue estimate: mean squared projection of the deflated data.
        let eigenvalue = residual
            .iter()
            .map(|r| dot(r, &axis).powi(2))
            .sum::<f64>()
            / n as f64;
        explained_variance.push(if total_variance > VARIANCE_EPSILON {
            eigenvalue / total_variance
        } else {
            0.0
        });

        // Deflate: remove this axis's contribution before the next extraction.
        for row in residual.iter_mut() {
            let projection = dot(row, &axis);
            for (r, a) in row.iter_mut().zip(axis.iter()) {
                *r -= projection * a;
            }
        }

        axes.push(axis);
    }

    // Final coordinates come from the centered (not deflated) data.
    let coords = axes
        .iter()
        .map(|axis| centered.iter().map(|c| dot(c, axis)).collect())
        .collect();

    Ok(Projection {
        coords,
        explained_variance,
        axes,
    })
}

/// Power iteration: converge toward the dominant eigenvector of the
/// implicit covariance of `rows`.
fn dominant_direction(rows: &[Vec<f64>], dimension: usize, rng: &mut impl Rng) -> Vec<f64> {
    let mut v: Vec<f64> = (0..dimension).map(|_| rng.gen_range(-1.0..1.0)).collect();
    vector::normalize(&mut v);

    for _ in 0..POWER_ITERATIONS {
        // w = Xᵗ(Xv), accumulated row by row.
        let mut w = vec![0.0; dimension];
        for row in rows {
            let projection = dot(row, &v);
            for (wi, ri) in w.iter_mut().zip(row.iter()) {
                *wi += projection * ri;
            }
        }
        vector::normalize(&mut w);
        v = w;
    }

    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::{generate_dataset, ClassSpec};

    fn demo_embeddings() -> Vec<Vec<f64>> {
        generate_dataset(&ClassSpec::demo_set(), 64, 42)
            .unwrap()
            .into_iter()
            .map(|p| p.embedding)
            .collect()
    }

    #[test]
    fn projection_arrays_have_input_length() {
        let embeddings = demo_embeddings();
        let projection = project_pca(&embeddings, 2).unwrap();
        assert_eq!(projection.x().len(), embeddings.len());
        assert_eq!(projection.y().len(), embeddings.len());
        assert_eq!(projection.explained_variance.len(), 2);
    }

    #[test]
    fn explained_variance_is_ordered_and_bounded() {
        let embeddings = demo_embeddings();
        let projection = project_pca(&embeddings, 2).unwrap();
        let e = &projection.explained_variance;
        assert!(e[0] >= e[1], "explained = {e:?}");
        assert!(e[0] > 0.0);
        assert!(e.iter().sum::<f64>() <= 1.0 + 1e-9);
    }

    #[test]
    fn components_are_approximately_orthogonal() {
        let embeddings = demo_embeddings();
        let projection = project_pca(&embeddings, 3).unwrap();
        for i in 0..3 {
            for j in (i + 1)..3 {
                let d = dot(&projection.axes[i], &projection.axes[j]).abs();
                assert!(d < 1e-4, "axes {i},{j} dot = {d}");
            }
        }
    }

    #[test]
    fn recovers_dominant_axis_of_elongated_cloud() {
        // Points spread along the first coordinate, tiny spread on the second.
        let embeddings: Vec<Vec<f64>> = (0..20)
            .map(|i| vec![i as f64, (i % 2) as f64 * 0.01, 0.0])
            .collect();
        let projection = project_pca(&embeddings, 2).unwrap();
        assert!(projection.axes[0][0].abs() > 0.999);
        assert!(projection.explained_variance[0] > 0.99);
    }

    #[test]
    fn identical_points_report_zero_explained_variance() {
        let embeddings = vec![vec![0.5; 8]; 10];
        let projection = project_pca(&embeddings, 2).unwrap();
        assert_eq!(projection.explained_variance, vec![0.0, 0.0]);
        assert!(projection.x().iter().all(|c| c.is_finite()));
    }

    #[test]
    fn repeated_calls_are_identical() {
        let embeddings = demo_embeddings();
        let a = project_pca(&embeddings, 2).unwrap();
        let b = project_pca(&embeddings, 2).unwrap();
        assert_eq!(a.coords, b.coords);
        assert_eq!(a.explained_variance, b.explained_variance);
    }

    #[test]
    fn rejects_zero_components() {
        let embeddings = demo_embeddings();
        assert!(project_pca(&embeddings, 0).is_err());
    }

    #[test]
    fn rejects_more_components_than_points() {
        let embeddings = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        assert!(project_pca(&embeddings, 3).is_err());
    }
}
