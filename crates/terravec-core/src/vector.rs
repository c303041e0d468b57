//! Vector primitives for embedding math.
//!
//! Embeddings are plain `f64` slices. All functions here are pure and
//! allocation-free except where a new vector is the result. Mismatched
//! lengths are a caller contract violation and panic rather than silently
//! truncate: `dot` slices its second argument to the first's length in
//! every build profile, and the remaining checks are debug assertions.

/// Epsilon added to norm denominators so all-zero vectors divide cleanly
/// instead of producing NaN.
pub const NORM_EPSILON: f64 = 1e-10;

/// Dot product of two equal-length vectors.
///
/// Panics if `b` is shorter than `a`; equal lengths are additionally
/// checked in debug builds.
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    let b = &b[..a.len()];
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Squared Euclidean norm.
pub fn norm_squared(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum()
}

/// Euclidean norm.
pub fn norm(v: &[f64]) -> f64 {
    norm_squared(v).sqrt()
}

/// Cosine similarity in [-1, 1].
///
/// The epsilon in the denominator makes the degenerate all-zero case
/// return 0 rather than NaN.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    dot(a, b) / (norm(a) * norm(b) + NORM_EPSILON)
}

/// Cosine distance: `1 - cosine_similarity`.
///
/// Ranges over [0, 2]; 0 means identical direction.
pub fn cosine_distance(a: &[f64], b: &[f64]) -> f64 {
    1.0 - cosine_similarity(a, b)
}

/// Arithmetic mean of a non-empty set of equal-length vectors.
pub fn mean(vectors: &[Vec<f64>]) -> Vec<f64> {
    debug_assert!(!vectors.is_empty());
    let dimension = vectors[0].len();
    let mut out = vec![0.0; dimension];
    for v in vectors {
        debug_assert_eq!(v.len(), dimension);
        for (acc, x) in out.iter_mut().zip(v.iter()) {
            *acc += x;
        }
    }
    let scale = 1.0 / vectors.len() as f64;
    for acc in &mut out {
        *acc *= scale;
    }
    out
}

/// Project a vector onto the unit hypersphere in place.
pub fn normalize(v: &mut [f64]) {
    let n = norm(v) + NORM_EPSILON;
    for x in v.iter_mut() {
        *x /= n;
    }
}

/// Project a vector onto the unit hypersphere, returning a new vector.
pub fn normalized(v: &[f64]) -> Vec<f64> {
    let n = norm(v) + NORM_EPSILON;
    v.iter().map(|x| x / n).collect()
}
