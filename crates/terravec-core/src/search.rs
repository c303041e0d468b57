//! Brute-force cosine-similarity search.
//!
//! The datasets here are tens to low hundreds of points, so an exhaustive
//! scan is well inside the interactive budget; no index structure is
//! warranted.

use crate::error::{check_dimensions, Result, TerravecError};
use crate::vector::cosine_similarity;

/// Find the `k` embeddings most cosine-similar to `query`.
///
/// Returns up to `k` `(index, score)` pairs sorted by descending score.
pub fn top_k_similar(
    query: &[f64],
    embeddings: &[Vec<f64>],
    k: usize,
) -> Result<Vec<(usize, f64)>> {
    let dimension = check_dimensions(embeddings)?;
    if query.len() != dimension {
        return Err(TerravecError::DimensionMismatch {
            expected: dimension,
            got: query.len(),
        });
    }
    if k == 0 {
        return Err(TerravecError::invalid_parameter(
            "k",
            "must be positive".to_string(),
        ));
    }

    let mut scores: Vec<(usize, f64)> = embeddings
        .iter()
        .enumerate()
        .map(|(i, e)| (i, cosine_similarity(query, e)))
        .collect();
    scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scores.truncate(k);
    Ok(scores)
}
