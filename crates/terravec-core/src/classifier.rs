//! Nearest-centroid classification.
//!
//! Training computes one mean direction per class and normalizes it onto
//! the unit sphere; prediction picks the class whose centroid is most
//! cosine-similar to the input. Ties go to the first class in the model's
//! enumeration order (first-encountered order in the training labels) —
//! a documented policy, not an accident.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{check_dimensions, Result, TerravecError};
use crate::vector::{self, cosine_similarity};

/// Per-class mean-direction centroids.
///
/// Immutable once trained; retraining builds a fresh model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierModel {
    /// Class labels in first-encountered training order.
    pub class_labels: Vec<String>,
    /// Unit-norm class centroids, parallel to `class_labels`.
    pub centroids: Vec<Vec<f64>>,
}

/// Train/test evaluation summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    /// Fraction of test points predicted correctly.
    pub accuracy: f64,
    /// `confusion[i][j]` counts true class `i` predicted as class `j`,
    /// indexed by `class_labels`.
    pub confusion: Vec<Vec<usize>>,
    /// Class ordering of the confusion matrix: first-encountered order
    /// over the full label array.
    pub class_labels: Vec<String>,
    pub train_size: usize,
    pub test_size: usize,
}

/// Train a nearest-centroid model from labeled embeddings.
pub fn train_classifier<S: AsRef<str>>(
    embeddings: &[Vec<f64>],
    labels: &[S],
) -> Result<ClassifierModel> {
    let dimension = check_dimensions(embeddings)?;
    if labels.len() != embeddings.len() {
        return Err(TerravecError::DimensionMismatch {
            expected: embeddings.len(),
            got: labels.len(),
        });
    }

    let (class_labels, class_index) = enumerate_classes(labels);
    let mut sums = vec![vec![0.0; dimension]; class_labels.len()];
    let mut counts = vec![0usize; class_labels.len()];
    for (embedding, label) in embeddings.iter().zip(labels.iter()) {
        let class = class_index[label.as_ref()];
        counts[class] += 1;
        for (acc, x) in sums[class].iter_mut().zip(embedding.iter()) {
            *acc += x;
        }
    }

    let centroids = sums
        .into_iter()
        .zip(&counts)
        .map(|(mut sum, &count)| {
            for x in sum.iter_mut() {
                *x /= count as f64;
            }
            vector::normalize(&mut sum);
            sum
        })
        .collect();

    Ok(ClassifierModel {
        class_labels,
        centroids,
    })
}

impl ClassifierModel {
    /// Predict the class of an embedding by maximum cosine similarity.
    ///
    /// Ties are broken by the first class in `class_labels` order.
    pub fn predict(&self, embedding: &[f64]) -> Result<&str> {
        let dimension = self.centroids[0].len();
        if embedding.len() != dimension {
            return Err(TerravecError::DimensionMismatch {
                expected: dimension,
                got: embedding.len(),
            });
        }

        let mut best = 0;
        let mut best_similarity = f64::NEG_INFINITY;
        for (i, centroid) in self.centroids.iter().enumerate() {
            let similarity = cosine_similarity(embedding, centroid);
            if similarity > best_similarity {
                best_similarity = similarity;
                best = i;
            }
        }
        Ok(&self.class_labels[best])
    }
}

/// Train/test split evaluation with a seeded shuffle.
///
/// Indices are shuffled deterministically, split at
/// `floor(N * train_ratio)` (clamped so both partitions are non-empty),
/// and the confusion matrix is accumulated over the test partition in the
/// fixed class ordering of the full label array.
pub fn evaluate_classifier<S: AsRef<str>>(
    embeddings: &[Vec<f64>],
    labels: &[S],
    train_ratio: f64,
    seed: u64,
) -> Result<Evaluation> {
    check_dimensions(embeddings)?;
    if labels.len() != embeddings.len() {
        return Err(TerravecError::DimensionMismatch {
            expected: embeddings.len(),
            got: labels.len(),
        });
    }
    if !(train_ratio > 0.0 && train_ratio < 1.0) {
        return Err(TerravecError::invalid_parameter(
            "train_ratio",
            format!("must be strictly between 0 and 1, got {train_ratio}"),
        ));
    }
    let n = embeddings.len();
    if n < 2 {
        return Err(TerravecError::invalid_parameter(
            "embeddings",
            "need at least 2 points to split into train and test".to_string(),
        ));
    }

    let (class_labels, class_index) = enumerate_classes(labels);

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    indices.shuffle(&mut rng);
    let split = ((n as f64 * train_ratio) as usize).clamp(1, n - 1);
    let (train_indices, test_indices) = indices.split_at(split);

    let train_embeddings: Vec<Vec<f64>> = train_indices
        .iter()
        .map(|&i| embeddings[i].clone())
        .collect();
    let train_labels: Vec<&str> = train_indices.iter().map(|&i| labels[i].as_ref()).collect();
    let model = train_classifier(&train_embeddings, &train_labels)?;

    let mut confusion = vec![vec![0usize; class_labels.len()]; class_labels.len()];
    let mut correct = 0;
    for &i in test_indices {
        let truth = labels[i].as_ref();
        let predicted = model.predict(&embeddings[i])?;
        if predicted == truth {
            correct += 1;
        }
        confusion[class_index[truth]][class_index[predicted]] += 1;
    }

    Ok(Evaluation {
        accuracy: correct as f64 / test_indices.len() as f64,
        confusion,
        class_labels,
        train_size: train_indices.len(),
        test_size: test_indices.len(),
    })
}

/// Fixed class enumeration: labels in first-encountered order plus a
/// label-to-index map.
fn enumerate_classes<S: AsRef<str>>(labels: &[S]) -> (Vec<String>, HashMap<&str, usize>) {
    let mut class_labels = Vec::new();
    let mut class_index = HashMap::new();
    for label in labels {
        let label = label.as_ref();
        if !class_index.contains_key(label) {
            class_index.insert(label, class_labels.len());
            class_labels.push(label.to_string());
        }
    }
    (class_labels, class_index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::{generate_dataset, ClassSpec};
    use crate::vector::norm;

    fn demo_points() -> (Vec<Vec<f64>>, Vec<String>) {
        let points = generate_dataset(&ClassSpec::demo_set(), 64, 42).unwrap();
        let labels = points.iter().map(|p| p.label.clone()).collect();
        (points.into_iter().map(|p| p.embedding).collect(), labels)
    }

    #[test]
    fn centroids_are_unit_norm_in_training_order() {
        let (embeddings, labels) = demo_points();
        let model = train_classifier(&embeddings, &labels).unwrap();
        assert_eq!(
            model.class_labels,
            vec!["forest", "water", "urban", "agriculture", "desert", "wetland"]
        );
        for centroid in &model.centroids {
            assert!((norm(centroid) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn predicting_a_class_centroid_returns_that_class() {
        let (embeddings, labels) = demo_points();
        let model = train_classifier(&embeddings, &labels).unwrap();
        for (label, centroid) in model.class_labels.iter().zip(model.centroids.iter()) {
            assert_eq!(model.predict(centroid).unwrap(), label);
        }
    }

    #[test]
    fn ties_break_toward_first_enumerated_class() {
        let embedding = vec![1.0, 0.0, 0.0];
        let embeddings = vec![embedding.clone(), embedding.clone()];
        let labels = vec!["first", "second"];
        let model = train_classifier(&embeddings, &labels).unwrap();
        // Identical centroids: similarity ties exactly.
        assert_eq!(model.predict(&embedding).unwrap(), "first");
    }

    #[test]
    fn evaluation_is_reproducible_for_a_seed() {
        let (embeddings, labels) = demo_points();
        let a = evaluate_classifier(&embeddings, &labels, 0.3, 99).unwrap();
        let b = evaluate_classifier(&embeddings, &labels, 0.3, 99).unwrap();
        assert_eq!(a.accuracy, b.accuracy);
        assert_eq!(a.confusion, b.confusion);
    }

    #[test]
    fn confusion_matrix_sums_to_test_size() {
        let (embeddings, labels) = demo_points();
        let evaluation = evaluate_classifier(&embeddings, &labels, 0.3, 99).unwrap();
        assert_eq!(evaluation.confusion.len(), 6);
        assert!(evaluation.confusion.iter().all(|row| row.len() == 6));
        let total: usize = evaluation.confusion.iter().flatten().sum();
        assert_eq!(total, evaluation.test_size);
        assert_eq!(evaluation.train_size + evaluation.test_size, embeddings.len());
    }

    #[test]
    fn accuracy_matches_confusion_diagonal() {
        let (embeddings, labels) = demo_points();
        let evaluation = evaluate_classifier(&embeddings, &labels, 0.3, 99).unwrap();
        let diagonal: usize = (0..6).map(|i| evaluation.confusion[i][i]).sum();
        let expected = diagonal as f64 / evaluation.test_size as f64;
        assert!((evaluation.accuracy - expected).abs() < 1e-12);
    }

    #[test]
    fn separable_demo_classes_evaluate_accurately() {
        let (embeddings, labels) = demo_points();
        let evaluation = evaluate_classifier(&embeddings, &labels, 0.3, 99).unwrap();
        assert!(
            evaluation.accuracy >= 0.7,
            "accuracy = {}",
            evaluation.accuracy
        );
    }

    #[test]
    fn rejects_train_ratio_outside_open_interval() {
        let (embeddings, labels) = demo_points();
        assert!(evaluate_classifier(&embeddings, &labels, 0.0, 0).is_err());
        assert!(evaluate_classifier(&embeddings, &labels, 1.0, 0).is_err());
        assert!(evaluate_classifier(&embeddings, &labels, -0.5, 0).is_err());
    }

    #[test]
    fn rejects_mismatched_label_count() {
        let embeddings = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let labels = vec!["only one"];
        assert!(train_classifier(&embeddings, &labels).is_err());
    }
}
