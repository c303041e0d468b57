//! End-to-end scenarios mirroring the dashboard demos: generate the
//! standard dataset, then lay it out, cluster it, and evaluate the
//! classifier on it.

use terravec_core::{
    cluster_kmeans, evaluate_classifier, generate_dataset, norm, project_pca, purity,
    top_k_similar, ClassSpec,
};

fn standard_dataset() -> (Vec<Vec<f64>>, Vec<String>) {
    let points = generate_dataset(&ClassSpec::demo_set(), 64, 42).unwrap();
    assert_eq!(points.len(), 240);
    let labels = points.iter().map(|p| p.label.clone()).collect();
    (points.into_iter().map(|p| p.embedding).collect(), labels)
}

#[test]
fn standard_dataset_lies_on_the_unit_sphere() {
    let (embeddings, _) = standard_dataset();
    for embedding in &embeddings {
        assert!((norm(embedding) - 1.0).abs() < 1e-6);
    }
}

#[test]
fn pca_layout_of_standard_dataset() {
    let (embeddings, _) = standard_dataset();
    let projection = project_pca(&embeddings, 2).unwrap();

    assert_eq!(projection.x().len(), 240);
    assert_eq!(projection.y().len(), 240);

    let explained = &projection.explained_variance;
    assert!(explained[0] >= explained[1]);
    assert!(explained.iter().sum::<f64>() <= 1.0 + 1e-9);
    // Six well-separated classes leave plenty of variance in two axes.
    assert!(explained[0] > 0.1, "explained = {explained:?}");
}

#[test]
fn kmeans_recovers_standard_classes() {
    let (embeddings, labels) = standard_dataset();
    let assignment = cluster_kmeans(&embeddings, 6, 30, 7).unwrap();
    let score = purity(&assignment.labels, &labels);
    assert!(score >= 0.7, "purity = {score}");
}

#[test]
fn classifier_evaluation_is_seed_stable() {
    let (embeddings, labels) = standard_dataset();
    let first = evaluate_classifier(&embeddings, &labels, 0.3, 99).unwrap();
    let second = evaluate_classifier(&embeddings, &labels, 0.3, 99).unwrap();

    assert_eq!(first.accuracy, second.accuracy);
    assert_eq!(first.confusion, second.confusion);
    assert_eq!(first.confusion.len(), 6);

    let total: usize = first.confusion.iter().flatten().sum();
    assert_eq!(total, first.test_size);
    assert_eq!(first.train_size, 72); // floor(240 * 0.3)
    assert_eq!(first.test_size, 168);
}

#[test]
fn similarity_search_prefers_same_class_points() {
    let points = generate_dataset(&ClassSpec::demo_set(), 64, 42).unwrap();
    let embeddings: Vec<Vec<f64>> = points.iter().map(|p| p.embedding.clone()).collect();

    // Query with a forest point; its own entry scores ~1 and the rest of
    // the top five should be dominated by forest neighbors.
    let results = top_k_similar(&points[0].embedding, &embeddings, 5).unwrap();
    assert_eq!(results[0].0, 0);
    let forest_hits = results
        .iter()
        .filter(|(i, _)| points[*i].label == "forest")
        .count();
    assert!(forest_hits >= 4, "forest hits = {forest_hits}");
}

#[test]
fn public_results_serialize_to_json() {
    let (embeddings, labels) = standard_dataset();
    let assignment = cluster_kmeans(&embeddings, 6, 30, 7).unwrap();
    let evaluation = evaluate_classifier(&embeddings, &labels, 0.3, 99).unwrap();

    let json = serde_json::to_string(&assignment).unwrap();
    let back: terravec_core::ClusterAssignment = serde_json::from_str(&json).unwrap();
    assert_eq!(back.labels, assignment.labels);

    let json = serde_json::to_string(&evaluation).unwrap();
    assert!(json.contains("\"accuracy\""));
}
