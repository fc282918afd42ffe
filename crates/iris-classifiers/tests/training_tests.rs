//! Training job tests

use iris_classifiers::artifacts::{DECISION_TREE_FILE, LOGISTIC_FILE, SCALER_FILE, SPECIES_FILE};
use iris_classifiers::{training, ModelRegistry};

#[test]
fn test_run_writes_all_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("models");

    let report = training::run(&output).unwrap();

    for file in [SCALER_FILE, LOGISTIC_FILE, DECISION_TREE_FILE, SPECIES_FILE] {
        let path = output.join(file);
        assert!(path.is_file(), "missing {}", path.display());
        assert!(report.written.contains(&path));
    }
    assert_eq!(report.written.len(), 4);
}

#[test]
fn test_reported_accuracy() {
    let report = training::train().unwrap().report;

    assert_eq!(report.train_samples + report.test_samples, 150);
    assert!(report.logistic_accuracy > 0.8, "logistic {}", report.logistic_accuracy);
    assert!(report.decision_tree_accuracy > 0.8, "tree {}", report.decision_tree_accuracy);
}

#[test]
fn test_training_is_reproducible() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();

    let a = training::run(first.path()).unwrap();
    let b = training::run(second.path()).unwrap();
    assert_eq!(a.train_samples, b.train_samples);
    assert_eq!(a.logistic_accuracy, b.logistic_accuracy);
    assert_eq!(a.decision_tree_accuracy, b.decision_tree_accuracy);

    // Tree internals may break majority ties differently, so the tree is
    // compared by its predictions instead of its bytes.
    for file in [SCALER_FILE, LOGISTIC_FILE, SPECIES_FILE] {
        let left = std::fs::read_to_string(first.path().join(file)).unwrap();
        let right = std::fs::read_to_string(second.path().join(file)).unwrap();
        assert_eq!(left, right, "{file} differs between runs");
    }

    let left = ModelRegistry::load(first.path());
    let right = ModelRegistry::load(second.path());
    for features in sample_grid() {
        for model in ["logistic", "decision_tree"] {
            let x = left.predict(&features, model).unwrap();
            let y = right.predict(&features, model).unwrap();
            assert_eq!(x, y, "{model} disagrees on {features:?}");
        }
    }
}

/// Points spread over and beyond the range of every iris measurement
fn sample_grid() -> Vec<[f64; 4]> {
    let steps = |lo: f64, hi: f64| (0..6).map(move |i| lo + (hi - lo) * i as f64 / 5.0);

    let mut grid = Vec::new();
    for sepal_length in steps(4.0, 8.0) {
        for sepal_width in steps(2.0, 4.5) {
            for petal_length in steps(1.0, 7.0) {
                for petal_width in steps(0.1, 2.5) {
                    grid.push([sepal_length, sepal_width, petal_length, petal_width]);
                }
            }
        }
    }
    grid
}

#[test]
fn test_in_memory_registry_matches_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let artifacts = training::train().unwrap();
    artifacts.save(dir.path()).unwrap();

    let loaded = ModelRegistry::load(dir.path());
    let in_memory = artifacts.into_registry();

    for model in ["logistic", "decision_tree"] {
        let a = in_memory.predict(&[6.3, 2.5, 5.0, 1.9], model).unwrap();
        let b = loaded.predict(&[6.3, 2.5, 5.0, 1.9], model).unwrap();
        assert_eq!(a.prediction, b.prediction);
        assert_eq!(a.predicted_species, b.predicted_species);
        for (x, y) in a.probabilities.iter().zip(&b.probabilities) {
            assert!((x - y).abs() < 1e-12);
        }
    }
}
