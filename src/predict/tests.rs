//! Tests for whole-matrix prediction

use super::*;
use crate::diagnostics::{Diagnostic, NullSink, RecordingSink};
use crate::model::{FeatureSubset, LinearSvm, Pca};
use crate::testing::{FailingClassifier, FixedClassifier, RecordingClassifier, ShiftReconstruction};
use crate::tree::Node;
use ndarray::{array, Array2};

/// Two-axis tree: "x" accepts positive first feature, "y" positive second.
fn xy_tree() -> ClassificationTree {
    let root = Node::new("root")
        .with_child(Node::new("x").with_classifier(LinearSvm::new(array![1.0, 0.0], 0.0).unwrap()))
        .with_child(Node::new("y").with_classifier(LinearSvm::new(array![0.0, 1.0], 0.0).unwrap()));
    ClassificationTree::new(root)
}

/// Keeps the first axis of the plane; the second coordinate is residual.
fn first_axis_pca() -> Pca {
    Pca::new(array![0.0, 0.0], array![[1.0, 0.0]]).unwrap()
}

#[test]
fn test_labels_follow_row_order() {
    let tree = xy_tree();
    let x = array![[1.0, -1.0], [-1.0, 2.0], [-1.0, -1.0], [3.0, 1.0], [0.5, 4.0]];
    let labels = predict_labels(x.view(), &tree).unwrap();
    assert_eq!(labels, vec!["x", "y", "root", "x", "y"]);
}

#[test]
fn test_empty_input_gives_empty_output() {
    let tree = xy_tree();
    let labels = predict_labels(Array2::<f64>::zeros((0, 2)).view(), &tree).unwrap();
    assert!(labels.is_empty());
}

#[test]
fn test_all_children_refusing_labels_root() {
    let root = Node::new("root")
        .with_child(Node::new("a").with_classifier(FixedClassifier::refuse()))
        .with_child(Node::new("b").with_classifier(FixedClassifier::refuse()));
    let tree = ClassificationTree::new(root);
    let labels = predict_labels(array![[1.0], [2.0]].view(), &tree).unwrap();
    assert_eq!(labels, vec!["root", "root"]);
}

#[test]
fn test_rejected_row_skips_descent() {
    let recorder = RecordingClassifier::new(FixedClassifier::accept(1.0));
    let root = Node::new("root").with_child(Node::new("cell").with_classifier(recorder.clone()));
    let tree = ClassificationTree::new(root)
        .with_global_projection(first_axis_pca())
        .with_reconstruction_threshold(0.01);

    // Row 0 reconstructs with residual 0.5, row 1 exactly
    let x = array![[1.0, 0.5], [2.0, 0.0]];
    let mut sink = RecordingSink::new();
    let labels = Predictor::new(&tree).unwrap().predict_labels_with_sink(x.view(), &mut sink).unwrap();

    assert_eq!(labels, vec!["root", "cell"]);
    assert_eq!(recorder.rows(), vec![vec![2.0, 0.0]]);
    assert_eq!(
        sink.events(),
        &[Diagnostic::RowsRejected { rejected: 1, total: 2, threshold: 0.01 }]
    );
}

#[test]
fn test_disabled_rejection_never_labels_root_by_rejection() {
    let recorder = RecordingClassifier::new(FixedClassifier::accept(1.0));
    let projection = ShiftReconstruction::new(50.0);
    let root = Node::new("root").with_child(Node::new("cell").with_classifier(recorder.clone()));
    let tree = ClassificationTree::new(root).with_global_projection(projection.clone());

    let x = array![[1.0, 2.0], [3.0, 4.0]];
    let mut sink = RecordingSink::new();
    let labels = Predictor::new(&tree).unwrap().predict_labels_with_sink(x.view(), &mut sink).unwrap();

    assert_eq!(labels, vec!["cell", "cell"]);
    assert_eq!(recorder.calls(), 2);
    assert_eq!(projection.calls(), 0);
    assert!(sink.events().is_empty());
}

#[test]
fn test_rejection_runs_on_raw_rows_under_dimred() {
    // Gate sees the 2-d rows; descent sees the 1-d projection
    let recorder = RecordingClassifier::new(FixedClassifier::accept(1.0));
    let root = Node::new("root").with_child(
        Node::new("cell")
            .with_classifier(recorder.clone())
            .with_projection(FeatureSubset::new(vec![0]).unwrap()),
    );
    let tree = ClassificationTree::new(root)
        .with_global_projection(first_axis_pca())
        .with_dimred(true)
        .with_reconstruction_threshold(0.25);

    let x = array![[1.0, 0.5], [4.0, 0.1]];
    let labels = Predictor::new(&tree).unwrap().predict_labels_with_sink(x.view(), &mut NullSink).unwrap();
    assert_eq!(labels, vec!["root", "cell"]);
    assert_eq!(recorder.rows(), vec![vec![4.0]]);
}

#[test]
fn test_dimred_changes_what_classifiers_see() {
    let build = |dimred: bool| {
        let recorder = RecordingClassifier::new(FixedClassifier::accept(1.0));
        let root = Node::new("root").with_child(
            Node::new("cell")
                .with_classifier(recorder.clone())
                .with_projection(FeatureSubset::new(vec![1]).unwrap()),
        );
        let pca = Pca::new(array![0.0, 0.0, 0.0], array![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]).unwrap();
        let tree = ClassificationTree::new(root).with_global_projection(pca).with_dimred(dimred);
        (tree, recorder)
    };

    let x = array![[3.0, 4.0, 5.0]];

    let (tree, recorder) = build(true);
    predict_labels(x.view(), &tree).unwrap();
    assert_eq!(recorder.rows(), vec![vec![4.0]]);

    let (tree, recorder) = build(false);
    predict_labels(x.view(), &tree).unwrap();
    assert_eq!(recorder.rows(), vec![vec![3.0, 4.0, 5.0]]);
}

#[test]
fn test_malformed_tree_fails_before_labeling() {
    let recorder = RecordingClassifier::new(FixedClassifier::accept(1.0));
    let root = Node::new("root")
        .with_child(Node::new("ok").with_classifier(recorder.clone()))
        .with_child(Node::new("no model"));
    let tree = ClassificationTree::new(root);

    let err = predict_labels(array![[1.0]].view(), &tree).unwrap_err();
    assert!(matches!(err, Error::MalformedTree { ref node, .. } if node == "no model"));
    assert_eq!(recorder.calls(), 0);
}

#[test]
fn test_model_failure_aborts_call() {
    let root = Node::new("root").with_child(Node::new("broken").with_classifier(FailingClassifier));
    let tree = ClassificationTree::new(root);
    let err = predict_labels(array![[1.0], [2.0]].view(), &tree).unwrap_err();
    assert_eq!(err.node(), Some("broken"));
}

#[test]
fn test_row_width_mismatch_is_fatal() {
    let tree = xy_tree();
    let err = predict_labels(array![[1.0, 2.0, 3.0]].view(), &tree).unwrap_err();
    assert!(matches!(err.root_cause(), Error::ShapeMismatch { .. }));
}

// =============================================================================
// Config
// =============================================================================

#[test]
fn test_config_disables_tree_rejection() {
    let tree = xy_tree().with_global_projection(first_axis_pca()).with_reconstruction_threshold(0.01);
    let x = array![[1.0, 0.5]];

    let labels = predict_labels(x.view(), &tree).unwrap();
    assert_eq!(labels, vec!["root"]);

    let predictor = Predictor::new(&tree).unwrap().with_config(PredictConfig::without_rejection()).unwrap();
    assert_eq!(predictor.rejection_threshold(), 0.0);
    assert_eq!(predictor.predict_labels(x.view()).unwrap(), vec!["x"]);
}

#[test]
fn test_config_overrides_threshold() {
    let tree = xy_tree().with_global_projection(first_axis_pca()).with_reconstruction_threshold(0.01);
    let predictor = Predictor::new(&tree).unwrap().with_config(PredictConfig::with_threshold(1.0)).unwrap();
    assert_eq!(predictor.rejection_threshold(), 1.0);

    let labels = predictor.predict_labels(array![[1.0, 0.5], [1.0, 2.0]].view()).unwrap();
    assert_eq!(labels, vec!["x", "root"]);
}

#[test]
fn test_config_override_needs_global_projection() {
    let tree = xy_tree();
    let err = Predictor::new(&tree).unwrap().with_config(PredictConfig::with_threshold(1.0)).unwrap_err();
    assert!(matches!(err, Error::ConfigError(_)));

    // A zero override keeps the gate off and needs nothing
    assert!(Predictor::new(&tree).unwrap().with_config(PredictConfig::with_threshold(0.0)).is_ok());
}

#[test]
fn test_config_yaml_parsing() {
    let config = PredictConfig::from_yaml_str("rejection: override\nthreshold: 0.75\nrecord_paths: true\n").unwrap();
    assert_eq!(config.rejection, RejectionMode::Override);
    assert_eq!(config.threshold, Some(0.75));
    assert!(config.record_paths);

    let config = PredictConfig::from_yaml_str("{}").unwrap();
    assert_eq!(config, PredictConfig::default());
    assert_eq!(config.effective_threshold(0.3), 0.3);
}

#[test]
fn test_config_yaml_validation() {
    for bad in [
        "rejection: override\n",
        "rejection: override\nthreshold: -1.0\n",
        "rejection: disabled\nthreshold: 0.5\n",
        "rejection: sometimes\n",
    ] {
        assert!(
            matches!(PredictConfig::from_yaml_str(bad), Err(Error::ConfigError(_))),
            "expected config error for {bad:?}"
        );
    }
}

// =============================================================================
// Explained predictions
// =============================================================================

#[test]
fn test_predict_explained_reports_rejection_and_paths() {
    let tree = xy_tree().with_global_projection(first_axis_pca()).with_reconstruction_threshold(1.0);
    let predictor = Predictor::new(&tree)
        .unwrap()
        .with_config(PredictConfig::default().record_paths(true))
        .unwrap();

    let x = array![[2.0, 0.5], [-1.0, 3.0], [-1.0, -0.5]];
    let predictions = predictor.predict_explained(x.view(), &mut NullSink).unwrap();

    assert_eq!(predictions.len(), 3);
    assert_eq!(predictions[0].label, "x");
    assert!(!predictions[0].rejected);
    assert_eq!(predictions[0].path.as_ref().map(DescentPath::depth), Some(1));

    assert_eq!(predictions[1].label, "root");
    assert!(predictions[1].rejected);
    assert!(predictions[1].path.is_none());

    assert_eq!(predictions[2].label, "root");
    assert!(!predictions[2].rejected);
    assert!(predictions[2].path.as_ref().is_some_and(DescentPath::stopped_at_root));
}

#[test]
fn test_predict_explained_matches_labels() {
    let tree = xy_tree();
    let predictor = Predictor::new(&tree).unwrap();
    let x = array![[1.0, -1.0], [-1.0, 2.0], [-1.0, -1.0]];

    let labels = predictor.predict_labels(x.view()).unwrap();
    let explained = predictor.predict_explained(x.view(), &mut NullSink).unwrap();
    let explained_labels: Vec<String> = explained.into_iter().map(|p| p.label).collect();
    assert_eq!(labels, explained_labels);
}

#[test]
fn test_predict_explained_omits_paths_by_default() {
    let tree = xy_tree();
    let predictions = Predictor::new(&tree).unwrap().predict_explained(array![[1.0, 0.0]].view(), &mut NullSink).unwrap();
    assert!(predictions[0].path.is_none());
}
