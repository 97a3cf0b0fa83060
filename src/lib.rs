//! Hierarchical classification inference
//!
//! Assigns each row of a feature matrix (cells × genes, or anything else) a
//! single label by greedily descending a trained tree of per-node binary
//! classifiers.
//!
//! # Architecture
//!
//! - **Rejection gate** ([`reject`]): rows the global projection reconstructs
//!   poorly are labeled with the root name and skip descent
//! - **Reduction pre-pass** ([`predict`]): optionally projects the whole
//!   matrix once before descent
//! - **Descent** ([`descent`]): per row, repeatedly moves to the most
//!   confident accepting child; the label is the deepest node reached
//! - **Models** ([`model`]): `Classifier`, `Projection` and `Reconstruction`
//!   capabilities plus fitted SVM and PCA variants
//!
//! Training, fitting and persistence of the tree belong to other crates: the
//! engine only reads already-fitted models.
//!
//! # Example
//!
//! ```
//! use clasificar::model::{LinearSvm, Pca};
//! use clasificar::tree::{ClassificationTree, Node};
//! use ndarray::array;
//!
//! let root = Node::new("cells")
//!     .with_child(Node::new("T cells").with_classifier(LinearSvm::new(array![1.0, 0.0], 0.0)?))
//!     .with_child(Node::new("B cells").with_classifier(LinearSvm::new(array![-1.0, 0.0], 0.0)?));
//! let tree = ClassificationTree::new(root)
//!     .with_global_projection(Pca::new(array![0.0, 0.0], array![[1.0, 0.0]])?)
//!     .with_reconstruction_threshold(1.0);
//!
//! let x = array![[2.0, 0.1], [-3.0, 0.2], [1.0, 5.0]];
//! let labels = clasificar::predict_labels(x.view(), &tree)?;
//! assert_eq!(labels, vec!["T cells", "B cells", "cells"]);
//! # Ok::<(), clasificar::Error>(())
//! ```

pub mod descent;
pub mod diagnostics;
pub mod error;
pub mod model;
pub mod predict;
pub mod reject;
pub mod tree;

#[cfg(test)]
pub(crate) mod testing;

pub use descent::{DescentPath, DescentStep};
pub use diagnostics::{Diagnostic, DiagnosticsSink, LoggingSink, NullSink, RecordingSink};
pub use error::{Error, Result};
pub use model::{Classifier, Projection, Reconstruction};
pub use predict::{predict_labels, PredictConfig, Prediction, Predictor, RejectionMode};
pub use reject::RejectionReport;
pub use tree::{ClassificationTree, Node};
