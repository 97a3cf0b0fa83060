//! Label prediction over a whole input matrix
//!
//! Per call:
//!
//! 1. The rejection gate runs on the raw matrix (when enabled).
//! 2. Under dimensionality reduction, the whole matrix is projected once
//!    through the global projection.
//! 3. Each row is labeled independently, in input order: rejected rows get
//!    the root name, the rest go through greedy descent.
//!
//! Rows never observe one another, so callers may split a matrix and
//! predict the parts on separate threads; the tree is only ever read.

mod config;

#[cfg(test)]
mod tests;

pub use config::{PredictConfig, RejectionMode};

use crate::descent::{descend, descend_explained, DescentPath};
use crate::diagnostics::{DiagnosticsSink, LoggingSink};
use crate::reject::{self, RejectionReport};
use crate::tree::ClassificationTree;
use crate::{Error, Result};
use ndarray::{ArrayView2, CowArray, Ix2};
use serde::{Deserialize, Serialize};

/// Label assigned to one input row, with how it was reached.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Final label
    pub label: String,
    /// Whether the rejection gate discarded the row
    pub rejected: bool,
    /// Descent path, when paths are recorded and the row was not rejected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<DescentPath>,
}

/// Hierarchical classifier bound to a validated tree.
///
/// # Example
///
/// ```
/// use clasificar::model::LinearSvm;
/// use clasificar::predict::Predictor;
/// use clasificar::tree::{ClassificationTree, Node};
/// use ndarray::array;
///
/// let root = Node::new("root")
///     .with_child(Node::new("T cells").with_classifier(LinearSvm::new(array![1.0, 0.0], 0.0)?))
///     .with_child(Node::new("B cells").with_classifier(LinearSvm::new(array![0.0, 1.0], 0.0)?));
/// let tree = ClassificationTree::new(root);
///
/// let predictor = Predictor::new(&tree)?;
/// let labels = predictor.predict_labels(array![[2.0, 1.0], [0.5, 3.0], [-1.0, -1.0]].view())?;
/// assert_eq!(labels, vec!["T cells", "B cells", "root"]);
/// # Ok::<(), clasificar::Error>(())
/// ```
#[derive(Debug)]
pub struct Predictor<'t> {
    tree: &'t ClassificationTree,
    config: PredictConfig,
}

impl<'t> Predictor<'t> {
    /// Bind to `tree` after validating it.
    ///
    /// # Errors
    ///
    /// Any [`ClassificationTree::validate`] failure.
    pub fn new(tree: &'t ClassificationTree) -> Result<Self> {
        tree.validate()?;
        Ok(Self { tree, config: PredictConfig::default() })
    }

    /// Apply a prediction config.
    ///
    /// # Errors
    ///
    /// `ConfigError` if the config is inconsistent or overrides the threshold
    /// on a tree without a global projection.
    pub fn with_config(mut self, config: PredictConfig) -> Result<Self> {
        config.validate()?;
        let threshold = config.effective_threshold(self.tree.reconstruction_threshold());
        if threshold > 0.0 && self.tree.global_projection().is_none() {
            return Err(Error::ConfigError(
                "rejection threshold needs a tree with a global projection".into(),
            ));
        }
        self.config = config;
        Ok(self)
    }

    pub fn tree(&self) -> &ClassificationTree {
        self.tree
    }

    pub fn config(&self) -> &PredictConfig {
        &self.config
    }

    /// Rejection threshold in effect for this predictor.
    pub fn rejection_threshold(&self) -> f64 {
        self.config.effective_threshold(self.tree.reconstruction_threshold())
    }

    /// One label per row of `x`, in row order. Diagnostics go to `tracing`.
    ///
    /// # Errors
    ///
    /// Shape mismatches and model failures abort the call; no partial result
    /// is returned.
    pub fn predict_labels(&self, x: ArrayView2<'_, f64>) -> Result<Vec<String>> {
        self.predict_labels_with_sink(x, &mut LoggingSink)
    }

    /// Like [`predict_labels`](Self::predict_labels), reporting to `sink`.
    pub fn predict_labels_with_sink(
        &self,
        x: ArrayView2<'_, f64>,
        sink: &mut dyn DiagnosticsSink,
    ) -> Result<Vec<String>> {
        let (report, working) = self.prepare(x, sink)?;
        let root = self.tree.root();
        let dimred = self.tree.dimred();

        let mut labels = Vec::with_capacity(working.nrows());
        for (i, row) in working.outer_iter().enumerate() {
            if report.is_rejected(i) {
                labels.push(root.name().to_string());
                continue;
            }
            let label = descend(row, root, dimred)?;
            tracing::trace!(row = i, label, "descent finished");
            labels.push(label.to_string());
        }
        Ok(labels)
    }

    /// One [`Prediction`] per row of `x`, in row order.
    ///
    /// Paths are kept only when the config asks for them.
    pub fn predict_explained(
        &self,
        x: ArrayView2<'_, f64>,
        sink: &mut dyn DiagnosticsSink,
    ) -> Result<Vec<Prediction>> {
        let (report, working) = self.prepare(x, sink)?;
        let root = self.tree.root();
        let dimred = self.tree.dimred();

        let mut predictions = Vec::with_capacity(working.nrows());
        for (i, row) in working.outer_iter().enumerate() {
            if report.is_rejected(i) {
                predictions.push(Prediction {
                    label: root.name().to_string(),
                    rejected: true,
                    path: None,
                });
                continue;
            }
            let path = descend_explained(row, root, dimred)?;
            predictions.push(Prediction {
                label: path.label().to_string(),
                rejected: false,
                path: self.config.record_paths.then_some(path),
            });
        }
        Ok(predictions)
    }

    /// Run the rejection gate on the raw rows, then the reduction pre-pass.
    fn prepare<'x>(
        &self,
        x: ArrayView2<'x, f64>,
        sink: &mut dyn DiagnosticsSink,
    ) -> Result<(RejectionReport, CowArray<'x, f64, Ix2>)> {
        let global = self.tree.global_projection();
        let report = reject::evaluate(x, global, self.rejection_threshold(), sink)?;

        if !self.tree.dimred() {
            return Ok((report, CowArray::from(x)));
        }

        let projection = global.ok_or_else(|| {
            Error::malformed(
                self.tree.root().name(),
                "dimensionality reduction is enabled but there is no global projection",
            )
        })?;
        let reduced = projection.transform(x)?;
        if reduced.nrows() != x.nrows() {
            return Err(Error::ShapeMismatch {
                expected: vec![x.nrows()],
                got: vec![reduced.nrows()],
            });
        }
        Ok((report, CowArray::from(reduced)))
    }
}

/// Label every row of `x` with `tree`, using the tree's own settings.
///
/// # Errors
///
/// See [`Predictor::new`] and [`Predictor::predict_labels`].
pub fn predict_labels(x: ArrayView2<'_, f64>, tree: &ClassificationTree) -> Result<Vec<String>> {
    Predictor::new(tree)?.predict_labels(x)
}
