//! Per-node classifier evaluation

use crate::tree::Node;
use crate::{Error, Result};
use ndarray::{Array1, ArrayView1};

/// Run `node`'s local classifier on one row.
///
/// Under dimensionality reduction the (already globally reduced) row first
/// goes through the node's local projection; otherwise the classifier sees
/// the row unchanged. Nothing is cached between calls.
///
/// Returns `(label, score)` with `label` in `{0, 1}`.
///
/// # Errors
///
/// `MalformedTree` when the node lacks a required model; any projection or
/// classifier failure, attributed to the node. There is no partial-success
/// policy: the caller aborts the whole prediction call.
pub fn evaluate_node(row: ArrayView1<'_, f64>, node: &Node, dimred: bool) -> Result<(u8, f64)> {
    let classifier = node
        .classifier()
        .ok_or_else(|| Error::malformed(node.name(), "missing local classifier"))?;

    let reduced: Array1<f64>;
    let input = if dimred {
        let projection = node.projection().ok_or_else(|| {
            Error::malformed(node.name(), "missing local projection under dimensionality reduction")
        })?;
        reduced = projection.transform_row(row).map_err(|e| e.at_node(node.name()))?;
        reduced.view()
    } else {
        row.view()
    };

    let label = classifier.predict(input).map_err(|e| e.at_node(node.name()))?;
    if label > 1 {
        return Err(Error::Classifier(format!("predict returned {label}, expected 0 or 1"))
            .at_node(node.name()));
    }
    let score = classifier.decision_function(input).map_err(|e| e.at_node(node.name()))?;

    Ok((label, score))
}
