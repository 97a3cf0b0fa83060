//! Greedy top-down descent through the classification tree
//!
//! For one row, starting at the root:
//!
//! 1. Evaluate every child of the current node, in declared order.
//! 2. Keep the child with the highest score among those predicting 1. Only a
//!    strictly higher score replaces the current best, so the earliest child
//!    wins ties.
//! 3. Descend into it and adopt its name, or stop if no child accepted.
//!
//! The label is the name of the last node descended into. A leaf ends the
//! walk regardless of classifier output.

mod evaluator;
mod path;


pub use evaluator::evaluate_node;
pub use path::{DescentPath, DescentStep, ROOT_SCORE};

use crate::tree::Node;
use crate::Result;
use ndarray::ArrayView1;

/// Walk from `root` and return the deepest node reached.
///
/// `on_step` sees every adopted child with its winning score.
fn walk<'t>(
    row: ArrayView1<'_, f64>,
    root: &'t Node,
    dimred: bool,
    mut on_step: impl FnMut(&'t Node, f64),
) -> Result<&'t Node> {
    let mut current = root;

    while !current.is_leaf() {
        let mut best_child: Option<&'t Node> = None;
        let mut best_score = f64::NEG_INFINITY;

        for child in current.children() {
            let (label, score) = evaluate_node(row, child, dimred)?;
            if label == 1 && score > best_score {
                best_child = Some(child);
                best_score = score;
            }
        }

        match best_child {
            Some(child) => {
                on_step(child, best_score);
                current = child;
            }
            None => break,
        }
    }

    Ok(current)
}

/// Label one row by greedy descent from `root`.
///
/// # Errors
///
/// Propagates [`evaluate_node`] failures.
pub fn descend<'t>(row: ArrayView1<'_, f64>, root: &'t Node, dimred: bool) -> Result<&'t str> {
    walk(row, root, dimred, |_, _| {}).map(Node::name)
}

/// Like [`descend`], but keeps every adopted node and its score.
///
/// # Errors
///
/// Propagates [`evaluate_node`] failures.
pub fn descend_explained(row: ArrayView1<'_, f64>, root: &Node, dimred: bool) -> Result<DescentPath> {
    let mut path = DescentPath::new(root.name());
    walk(row, root, dimred, |node, score| path.push(node.name(), score))?;
    Ok(path)
}
