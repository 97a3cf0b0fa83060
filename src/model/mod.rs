//! Fitted-model capabilities consumed by the inference engine
//!
//! The engine never fits anything. Training hands over already-fitted
//! classifiers and projections behind two narrow interfaces:
//!
//! - **Classifier**: `predict` (binary label) and `decision_function` (score)
//! - **Projection**: `transform`, plus `inverse_transform` for projections
//!   that can reconstruct their input ([`Reconstruction`])
//!
//! Concrete variants shipped here cover what hierarchical single-cell
//! classifiers are usually trained with: linear and one-class RBF SVMs, PCA,
//! and fixed feature-index selection.

mod linear;
mod one_class;
mod pca;
mod subset;


pub use linear::LinearSvm;
pub use one_class::OneClassSvm;
pub use pca::Pca;
pub use subset::FeatureSubset;

use crate::{Error, Result};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use std::fmt;

/// A fitted per-node binary classifier.
///
/// Higher scores mean a more confident positive match. The score is only
/// meaningful when `predict` returns 1.
pub trait Classifier: fmt::Debug + Send + Sync {
    /// Binary label (0 or 1) for a single row.
    fn predict(&self, row: ArrayView1<'_, f64>) -> Result<u8>;

    /// Signed confidence score for a single row.
    fn decision_function(&self, row: ArrayView1<'_, f64>) -> Result<f64>;
}

/// A fitted feature-space reduction.
///
/// For the global projection this is a learned linear map; for per-node
/// projections it may just select a fixed, ordered subset of coordinates.
pub trait Projection: fmt::Debug + Send + Sync {
    /// Reduce every row of `x`. The row count is preserved.
    fn transform(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>>;

    /// Reduce a single row.
    fn transform_row(&self, row: ArrayView1<'_, f64>) -> Result<Array1<f64>> {
        let reduced = self.transform(row.insert_axis(Axis(0)))?;
        if reduced.nrows() != 1 {
            return Err(Error::ShapeMismatch { expected: vec![1], got: vec![reduced.nrows()] });
        }
        Ok(reduced.index_axis_move(Axis(0), 0))
    }
}

/// A projection that can map reduced coordinates back to the input space.
pub trait Reconstruction: Projection {
    /// Map reduced rows back to the original feature space.
    fn inverse_transform(&self, z: ArrayView2<'_, f64>) -> Result<Array2<f64>>;
}

/// Reject rows whose width differs from what a model was fitted on.
pub(crate) fn check_width(expected: usize, got: usize) -> Result<()> {
    if expected != got {
        return Err(Error::ShapeMismatch { expected: vec![expected], got: vec![got] });
    }
    Ok(())
}

/// Reject non-finite fitted parameters.
pub(crate) fn check_finite<'a>(what: &str, values: impl IntoIterator<Item = &'a f64>) -> Result<()> {
    if values.into_iter().any(|v| !v.is_finite()) {
        return Err(Error::InvalidParameter(format!("{what} must be finite")));
    }
    Ok(())
}
