//! Reconstruction-error rejection gate
//!
//! Rows that the global projection reconstructs poorly are treated as
//! novel: they are labeled with the root name and never enter descent.
//!
//! The check is vectorized: the whole matrix goes through
//! `transform` then `inverse_transform` once, and a row is rejected iff the
//! L2 norm of `x - x̂` is strictly greater than the threshold.


use crate::diagnostics::{Diagnostic, DiagnosticsSink};
use crate::model::Reconstruction;
use crate::{Error, Result};
use ndarray::{Array1, ArrayView2, Axis};

/// Outcome of the rejection gate for one input matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct RejectionReport {
    rejected: Vec<bool>,
    errors: Vec<f64>,
    threshold: f64,
}

impl RejectionReport {
    /// Report for a disabled gate: nothing is rejected.
    pub fn disabled(n_rows: usize) -> Self {
        Self { rejected: vec![false; n_rows], errors: Vec::new(), threshold: 0.0 }
    }

    /// Whether the gate actually ran.
    pub fn is_enabled(&self) -> bool {
        self.threshold > 0.0
    }

    pub fn is_rejected(&self, row: usize) -> bool {
        self.rejected.get(row).copied().unwrap_or(false)
    }

    pub fn rejected_count(&self) -> usize {
        self.rejected.iter().filter(|&&r| r).count()
    }

    pub fn rejected_indices(&self) -> Vec<usize> {
        self.rejected.iter().enumerate().filter_map(|(i, &r)| r.then_some(i)).collect()
    }

    /// Per-row reconstruction error; empty when the gate was disabled.
    pub fn reconstruction_errors(&self) -> &[f64] {
        &self.errors
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Number of rows the report covers.
    pub fn len(&self) -> usize {
        self.rejected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Per-row L2 norm of `x - inverse_transform(transform(x))`.
///
/// # Errors
///
/// Propagates projection errors; returns `ShapeMismatch` if the
/// reconstruction does not have the input's shape.
pub fn reconstruction_errors(
    x: ArrayView2<'_, f64>,
    projection: &dyn Reconstruction,
) -> Result<Array1<f64>> {
    let reduced = projection.transform(x)?;
    let reconstructed = projection.inverse_transform(reduced.view())?;
    if reconstructed.dim() != x.dim() {
        let (rows, cols) = x.dim();
        let (got_rows, got_cols) = reconstructed.dim();
        return Err(Error::ShapeMismatch { expected: vec![rows, cols], got: vec![got_rows, got_cols] });
    }

    let residual = &x - &reconstructed;
    Ok(residual.map_axis(Axis(1), |r| r.dot(&r).sqrt()))
}

/// Decide which rows of `x` to reject.
///
/// A threshold of zero or below disables the gate entirely: the projection is
/// not consulted, nothing is emitted and no row is rejected. When enabled,
/// the rejected-row count is emitted to `sink`.
///
/// # Errors
///
/// Returns `InvalidParameter` for a NaN or infinite threshold, or when the
/// gate is enabled without a projection. Propagates [`reconstruction_errors`]
/// failures.
pub fn evaluate(
    x: ArrayView2<'_, f64>,
    projection: Option<&dyn Reconstruction>,
    threshold: f64,
    sink: &mut dyn DiagnosticsSink,
) -> Result<RejectionReport> {
    if threshold <= 0.0 {
        return Ok(RejectionReport::disabled(x.nrows()));
    }
    if !threshold.is_finite() {
        return Err(Error::InvalidParameter("rejection threshold must be finite".into()));
    }
    let projection = projection.ok_or_else(|| {
        Error::InvalidParameter("rejection threshold is set but no global projection was given".into())
    })?;

    let errors = reconstruction_errors(x, projection)?;
    let rejected: Vec<bool> = errors.iter().map(|&e| e > threshold).collect();
    let report = RejectionReport { rejected, errors: errors.to_vec(), threshold };

    sink.emit(Diagnostic::RowsRejected {
        rejected: report.rejected_count(),
        total: report.len(),
        threshold,
    });

    Ok(report)
}
