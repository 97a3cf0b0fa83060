//! One-class SVM with an RBF kernel
//!
//! Used for leaf-level novelty detection: the node accepts a row when it lies
//! inside the learned support of its training population.

use super::{check_finite, check_width, Classifier};
use crate::{Error, Result};
use ndarray::{Array1, Array2, ArrayView1};

/// Fitted one-class SVM.
///
/// `decision = Σ dual_coef[i] · exp(-gamma · ‖x - sv[i]‖²) + intercept`.
/// A row is positive iff its decision value is non-negative.
#[derive(Debug, Clone)]
pub struct OneClassSvm {
    support_vectors: Array2<f64>,
    dual_coef: Array1<f64>,
    intercept: f64,
    gamma: f64,
}

impl OneClassSvm {
    /// Build from fitted support vectors (one per row), their dual
    /// coefficients, the intercept and the kernel width.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if `dual_coef` does not have one entry per
    /// support vector, and `InvalidParameter` for an empty model, a
    /// non-positive `gamma` or non-finite values.
    pub fn new(
        support_vectors: Array2<f64>,
        dual_coef: Array1<f64>,
        intercept: f64,
        gamma: f64,
    ) -> Result<Self> {
        if support_vectors.nrows() == 0 || support_vectors.ncols() == 0 {
            return Err(Error::InvalidParameter(
                "OneClassSvm needs at least one non-empty support vector".into(),
            ));
        }
        if dual_coef.len() != support_vectors.nrows() {
            return Err(Error::ShapeMismatch {
                expected: vec![support_vectors.nrows()],
                got: vec![dual_coef.len()],
            });
        }
        if !(gamma > 0.0 && gamma.is_finite()) {
            return Err(Error::InvalidParameter(format!(
                "OneClassSvm gamma must be positive and finite, got {gamma}"
            )));
        }
        check_finite("OneClassSvm support vectors", support_vectors.iter())?;
        check_finite("OneClassSvm dual coefficients", dual_coef.iter())?;
        check_finite("OneClassSvm intercept", [intercept].iter())?;

        Ok(Self { support_vectors, dual_coef, intercept, gamma })
    }

    pub fn n_features(&self) -> usize {
        self.support_vectors.ncols()
    }

    pub fn n_support(&self) -> usize {
        self.support_vectors.nrows()
    }
}

impl Classifier for OneClassSvm {
    fn predict(&self, row: ArrayView1<'_, f64>) -> Result<u8> {
        Ok(u8::from(self.decision_function(row)? >= 0.0))
    }

    fn decision_function(&self, row: ArrayView1<'_, f64>) -> Result<f64> {
        check_width(self.n_features(), row.len())?;

        let mut decision = self.intercept;
        for (sv, &alpha) in self.support_vectors.outer_iter().zip(self.dual_coef.iter()) {
            let dist_sq: f64 = sv.iter().zip(row.iter()).map(|(&s, &x)| (s - x) * (s - x)).sum();
            decision += alpha * (-self.gamma * dist_sq).exp();
        }
        Ok(decision)
    }
}
