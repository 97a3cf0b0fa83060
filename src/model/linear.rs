//! Linear support vector classifier

use super::{check_finite, check_width, Classifier};
use crate::{Error, Result};
use ndarray::{Array1, ArrayView1};

/// Fitted linear SVM: `decision = coef · x + intercept`.
///
/// Follows the linear SVC convention: a row is positive iff its decision
/// value is strictly greater than zero.
///
/// # Example
///
/// ```
/// use clasificar::model::{Classifier, LinearSvm};
/// use ndarray::array;
///
/// let svm = LinearSvm::new(array![1.0, -1.0], 0.5).expect("valid parameters");
/// let row = array![2.0, 1.0];
/// assert_eq!(svm.predict(row.view()).unwrap(), 1);
/// assert_eq!(svm.decision_function(row.view()).unwrap(), 1.5);
/// ```
#[derive(Debug, Clone)]
pub struct LinearSvm {
    coef: Array1<f64>,
    intercept: f64,
}

impl LinearSvm {
    /// Build from fitted coefficients and intercept.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `coef` is empty or any value is not finite.
    pub fn new(coef: Array1<f64>, intercept: f64) -> Result<Self> {
        if coef.is_empty() {
            return Err(Error::InvalidParameter("LinearSvm needs at least one coefficient".into()));
        }
        check_finite("LinearSvm coefficients", coef.iter())?;
        check_finite("LinearSvm intercept", [intercept].iter())?;
        Ok(Self { coef, intercept })
    }

    /// Number of features the model was fitted on.
    pub fn n_features(&self) -> usize {
        self.coef.len()
    }

    pub fn coef(&self) -> &Array1<f64> {
        &self.coef
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl Classifier for LinearSvm {
    fn predict(&self, row: ArrayView1<'_, f64>) -> Result<u8> {
        Ok(u8::from(self.decision_function(row)? > 0.0))
    }

    fn decision_function(&self, row: ArrayView1<'_, f64>) -> Result<f64> {
        check_width(self.coef.len(), row.len())?;
        Ok(self.coef.dot(&row) + self.intercept)
    }
}
