//! Principal component projection

use super::{check_finite, check_width, Projection, Reconstruction};
use crate::{Error, Result};
use ndarray::{Array1, Array2, ArrayView2};

/// Fitted PCA.
///
/// `components` has one principal axis per row (`k × d`), `mean` is the
/// per-feature training mean (`d`).
///
/// - `transform(X) = (X - mean) · componentsᵀ`
/// - `inverse_transform(Z) = Z · components + mean`
#[derive(Debug, Clone)]
pub struct Pca {
    mean: Array1<f64>,
    components: Array2<f64>,
}

impl Pca {
    /// Build from a fitted mean and component matrix.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if `mean` and `components` disagree on the
    /// feature count, `InvalidParameter` if either is empty or not finite.
    pub fn new(mean: Array1<f64>, components: Array2<f64>) -> Result<Self> {
        if components.nrows() == 0 || components.ncols() == 0 {
            return Err(Error::InvalidParameter("Pca needs at least one component".into()));
        }
        if mean.len() != components.ncols() {
            return Err(Error::ShapeMismatch {
                expected: vec![components.ncols()],
                got: vec![mean.len()],
            });
        }
        check_finite("Pca mean", mean.iter())?;
        check_finite("Pca components", components.iter())?;
        Ok(Self { mean, components })
    }

    /// Input feature count.
    pub fn n_features(&self) -> usize {
        self.components.ncols()
    }

    /// Reduced dimensionality.
    pub fn n_components(&self) -> usize {
        self.components.nrows()
    }

    pub fn mean(&self) -> &Array1<f64> {
        &self.mean
    }

    pub fn components(&self) -> &Array2<f64> {
        &self.components
    }
}

impl Projection for Pca {
    fn transform(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        check_width(self.n_features(), x.ncols())?;
        let centered = &x - &self.mean;
        Ok(centered.dot(&self.components.t()))
    }
}

impl Reconstruction for Pca {
    fn inverse_transform(&self, z: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        check_width(self.n_components(), z.ncols())?;
        Ok(z.dot(&self.components) + &self.mean)
    }
}
