//! Fixed feature-index selection

use super::Projection;
use crate::{Error, Result};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

/// Per-node projection that keeps a fixed, ordered subset of coordinates.
///
/// Under global dimensionality reduction each node is trained on the
/// principal components informative for it; this selects exactly those.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSubset {
    indices: Vec<usize>,
}

impl FeatureSubset {
    /// # Errors
    ///
    /// Returns `InvalidParameter` for an empty index list.
    pub fn new(indices: Vec<usize>) -> Result<Self> {
        if indices.is_empty() {
            return Err(Error::InvalidParameter("FeatureSubset needs at least one index".into()));
        }
        Ok(Self { indices })
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    fn check_range(&self, n_features: usize) -> Result<()> {
        match self.indices.iter().find(|&&i| i >= n_features) {
            Some(&index) => Err(Error::FeatureIndexOutOfRange { index, n_features }),
            None => Ok(()),
        }
    }
}

impl Projection for FeatureSubset {
    fn transform(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        self.check_range(x.ncols())?;
        Ok(x.select(Axis(1), &self.indices))
    }

    fn transform_row(&self, row: ArrayView1<'_, f64>) -> Result<Array1<f64>> {
        self.check_range(row.len())?;
        Ok(row.select(Axis(0), &self.indices))
    }
}
