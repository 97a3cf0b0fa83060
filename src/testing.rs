//! Test doubles for the model capabilities

use crate::model::{Classifier, Projection, Reconstruction};
use crate::{Error, Result};
use ndarray::{Array2, ArrayView1, ArrayView2};
use std::sync::{Arc, Mutex};

/// Classifier returning a fixed label and score for every row.
#[derive(Debug, Clone)]
pub(crate) struct FixedClassifier {
    pub label: u8,
    pub score: f64,
}

impl FixedClassifier {
    pub fn accept(score: f64) -> Self {
        Self { label: 1, score }
    }

    pub fn refuse() -> Self {
        Self { label: 0, score: 10.0 }
    }
}

impl Classifier for FixedClassifier {
    fn predict(&self, _row: ArrayView1<'_, f64>) -> Result<u8> {
        Ok(self.label)
    }

    fn decision_function(&self, _row: ArrayView1<'_, f64>) -> Result<f64> {
        Ok(self.score)
    }
}

/// Classifier that records every row it is asked to predict.
#[derive(Debug, Clone)]
pub(crate) struct RecordingClassifier {
    pub inner: FixedClassifier,
    pub seen: Arc<Mutex<Vec<Vec<f64>>>>,
}

impl RecordingClassifier {
    pub fn new(inner: FixedClassifier) -> Self {
        Self { inner, seen: Arc::new(Mutex::new(Vec::new())) }
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().map(|s| s.len()).unwrap_or(0)
    }

    pub fn rows(&self) -> Vec<Vec<f64>> {
        self.seen.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl Classifier for RecordingClassifier {
    fn predict(&self, row: ArrayView1<'_, f64>) -> Result<u8> {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(row.to_vec());
        }
        self.inner.predict(row)
    }

    fn decision_function(&self, row: ArrayView1<'_, f64>) -> Result<f64> {
        self.inner.decision_function(row)
    }
}

/// Classifier whose label is `row[feature] > cut` and whose score is `row[feature]`.
#[derive(Debug, Clone)]
pub(crate) struct ThresholdClassifier {
    pub feature: usize,
    pub cut: f64,
}

impl Classifier for ThresholdClassifier {
    fn predict(&self, row: ArrayView1<'_, f64>) -> Result<u8> {
        Ok(u8::from(self.decision_function(row)? > self.cut))
    }

    fn decision_function(&self, row: ArrayView1<'_, f64>) -> Result<f64> {
        row.get(self.feature).copied().ok_or(Error::FeatureIndexOutOfRange {
            index: self.feature,
            n_features: row.len(),
        })
    }
}

/// Classifier that always fails.
#[derive(Debug, Clone)]
pub(crate) struct FailingClassifier;

impl Classifier for FailingClassifier {
    fn predict(&self, _row: ArrayView1<'_, f64>) -> Result<u8> {
        Err(Error::Classifier("model weights are corrupted".into()))
    }

    fn decision_function(&self, _row: ArrayView1<'_, f64>) -> Result<f64> {
        Err(Error::Classifier("model weights are corrupted".into()))
    }
}

/// Global projection whose reconstruction shifts every coordinate by `offset`.
///
/// Reconstruction error of any row is therefore `|offset| · sqrt(n_features)`.
#[derive(Debug, Clone)]
pub(crate) struct ShiftReconstruction {
    pub offset: f64,
    pub calls: Arc<Mutex<usize>>,
}

impl ShiftReconstruction {
    pub fn new(offset: f64) -> Self {
        Self { offset, calls: Arc::new(Mutex::new(0)) }
    }

    pub fn calls(&self) -> usize {
        self.calls.lock().map(|c| *c).unwrap_or(0)
    }
}

impl Projection for ShiftReconstruction {
    fn transform(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        if let Ok(mut calls) = self.calls.lock() {
            *calls += 1;
        }
        Ok(x.to_owned())
    }
}

impl Reconstruction for ShiftReconstruction {
    fn inverse_transform(&self, z: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        Ok(z.mapv(|v| v + self.offset))
    }
}
