//! Classification tree consumed by the inference engine
//!
//! The tree is built and owned by training. Inference only reads it: the
//! root name doubles as the "unassigned" label, and the root carries the
//! global projection, the dimensionality-reduction flag and the
//! reconstruction-error threshold.

mod node;


pub use node::{Node, Nodes};

use crate::model::Reconstruction;
use crate::{Error, Result};
use std::collections::HashSet;

/// A trained hierarchy of per-node binary classifiers.
#[derive(Debug)]
pub struct ClassificationTree {
    root: Node,
    global_projection: Option<Box<dyn Reconstruction>>,
    dimred: bool,
    reconstruction_threshold: f64,
}

impl ClassificationTree {
    /// Wrap a root node. Rejection and dimensionality reduction start disabled.
    pub fn new(root: Node) -> Self {
        Self { root, global_projection: None, dimred: false, reconstruction_threshold: 0.0 }
    }

    /// Attach the root-level projection used for rejection and reduction.
    pub fn with_global_projection(mut self, projection: impl Reconstruction + 'static) -> Self {
        self.global_projection = Some(Box::new(projection));
        self
    }

    /// Project every row through the global projection before descent.
    pub fn with_dimred(mut self, dimred: bool) -> Self {
        self.dimred = dimred;
        self
    }

    /// Reconstruction-error threshold; zero or negative disables rejection.
    pub fn with_reconstruction_threshold(mut self, threshold: f64) -> Self {
        self.reconstruction_threshold = threshold;
        self
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn global_projection(&self) -> Option<&dyn Reconstruction> {
        self.global_projection.as_deref()
    }

    pub fn dimred(&self) -> bool {
        self.dimred
    }

    pub fn reconstruction_threshold(&self) -> f64 {
        self.reconstruction_threshold
    }

    /// Whether rows may be rejected before descent.
    pub fn rejection_enabled(&self) -> bool {
        self.reconstruction_threshold > 0.0
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.root.iter().count()
    }

    /// Always false: a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    pub fn find(&self, name: &str) -> Option<&Node> {
        self.root.find(name)
    }

    /// Check that every model the flags call for is present.
    ///
    /// Runs before any row is labeled so a malformed tree never produces a
    /// partial result.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if the threshold is not finite
    /// - `MalformedTree` if the global projection is missing while rejection
    ///   or dimensionality reduction is enabled, a non-root node has no
    ///   classifier (or no projection under reduction), or two nodes share a name
    pub fn validate(&self) -> Result<()> {
        if !self.reconstruction_threshold.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "reconstruction threshold must be finite, got {}",
                self.reconstruction_threshold
            )));
        }

        let root_name = self.root.name();
        if self.global_projection.is_none() {
            if self.rejection_enabled() {
                return Err(Error::malformed(
                    root_name,
                    "reconstruction threshold is set but there is no global projection",
                ));
            }
            if self.dimred {
                return Err(Error::malformed(
                    root_name,
                    "dimensionality reduction is enabled but there is no global projection",
                ));
            }
        }

        let mut seen = HashSet::new();
        for node in self.root.iter() {
            if !seen.insert(node.name()) {
                return Err(Error::malformed(node.name(), "node name is not unique"));
            }
        }

        for node in self.root.iter().skip(1) {
            if node.classifier().is_none() {
                return Err(Error::malformed(node.name(), "missing local classifier"));
            }
            if self.dimred && node.projection().is_none() {
                return Err(Error::malformed(
                    node.name(),
                    "missing local projection under dimensionality reduction",
                ));
            }
        }

        Ok(())
    }
}
