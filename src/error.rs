//! Error types for tree validation and label prediction

use thiserror::Error;

/// Errors raised while validating a tree or predicting labels.
///
/// Every failure is a deterministic function of the input matrix and the
/// tree, so none of them are retried: the caller has to fix the data or the
/// tree and call again.
#[derive(Debug, Error)]
pub enum Error {
    /// A node lacks a model its tree flags say it must carry.
    #[error("Malformed tree at node '{node}': {reason}")]
    MalformedTree { node: String, reason: String },

    /// Input dimensionality does not match a fitted model.
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch { expected: Vec<usize>, got: Vec<usize> },

    /// A feature-subset projection references a column the row does not have.
    #[error("Feature index {index} out of range for a row of {n_features} features")]
    FeatureIndexOutOfRange { index: usize, n_features: usize },

    /// A classifier returned something other than a binary label or failed outright.
    #[error("Classifier failure: {0}")]
    Classifier(String),

    /// A fitted model or threshold was constructed with unusable values.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The prediction configuration could not be read or is inconsistent.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A model error raised while evaluating a specific node.
    #[error("At node '{node}': {source}")]
    AtNode {
        node: String,
        #[source]
        source: Box<Error>,
    },
}

/// Result type for clasificar operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a malformed-tree error for the named node.
    pub fn malformed(node: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedTree { node: node.into(), reason: reason.into() }
    }

    /// Attribute a model error to the node being evaluated.
    ///
    /// Errors that already carry a node name are returned unchanged.
    pub fn at_node(self, node: &str) -> Self {
        match self {
            e @ (Self::MalformedTree { .. } | Self::AtNode { .. }) => e,
            other => Self::AtNode { node: node.to_string(), source: Box::new(other) },
        }
    }

    /// The innermost error, with node attribution stripped.
    pub fn root_cause(&self) -> &Error {
        match self {
            Self::AtNode { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Name of the node this error is attributed to, if any.
    pub fn node(&self) -> Option<&str> {
        match self {
            Self::MalformedTree { node, .. } | Self::AtNode { node, .. } => Some(node),
            _ => None,
        }
    }
}
