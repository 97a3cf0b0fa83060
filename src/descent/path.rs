//! Explained descent: the nodes a row passed through and their scores

use serde::{Deserialize, Serialize};

/// Score recorded for the root step, which no classifier evaluates.
pub const ROOT_SCORE: f64 = -1.0;

/// One adopted node on a descent path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DescentStep {
    /// Node name
    pub name: String,
    /// Winning decision score at this level
    pub score: f64,
}

/// Path of a single row from the root to its final label.
///
/// The first step is always the root; each later step is the best-scoring
/// accepting child of the step before it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DescentPath {
    steps: Vec<DescentStep>,
}

impl DescentPath {
    /// Path that starts (and so far ends) at the root.
    pub fn new(root: impl Into<String>) -> Self {
        Self { steps: vec![DescentStep { name: root.into(), score: ROOT_SCORE }] }
    }

    pub fn push(&mut self, name: impl Into<String>, score: f64) {
        self.steps.push(DescentStep { name: name.into(), score });
    }

    pub fn steps(&self) -> &[DescentStep] {
        &self.steps
    }

    /// Final label: the deepest node adopted.
    pub fn label(&self) -> &str {
        // `new` guarantees at least the root step
        self.steps.last().map_or("", |s| s.name.as_str())
    }

    /// Number of descents below the root.
    pub fn depth(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Whether the row stopped at the root.
    pub fn stopped_at_root(&self) -> bool {
        self.depth() == 0
    }

    /// Human-readable rendering.
    pub fn explain(&self) -> String {
        let depth = self.depth();
        let mut explanation = format!("Descent Path (depth={depth}):\n");
        for (i, step) in self.steps.iter().enumerate() {
            if i == 0 {
                explanation.push_str(&format!("  ROOT {}\n", step.name));
            } else {
                explanation.push_str(&format!("  -> {} (score={:.4})\n", step.name, step.score));
            }
        }
        explanation.push_str(&format!("  LABEL -> {}\n", self.label()));
        explanation
    }
}
