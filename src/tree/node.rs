//! Tree node: a label with its local models and owned children

use crate::model::{Classifier, Projection};

/// A node of the classification tree.
///
/// Each node exclusively owns its children, in declared order. That order is
/// significant: it breaks ties between equally confident siblings.
#[derive(Debug)]
pub struct Node {
    name: String,
    children: Vec<Node>,
    classifier: Option<Box<dyn Classifier>>,
    projection: Option<Box<dyn Projection>>,
}

impl Node {
    /// Create a leaf with no local models.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), children: Vec::new(), classifier: None, projection: None }
    }

    /// Attach the classifier deciding whether a row belongs under this node.
    pub fn with_classifier(mut self, classifier: impl Classifier + 'static) -> Self {
        self.classifier = Some(Box::new(classifier));
        self
    }

    /// Attach the projection producing the coordinates this node's classifier expects.
    pub fn with_projection(mut self, projection: impl Projection + 'static) -> Self {
        self.projection = Some(Box::new(projection));
        self
    }

    /// Append a child after any existing ones.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children, preserving their order.
    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn classifier(&self) -> Option<&dyn Classifier> {
        self.classifier.as_deref()
    }

    pub fn projection(&self) -> Option<&dyn Projection> {
        self.projection.as_deref()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Longest number of edges from this node down to a leaf.
    pub fn depth(&self) -> usize {
        self.children.iter().map(|c| c.depth() + 1).max().unwrap_or(0)
    }

    /// Pre-order iterator over this node and all its descendants.
    pub fn iter(&self) -> Nodes<'_> {
        Nodes { stack: vec![self] }
    }

    /// First node in pre-order with the given name.
    pub fn find(&self, name: &str) -> Option<&Node> {
        self.iter().find(|n| n.name == name)
    }
}

/// Pre-order traversal over a subtree, children visited in declared order.
pub struct Nodes<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
