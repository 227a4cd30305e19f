use crate::data::ClassCounts;
use std::collections::{BTreeMap, VecDeque};
use std::fmt;

/// A node of a categorical decision tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Tests one attribute and routes each observed value to a child.
    Internal {
        attribute: String,
        /// Label counts of the training rows that reached this node.
        class_counts: ClassCounts,
        /// Children keyed by attribute value, visited in ascending value order.
        children: BTreeMap<String, Node>,
    },
    /// Predicts a single label.
    Leaf { label: String },
}

impl Node {
    pub fn leaf(label: impl Into<String>) -> Self {
        Node::Leaf { label: label.into() }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    pub fn n_internal_nodes(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { children, .. } => 1 + children.values().map(Node::n_internal_nodes).sum::<usize>(),
        }
    }

    pub fn n_leaves(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { children, .. } => children.values().map(Node::n_leaves).sum(),
        }
    }

    /// Number of internal nodes on the longest root to leaf path.
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { children, .. } => 1 + children.values().map(Node::depth).max().unwrap_or(0),
        }
    }

    /// Internal nodes in breadth first order, children taken in ascending value order.
    pub fn internal_nodes_breadth_first(&self) -> Vec<&Node> {
        let mut visited = Vec::new();
        let mut queue = VecDeque::from([self]);
        while let Some(node) = queue.pop_front() {
            if let Node::Internal { children, .. } = node {
                visited.push(node);
                queue.extend(children.values());
            }
        }
        visited
    }

    /// Replace an internal node by a leaf predicting the majority label of its
    /// stored class counts. Returns false if nothing was collapsed.
    pub fn collapse(&mut self) -> bool {
        let label = match self {
            Node::Internal { class_counts, .. } => match class_counts.majority() {
                Some(label) => label.to_string(),
                None => return false,
            },
            Node::Leaf { .. } => return false,
        };
        *self = Node::Leaf { label };
        true
    }

    /// Collapse the `position`-th internal node (1-based) in the order of
    /// [`Node::internal_nodes_breadth_first`].
    pub fn collapse_nth_internal(&mut self, position: usize) -> bool {
        let mut seen = 0;
        let mut queue: VecDeque<&mut Node> = VecDeque::from([self]);
        while let Some(node) = queue.pop_front() {
            if node.is_leaf() {
                continue;
            }
            seen += 1;
            if seen == position {
                return node.collapse();
            }
            if let Node::Internal { children, .. } = node {
                queue.extend(children.values_mut());
            }
        }
        false
    }

    fn write_subtree(&self, f: &mut fmt::Formatter, level: usize) -> fmt::Result {
        match self {
            Node::Leaf { label } => writeln!(f, "{}", label),
            Node::Internal {
                attribute, children, ..
            } => {
                for (value, child) in children {
                    write!(f, "{}{} = {} :", "| ".repeat(level), attribute, value)?;
                    match child {
                        Node::Leaf { label } => writeln!(f, " {}", label)?,
                        Node::Internal { .. } => {
                            writeln!(f)?;
                            child.write_subtree(f, level + 1)?;
                        }
                    }
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.write_subtree(f, 0)
    }
}
