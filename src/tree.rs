use crate::data::{ClassCounts, Dataset, LabelDomain};
use crate::errors::TreeError;
use crate::heuristic::Heuristic;
use crate::metric::accuracy;
use crate::node::Node;
use log::info;
use std::collections::HashMap;
use std::fmt;

/// A decision tree over categorical attributes with a binary label.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    pub root: Node,
    pub heuristic: Heuristic,
}

/// State shared by every step of the recursive induction.
pub struct TrainingContext<'a> {
    pub heuristic: Heuristic,
    pub labels: &'a LabelDomain,
}

impl TrainingContext<'_> {
    /// Grow the subtree for `data`.
    ///
    /// * No attributes left: a leaf with the majority label.
    /// * All rows share one label: a leaf with that label.
    /// * Otherwise split on the best attribute and grow one child per observed value.
    ///   If the attribute takes a single value the split is dropped in favour of a
    ///   majority leaf.
    pub fn grow(&self, data: &Dataset) -> Node {
        let counts = data.class_counts(self.labels);
        if data.attributes().is_empty() {
            return majority_leaf(&counts);
        }
        if let Some(label) = counts.pure_label() {
            return Node::leaf(label);
        }

        let attribute = self.heuristic.best_attribute(data, self.labels);
        let subsets = data.partition(attribute);
        if subsets.len() == 1 {
            return majority_leaf(&counts);
        }

        let children = subsets
            .iter()
            .map(|(value, subset)| (value.clone(), self.grow(subset)))
            .collect();
        Node::Internal {
            attribute: data.attributes()[attribute].clone(),
            class_counts: counts,
            children,
        }
    }
}

fn majority_leaf(counts: &ClassCounts) -> Node {
    Node::leaf(counts.majority().unwrap_or_default())
}

impl Tree {
    /// Grow a tree on the training data with the given heuristic.
    ///
    /// # Errors
    ///
    /// * [`TreeError::EmptyDataset`] if there are no training rows.
    /// * [`TreeError::NonBinaryLabels`] if the label column has more than two values.
    pub fn fit(data: &Dataset, heuristic: Heuristic) -> Result<Self, TreeError> {
        if data.is_empty() {
            return Err(TreeError::EmptyDataset);
        }
        let labels = LabelDomain::from_dataset(data)?;
        let context = TrainingContext {
            heuristic,
            labels: &labels,
        };
        let tree = Tree {
            root: context.grow(data),
            heuristic,
        };
        info!(
            "{} tree grown on {} rows: {} internal nodes, {} leaves, depth {}.",
            heuristic,
            data.n_rows(),
            tree.n_internal_nodes(),
            tree.n_leaves(),
            tree.depth()
        );
        Ok(tree)
    }

    fn predict_row<'a>(&'a self, columns: &HashMap<&str, usize>, row: &[String]) -> Result<&'a str, TreeError> {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { label } => return Ok(label.as_str()),
                Node::Internal {
                    attribute, children, ..
                } => {
                    let idx = *columns
                        .get(attribute.as_str())
                        .ok_or_else(|| TreeError::UnknownAttribute(attribute.clone()))?;
                    let value = &row[idx];
                    node = children.get(value).ok_or_else(|| TreeError::MissingBranch {
                        attribute: attribute.clone(),
                        value: value.clone(),
                    })?;
                }
            }
        }
    }

    /// Predicted label of every row. Attributes are looked up by name in the dataset header.
    ///
    /// # Errors
    ///
    /// * [`TreeError::UnknownAttribute`] if the tree tests an attribute the header lacks.
    /// * [`TreeError::MissingBranch`] if a row has a value with no matching child.
    pub fn predict(&self, data: &Dataset) -> Result<Vec<&str>, TreeError> {
        let columns: HashMap<&str, usize> = data
            .attributes()
            .iter()
            .enumerate()
            .map(|(i, a)| (a.as_str(), i))
            .collect();
        data.rows().iter().map(|row| self.predict_row(&columns, row)).collect()
    }

    /// Percentage of rows whose label the tree predicts correctly.
    pub fn accuracy(&self, data: &Dataset) -> Result<f64, TreeError> {
        if data.is_empty() {
            return Err(TreeError::EmptyDataset);
        }
        let yhat = self.predict(data)?;
        let y: Vec<&str> = data.labels().collect();
        accuracy(&y, &yhat)
    }

    pub fn n_internal_nodes(&self) -> usize {
        self.root.n_internal_nodes()
    }

    pub fn n_leaves(&self) -> usize {
        self.root.n_leaves()
    }

    pub fn depth(&self) -> usize {
        self.root.depth()
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.root)
    }
}
