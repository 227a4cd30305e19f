//! Reptree
//!
//! Decision trees over categorical attributes with a binary label. Trees are grown
//! greedily with either the entropy or the variance impurity heuristic, then
//! simplified by a seeded, stochastic reduced-error pruning search scored on
//! validation data.
//!
//! ```
//! use reptree::{Dataset, Heuristic};
//!
//! let csv = "A,B,label\n0,0,0\n0,1,0\n1,0,1\n1,1,1\n";
//! let data = Dataset::from_reader(csv.as_bytes()).unwrap();
//! let tree = reptree::train(&data, Heuristic::Entropy).unwrap();
//! assert_eq!(reptree::count_internal_nodes(&tree), 1);
//! assert_eq!(reptree::evaluate(&data, &tree).unwrap(), 100.0);
//! ```
use rand::Rng;

// Modules
pub mod constants;
pub mod data;
pub mod errors;
pub mod heuristic;
pub mod metric;
pub mod node;
pub mod prune;
pub mod tree;
pub mod utils;

// Individual classes, and functions
pub use data::{ClassCounts, Dataset, LabelDomain};
pub use errors::TreeError;
pub use heuristic::Heuristic;
pub use node::Node;
pub use prune::Pruner;
pub use tree::Tree;

/// Grow a tree on `data` with `heuristic`.
pub fn train(data: &Dataset, heuristic: Heuristic) -> Result<Tree, TreeError> {
    Tree::fit(data, heuristic)
}

/// Accuracy of `tree` on `data`, in percent.
pub fn evaluate(data: &Dataset, tree: &Tree) -> Result<f64, TreeError> {
    tree.accuracy(data)
}

/// Run `trials` pruning trials of at most `max_collapses` collapses each,
/// scored on `validation`, drawing randomness from `rng`.
pub fn prune<R: Rng + ?Sized>(
    tree: &Tree,
    trials: usize,
    max_collapses: usize,
    validation: &Dataset,
    rng: &mut R,
) -> Result<Tree, TreeError> {
    Pruner::new(trials, max_collapses)?.prune(tree, validation, rng)
}

/// Number of internal nodes of `tree`, leaves excluded.
pub fn count_internal_nodes(tree: &Tree) -> usize {
    tree.n_internal_nodes()
}
