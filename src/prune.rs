//! Prune
//!
//! Stochastic reduced-error pruning. Every trial clones the tree, collapses a random
//! number of randomly chosen internal nodes into majority leaves, and is scored on
//! held-out validation data. The best scoring candidate is kept only if it strictly
//! beats the tree it started from.
use crate::constants::{DEFAULT_MAX_COLLAPSES, DEFAULT_SEED, DEFAULT_TRIALS};
use crate::data::Dataset;
use crate::errors::TreeError;
use crate::metric::is_comparison_better;
use crate::tree::Tree;
use crate::utils::validate_positive_parameter;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// Configuration of the pruning search.
#[derive(Debug, Clone, PartialEq)]
pub struct Pruner {
    /// Number of independent trials, `L`.
    pub trials: usize,
    /// Upper bound on the collapses drawn per trial, `K`.
    pub max_collapses: usize,
    /// Seed used by [`Pruner::prune_seeded`].
    pub seed: u64,
    /// Score trials on the rayon thread pool.
    pub parallel: bool,
}

impl Default for Pruner {
    fn default() -> Self {
        Pruner {
            trials: DEFAULT_TRIALS,
            max_collapses: DEFAULT_MAX_COLLAPSES,
            seed: DEFAULT_SEED,
            parallel: true,
        }
    }
}

impl Pruner {
    /// Create a pruner running `trials` trials of at most `max_collapses` collapses each.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidParameter`] if either value is zero.
    pub fn new(trials: usize, max_collapses: usize) -> Result<Self, TreeError> {
        validate_positive_parameter(trials, "trials")?;
        validate_positive_parameter(max_collapses, "max_collapses")?;
        Ok(Pruner::default().set_trials(trials).set_max_collapses(max_collapses))
    }

    /// Set the number of trials on the pruner.
    pub fn set_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Set the maximum number of collapses per trial on the pruner.
    pub fn set_max_collapses(mut self, max_collapses: usize) -> Self {
        self.max_collapses = max_collapses;
        self
    }

    /// Set the seed on the pruner.
    pub fn set_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set whether trials are scored in parallel.
    pub fn set_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Run one trial on a fresh clone of `tree`.
    fn trial<R: Rng + ?Sized>(&self, tree: &Tree, rng: &mut R) -> Tree {
        let mut candidate = tree.clone();
        let collapses = rng.gen_range(1..=self.max_collapses);
        for _ in 0..collapses {
            let n_internal = candidate.n_internal_nodes();
            if n_internal <= 1 {
                continue;
            }
            let position = rng.gen_range(1..=n_internal);
            candidate.root.collapse_nth_internal(position);
        }
        candidate
    }

    /// Search for a pruned version of `tree` with better validation accuracy.
    ///
    /// Every trial draws its collapse count and positions directly from `rng`, trial by
    /// trial, so a given generator state always yields the same candidates. Only the
    /// scoring of the candidates runs on the thread pool. A candidate replaces the
    /// current best only if its accuracy is strictly higher, so the returned tree never
    /// scores lower than `tree` on `validation`.
    ///
    /// # Errors
    ///
    /// * [`TreeError::InvalidParameter`] if `trials` or `max_collapses` is zero.
    /// * Any error from evaluating a tree on `validation`.
    pub fn prune<R: Rng + ?Sized>(&self, tree: &Tree, validation: &Dataset, rng: &mut R) -> Result<Tree, TreeError> {
        validate_positive_parameter(self.trials, "trials")?;
        validate_positive_parameter(self.max_collapses, "max_collapses")?;

        let base_accuracy = tree.accuracy(validation)?;
        if tree.n_internal_nodes() <= 1 {
            warn!("Tree has no internal node that can be collapsed, pruning leaves it unchanged.");
        }

        let mut candidates = Vec::with_capacity(self.trials);
        for _ in 0..self.trials {
            candidates.push(self.trial(tree, &mut *rng));
        }
        let score = |(i, candidate): (usize, &Tree)| -> Result<f64, TreeError> {
            let accuracy = candidate.accuracy(validation)?;
            debug!(
                "Pruning trial {}: {} internal nodes, validation accuracy {:.2}.",
                i,
                candidate.n_internal_nodes(),
                accuracy
            );
            Ok(accuracy)
        };
        let accuracies: Vec<f64> = if self.parallel {
            candidates.par_iter().enumerate().map(score).collect::<Result<Vec<f64>, TreeError>>()?
        } else {
            candidates.iter().enumerate().map(score).collect::<Result<Vec<f64>, TreeError>>()?
        };

        let mut best_accuracy = base_accuracy;
        let mut best_trial = None;
        for (i, accuracy) in accuracies.iter().enumerate() {
            if is_comparison_better(best_accuracy, *accuracy, true) {
                info!("Pruning trial {} improved validation accuracy to {:.2}.", i, accuracy);
                best_accuracy = *accuracy;
                best_trial = Some(i);
            }
        }

        let best = match best_trial {
            Some(i) => candidates.swap_remove(i),
            None => tree.clone(),
        };
        info!(
            "Pruning: validation accuracy {:.2} -> {:.2}, internal nodes {} -> {}.",
            base_accuracy,
            best_accuracy,
            tree.n_internal_nodes(),
            best.n_internal_nodes()
        );
        Ok(best)
    }

    /// [`Pruner::prune`] with a generator seeded from the configured seed.
    pub fn prune_seeded(&self, tree: &Tree, validation: &Dataset) -> Result<Tree, TreeError> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        self.prune(tree, validation, &mut rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::Heuristic;
    use crate::node::Node;
    use std::error::Error;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn dataset(header: &[&str], rows: &[&[&str]]) -> Dataset {
        Dataset::new(strings(header), rows.iter().map(|r| strings(r)).collect()).unwrap()
    }

    // Label follows A, except for two noisy rows that force a split on B below A = 1.
    fn noisy_train() -> Dataset {
        dataset(
            &["A", "B", "label"],
            &[
                &["0", "0", "0"],
                &["0", "1", "0"],
                &["0", "0", "0"],
                &["1", "0", "1"],
                &["1", "1", "1"],
                &["1", "0", "1"],
                &["1", "1", "0"],
                &["1", "1", "1"],
                &["1", "1", "0"],
            ],
        )
    }

    fn clean_validation() -> Dataset {
        dataset(
            &["A", "B", "label"],
            &[&["0", "0", "0"], &["0", "1", "0"], &["1", "0", "1"], &["1", "1", "1"]],
        )
    }

    #[test]
    fn test_pruner_rejects_zero_parameters() {
        assert!(matches!(Pruner::new(0, 3), Err(TreeError::InvalidParameter(..))));
        assert!(matches!(Pruner::new(3, 0), Err(TreeError::InvalidParameter(..))));
        let tree = Tree::fit(&noisy_train(), Heuristic::Entropy).unwrap();
        let pruner = Pruner::default().set_trials(0);
        assert!(matches!(
            pruner.prune_seeded(&tree, &clean_validation()),
            Err(TreeError::InvalidParameter(..))
        ));
    }

    #[test]
    fn test_prune_never_loses_accuracy() -> Result<(), Box<dyn Error>> {
        let train = noisy_train();
        let validation = clean_validation();
        for heuristic in [Heuristic::Entropy, Heuristic::VarianceImpurity] {
            let tree = Tree::fit(&train, heuristic)?;
            let before = tree.accuracy(&validation)?;
            for seed in 0..20 {
                let pruned = Pruner::new(5, 3)?.set_seed(seed).prune_seeded(&tree, &validation)?;
                assert!(pruned.accuracy(&validation)? >= before);
                assert!(pruned.n_internal_nodes() <= tree.n_internal_nodes());
            }
        }
        Ok(())
    }

    #[test]
    fn test_prune_removes_noise_split() -> Result<(), Box<dyn Error>> {
        let tree = Tree::fit(&noisy_train(), Heuristic::Entropy)?;
        let validation = clean_validation();
        assert_eq!(tree.n_internal_nodes(), 2);
        assert!(tree.accuracy(&validation)? < 100.0);

        // Only the B node can be collapsed, so enough trials always find it.
        let pruned = Pruner::new(50, 1)?.prune_seeded(&tree, &validation)?;
        assert_eq!(pruned.accuracy(&validation)?, 100.0);
        assert_eq!(pruned.n_internal_nodes(), 1);
        Ok(())
    }

    #[test]
    fn test_prune_draws_from_injected_rng() -> Result<(), Box<dyn Error>> {
        let tree = Tree::fit(&noisy_train(), Heuristic::Entropy)?;
        let validation = clean_validation();
        let before = tree.accuracy(&validation)?;
        for seed in 0..20 {
            // Replay the draws of a single trial with K = 1 on a second generator.
            let mut replay = StdRng::seed_from_u64(seed);
            let _collapses: usize = replay.gen_range(1..=1);
            let position: usize = replay.gen_range(1..=tree.n_internal_nodes());
            let mut expected = tree.clone();
            expected.root.collapse_nth_internal(position);
            if expected.accuracy(&validation)? <= before {
                expected = tree.clone();
            }

            let pruned = Pruner::new(1, 1)?.prune(&tree, &validation, &mut StdRng::seed_from_u64(seed))?;
            assert_eq!(pruned, expected);
        }
        Ok(())
    }

    #[test]
    fn test_prune_does_not_modify_input() -> Result<(), Box<dyn Error>> {
        let tree = Tree::fit(&noisy_train(), Heuristic::Entropy)?;
        let copy = tree.clone();
        let _ = Pruner::new(10, 3)?.prune_seeded(&tree, &clean_validation())?;
        assert_eq!(tree, copy);
        Ok(())
    }

    #[test]
    fn test_prune_is_reproducible() -> Result<(), Box<dyn Error>> {
        let tree = Tree::fit(&noisy_train(), Heuristic::VarianceImpurity)?;
        let validation = clean_validation();
        let parallel = Pruner::new(20, 4)?.set_seed(7);
        let sequential = parallel.clone().set_parallel(false);
        let a = parallel.prune_seeded(&tree, &validation)?;
        let b = parallel.prune_seeded(&tree, &validation)?;
        let c = sequential.prune_seeded(&tree, &validation)?;
        assert_eq!(a, b);
        assert_eq!(a, c);
        Ok(())
    }

    #[test]
    fn test_prune_single_internal_node_is_untouched() -> Result<(), Box<dyn Error>> {
        let train = clean_validation();
        let tree = Tree::fit(&train, Heuristic::Entropy)?;
        assert_eq!(tree.n_internal_nodes(), 1);
        let pruned = Pruner::new(10, 5)?.prune_seeded(&tree, &train)?;
        assert_eq!(pruned, tree);
        Ok(())
    }

    #[test]
    fn test_prune_leaf_tree() -> Result<(), Box<dyn Error>> {
        let train = dataset(&["A", "label"], &[&["0", "1"], &["1", "1"]]);
        let tree = Tree::fit(&train, Heuristic::Entropy)?;
        assert_eq!(tree.root, Node::leaf("1"));
        let pruned = Pruner::new(3, 3)?.prune_seeded(&tree, &train)?;
        assert_eq!(pruned.root, Node::leaf("1"));
        Ok(())
    }
}
