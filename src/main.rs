use clap::Parser;
use reptree::constants::DEFAULT_SEED;
use reptree::{Dataset, Heuristic, Pruner, Tree};
use std::error::Error;
use std::path::PathBuf;

/// Grow entropy and variance impurity decision trees, prune them against a
/// validation set, and report test accuracy.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of pruning trials.
    l: usize,
    /// Maximum number of nodes collapsed per pruning trial.
    k: usize,
    /// Training set CSV, first row is the header, last column the label.
    training_set: PathBuf,
    /// Validation set CSV used to score pruning trials.
    validation_set: PathBuf,
    /// Test set CSV used to report accuracy.
    test_set: PathBuf,
    /// Print both pruned trees ("yes" or "no").
    to_print: String,
    /// Seed of the pruning search.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let train = Dataset::from_path(&args.training_set)?;
    let validation = Dataset::from_path(&args.validation_set)?;
    let test = Dataset::from_path(&args.test_set)?;
    let pruner = Pruner::new(args.l, args.k)?.set_seed(args.seed);

    let entropy_tree = Tree::fit(&train, Heuristic::Entropy)?;
    println!(
        "Entropy Heuristic Test Results: {:.2} percent accuracy.",
        entropy_tree.accuracy(&test)?
    );

    let variance_tree = Tree::fit(&train, Heuristic::VarianceImpurity)?;
    println!(
        "Variance Impurity Heuristic Test Results: {:.2} percent accuracy.",
        variance_tree.accuracy(&test)?
    );

    let entropy_tree = pruner.prune_seeded(&entropy_tree, &validation)?;
    println!(
        "Entropy Heuristic Post Pruning Test Results: {:.2} percent accuracy.",
        entropy_tree.accuracy(&test)?
    );

    let variance_tree = pruner.prune_seeded(&variance_tree, &validation)?;
    println!(
        "Variance Impurity Heuristic Post Pruning Test Results: {:.2} percent accuracy.",
        variance_tree.accuracy(&test)?
    );

    if args.to_print.eq_ignore_ascii_case("yes") {
        println!("Printing Decision Tree Constructed Using Entropy Heuristic");
        print!("{}", entropy_tree);
        println!("Printing Decision Tree Constructed Using Variance Impurity Heuristic");
        print!("{}", variance_tree);
    }

    Ok(())
}
