use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use reptree::{Dataset, Heuristic, Node, Pruner, Tree, TreeError};
use std::error::Error;

fn load(name: &str) -> Result<Dataset, TreeError> {
    Dataset::from_path(format!("resources/{}.csv", name))
}

#[test]
fn test_separable_end_to_end() -> Result<(), Box<dyn Error>> {
    let data = load("separable")?;
    let tree = reptree::train(&data, Heuristic::Entropy)?;
    match &tree.root {
        Node::Internal {
            attribute, children, ..
        } => {
            assert_eq!(attribute, "A");
            assert_eq!(children.len(), 2);
            assert_eq!(children["0"], Node::leaf("0"));
            assert_eq!(children["1"], Node::leaf("1"));
        }
        Node::Leaf { .. } => panic!("expected a split on A"),
    }
    assert_relative_eq!(reptree::evaluate(&data, &tree)?, 100.0);
    assert_eq!(reptree::count_internal_nodes(&tree), 1);
    assert_eq!(format!("{}", tree), "A = 0 : 0\nA = 1 : 1\n");
    Ok(())
}

#[test]
fn test_ragged_file_is_rejected() {
    match load("ragged") {
        Err(TreeError::Format { row, expected, found }) => {
            assert_eq!(row, 2);
            assert_eq!(expected, 3);
            assert_eq!(found, 2);
        }
        other => panic!("expected a format error, got {:?}", other),
    }
}

#[test]
fn test_repeated_column_name_is_rejected() {
    let csv = "A,A,label\n0,1,0\n1,0,1\n0,0,0\n1,1,1\n";
    match Dataset::from_reader(csv.as_bytes()) {
        Err(TreeError::DuplicateColumn(name)) => assert_eq!(name, "A"),
        other => panic!("expected a duplicate column error, got {:?}", other),
    }
}

#[test]
fn test_fit_training_set() -> Result<(), Box<dyn Error>> {
    let train = load("training_set")?;
    let test = load("test_set")?;
    for heuristic in [Heuristic::Entropy, Heuristic::VarianceImpurity] {
        let tree = Tree::fit(&train, heuristic)?;
        match &tree.root {
            Node::Internal { attribute, .. } => assert_eq!(attribute, "XD"),
            Node::Leaf { .. } => panic!("expected an internal root"),
        }
        assert!(tree.accuracy(&train)? > 90.0);
        let test_accuracy = tree.accuracy(&test)?;
        assert!((0.0..=100.0).contains(&test_accuracy));
        assert!(tree.n_internal_nodes() > 1);
        assert!(tree.depth() <= train.attributes().len());
    }
    Ok(())
}

#[test]
fn test_prune_training_set() -> Result<(), Box<dyn Error>> {
    let train = load("training_set")?;
    let validation = load("validation_set")?;
    for heuristic in [Heuristic::Entropy, Heuristic::VarianceImpurity] {
        let tree = Tree::fit(&train, heuristic)?;
        let before = tree.accuracy(&validation)?;
        let mut rng = StdRng::seed_from_u64(42);
        let pruned = reptree::prune(&tree, 50, 5, &validation, &mut rng)?;
        assert!(pruned.accuracy(&validation)? > before);
        assert!(pruned.n_internal_nodes() < tree.n_internal_nodes());
    }
    Ok(())
}

#[test]
fn test_prune_reproducible_with_seed() -> Result<(), Box<dyn Error>> {
    let train = load("training_set")?;
    let validation = load("validation_set")?;
    let tree = Tree::fit(&train, Heuristic::Entropy)?;
    let first = reptree::prune(&tree, 25, 4, &validation, &mut StdRng::seed_from_u64(3))?;
    let second = reptree::prune(&tree, 25, 4, &validation, &mut StdRng::seed_from_u64(3))?;
    assert_eq!(first, second);

    let sequential = Pruner::new(25, 4)?
        .set_seed(3)
        .set_parallel(false)
        .prune_seeded(&tree, &validation)?;
    let parallel = Pruner::new(25, 4)?.set_seed(3).prune_seeded(&tree, &validation)?;
    assert_eq!(sequential, parallel);
    Ok(())
}

#[test]
fn test_prune_invalid_arguments() -> Result<(), Box<dyn Error>> {
    let data = load("separable")?;
    let tree = Tree::fit(&data, Heuristic::Entropy)?;
    let mut rng = StdRng::seed_from_u64(0);
    assert!(matches!(
        reptree::prune(&tree, 0, 1, &data, &mut rng),
        Err(TreeError::InvalidParameter(..))
    ));
    assert!(matches!(
        reptree::prune(&tree, 1, 0, &data, &mut rng),
        Err(TreeError::InvalidParameter(..))
    ));
    Ok(())
}
