//! Errors
//!
//! Custom error types used throughout the `reptree` crate.
use thiserror::Error;

/// Errors that can occur while loading data, growing, evaluating or pruning a tree.
#[derive(Debug, Error)]
pub enum TreeError {
    /// A data row does not have as many fields as the header.
    #[error("Row {row} has {found} fields, but the header has {expected}.")]
    Format { row: usize, expected: usize, found: usize },
    /// An internal node has no child for the value seen in a row.
    #[error("No branch for value {value:?} of attribute {attribute:?}.")]
    MissingBranch { attribute: String, value: String },
    /// A tree tests an attribute the dataset header does not contain.
    #[error("Attribute {0:?} is not present in the dataset header.")]
    UnknownAttribute(String),
    /// The dataset has no rows.
    #[error("The dataset has no rows.")]
    EmptyDataset,
    /// The dataset header has no columns, so there is no label column.
    #[error("The dataset header is empty, at least a label column is required.")]
    EmptyHeader,
    /// Two header columns share a name, so attributes cannot be looked up by name.
    #[error("Column {0:?} appears more than once in the dataset header.")]
    DuplicateColumn(String),
    /// More than two distinct labels were found in the training data.
    #[error("Only binary labels are supported, found labels: {0}")]
    NonBinaryLabels(String),
    /// Invalid value parsing.
    #[error("Invalid value {0} passed for {1}, expected one of {2}.")]
    ParseString(String, String, String),
    /// First value is the name of the parameter, second is expected, third is what was passed.
    #[error("Invalid parameter value passed for {0}, expected {1} but {2} provided.")]
    InvalidParameter(String, String, String),
    /// Unable to read a dataset from a file.
    #[error("Unable to read dataset from file {0}")]
    UnableToRead(String),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}
