use crate::errors::TreeError;

/// Compare to metric values, determining if b is better.
/// If one of them is NaN favor the non NaN value.
/// If both are NaN, consider the first value to be better.
/// Equal values are never better.
pub fn is_comparison_better(value: f64, comparison: f64, maximize: bool) -> bool {
    match (value.is_nan(), comparison.is_nan()) {
        // Both nan, comparison is not better,
        // Or comparison is nan, also not better
        (true, true) | (false, true) => false,
        // comparison is not Nan, it's better
        (true, false) => true,
        // Perform numerical comparison.
        (false, false) => {
            if maximize {
                value < comparison
            } else {
                value > comparison
            }
        }
    }
}

/// Percentage of predictions equal to the true labels.
///
/// # Errors
///
/// [`TreeError::EmptyDataset`] when there is nothing to score.
pub fn accuracy(y: &[&str], yhat: &[&str]) -> Result<f64, TreeError> {
    if y.is_empty() {
        return Err(TreeError::EmptyDataset);
    }
    let matches = y.iter().zip(yhat).filter(|(y_, yhat_)| y_ == yhat_).count();
    Ok(100.0 * matches as f64 / y.len() as f64)
}
