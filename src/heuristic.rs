//! Heuristic
//!
//! Impurity measures over label counts, and the gain of splitting a dataset on an attribute.
use crate::data::{ClassCounts, Dataset, LabelDomain};
use crate::errors::TreeError;
use crate::utils::items_to_strings;
use std::fmt;
use std::str::FromStr;

/// Impurity heuristic used to choose split attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heuristic {
    /// Information gain, using `-sum(p ln p)`.
    Entropy,
    /// Variance impurity gain, using `p0 * p1`.
    VarianceImpurity,
}

impl FromStr for Heuristic {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "entropy" => Ok(Heuristic::Entropy),
            "variance" | "variance-impurity" | "varianceimpurity" => Ok(Heuristic::VarianceImpurity),
            _ => Err(TreeError::ParseString(
                s.to_string(),
                "Heuristic".to_string(),
                items_to_strings(vec!["entropy", "variance", "variance-impurity"]),
            )),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Heuristic::Entropy => write!(f, "Entropy"),
            Heuristic::VarianceImpurity => write!(f, "Variance Impurity"),
        }
    }
}

pub trait ImpurityHeuristic {
    /// Impurity of a whole set of rows.
    fn impurity(counts: &ClassCounts) -> f64;

    /// Impurity of the rows sharing one attribute value, as used inside the gain.
    fn subset_impurity(counts: &ClassCounts) -> f64 {
        Self::impurity(counts)
    }

    /// `impurity(D) - sum_v |D_v| / |D| * subset_impurity(D_v)`, zero for an empty dataset.
    fn gain(data: &Dataset, attribute: usize, domain: &LabelDomain) -> f64 {
        if data.is_empty() {
            return 0.0;
        }
        let total = data.n_rows() as f64;
        let weighted: f64 = data
            .value_class_counts(attribute, domain)
            .values()
            .map(|c| c.total() as f64 / total * Self::subset_impurity(c))
            .sum();
        Self::impurity(&data.class_counts(domain)) - weighted
    }
}

pub struct EntropyImpurity {}
impl ImpurityHeuristic for EntropyImpurity {
    fn impurity(counts: &ClassCounts) -> f64 {
        let total = counts.total();
        if total == 0 {
            return 0.0;
        }
        counts
            .iter()
            .filter(|(_, c)| *c > 0)
            .map(|(_, c)| {
                let p = c as f64 / total as f64;
                -p * p.ln()
            })
            .sum()
    }
}

pub struct VarianceImpurity {}
impl ImpurityHeuristic for VarianceImpurity {
    fn impurity(counts: &ClassCounts) -> f64 {
        let total = counts.total();
        if total == 0 || counts.len() < 2 {
            return 0.0;
        }
        counts.iter().map(|(_, c)| c as f64 / total as f64).product()
    }

    // A subset missing any label contributes no impurity at all.
    fn subset_impurity(counts: &ClassCounts) -> f64 {
        if counts.iter().any(|(_, c)| c == 0) {
            return 0.0;
        }
        Self::impurity(counts)
    }
}

impl Heuristic {
    pub fn gain(&self, data: &Dataset, attribute: usize, domain: &LabelDomain) -> f64 {
        match self {
            Heuristic::Entropy => EntropyImpurity::gain(data, attribute, domain),
            Heuristic::VarianceImpurity => VarianceImpurity::gain(data, attribute, domain),
        }
    }

    /// Index of the attribute with the largest gain, the first one in header order on ties.
    /// An empty dataset selects the first attribute.
    pub fn best_attribute(&self, data: &Dataset, domain: &LabelDomain) -> usize {
        if data.is_empty() {
            return 0;
        }
        let mut best = 0;
        let mut best_gain = f64::NEG_INFINITY;
        for attribute in 0..data.attributes().len() {
            let gain = self.gain(data, attribute, domain);
            if gain > best_gain {
                best = attribute;
                best_gain = gain;
            }
        }
        best
    }
}
