use linfa::prelude::*;
use linfa_trees::DecisionTree;
use ndarray::{Array1, Array2};

use crate::features::single_row;

/// Binary classifier over `f64` features with `0`/`1` labels.
///
/// A label column with a single observed value cannot be split, so it is kept
/// as a constant instead of a fitted tree.
#[derive(Debug, Clone)]
pub enum BinaryModel {
    Constant(usize),
    Tree(DecisionTree<f64, usize>),
}

impl BinaryModel {
    /// Fit a depth-bounded decision tree on `records` (one row per example).
    pub fn fit(
        records: Array2<f64>,
        labels: Array1<usize>,
        max_depth: usize,
    ) -> Result<Self, linfa::Error> {
        if let Some(value) = constant_label(&labels) {
            return Ok(Self::Constant(value));
        }
        let dataset = Dataset::new(records, labels);
        let tree = DecisionTree::params()
            .max_depth(Some(max_depth))
            .fit(&dataset)?;
        Ok(Self::Tree(tree))
    }

    /// Predict the label for a single feature row.
    pub fn predict_one<const N: usize>(&self, row: [f64; N]) -> usize {
        match self {
            Self::Constant(value) => *value,
            Self::Tree(tree) => {
                let predicted: Array1<usize> = tree.predict(&single_row(row));
                predicted[0]
            }
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Self::Constant(_))
    }
}

fn constant_label(labels: &Array1<usize>) -> Option<usize> {
    let first = *labels.first()?;
    labels.iter().all(|&label| label == first).then_some(first)
}
