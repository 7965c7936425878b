use ndarray::{Array1, Array2};

use super::tree::BinaryModel;

/// One-vs-rest ensemble: one independent binary tree per label position.
#[derive(Debug, Clone)]
pub struct OneVsRest<const K: usize> {
    estimators: Vec<BinaryModel>,
}

impl<const K: usize> OneVsRest<K> {
    /// Fit `K` binary trees, the `k`-th on column `k` of `labels`.
    pub fn fit(
        records: &Array2<f64>,
        labels: &[[usize; K]],
        max_depth: usize,
    ) -> Result<Self, linfa::Error> {
        let mut estimators = Vec::with_capacity(K);
        for position in 0..K {
            let column: Array1<usize> = labels.iter().map(|label| label[position]).collect();
            let estimator = BinaryModel::fit(records.clone(), column, max_depth)?;
            if estimator.is_constant() {
                tracing::warn!(
                    "Label position {position} has a single observed value; using a constant predictor"
                );
            }
            estimators.push(estimator);
        }
        Ok(Self { estimators })
    }

    /// Predict the label vector for one feature row.
    pub fn predict_one<const N: usize>(&self, row: [f64; N]) -> [usize; K] {
        std::array::from_fn(|position| self.estimators[position].predict_one(row))
    }

    #[cfg(test)]
    fn estimators(&self) -> &[BinaryModel] {
        &self.estimators
    }
}
