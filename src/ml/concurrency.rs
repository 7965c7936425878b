//! Concurrency-control outcome classifier.
//!
//! Trains a one-vs-rest pair of trees over a two-position label vector and
//! folds the pair back into a single outcome code at prediction time.

use std::path::Path;

use serde::Serialize;

use super::one_vs_rest::OneVsRest;
use super::{ClassifierError, TrainOptions, TrainingSummary};
use crate::features::{ConcurrencyFeatures, to_matrix};
use crate::training::{TrainingRecord, read_training_file};

const MODEL_NAME: &str = "concurrency-control";

/// Width of the label vector (outcome codes 1 and 2).
pub const LABEL_WIDTH: usize = 2;

/// Predicted concurrency-control outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConcurrencyOutcome {
    /// Code 1.
    SinglePartitionSafe,
    /// Code 2.
    ReadOnlySafe,
    /// Code 3, both label positions active.
    Neither,
}

impl ConcurrencyOutcome {
    pub fn code(self) -> u8 {
        match self {
            Self::SinglePartitionSafe => 1,
            Self::ReadOnlySafe => 2,
            Self::Neither => 3,
        }
    }

    /// Fold a predicted label vector into an outcome.
    ///
    /// `[1, 1]` wins first; otherwise an inactive second position yields code 1,
    /// so `[0, 0]` falls back to code 1.
    pub fn from_prediction(prediction: [usize; LABEL_WIDTH]) -> Self {
        match prediction {
            [1, 1] => Self::Neither,
            [_, 0] => Self::SinglePartitionSafe,
            _ => Self::ReadOnlySafe,
        }
    }
}

/// Examples selected from a set of training records.
#[derive(Debug, Clone, Default)]
pub struct ConcurrencyTrainingSet {
    pub features: Vec<ConcurrencyFeatures>,
    pub labels: Vec<[usize; LABEL_WIDTH]>,
    pub summary: TrainingSummary,
}

impl ConcurrencyTrainingSet {
    /// Select training examples from parsed records.
    ///
    /// A record is kept only when its primary outcome is nonzero and it has no
    /// nonzero secondary outcome. Records carrying two outcome codes are
    /// dropped rather than labelled as a combined class.
    pub fn select(records: &[TrainingRecord]) -> Result<Self, ClassifierError> {
        let mut set = Self::default();
        for (idx, record) in records.iter().enumerate() {
            let line = idx + 1;
            let primary = record
                .primary
                .ok_or(ClassifierError::MissingOutcome { line })?;
            if primary == 0.0 {
                set.summary.excluded_benign += 1;
                continue;
            }
            if record.secondary.is_some_and(|secondary| secondary != 0.0) {
                set.summary.excluded_multi_outcome += 1;
                continue;
            }
            let position = label_position(primary)
                .ok_or(ClassifierError::InvalidOutcome { line, value: primary })?;
            let mut label = [0; LABEL_WIDTH];
            label[position] = 1;
            set.features.push(record.concurrency_features());
            set.labels.push(label);
        }
        set.summary.lines_read = records.len();
        set.summary.examples = set.labels.len();
        tracing::debug!(
            "Selected {} {MODEL_NAME} examples ({} benign, {} with two outcomes excluded)",
            set.summary.examples,
            set.summary.excluded_benign,
            set.summary.excluded_multi_outcome
        );
        Ok(set)
    }
}

fn label_position(code: f64) -> Option<usize> {
    if code == 1.0 {
        Some(0)
    } else if code == 2.0 {
        Some(1)
    } else {
        None
    }
}

/// One-vs-rest tree ensemble choosing a concurrency-control outcome.
#[derive(Debug, Clone)]
pub struct ConcurrencyControlClassifier {
    ensemble: OneVsRest<LABEL_WIDTH>,
    summary: TrainingSummary,
}

impl ConcurrencyControlClassifier {
    /// Train from a training file with default options.
    pub fn train(path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        Self::train_with(path, &TrainOptions::default())
    }

    pub fn train_with(
        path: impl AsRef<Path>,
        options: &TrainOptions,
    ) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        let records = read_training_file(path, options.prefix_fields)?;
        let classifier = Self::from_records(&records, options)?;
        tracing::info!(
            "Trained {MODEL_NAME} model from {} ({} of {} lines used)",
            path.display(),
            classifier.summary.examples,
            classifier.summary.lines_read
        );
        Ok(classifier)
    }

    pub fn from_records(
        records: &[TrainingRecord],
        options: &TrainOptions,
    ) -> Result<Self, ClassifierError> {
        let set = ConcurrencyTrainingSet::select(records)?;
        if set.labels.is_empty() {
            return Err(ClassifierError::EmptyTrainingSet { model: MODEL_NAME });
        }
        let rows: Vec<[f64; ConcurrencyFeatures::LEN]> =
            set.features.iter().map(|features| features.to_array()).collect();
        let ensemble = OneVsRest::fit(&to_matrix(&rows), &set.labels, options.max_depth)?;
        Ok(Self {
            ensemble,
            summary: set.summary,
        })
    }

    pub fn predict(&self, features: ConcurrencyFeatures) -> ConcurrencyOutcome {
        ConcurrencyOutcome::from_prediction(self.ensemble.predict_one(features.to_array()))
    }

    /// Predict the outcome code (1, 2 or 3) from the four raw features.
    pub fn predict_code(&self, rec_avg: f64, hit_rate: f64, read_rate: f64, conf_rate: f64) -> u8 {
        self.predict(ConcurrencyFeatures::new(rec_avg, hit_rate, read_rate, conf_rate))
            .code()
    }

    pub fn summary(&self) -> &TrainingSummary {
        &self.summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::PartitionFeatures;

    fn record(read_rate: f64, primary: f64, secondary: Option<f64>) -> TrainingRecord {
        TrainingRecord {
            features: PartitionFeatures::new(0.5, 0.1, 2.0, 0.9, read_rate, 0.05),
            primary: Some(primary),
            secondary,
        }
    }

    #[test]
    fn tie_break_table() {
        assert_eq!(ConcurrencyOutcome::from_prediction([1, 1]).code(), 3);
        assert_eq!(ConcurrencyOutcome::from_prediction([0, 0]).code(), 1);
        assert_eq!(ConcurrencyOutcome::from_prediction([1, 0]).code(), 1);
        assert_eq!(ConcurrencyOutcome::from_prediction([0, 1]).code(), 2);
    }

    #[test]
    fn benign_records_contribute_nothing() {
        let set = ConcurrencyTrainingSet::select(&[record(0.5, 0.0, None)]).unwrap();
        assert!(set.labels.is_empty());
        assert_eq!(set.summary.excluded_benign, 1);
    }

    #[test]
    fn records_with_two_outcomes_are_excluded() {
        let records = [record(0.5, 1.0, Some(1.0)), record(0.5, 1.0, Some(2.0))];
        let set = ConcurrencyTrainingSet::select(&records).unwrap();
        assert!(set.labels.is_empty());
        assert_eq!(set.summary.excluded_multi_outcome, 2);
    }

    #[test]
    fn single_outcome_records_are_one_hot() {
        let records = [
            record(0.1, 1.0, None),
            record(0.2, 1.0, Some(0.0)),
            record(0.9, 2.0, None),
        ];
        let set = ConcurrencyTrainingSet::select(&records).unwrap();
        assert_eq!(set.labels, vec![[1, 0], [1, 0], [0, 1]]);
        assert_eq!(set.features[2].read_rate, 0.9);
        assert_eq!(set.summary.examples, 3);
        assert_eq!(set.summary.lines_read, 3);
    }

    #[test]
    fn unknown_outcome_code_is_rejected() {
        let err = ConcurrencyTrainingSet::select(&[record(0.5, 4.0, None)]).unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidOutcome { line: 1, .. }));
    }

    #[test]
    fn fractional_outcome_code_is_not_truncated() {
        let err = ConcurrencyTrainingSet::select(&[record(0.5, 1.0, None), record(0.5, 1.5, None)])
            .unwrap_err();
        assert!(matches!(
            err,
            ClassifierError::InvalidOutcome { line: 2, value } if value == 1.5
        ));
    }

    #[test]
    fn all_benign_file_cannot_train() {
        let records = [record(0.1, 0.0, None), record(0.2, 0.0, None)];
        let err = ConcurrencyControlClassifier::from_records(&records, &TrainOptions::default())
            .unwrap_err();
        assert!(matches!(err, ClassifierError::EmptyTrainingSet { .. }));
    }

    #[test]
    fn separates_outcomes_by_read_rate() {
        let records = [
            record(0.1, 1.0, None),
            record(0.2, 1.0, None),
            record(0.8, 2.0, None),
            record(0.9, 2.0, None),
        ];
        let classifier =
            ConcurrencyControlClassifier::from_records(&records, &TrainOptions::default()).unwrap();
        assert_eq!(classifier.predict_code(2.0, 0.9, 0.15, 0.05), 1);
        assert_eq!(
            classifier.predict(ConcurrencyFeatures::new(2.0, 0.9, 0.85, 0.05)),
            ConcurrencyOutcome::ReadOnlySafe
        );
    }
}
