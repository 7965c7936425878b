//! Binary "hot partition" classifier over the full six-feature signature.

use std::path::Path;

use ndarray::Array1;
use serde::Serialize;

use super::tree::BinaryModel;
use super::{ClassifierError, TrainOptions, TrainingSummary};
use crate::features::{PartitionFeatures, to_matrix};
use crate::training::{TrainingRecord, read_training_file};

const MODEL_NAME: &str = "partitioning";

/// Predicted partition condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PartitionOutcome {
    /// No conflict expected (code 0).
    Benign,
    /// The partition is expected to run hot (code 1).
    Hot,
}

impl PartitionOutcome {
    pub fn code(self) -> u8 {
        match self {
            Self::Benign => 0,
            Self::Hot => 1,
        }
    }

    fn from_label(label: usize) -> Self {
        if label == 0 { Self::Benign } else { Self::Hot }
    }
}

/// Decision tree predicting whether a partition will run hot.
#[derive(Debug, Clone)]
pub struct PartitioningClassifier {
    model: BinaryModel,
    summary: TrainingSummary,
}

impl PartitioningClassifier {
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
            "Trained {MODEL_NAME} model from {} ({} examples)",
            path.display(),
            classifier.summary.examples
        );
        Ok(classifier)
    }

    /// Train from already-parsed records.
    ///
    /// Every record contributes one example: label 0 when its primary outcome
    /// is 0, otherwise 1.
    pub fn from_records(
        records: &[TrainingRecord],
        options: &TrainOptions,
    ) -> Result<Self, ClassifierError> {
        let mut rows = Vec::with_capacity(records.len());
        let mut labels = Vec::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            let primary = record
                .primary
                .ok_or(ClassifierError::MissingOutcome { line: idx + 1 })?;
            rows.push(record.features.to_array());
            labels.push(usize::from(primary != 0.0));
        }
        if rows.is_empty() {
            return Err(ClassifierError::EmptyTrainingSet { model: MODEL_NAME });
        }
        let model = BinaryModel::fit(to_matrix(&rows), Array1::from(labels), options.max_depth)?;
        let summary = TrainingSummary {
            lines_read: records.len(),
            examples: rows.len(),
            ..TrainingSummary::default()
        };
        Ok(Self { model, summary })
    }

    pub fn predict(&self, features: PartitionFeatures) -> PartitionOutcome {
        PartitionOutcome::from_label(self.model.predict_one(features.to_array()))
    }

    /// Predict the outcome code (0 or 1) from the six raw features.
    pub fn predict_code(
        &self,
        part_avg: f64,
        part_skew: f64,
        rec_avg: f64,
        hit_rate: f64,
        read_rate: f64,
        conf_rate: f64,
    ) -> u8 {
        let features =
            PartitionFeatures::new(part_avg, part_skew, rec_avg, hit_rate, read_rate, conf_rate);
        self.predict(features).code()
    }

    pub fn summary(&self) -> &TrainingSummary {
        &self.summary
    }
}
