//! Workload classifiers backed by `linfa` decision trees.
//!
//! Both classifiers are trained once from a training file at construction and
//! are immutable afterwards. Tree induction is delegated to `linfa-trees`; this
//! module only marshals features and labels.

pub mod concurrency;
pub mod one_vs_rest;
pub mod partition;
pub mod tree;

use serde::Serialize;
use thiserror::Error;

use crate::training::{DEFAULT_PREFIX_FIELDS, TrainingFileError};

pub use concurrency::{ConcurrencyControlClassifier, ConcurrencyOutcome, ConcurrencyTrainingSet};
pub use partition::{PartitionOutcome, PartitioningClassifier};

/// Default depth bound for every fitted tree.
pub const DEFAULT_MAX_DEPTH: usize = 6;

/// Errors raised while training a classifier.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error(transparent)]
    TrainingFile(#[from] TrainingFileError),
    /// A record has no primary outcome column.
    #[error("Training record {line} has no outcome column")]
    MissingOutcome {
        /// 1-based record position.
        line: usize,
    },
    /// A primary outcome code outside the known classes.
    #[error("Training record {line} has unknown outcome code {value}")]
    InvalidOutcome { line: usize, value: f64 },
    /// No examples survived filtering, so nothing can be fitted.
    #[error("No training examples available for the {model} model")]
    EmptyTrainingSet { model: &'static str },
    #[error("Decision tree fit failed: {0}")]
    Fit(#[from] linfa::Error),
}

/// Knobs shared by both classifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainOptions {
    /// Depth bound for each decision tree.
    pub max_depth: usize,
    /// Opaque leading columns skipped on each training line.
    pub prefix_fields: usize,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            prefix_fields: DEFAULT_PREFIX_FIELDS,
        }
    }
}

/// Bookkeeping of how a training file was turned into examples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TrainingSummary {
    /// Records read from the source.
    pub lines_read: usize,
    /// Examples handed to the fit call.
    pub examples: usize,
    /// Records skipped because the primary outcome was 0.
    pub excluded_benign: usize,
    /// Records skipped because two outcome codes were present.
    pub excluded_multi_outcome: usize,
}
