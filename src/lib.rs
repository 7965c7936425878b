//! Decision-tree classifiers that pick execution strategies for the Smallbank
//! partitioning and concurrency-control testbed from workload features.
/// Application directory resolution.
pub mod app_dirs;
/// TOML configuration for training.
pub mod config;
/// Fixed-arity feature vectors.
pub mod features;
/// Tracing subscriber setup for binaries.
pub mod logging;
/// Classifier wrappers over `linfa` trees.
pub mod ml;
/// Training-file parsing.
pub mod training;

pub use features::{ConcurrencyFeatures, PartitionFeatures};
pub use ml::{
    ClassifierError, ConcurrencyControlClassifier, ConcurrencyOutcome, PartitionOutcome,
    PartitioningClassifier, TrainOptions, TrainingSummary,
};
