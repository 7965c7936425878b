use thiserror::Error;

use crate::features::{ConcurrencyFeatures, PartitionFeatures};

/// Number of opaque leading columns on every training line.
pub const DEFAULT_PREFIX_FIELDS: usize = 5;

/// Number of numeric feature columns following the prefix.
pub const FEATURE_LEN: usize = 6;

/// Errors raised while parsing a single training line.
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    /// A trailing column could not be parsed as a float.
    #[error("column {column} is not numeric: {value:?}")]
    ParseField {
        /// 0-based column index counted from the start of the line.
        column: usize,
        /// Raw text of the offending column.
        value: String,
    },
    /// A trailing column parsed to NaN or an infinity.
    #[error("column {column} is not finite: {value:?}")]
    NonFinite { column: usize, value: String },
    /// The line ends before all required trailing columns.
    #[error("expected at least {expected} columns after the prefix, found {found}")]
    MissingFields { expected: usize, found: usize },
}

/// One parsed line of a training file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingRecord {
    /// The six workload features in file order.
    pub features: PartitionFeatures,
    /// Primary outcome code: 0 is benign, otherwise a class index.
    pub primary: Option<f64>,
    /// Secondary outcome code, present when a second class applies.
    pub secondary: Option<f64>,
}

impl TrainingRecord {
    /// Parse a tab-separated line, skipping `prefix_fields` leading columns.
    ///
    /// At least the six feature columns must follow the prefix; the outcome
    /// columns are optional here and enforced by the model that needs them.
    /// Every trailing column must parse as a finite float, including any
    /// beyond the two outcome codes.
    pub fn parse(line: &str, prefix_fields: usize) -> Result<Self, RecordError> {
        let trimmed = line.trim();
        let columns: Vec<&str> = trimmed.split('\t').collect();
        let trailing = columns.get(prefix_fields..).unwrap_or(&[]);
        let mut values = Vec::with_capacity(trailing.len());
        for (offset, raw) in trailing.iter().enumerate() {
            let value = raw
                .trim()
                .parse::<f64>()
                .map_err(|_| RecordError::ParseField {
                    column: prefix_fields + offset,
                    value: (*raw).to_string(),
                })?;
            if !value.is_finite() {
                return Err(RecordError::NonFinite {
                    column: prefix_fields + offset,
                    value: (*raw).to_string(),
                });
            }
            values.push(value);
        }
        if values.len() < FEATURE_LEN {
            return Err(RecordError::MissingFields {
                expected: FEATURE_LEN,
                found: values.len(),
            });
        }
        Ok(Self {
            features: PartitionFeatures {
                part_avg: values[0],
                part_skew: values[1],
                rec_avg: values[2],
                hit_rate: values[3],
                read_rate: values[4],
                conf_rate: values[5],
            },
            primary: values.get(FEATURE_LEN).copied(),
            secondary: values.get(FEATURE_LEN + 1).copied(),
        })
    }

    /// Feature subset used by the concurrency-control model.
    pub fn concurrency_features(&self) -> ConcurrencyFeatures {
        ConcurrencyFeatures::from(self.features)
    }
}
