//! Training-file reader for the tab-separated workload samples.
//!
//! Each line carries an opaque prefix, six numeric workload features and up
//! to two outcome codes. The format has no header and no version marker.

mod file;
mod record;

pub use file::{TrainingFileError, read_training_file};
pub use record::{DEFAULT_PREFIX_FIELDS, FEATURE_LEN, RecordError, TrainingRecord};
