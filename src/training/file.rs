use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::record::{RecordError, TrainingRecord};

/// Errors raised while reading a training file.
#[derive(Debug, Error)]
pub enum TrainingFileError {
    /// The file could not be opened.
    #[error("Failed to open training file {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Reading a line failed part-way through the file.
    #[error("Failed to read {path} at line {line}: {source}")]
    Read {
        path: PathBuf,
        line: usize,
        source: std::io::Error,
    },
    /// A line did not parse as a training record.
    #[error("Malformed training line {line} in {path}: {source}")]
    Malformed {
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        source: RecordError,
    },
}

/// Read every line of a training file into records.
///
/// The whole file is parsed before returning; the first malformed line aborts
/// the read.
pub fn read_training_file(
    path: &Path,
    prefix_fields: usize,
) -> Result<Vec<TrainingRecord>, TrainingFileError> {
    let file = File::open(path).map_err(|source| TrainingFileError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|source| TrainingFileError::Read {
            path: path.to_path_buf(),
            line: line_no,
            source,
        })?;
        let record =
            TrainingRecord::parse(&line, prefix_fields).map_err(|source| {
                TrainingFileError::Malformed {
                    path: path.to_path_buf(),
                    line: line_no,
                    source,
                }
            })?;
        records.push(record);
    }
    tracing::debug!(
        "Read {} training records from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn reads_all_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("train.out");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "0\t0\t0\t0\t0\t0.1\t0.2\t0.3\t0.4\t0.5\t0.6\t0").unwrap();
        writeln!(file, "1\t0\t0\t0\t0\t0.1\t0.2\t0.3\t0.4\t0.5\t0.6\t1\t2").unwrap();
        drop(file);

        let records = read_training_file(&path, 5).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].secondary, Some(2.0));
    }

    #[test]
    fn reports_line_number_of_malformed_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("train.out");
        std::fs::write(
            &path,
            "0\t0\t0\t0\t0\t0.1\t0.2\t0.3\t0.4\t0.5\t0.6\t0\n0\t0\t0\t0\t0\t0.1\t0.2\n",
        )
        .unwrap();

        let err = read_training_file(&path, 5).unwrap_err();
        assert!(matches!(err, TrainingFileError::Malformed { line: 2, .. }));
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let dir = tempdir().unwrap();
        let err = read_training_file(&dir.path().join("absent.out"), 5).unwrap_err();
        assert!(matches!(err, TrainingFileError::Open { .. }));
    }
}
