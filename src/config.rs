//! TOML configuration for classifier training.
//!
//! Settings live in `classifier.toml` inside the application directory. A
//! missing file, or a missing key, falls back to the defaults below.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs;
use crate::ml::{DEFAULT_MAX_DEPTH, TrainOptions};
use crate::training::DEFAULT_PREFIX_FIELDS;

/// File name of the configuration inside the application directory.
pub const CONFIG_FILE_NAME: &str = "classifier.toml";

/// Errors that may occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to resolve config directory: {0}")]
    AppDir(#[from] app_dirs::AppDirError),
    /// Failed to read the config file.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to parse TOML config.
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Benchmark whose workload samples a training file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Benchmark {
    Single,
    Smallbank,
    Tpcc,
}

impl Benchmark {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "single" => Some(Self::Single),
            "smallbank" | "sb" => Some(Self::Smallbank),
            "tpcc" => Some(Self::Tpcc),
            _ => None,
        }
    }
}

/// Which of the two classifiers a training file feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Partition,
    Concurrency,
}

impl ModelKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "partition" | "part" => Some(Self::Partition),
            "concurrency" | "occ" | "cc" => Some(Self::Concurrency),
            _ => None,
        }
    }
}

/// Location of the per-benchmark training files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingPaths {
    /// Directory holding the files; relative paths resolve against the config file's directory.
    pub dir: PathBuf,
    pub single_part: String,
    pub single_occ: String,
    pub smallbank_part: String,
    pub smallbank_occ: String,
    pub tpcc_part: String,
    pub tpcc_occ: String,
}

impl Default for TrainingPaths {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("classifier"),
            single_part: "single-part-train.out".into(),
            single_occ: "single-occ-train.out".into(),
            smallbank_part: "sb-part-train.out".into(),
            smallbank_occ: "sb-occ-train.out".into(),
            tpcc_part: "tpcc-part-train.out".into(),
            tpcc_occ: "tpcc-occ-train.out".into(),
        }
    }
}

impl TrainingPaths {
    /// Training file for a benchmark and model kind.
    pub fn path_for(&self, benchmark: Benchmark, kind: ModelKind) -> PathBuf {
        let name = match (benchmark, kind) {
            (Benchmark::Single, ModelKind::Partition) => &self.single_part,
            (Benchmark::Single, ModelKind::Concurrency) => &self.single_occ,
            (Benchmark::Smallbank, ModelKind::Partition) => &self.smallbank_part,
            (Benchmark::Smallbank, ModelKind::Concurrency) => &self.smallbank_occ,
            (Benchmark::Tpcc, ModelKind::Partition) => &self.tpcc_part,
            (Benchmark::Tpcc, ModelKind::Concurrency) => &self.tpcc_occ,
        };
        self.dir.join(name)
    }
}

/// Settings for the developer binaries' tracing subscriber.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter used when `RUST_LOG` is unset.
    pub default_filter: String,
    /// Write a per-launch log file in addition to stderr.
    pub file: bool,
    /// Maximum number of log files to retain.
    pub max_files: usize,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            default_filter: "info".into(),
            file: true,
            max_files: 10,
        }
    }
}

/// Top-level contents of `classifier.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub max_depth: usize,
    pub prefix_fields: usize,
    pub training: TrainingPaths,
    pub logging: LoggingSettings,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            prefix_fields: DEFAULT_PREFIX_FIELDS,
            training: TrainingPaths::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl ClassifierConfig {
    pub fn train_options(&self) -> TrainOptions {
        TrainOptions {
            max_depth: self.max_depth,
            prefix_fields: self.prefix_fields,
        }
    }
}

/// Resolve the configuration file path inside the application directory.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(app_dirs::app_root_dir()?.join(CONFIG_FILE_NAME))
}

/// Load configuration from the application directory, returning defaults if missing.
pub fn load_or_default() -> Result<ClassifierConfig, ConfigError> {
    load_from(&config_path()?)
}

/// Load configuration from `path`, returning defaults if the file does not exist.
pub fn load_from(path: &Path) -> Result<ClassifierConfig, ConfigError> {
    if !path.exists() {
        return Ok(ClassifierConfig::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config: ClassifierConfig =
        toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })?;
    if config.training.dir.is_relative()
        && let Some(parent) = path.parent()
    {
        config.training.dir = parent.join(&config.training.dir);
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = load_from(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, ClassifierConfig::default());
        assert_eq!(config.train_options(), TrainOptions::default());
    }

    #[test]
    fn partial_file_overrides_only_given_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            "max_depth = 4\n\n[training]\ndir = \"data\"\nsmallbank_occ = \"occ.tsv\"\n",
        )
        .unwrap();

        let config = load_from(&path).unwrap();
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.prefix_fields, DEFAULT_PREFIX_FIELDS);
        assert_eq!(
            config
                .training
                .path_for(Benchmark::Smallbank, ModelKind::Concurrency),
            dir.path().join("data").join("occ.tsv")
        );
        assert_eq!(
            config.training.path_for(Benchmark::Tpcc, ModelKind::Partition),
            dir.path().join("data").join("tpcc-part-train.out")
        );
    }

    #[test]
    fn invalid_toml_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "max_depth = \"deep\"").unwrap();
        assert!(matches!(
            load_from(&path),
            Err(ConfigError::ParseToml { .. })
        ));
    }

    #[test]
    fn benchmark_and_model_names_parse() {
        assert_eq!(Benchmark::parse("SB"), Some(Benchmark::Smallbank));
        assert_eq!(ModelKind::parse("occ"), Some(ModelKind::Concurrency));
        assert_eq!(ModelKind::parse("index"), None);
    }
}
