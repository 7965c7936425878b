//! Location of `classifier.toml` and the log directory.
//!
//! `SMALLBANK_CLASSIFIER_HOME` names the base directory when set; otherwise the
//! OS config directory is used.

use std::path::PathBuf;

use directories::BaseDirs;
use thiserror::Error;

/// Directory created under the base for config and logs.
pub const APP_DIR_NAME: &str = ".smallbank-classifier";

/// Environment variable overriding the base directory.
pub const HOME_ENV_VAR: &str = "SMALLBANK_CLASSIFIER_HOME";

#[derive(Debug, Error)]
pub enum AppDirError {
    #[error("Neither {HOME_ENV_VAR} nor an OS config directory is available")]
    NoBaseDir,
    #[error("Failed to create {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Application root, created on first use.
pub fn app_root_dir() -> Result<PathBuf, AppDirError> {
    let env_home = std::env::var_os(HOME_ENV_VAR).map(PathBuf::from);
    let os_config = || BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf());
    let root = resolve_root(env_home, os_config).ok_or(AppDirError::NoBaseDir)?;
    ensure_dir(root)
}

/// `logs/` under the application root, created on first use.
pub fn logs_dir() -> Result<PathBuf, AppDirError> {
    ensure_dir(app_root_dir()?.join("logs"))
}

/// An empty override is treated as unset.
fn resolve_root(
    env_home: Option<PathBuf>,
    os_config: impl FnOnce() -> Option<PathBuf>,
) -> Option<PathBuf> {
    env_home
        .filter(|path| !path.as_os_str().is_empty())
        .or_else(os_config)
        .map(|base| base.join(APP_DIR_NAME))
}

fn ensure_dir(path: PathBuf) -> Result<PathBuf, AppDirError> {
    match std::fs::create_dir_all(&path) {
        Ok(()) => Ok(path),
        Err(source) => Err(AppDirError::CreateDir { path, source }),
    }
}
