use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

pub(crate) type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub(crate) enum Error {
    #[error("clash-tools must be run as root (use sudo).")]
    PrivilegeDenied,

    #[error("failed to create directory {path}")]
    DirectoryCreate { path: PathBuf, source: io::Error },

    #[error("embedded asset {0} is not bundled in this binary")]
    AssetMissing(String),

    #[error("failed to read {path}")]
    Io { path: PathBuf, source: io::Error },

    #[error("failed to write tmp file {path}")]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to move tmp file to {path}")]
    Rename { path: PathBuf, source: io::Error },

    #[error("failed to set permissions on {path}")]
    Chmod { path: PathBuf, source: io::Error },

    #[error("config file not found: {0}")]
    ConfigMissing(PathBuf),

    #[error("failed to parse {path}")]
    Parse {
        path: PathBuf,
        source: serde_yaml_ng::Error,
    },

    #[error("{field} not found in config: {path}")]
    FieldMissing { field: &'static str, path: PathBuf },

    #[error("failed to start {program}")]
    Spawn { program: String, source: io::Error },

    #[error("{program} failed: {status}")]
    ChildProcess { program: String, status: ExitStatus },

    #[error("failed to read template config file {path}")]
    TemplateUnavailable { path: PathBuf, source: io::Error },
}
