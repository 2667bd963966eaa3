use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the library.
///
/// The gesture path itself never fails; only configuration I/O does.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write config {path}: {source}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("no config directory available on this platform")]
    NoConfigDir,
}

pub type Result<T> = std::result::Result<T, Error>;
