//! Errors raised while loading tuning files.  The simulation itself never fails.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The tuning file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The tuning file is not valid TOML for `Tuning`
    #[error("invalid tuning file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Values parsed but break a gameplay constraint
    #[error("invalid tuning: {0}")]
    InvalidTuning(String),
}

pub type Result<T> = std::result::Result<T, Error>;
