use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that abort a run
#[derive(Error, Debug)]
pub enum LbError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: invalid network '{value}': {reason}")]
    InvalidNetwork {
        line: usize,
        value: String,
        reason: String,
    },

    #[error("line {line}: invalid address '{value}'")]
    InvalidAddress { line: usize, value: String },

    #[error("bad line pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Stream(#[from] io::Error),
}

impl LbError {
    /// Names the file a bare read error came from.
    pub(crate) fn in_file(self, path: &Path) -> Self {
        match self {
            LbError::Stream(source) => LbError::Io {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, LbError>;
