use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to write summary: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize summary: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Invalid pattern for metric '{key}': {reason}")]
    Pattern { key: String, reason: String },

    #[error("Run directory does not exist: {}", .0.display())]
    RunDirNotFound(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;
