//! Error types for library loading and player invocation

use std::path::PathBuf;
use thiserror::Error;

/// Failure to load the Rhythmbox library file
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Could not read library {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed library XML at byte {position}: {message}")]
    Xml { position: u64, message: String },

    #[error("Unexpected library structure: {0}")]
    Schema(String),

    #[error("Entry {entry}: invalid <{field}> value {value:?}")]
    InvalidField {
        entry: usize,
        field: String,
        value: String,
    },
}

/// Failure to run a command against the external player
///
/// The `Display` output is the text shown in place of the command's output.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Failed to run {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{binary} exited with {status}: {stderr}")]
    Failed {
        binary: String,
        status: String,
        stderr: String,
    },
}
