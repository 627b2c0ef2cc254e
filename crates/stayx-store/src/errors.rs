//! Error handling for stayx-store

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Failures while persisting or reloading the registry file
///
/// These are never recovered locally. The dispatcher propagates them to the
/// process boundary, unlike command validation errors which print a
/// diagnostic and return to the prompt.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the registry file failed
    #[error("registry file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The registry file held something other than the expected JSON shape
    #[error("registry serialization: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
}
