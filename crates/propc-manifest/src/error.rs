//! Manifest error types.

use std::path::PathBuf;

/// Errors that can occur while loading or querying a library manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// Neither the project override nor the bundled default exists.
    #[error(
        "no library manifest found: tried {} and {}",
        .override_path.display(),
        .bundled_path.display()
    )]
    NoManifest {
        override_path: PathBuf,
        bundled_path: PathBuf,
    },

    /// Manifest file exists but could not be read.
    #[error("reading {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Manifest file is not a valid descriptor array.
    #[error("parsing {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A descriptor does not define a directory for the requested memory model.
    #[error("library '{name}' has no '{model}' memory model directory")]
    MissingMemoryModel { name: String, model: String },
}

/// Result type alias for manifest operations.
pub type Result<T> = std::result::Result<T, ManifestError>;
