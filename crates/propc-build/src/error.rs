//! Build orchestration errors.

use std::path::PathBuf;

use propc_manifest::ManifestError;

/// Errors that can occur while orchestrating a compile request.
///
/// A compiler or loader that runs and reports failure is NOT an error — that
/// outcome is carried in the result record. These variants cover the cases
/// where the orchestration itself cannot proceed.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Library manifest could not be loaded or queried.
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Temporary source or binary file could not be created.
    #[error("creating temporary file: {source}")]
    TempFile { source: std::io::Error },

    /// Source text could not be written to the temporary file.
    #[error("writing source to {}: {source}", .path.display())]
    WriteSource {
        path: PathBuf,
        source: std::io::Error,
    },

    /// External tool could not be started at all.
    #[error("spawning {tool}: {source}")]
    Spawn {
        tool: String,
        source: std::io::Error,
    },

    /// Waiting on a running external tool failed.
    #[error("waiting on {tool}: {source}")]
    Wait {
        tool: String,
        source: std::io::Error,
    },

    /// External tool exceeded the configured timeout and was killed.
    #[error("{tool} did not finish within {secs}s")]
    Timeout { tool: String, secs: u64 },

    /// Binary artifact could not be removed (NotFound is tolerated and
    /// never reaches this variant).
    #[error("removing {}: {source}", .path.display())]
    Cleanup {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type alias for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;
