//! The per-request result record.

use serde::{Deserialize, Serialize};

/// Outcome of one compile (and optional load) request.
///
/// Serializes with the wire keys `compile-success`, `load-success`,
/// `success`, and `message`; `load-success` is present only when the action
/// called the loader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileResult {
    /// Whether the compiler exited with code zero.
    #[serde(rename = "compile-success")]
    pub compile_success: bool,
    /// Whether the loader succeeded; `None` when no load was attempted.
    #[serde(
        rename = "load-success",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub load_success: Option<bool>,
    /// Compile success ANDed with load success (when a load ran).
    pub success: bool,
    /// Human-readable compiler output, with loader output appended.
    pub message: String,
}
