//! Library descriptor records.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{ManifestError, Result};

/// One entry of `lib-descriptor.json`: a single library's include mapping,
/// compile-include directory, link name, and per-memory-model link
/// directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryDescriptor {
    /// Header base names this library satisfies (e.g. `"simpletools"` for
    /// `#include "simpletools.h"`).
    pub include: Vec<String>,
    /// Include-path suffix passed to the compiler via `-I`.
    pub libdir: String,
    /// Link library name, passed as `-l<name>`.
    pub name: String,
    /// Memory-model name (e.g. `"cmm"`) to prebuilt library directory.
    pub memorymodel: HashMap<String, String>,
}

impl LibraryDescriptor {
    /// Whether this library satisfies the given header base name.
    pub fn satisfies(&self, include: &str) -> bool {
        self.include.iter().any(|name| name == include)
    }

    /// The link directory for the given memory model.
    pub fn memory_model_dir(&self, model: &str) -> Result<&str> {
        self.memorymodel
            .get(model)
            .map(String::as_str)
            .ok_or_else(|| ManifestError::MissingMemoryModel {
                name: self.name.clone(),
                model: model.to_string(),
            })
    }
}
