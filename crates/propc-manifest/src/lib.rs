//! Library manifest model for the propc toolchain.
//!
//! A Propeller C library installation describes itself with a
//! `lib-descriptor.json` file: a JSON array of descriptors, one per library,
//! mapping header names to include directories and per-memory-model link
//! directories. This crate loads that manifest (preferring a project-local
//! override over the bundled default) and resolves scanned include names to
//! the descriptors that satisfy them.

pub mod descriptor;
pub mod error;
pub mod manifest;

pub use descriptor::LibraryDescriptor;
pub use error::{ManifestError, Result};
pub use manifest::{LibraryManifest, ManifestSource, BUNDLED_LIB_DIR, MANIFEST_FILE};
