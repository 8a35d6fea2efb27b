//! Manifest loading and include-name resolution.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::descriptor::LibraryDescriptor;
use crate::error::{ManifestError, Result};

/// Manifest file name probed at both candidate locations.
pub const MANIFEST_FILE: &str = "lib-descriptor.json";

/// Directory of the bundled library installation, relative to the project
/// root. Holds the default manifest and the library trees its paths refer to.
pub const BUNDLED_LIB_DIR: &str = "propeller-c-lib";

/// Which of the two candidate manifest files was loaded.
///
/// Command-line assembly depends on this: a project override carries paths
/// that are used as given, while the bundled default carries paths relative
/// to the bundled library directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestSource {
    /// `<project-root>/lib-descriptor.json`.
    ProjectOverride,
    /// `<project-root>/propeller-c-lib/lib-descriptor.json`.
    BundledDefault,
}

/// An ordered library descriptor list together with the source it was
/// loaded from. Immutable once loaded; loaded fresh per compile request.
#[derive(Debug, Clone)]
pub struct LibraryManifest {
    /// Descriptors in manifest order.
    pub descriptors: Vec<LibraryDescriptor>,
    /// Which candidate file the descriptors came from.
    pub source: ManifestSource,
}

impl LibraryManifest {
    /// Load the manifest for a project, preferring the project-local
    /// override and falling back to the bundled default on any failure
    /// (missing file, unreadable, parse error). Errors only when both
    /// candidates fail.
    pub fn load(project_root: &Path) -> Result<Self> {
        let override_path = project_root.join(MANIFEST_FILE);
        let override_err = match Self::load_from(&override_path, ManifestSource::ProjectOverride) {
            Ok(manifest) => return Ok(manifest),
            Err(e) => e,
        };

        let bundled_path = project_root.join(BUNDLED_LIB_DIR).join(MANIFEST_FILE);
        match Self::load_from(&bundled_path, ManifestSource::BundledDefault) {
            Ok(manifest) => Ok(manifest),
            Err(bundled_err) => {
                if is_missing(&override_err) && is_missing(&bundled_err) {
                    Err(ManifestError::NoManifest {
                        override_path,
                        bundled_path,
                    })
                } else {
                    Err(bundled_err)
                }
            }
        }
    }

    /// Load a descriptor array from a specific file.
    pub fn load_from(path: &Path, source: ManifestSource) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let descriptors =
            serde_json::from_str(&content).map_err(|source| ManifestError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self {
            descriptors,
            source,
        })
    }

    /// Resolve scanned include names to the descriptors that satisfy them.
    ///
    /// Returns matches in manifest order, one per (descriptor, matching
    /// name) pair — a descriptor satisfying two requested names appears
    /// twice, and overlapping manifest entries are not de-duplicated.
    pub fn resolve(&self, includes: &BTreeSet<String>) -> Vec<&LibraryDescriptor> {
        let mut matched = Vec::new();
        for descriptor in &self.descriptors {
            for include in includes {
                if descriptor.satisfies(include) {
                    matched.push(descriptor);
                }
            }
        }
        matched
    }
}

fn is_missing(err: &ManifestError) -> bool {
    matches!(
        err,
        ManifestError::Read { source, .. }
            if source.kind() == std::io::ErrorKind::NotFound
    )
}
