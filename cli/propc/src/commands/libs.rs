//! `propc libs` — list the library manifest.

use std::path::Path;

use anyhow::Result;
use propc_manifest::{LibraryManifest, ManifestSource};

/// Print every library the manifest knows about.
pub fn run(project_dir: &Path) -> Result<()> {
    let manifest = LibraryManifest::load(project_dir)?;

    match manifest.source {
        ManifestSource::ProjectOverride => println!("Using project manifest (lib-descriptor.json)"),
        ManifestSource::BundledDefault => {
            println!("Using bundled manifest (propeller-c-lib/lib-descriptor.json)")
        }
    }
    println!();

    for descriptor in &manifest.descriptors {
        println!("{}", descriptor.name);
        println!("  headers: {}", descriptor.include.join(", "));
        println!("  libdir:  {}", descriptor.libdir);
    }

    Ok(())
}
