//! `propc doctor` — toolchain diagnostics.

use std::path::Path;
use std::process::Command;

use anyhow::Result;
use propc_manifest::{LibraryManifest, ManifestSource};

use crate::config::PropcConfig;

/// Print toolchain diagnostic information.
pub fn run(project_dir: &Path, config: &PropcConfig) -> Result<()> {
    println!("=== propc doctor ===");
    println!();

    println!("propc version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("--- Toolchain ---");
    print_tool_status(&config.toolchain.compiler, &["--version"]);
    print_tool_status(&config.toolchain.loader, &["--version"]);
    println!("  timeout: {}s", config.toolchain.timeout_secs);
    println!();

    println!("--- Project ---");
    println!("  root: {}", project_dir.display());
    match LibraryManifest::load(project_dir) {
        Ok(manifest) => {
            let source = match manifest.source {
                ManifestSource::ProjectOverride => "project override",
                ManifestSource::BundledDefault => "bundled default",
            };
            println!(
                "  manifest: {source} ({} libraries)",
                manifest.descriptors.len()
            );
        }
        Err(e) => {
            println!("  manifest: error — {e}");
        }
    }
    match &config.device.port {
        Some(port) => println!("  default port: {port}"),
        None => println!("  default port: not set"),
    }

    Ok(())
}

fn print_tool_status(name: &str, args: &[&str]) {
    match Command::new(name).args(args).output() {
        Ok(output) => {
            let version = String::from_utf8_lossy(&output.stdout);
            let first_line = version.lines().next().unwrap_or("(unknown version)");
            println!("  {name}: {first_line}");
        }
        Err(_) => {
            println!("  {name}: not found");
        }
    }
}
