//! `propc.toml` configuration parsing and discovery.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use propc_build::pipeline::{DEFAULT_COMPILER, DEFAULT_LOADER, DEFAULT_TIMEOUT_SECS};

/// The top-level configuration for a propc project. Every section and field
/// is optional; an absent file means all defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropcConfig {
    /// Toolchain executables and limits.
    #[serde(default)]
    pub toolchain: ToolchainConfig,
    /// Target device defaults.
    #[serde(default)]
    pub device: DeviceConfig,
}

/// Toolchain section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolchainConfig {
    /// Cross-compiler executable name or path.
    #[serde(default = "default_compiler")]
    pub compiler: String,
    /// Device-loader executable name or path.
    #[serde(default = "default_loader")]
    pub loader: String,
    /// Timeout for each compiler/loader invocation, in seconds.
    #[serde(default = "default_timeout", rename = "timeout-secs")]
    pub timeout_secs: u64,
}

/// Device section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Serial port used when none is given on the command line.
    #[serde(default)]
    pub port: Option<String>,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            compiler: default_compiler(),
            loader: default_loader(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_compiler() -> String {
    DEFAULT_COMPILER.to_string()
}

fn default_loader() -> String {
    DEFAULT_LOADER.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl PropcConfig {
    /// Search upward from `start_dir` for a `propc.toml` file. Returns the
    /// parsed config and the directory it was found in, or defaults and
    /// `None` when no file exists anywhere up the tree.
    pub fn find_and_load(start_dir: &Path) -> Result<(Self, Option<PathBuf>)> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join("propc.toml");
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let config = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok((config, Some(dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok((Self::default(), None))
    }

    /// Parse a config from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing propc.toml")
    }

    /// The per-tool timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.toolchain.timeout_secs)
    }
}
