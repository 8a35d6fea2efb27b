//! The compile request pipeline: write source, resolve libraries, invoke
//! the compiler, optionally load, clean up, report.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use propc_manifest::{LibraryManifest, ManifestSource, BUNDLED_LIB_DIR};

use crate::action::CompileAction;
use crate::command::command_line;
use crate::error::{BuildError, Result};
use crate::includes::scan_includes;
use crate::loader::Loader;
use crate::process::run_captured;
use crate::report::CompileResult;

/// Default cross-compiler executable name.
pub const DEFAULT_COMPILER: &str = "propeller-elf-gcc";

/// Default device-loader executable name.
pub const DEFAULT_LOADER: &str = "propeller-load";

/// Default per-tool timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for compile requests against one project.
#[derive(Debug, Clone)]
pub struct CompileConfig {
    /// Cross-compiler executable name or path.
    pub compiler: String,
    /// Project root: manifest probing base and bundled-library prefix.
    pub project_root: PathBuf,
    /// Timeout for each external tool invocation.
    pub timeout: Duration,
}

impl CompileConfig {
    /// Configuration with the default toolchain for the given project root.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            compiler: DEFAULT_COMPILER.to_string(),
            project_root: project_root.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Output of one compiler invocation. The binary is left on disk for the
/// caller to consume and delete.
#[derive(Debug)]
pub struct Compilation {
    /// Whether the compiler exited with code zero.
    pub success: bool,
    /// Path of the (possibly absent, on failure) output binary.
    pub binary: PathBuf,
    /// Verbatim compiler stdout.
    pub stdout: String,
    /// Verbatim compiler stderr.
    pub stderr: String,
}

/// Compile source text: write it to a temporary `.c` file, scan includes,
/// resolve them against a freshly loaded manifest, assemble the argument
/// list, and run the compiler.
///
/// The temporary source file is removed on every exit path before this
/// returns. The temporary binary is removed on error paths; on success it
/// persists for the caller.
pub fn compile(config: &CompileConfig, action: CompileAction, code: &str) -> Result<Compilation> {
    let manifest = LibraryManifest::load(&config.project_root)?;

    let mut source = tempfile::Builder::new()
        .suffix(".c")
        .tempfile()
        .map_err(|source| BuildError::TempFile { source })?;
    if let Err(e) = source.write_all(code.as_bytes()) {
        return Err(BuildError::WriteSource {
            path: source.path().to_path_buf(),
            source: e,
        });
    }

    // Allocated but not written; the compiler writes it.
    let binary = tempfile::Builder::new()
        .suffix(action.extension())
        .tempfile()
        .map_err(|source| BuildError::TempFile { source })?
        .into_temp_path();

    let includes = scan_includes(code);
    let descriptors = manifest.resolve(&includes);
    let lib_prefix = match manifest.source {
        ManifestSource::ProjectOverride => None,
        ManifestSource::BundledDefault => Some(config.project_root.join(BUNDLED_LIB_DIR)),
    };

    let argv = command_line(
        &config.compiler,
        source.path(),
        &binary,
        action,
        &descriptors,
        lib_prefix.as_deref(),
    )?;

    let output = run_captured(&argv[0], &argv[1..], config.timeout)?;

    drop(source);
    let binary = binary
        .keep()
        .map_err(|e| BuildError::TempFile { source: e.error })?;

    Ok(Compilation {
        success: output.success,
        binary,
        stdout: output.stdout,
        stderr: output.stderr,
    })
}

/// Handle one compile request end to end and report the outcome.
///
/// The message is the compiler's stderr, or `"Compile successful\n"` when
/// stderr is empty (the success flags carry the exit status, not the
/// message). When the action requires a load and compilation succeeded, the
/// loader runs and its output is appended. The binary is deleted before
/// returning, on success and failure alike; a binary that is already gone
/// is tolerated.
pub fn handle(
    config: &CompileConfig,
    loader: &dyn Loader,
    action: CompileAction,
    code: &str,
    port: &str,
) -> Result<CompileResult> {
    let compilation = compile(config, action, code)?;

    let mut message = if compilation.stderr.is_empty() {
        "Compile successful\n".to_string()
    } else {
        compilation.stderr.clone()
    };
    let mut success = compilation.success;

    let load_result = if action.requires_load() && success {
        Some(loader.load(action, &compilation.binary, port))
    } else {
        None
    };

    // Delete the binary before surfacing any loader error.
    remove_binary(&compilation.binary)?;

    let mut load_success = None;
    if let Some(outcome) = load_result {
        let outcome = outcome?;
        message.push('\n');
        message.push_str(&outcome.output);
        success = success && outcome.success;
        load_success = Some(outcome.success);
    }

    Ok(CompileResult {
        compile_success: compilation.success,
        load_success,
        success,
        message,
    })
}

fn remove_binary(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(BuildError::Cleanup {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
