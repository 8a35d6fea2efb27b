//! Device loader seam.

use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::time::Duration;

use crate::action::CompileAction;
use crate::error::Result;
use crate::process::run_captured;

/// Outcome of handing a binary to the device loader.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    /// Whether the loader reported success (exit code zero).
    pub success: bool,
    /// Loader stdout; appended to the compile message.
    pub output: String,
    /// Loader stderr.
    pub error: String,
}

/// Flashes a compiled binary onto the target device over a serial port.
pub trait Loader {
    fn load(&self, action: CompileAction, binary: &Path, port: &str) -> Result<LoadOutcome>;
}

/// The external `propeller-load` tool.
#[derive(Debug, Clone)]
pub struct PropellerLoad {
    /// Loader executable name or path.
    pub executable: String,
    /// Timeout for one load invocation.
    pub timeout: Duration,
}

impl Loader for PropellerLoad {
    fn load(&self, action: CompileAction, binary: &Path, port: &str) -> Result<LoadOutcome> {
        let mut args: Vec<OsString> = Vec::new();
        match action {
            CompileAction::Ram => args.push("-r".into()),
            CompileAction::Eeprom => args.push("-e".into()),
            CompileAction::Compile => {}
        }
        args.push("-p".into());
        args.push(port.into());
        args.push(binary.as_os_str().to_os_string());

        let output = run_captured(OsStr::new(&self.executable), &args, self.timeout)?;
        Ok(LoadOutcome {
            success: output.success,
            output: output.stdout,
            error: output.stderr,
        })
    }
}
