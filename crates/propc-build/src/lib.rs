//! Compile orchestration for Propeller C programs.
//!
//! A compile request runs as a linear sequence: write the source text to a
//! temporary file, scan it for quoted include directives, resolve those
//! against the library manifest, assemble the cross-compiler argument list,
//! invoke `propeller-elf-gcc`, and — for RAM/EEPROM actions — hand the
//! resulting binary to the device loader. Temporary artifacts are removed on
//! every exit path.

pub mod action;
pub mod command;
pub mod error;
pub mod includes;
pub mod loader;
pub mod pipeline;
pub mod process;
pub mod report;

pub use action::CompileAction;
pub use command::command_line;
pub use error::{BuildError, Result};
pub use includes::scan_includes;
pub use loader::{LoadOutcome, Loader, PropellerLoad};
pub use pipeline::{compile, handle, Compilation, CompileConfig};
pub use process::{run_captured, ProcessOutput};
pub use report::CompileResult;
