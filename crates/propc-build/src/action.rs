//! Compile actions and their post-compile behavior.

use std::fmt;

/// One of the three supported compile targets. `Compile` only builds;
/// `Ram` and `Eeprom` build and then hand the binary to the device loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileAction {
    /// Compile only.
    Compile,
    /// Compile and load into Propeller RAM.
    Ram,
    /// Compile and program the board's EEPROM.
    Eeprom,
}

impl CompileAction {
    /// Extra compiler options for this action, appended after the fixed
    /// flag set. Empty for all current actions.
    pub fn compile_options(&self) -> &'static [&'static str] {
        &[]
    }

    /// File extension of the output binary.
    pub fn extension(&self) -> &'static str {
        ".elf"
    }

    /// Whether the compiled binary is handed to the device loader.
    pub fn requires_load(&self) -> bool {
        match self {
            CompileAction::Compile => false,
            CompileAction::Ram | CompileAction::Eeprom => true,
        }
    }
}

impl fmt::Display for CompileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CompileAction::Compile => "COMPILE",
            CompileAction::Ram => "RAM",
            CompileAction::Eeprom => "EEPROM",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_device_actions_load() {
        assert!(!CompileAction::Compile.requires_load());
        assert!(CompileAction::Ram.requires_load());
        assert!(CompileAction::Eeprom.requires_load());
    }

    #[test]
    fn all_actions_produce_elf() {
        for action in [
            CompileAction::Compile,
            CompileAction::Ram,
            CompileAction::Eeprom,
        ] {
            assert_eq!(action.extension(), ".elf");
            assert!(action.compile_options().is_empty());
        }
    }

    #[test]
    fn display_names() {
        assert_eq!(CompileAction::Compile.to_string(), "COMPILE");
        assert_eq!(CompileAction::Ram.to_string(), "RAM");
        assert_eq!(CompileAction::Eeprom.to_string(), "EEPROM");
    }
}
