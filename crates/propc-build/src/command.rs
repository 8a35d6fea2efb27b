//! Cross-compiler argument list assembly.

use std::ffi::OsString;
use std::path::Path;

use propc_manifest::LibraryDescriptor;

use crate::action::CompileAction;
use crate::error::Result;

/// Memory model the toolchain is driven with; selects which prebuilt
/// library variant is linked.
pub const MEMORY_MODEL: &str = "cmm";

/// Optimization and ABI flags passed on every invocation.
const FIXED_FLAGS: [&str; 4] = ["-Os", "-mcmm", "-m32bit-doubles", "-std=c99"];

/// Assemble the full compiler argument list, executable name first.
///
/// `lib_prefix` is the bundled library directory when the bundled default
/// manifest was loaded; a project override manifest carries its paths as
/// given and passes `None`.
///
/// The linker tail repeats: each pass emits `-l<name>` for every descriptor
/// still in the working list plus one `-lm`, then drops the last descriptor,
/// until the list is empty. The repetition is kept flag-for-flag compatible
/// with the established toolchain invocation; see DESIGN.md before changing
/// it to a single pass.
pub fn command_line(
    compiler: &str,
    source: &Path,
    binary: &Path,
    action: CompileAction,
    descriptors: &[&LibraryDescriptor],
    lib_prefix: Option<&Path>,
) -> Result<Vec<OsString>> {
    let mut argv: Vec<OsString> = vec![compiler.into()];

    for descriptor in descriptors {
        let model_dir = descriptor.memory_model_dir(MEMORY_MODEL)?;
        argv.push("-I".into());
        argv.push(prefixed(lib_prefix, &descriptor.libdir));
        argv.push("-L".into());
        argv.push(prefixed(lib_prefix, model_dir));
    }

    for flag in FIXED_FLAGS {
        argv.push(flag.into());
    }
    for option in action.compile_options() {
        argv.push((*option).into());
    }

    argv.push("-o".into());
    argv.push(binary.as_os_str().to_os_string());
    argv.push(source.as_os_str().to_os_string());
    argv.push("-lm".into());

    let mut remaining = descriptors.to_vec();
    while !remaining.is_empty() {
        for descriptor in &remaining {
            argv.push(format!("-l{}", descriptor.name).into());
        }
        argv.push("-lm".into());
        remaining.pop();
    }

    Ok(argv)
}

fn prefixed(lib_prefix: Option<&Path>, dir: &str) -> OsString {
    match lib_prefix {
        Some(prefix) => prefix.join(dir).into_os_string(),
        None => dir.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuildError;
    use propc_manifest::ManifestError;

    fn descriptor(name: &str, header: &str) -> LibraryDescriptor {
        serde_json::from_str(&format!(
            r#"{{
                "include": ["{header}"],
                "libdir": "Utility/lib{name}",
                "name": "{name}",
                "memorymodel": {{"cmm": "Utility/lib{name}/cmm"}}
            }}"#
        ))
        .unwrap()
    }

    fn as_strings(argv: &[OsString]) -> Vec<String> {
        argv.iter()
            .map(|s| s.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn no_descriptors() {
        let argv = command_line(
            "propeller-elf-gcc",
            Path::new("/tmp/in.c"),
            Path::new("/tmp/out.elf"),
            CompileAction::Compile,
            &[],
            None,
        )
        .unwrap();

        assert_eq!(
            as_strings(&argv),
            [
                "propeller-elf-gcc",
                "-Os",
                "-mcmm",
                "-m32bit-doubles",
                "-std=c99",
                "-o",
                "/tmp/out.elf",
                "/tmp/in.c",
                "-lm",
            ]
        );
    }

    #[test]
    fn single_descriptor_links_once() {
        let x = descriptor("X", "x");
        let argv = command_line(
            "propeller-elf-gcc",
            Path::new("/tmp/in.c"),
            Path::new("/tmp/out.elf"),
            CompileAction::Compile,
            &[&x],
            None,
        )
        .unwrap();
        let argv = as_strings(&argv);

        // One pass: the single descriptor is dropped after one iteration.
        let tail = &argv[argv.len() - 2..];
        assert_eq!(tail, ["-lX", "-lm"]);
        // Include/link directories come first, paths as given (override).
        assert_eq!(&argv[1..5], ["-I", "Utility/libX", "-L", "Utility/libX/cmm"]);
    }

    #[test]
    fn two_descriptors_link_in_shrinking_passes() {
        let a = descriptor("A", "a");
        let b = descriptor("B", "b");
        let argv = command_line(
            "propeller-elf-gcc",
            Path::new("/tmp/in.c"),
            Path::new("/tmp/out.elf"),
            CompileAction::Compile,
            &[&a, &b],
            None,
        )
        .unwrap();
        let argv = as_strings(&argv);

        // First pass links A and B, then B is dropped; second pass links A.
        let tail = &argv[argv.len() - 5..];
        assert_eq!(tail, ["-lA", "-lB", "-lm", "-lA", "-lm"]);
    }

    #[test]
    fn bundled_prefix_applies_to_paths() {
        let x = descriptor("X", "x");
        let argv = command_line(
            "propeller-elf-gcc",
            Path::new("/tmp/in.c"),
            Path::new("/tmp/out.elf"),
            CompileAction::Ram,
            &[&x],
            Some(Path::new("/work/propeller-c-lib")),
        )
        .unwrap();
        let argv = as_strings(&argv);

        assert_eq!(
            &argv[1..5],
            [
                "-I",
                "/work/propeller-c-lib/Utility/libX",
                "-L",
                "/work/propeller-c-lib/Utility/libX/cmm",
            ]
        );
    }

    #[test]
    fn missing_memory_model_propagates() {
        let no_cmm: LibraryDescriptor = serde_json::from_str(
            r#"{
                "include": ["x"],
                "libdir": "Utility/libX",
                "name": "X",
                "memorymodel": {"lmm": "Utility/libX/lmm"}
            }"#,
        )
        .unwrap();

        let err = command_line(
            "propeller-elf-gcc",
            Path::new("/tmp/in.c"),
            Path::new("/tmp/out.elf"),
            CompileAction::Compile,
            &[&no_cmm],
            None,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            BuildError::Manifest(ManifestError::MissingMemoryModel { .. })
        ));
    }
}
