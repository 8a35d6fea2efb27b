//! propc CLI — compile Propeller C programs and load them onto a device.

mod commands;
mod config;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use propc_build::CompileAction;

use config::PropcConfig;

#[derive(Parser)]
#[command(name = "propc", version, about = "Propeller C compile and load orchestrator")]
struct Cli {
    /// Project directory (default: where propc.toml was found, else the
    /// current directory)
    #[arg(long, global = true)]
    project_dir: Option<PathBuf>,
    /// Print the result record as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a source file without touching the device
    Compile {
        /// C source file
        file: PathBuf,
    },
    /// Compile and load into Propeller RAM
    Ram {
        /// C source file
        file: PathBuf,
        /// Serial port of the device (default: [device] port in propc.toml)
        #[arg(long)]
        port: Option<String>,
    },
    /// Compile and program the board's EEPROM
    Eeprom {
        /// C source file
        file: PathBuf,
        /// Serial port of the device (default: [device] port in propc.toml)
        #[arg(long)]
        port: Option<String>,
    },
    /// List the libraries known to the manifest
    Libs,
    /// Check toolchain and project status
    Doctor,
}

fn main() {
    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<bool> {
    let cwd = std::env::current_dir()?;
    let (config, config_dir) = PropcConfig::find_and_load(&cwd)?;
    let project_dir = cli.project_dir.or(config_dir).unwrap_or(cwd);

    match cli.command {
        Commands::Compile { file } => commands::build::run(
            &project_dir,
            &config,
            CompileAction::Compile,
            &file,
            None,
            cli.json,
        ),
        Commands::Ram { file, port } => commands::build::run(
            &project_dir,
            &config,
            CompileAction::Ram,
            &file,
            port.as_deref(),
            cli.json,
        ),
        Commands::Eeprom { file, port } => commands::build::run(
            &project_dir,
            &config,
            CompileAction::Eeprom,
            &file,
            port.as_deref(),
            cli.json,
        ),
        Commands::Libs => {
            commands::libs::run(&project_dir)?;
            Ok(true)
        }
        Commands::Doctor => {
            commands::doctor::run(&project_dir, &config)?;
            Ok(true)
        }
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    const MANIFEST: &str = r#"[
        {
            "include": ["simpletools"],
            "libdir": "Utility/libsimpletools",
            "name": "simpletools",
            "memorymodel": {"cmm": "Utility/libsimpletools/cmm"}
        }
    ]"#;

    fn write_stub(dir: &Path, name: &str, script: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join(name);
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    /// Project with an override manifest, a source file, and stub tools.
    fn stub_project(
        compiler_script: &str,
        loader_script: &str,
    ) -> (tempfile::TempDir, PropcConfig, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("lib-descriptor.json"), MANIFEST).unwrap();

        let source = dir.path().join("main.c");
        fs::write(&source, "#include \"simpletools.h\"\nint main(){}\n").unwrap();

        let compiler = write_stub(dir.path(), "propeller-elf-gcc", compiler_script);
        let loader = write_stub(dir.path(), "propeller-load", loader_script);

        let mut config = PropcConfig::default();
        config.toolchain.compiler = compiler.to_string_lossy().into_owned();
        config.toolchain.loader = loader.to_string_lossy().into_owned();

        (dir, config, source)
    }

    /// Full workflow: compile only, then RAM load, with passing stub tools.
    #[test]
    fn compile_and_ram_workflow() {
        let loader_record_script = "#!/bin/sh\nprintf '%s\\n' \"$@\" > \"$(dirname \"$0\")/load-argv\"\nexit 0\n";
        let (dir, config, source) = stub_project("#!/bin/sh\nexit 0\n", loader_record_script);

        // 1. Compile only — loader stays untouched.
        let ok = commands::build::run(
            dir.path(),
            &config,
            CompileAction::Compile,
            &source,
            None,
            false,
        )
        .unwrap();
        assert!(ok);
        assert!(!dir.path().join("load-argv").exists());

        // 2. RAM load — the loader sees the RAM flag and the port.
        let ok = commands::build::run(
            dir.path(),
            &config,
            CompileAction::Ram,
            &source,
            Some("/dev/ttyUSB0"),
            false,
        )
        .unwrap();
        assert!(ok);

        let argv = fs::read_to_string(dir.path().join("load-argv")).unwrap();
        let argv: Vec<&str> = argv.lines().collect();
        assert_eq!(argv[0], "-r");
        assert!(argv.windows(2).any(|w| w == ["-p", "/dev/ttyUSB0"]));
    }

    #[test]
    fn eeprom_uses_the_eeprom_flag() {
        let loader_record_script = "#!/bin/sh\nprintf '%s\\n' \"$@\" > \"$(dirname \"$0\")/load-argv\"\nexit 0\n";
        let (dir, config, source) = stub_project("#!/bin/sh\nexit 0\n", loader_record_script);

        let ok = commands::build::run(
            dir.path(),
            &config,
            CompileAction::Eeprom,
            &source,
            Some("/dev/ttyUSB0"),
            true,
        )
        .unwrap();
        assert!(ok);

        let argv = fs::read_to_string(dir.path().join("load-argv")).unwrap();
        assert_eq!(argv.lines().next(), Some("-e"));
    }

    #[test]
    fn compile_failure_reports_unsuccessful() {
        let (dir, config, source) = stub_project(
            "#!/bin/sh\nprintf 'error: x' >&2\nexit 1\n",
            "#!/bin/sh\nexit 0\n",
        );

        let ok = commands::build::run(
            dir.path(),
            &config,
            CompileAction::Compile,
            &source,
            None,
            false,
        )
        .unwrap();
        assert!(!ok);
    }

    #[test]
    fn loader_failure_reports_unsuccessful() {
        let (dir, config, source) =
            stub_project("#!/bin/sh\nexit 0\n", "#!/bin/sh\nexit 1\n");

        let ok = commands::build::run(
            dir.path(),
            &config,
            CompileAction::Ram,
            &source,
            Some("/dev/ttyUSB0"),
            false,
        )
        .unwrap();
        assert!(!ok);
    }

    #[test]
    fn port_falls_back_to_config() {
        let loader_record_script = "#!/bin/sh\nprintf '%s\\n' \"$@\" > \"$(dirname \"$0\")/load-argv\"\nexit 0\n";
        let (dir, mut config, source) = stub_project("#!/bin/sh\nexit 0\n", loader_record_script);
        config.device.port = Some("/dev/ttyAMA0".to_string());

        let ok = commands::build::run(
            dir.path(),
            &config,
            CompileAction::Ram,
            &source,
            None,
            false,
        )
        .unwrap();
        assert!(ok);

        let argv = fs::read_to_string(dir.path().join("load-argv")).unwrap();
        assert!(argv.lines().any(|l| l == "/dev/ttyAMA0"));
    }

    /// `libs` and `doctor` run against the same stub project.
    #[test]
    fn libs_and_doctor_workflow() {
        let (dir, config, _source) = stub_project("#!/bin/sh\nexit 0\n", "#!/bin/sh\nexit 0\n");

        commands::libs::run(dir.path()).unwrap();
        commands::doctor::run(dir.path(), &config).unwrap();
    }
}
