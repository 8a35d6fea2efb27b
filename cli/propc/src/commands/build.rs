//! `propc compile` / `propc ram` / `propc eeprom` — run one compile request.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use propc_build::{handle, CompileAction, CompileConfig, CompileResult, PropellerLoad};

use crate::config::PropcConfig;

/// Compile the given source file and, for RAM/EEPROM actions, load it onto
/// the device. Returns whether the overall request succeeded.
pub fn run(
    project_dir: &Path,
    config: &PropcConfig,
    action: CompileAction,
    file: &Path,
    port: Option<&str>,
    json: bool,
) -> Result<bool> {
    let code =
        fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;

    let port = match port.or(config.device.port.as_deref()) {
        Some(port) => port.to_string(),
        None if action.requires_load() => {
            bail!("no serial port given: pass --port or set [device] port in propc.toml")
        }
        None => String::new(),
    };

    let compile_config = CompileConfig {
        compiler: config.toolchain.compiler.clone(),
        project_root: project_dir.to_path_buf(),
        timeout: config.timeout(),
    };
    let loader = PropellerLoad {
        executable: config.toolchain.loader.clone(),
        timeout: config.timeout(),
    };

    let result = handle(&compile_config, &loader, action, &code, &port)?;
    report(&result, json)?;
    Ok(result.success)
}

fn report(result: &CompileResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(result)?);
    } else {
        print!("{}", result.message);
        if !result.message.ends_with('\n') {
            println!();
        }
    }
    Ok(())
}
