//! Subcommand handlers for config actions.

use std::path::Path;

use asciify::config::{default_path, Config, DEFAULT_CONFIG_TOML};

use super::args::ConfigAction;

/// Handle config subcommand actions.
///
/// `config_path` is the `--config` value, if any; otherwise the default
/// location under the user config directory is used.
pub fn handle_config_action(
    action: ConfigAction,
    config_path: Option<&Path>,
) -> Result<(), String> {
    let path = config_path.map_or_else(default_path, Path::to_path_buf);
    match action {
        ConfigAction::Show => {
            let config = Config::load(Some(path.as_path())).map_err(|e| e.to_string())?;
            let rendered = config.to_toml().map_err(|e| e.to_string())?;

            if path.exists() {
                println!("# Config file: {} (exists)", path.display());
            } else {
                println!("# Config file: {} (not found, showing defaults)", path.display());
            }
            println!();
            print!("{}", rendered);
            Ok(())
        }
        ConfigAction::Init => {
            write_default_config(&path)?;
            println!("Created config file: {}", path.display());
            Ok(())
        }
    }
}

/// Write the commented default config, refusing to overwrite.
fn write_default_config(path: &Path) -> Result<(), String> {
    if path.exists() {
        return Err(format!(
            "Config file already exists: {}\nUse 'asciify config show' to view current settings.",
            path.display()
        ));
    }

    // Create parent directories if needed
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Error creating config directory: {}", e))?;
    }

    std::fs::write(path, DEFAULT_CONFIG_TOML)
        .map_err(|e| format!("Error writing config file: {}", e))
}
