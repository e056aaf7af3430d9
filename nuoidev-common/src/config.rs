//! Configuration loading and data folder resolution

use std::path::{Path, PathBuf};

use crate::Result;

/// Resolve the data folder holding the application database, in priority
/// order:
/// 1. Command-line argument (highest priority)
/// 2. `NUOIDEV_DATA_DIR` environment variable
/// 3. `data_dir` key in the TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_data_dir(cli_arg: Option<&str>) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var("NUOIDEV_DATA_DIR") {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = data_dir_from_config_file() {
        return path;
    }

    // Priority 4: OS-dependent compiled default
    default_data_dir()
}

/// Read `data_dir` from the platform config file, if present.
fn data_dir_from_config_file() -> Option<PathBuf> {
    let config_path = dirs::config_dir()?.join("nuoidev").join("config.toml");
    let toml_content = std::fs::read_to_string(config_path).ok()?;
    let config = toml::from_str::<toml::Value>(&toml_content).ok()?;
    config
        .get("data_dir")
        .and_then(|v| v.as_str())
        .map(PathBuf::from)
}

/// OS-dependent default data folder path
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("nuoidev"))
        .unwrap_or_else(|| PathBuf::from("./nuoidev_data"))
}

/// Create the data folder if it does not exist yet.
pub fn ensure_data_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    Ok(())
}

/// Path of the application database inside the data folder.
pub fn database_path(data_dir: &Path) -> PathBuf {
    data_dir.join("nuoidev.db")
}
