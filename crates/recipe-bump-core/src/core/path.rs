use crate::core::error::{BumpError, BumpResult};
use std::path::{Path, PathBuf};

/// Name of the per-project config file
pub const PROJECT_CONFIG_FILE: &str = "recipe-bump.yaml";

/// Get the recipe-bump home directory
///
/// Platform-specific locations:
/// - Windows: %APPDATA%\recipe-bump
/// - Linux: ~/.config/recipe-bump
/// - macOS: ~/Library/Application Support/recipe-bump
pub fn bump_home() -> BumpResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| BumpError::Config("Could not determine config directory".to_string()))?;
    Ok(config_dir.join("recipe-bump"))
}

/// Get the user-wide config file path
pub fn global_config_file() -> BumpResult<PathBuf> {
    Ok(bump_home()?.join("config.yaml"))
}

/// Get the project config file path (./recipe-bump.yaml)
pub fn project_config_file(project_root: &Path) -> PathBuf {
    project_root.join(PROJECT_CONFIG_FILE)
}

/// Backup location for a package file: the same path with `.bak` appended
pub fn backup_path(package_file: &Path) -> PathBuf {
    let mut name = package_file
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".bak");
    package_file.with_file_name(name)
}
