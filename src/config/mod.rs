use crate::core::path::{global_config_file, project_config_file};
use crate::core::{BumpError, BumpResult};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Upstream release manifest URL
    #[serde(default = "default_manifest_url")]
    pub manifest_url: String,

    /// Package-definition file, relative to the project root
    #[serde(default = "default_package_file")]
    pub package_file: String,

    /// Command that builds the package; the first word must be on PATH
    #[serde(default = "default_build_command")]
    pub build_command: Vec<String>,

    /// Lock-file refresh run after a verified update (best-effort)
    #[serde(default = "default_lock_command")]
    pub lock_command: Option<Vec<String>>,

    /// Diff shown in the final summary (best-effort)
    #[serde(default = "default_diff_command")]
    pub diff_command: Option<Vec<String>>,

    /// Files that must exist in the project root before anything runs
    #[serde(default = "default_marker_files")]
    pub marker_files: Vec<String>,

    /// User-Agent sent to the manifest host
    ///
    /// Some hosts reject default HTTP client identities.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Manifest request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_manifest_url() -> String {
    "https://releases.example.com/stable/manifest.json".to_string()
}

fn default_package_file() -> String {
    "package.nix".to_string()
}

fn default_build_command() -> Vec<String> {
    ["nix", "build", ".#package", "--no-link", "--print-build-logs"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_lock_command() -> Option<Vec<String>> {
    Some(vec!["nix".to_string(), "flake".to_string(), "lock".to_string()])
}

fn default_diff_command() -> Option<Vec<String>> {
    Some(
        ["git", "--no-pager", "diff", "--stat"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    )
}

fn default_marker_files() -> Vec<String> {
    vec!["flake.nix".to_string()]
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36"
        .to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            manifest_url: default_manifest_url(),
            package_file: default_package_file(),
            build_command: default_build_command(),
            lock_command: default_lock_command(),
            diff_command: default_diff_command(),
            marker_files: default_marker_files(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Load config for a project
    ///
    /// Looks for `recipe-bump.yaml` in the project root first, then the
    /// user-wide config file:
    /// - Windows: %APPDATA%\recipe-bump\config.yaml
    /// - Linux: ~/.config/recipe-bump/config.yaml
    /// - macOS: ~/Library/Application Support/recipe-bump/config.yaml
    ///
    /// Falls back to defaults when neither exists. Never writes a file.
    pub fn load(project_root: &Path) -> BumpResult<Self> {
        let project_config = project_config_file(project_root);
        if project_config.exists() {
            return Self::load_from(&project_config);
        }

        if let Ok(global) = global_config_file() {
            if global.exists() {
                return Self::load_from(&global);
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load and validate a specific config file
    pub fn load_from(path: &Path) -> BumpResult<Self> {
        tracing::debug!("Loading config from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content).map_err(|e| match e {
            BumpError::Config(msg) => BumpError::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    /// Parse config from YAML text
    pub fn from_yaml(content: &str) -> BumpResult<Self> {
        // An empty file is a valid all-defaults config
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| BumpError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the workflow cannot run with
    pub fn validate(&self) -> BumpResult<()> {
        if !self.manifest_url.starts_with("https://") && !self.manifest_url.starts_with("http://") {
            return Err(BumpError::Config(format!(
                "manifest_url must be an http(s) URL, got '{}'",
                self.manifest_url
            )));
        }

        if self.package_file.trim().is_empty() {
            return Err(BumpError::Config("package_file must not be empty".to_string()));
        }

        if self.build_command.is_empty() {
            return Err(BumpError::Config("build_command must not be empty".to_string()));
        }

        for (name, command) in [
            ("lock_command", &self.lock_command),
            ("diff_command", &self.diff_command),
        ] {
            if matches!(command, Some(c) if c.is_empty()) {
                return Err(BumpError::Config(format!(
                    "{} must not be an empty list (use null to disable it)",
                    name
                )));
            }
        }

        if self.timeout_secs == 0 {
            return Err(BumpError::Config("timeout_secs must be greater than 0".to_string()));
        }

        Ok(())
    }

    /// The program the build command invokes
    pub fn build_tool(&self) -> &str {
        self.build_command
            .first()
            .map(String::as_str)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.package_file, "package.nix");
        assert_eq!(config.build_tool(), "nix");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml(
            "manifest_url: https://downloads.vendor.test/latest.json\npackage_file: pkgs/tool/default.nix\nlock_command: null\n",
        )
        .unwrap();

        assert_eq!(config.manifest_url, "https://downloads.vendor.test/latest.json");
        assert_eq!(config.package_file, "pkgs/tool/default.nix");
        assert!(config.lock_command.is_none());
        assert_eq!(config.diff_command, default_diff_command());
        assert_eq!(config.marker_files, vec!["flake.nix".to_string()]);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = Config::from_yaml("  \n").unwrap();
        assert_eq!(config.manifest_url, default_manifest_url());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(Config::from_yaml("manifest_url: ftp://example.com/m.json\n").is_err());
        assert!(Config::from_yaml("build_command: []\n").is_err());
        assert!(Config::from_yaml("diff_command: []\n").is_err());
        assert!(Config::from_yaml("timeout_secs: 0\n").is_err());
    }

    #[test]
    fn test_load_prefers_project_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("recipe-bump.yaml"),
            "timeout_secs: 5\nmarker_files: [flake.nix, flake.lock]\n",
        )
        .unwrap();

        let config = Config::load(temp.path()).unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.marker_files.len(), 2);
    }

    #[test]
    fn test_load_from_reports_path_on_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("recipe-bump.yaml");
        std::fs::write(&path, "timeout_secs: [not, a, number]\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, BumpError::Config(ref m) if m.contains("Failed to parse config")));
        assert!(err.to_string().contains("recipe-bump.yaml"));
    }
}
