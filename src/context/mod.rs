use crate::build::runner::CommandRunner;
use crate::config::Config;
use crate::core::path::backup_path;
use crate::core::{BumpError, BumpResult};
use std::env;
use std::path::{Path, PathBuf};

/// Everything a run needs to know about where it is operating
///
/// Built once at startup and handed to each component, so tests can point
/// the workflow at a scratch directory instead of the real repository.
#[derive(Debug, Clone)]
pub struct Context {
    pub project_root: PathBuf,
    pub package_file: PathBuf,
    pub config: Config,
}

impl Context {
    pub fn new(project_root: &Path, config: Config) -> Self {
        let package_file = project_root.join(&config.package_file);
        Self {
            project_root: project_root.to_path_buf(),
            package_file,
            config,
        }
    }

    /// Context for the current working directory, with its config loaded
    pub fn from_current_dir() -> BumpResult<Self> {
        let project_root = env::current_dir().map_err(|e| {
            BumpError::Precondition(format!("Failed to get current directory: {}", e))
        })?;
        let config = Config::load(&project_root)?;
        Ok(Self::new(&project_root, config))
    }

    /// Where the package file is copied before it is modified
    pub fn backup_file(&self) -> PathBuf {
        backup_path(&self.package_file)
    }

    /// Ensure the build tool is installed and we are inside the right repository
    pub fn check_preconditions<R: CommandRunner>(&self, runner: &R) -> BumpResult<()> {
        let tool = self.config.build_tool();
        if !runner.is_available(tool) {
            return Err(BumpError::Precondition(format!(
                "required tool '{}' not found on PATH",
                tool
            )));
        }

        for marker in &self.config.marker_files {
            if !self.project_root.join(marker).exists() {
                return Err(BumpError::Precondition(format!(
                    "marker file '{}' not found in {}",
                    marker,
                    self.project_root.display()
                )));
            }
        }

        if !self.package_file.is_file() {
            return Err(BumpError::Precondition(format!(
                "package file not found: {}",
                self.package_file.display()
            )));
        }

        Ok(())
    }
}
