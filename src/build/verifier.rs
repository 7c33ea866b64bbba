use crate::build::runner::{split_command, CommandRunner};
use std::path::Path;

/// Outcome of a verification build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildResult {
    pub ok: bool,
    pub log: String,
}

impl BuildResult {
    /// Last `lines` lines of the build log
    pub fn log_tail(&self, lines: usize) -> String {
        let all: Vec<&str> = self.log.lines().collect();
        let start = all.len().saturating_sub(lines);
        all[start..].join("\n")
    }
}

/// Builds the package to prove an updated recipe still works
pub struct BuildVerifier<'a, R: CommandRunner> {
    runner: &'a R,
    command: &'a [String],
    project_root: &'a Path,
}

impl<'a, R: CommandRunner> BuildVerifier<'a, R> {
    pub fn new(runner: &'a R, command: &'a [String], project_root: &'a Path) -> Self {
        Self {
            runner,
            command,
            project_root,
        }
    }

    /// Run the build command
    ///
    /// Never returns an error: a command that cannot even be started is
    /// reported as a failed build, and the caller decides what to do.
    pub fn verify_build(&self) -> BuildResult {
        let (program, args) = match split_command(self.command) {
            Ok(parts) => parts,
            Err(e) => {
                return BuildResult {
                    ok: false,
                    log: e.to_string(),
                }
            }
        };

        tracing::info!("Verifying build: {}", self.command.join(" "));

        match self.runner.run(program, args, self.project_root) {
            Ok(output) => {
                if !output.success {
                    tracing::debug!("Build exited with code {:?}", output.code);
                }
                BuildResult {
                    ok: output.success,
                    log: output.log,
                }
            }
            Err(e) => BuildResult {
                ok: false,
                log: e.to_string(),
            },
        }
    }
}
