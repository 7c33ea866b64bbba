use crate::core::{BumpError, BumpResult};
use std::path::Path;
use std::process::Command;

/// Result of running an external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    /// stdout followed by stderr
    pub log: String,
}

/// Narrow seam over external processes (build tool, lock refresh, diff)
pub trait CommandRunner {
    /// Whether `program` can be found on PATH
    fn is_available(&self, program: &str) -> bool;

    /// Run `program` to completion in `cwd`, capturing its output
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> BumpResult<CommandOutput>;
}

/// Runs real processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn is_available(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }

    fn run(&self, program: &str, args: &[String], cwd: &Path) -> BumpResult<CommandOutput> {
        tracing::debug!("Running {} {}", program, args.join(" "));

        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .output()
            .map_err(|e| {
                BumpError::Precondition(format!("Failed to run '{}': {}", program, e))
            })?;

        let mut log = String::from_utf8_lossy(&output.stdout).into_owned();
        log.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            log,
        })
    }
}

/// Split a configured command line into program and arguments
pub fn split_command(command: &[String]) -> BumpResult<(&str, &[String])> {
    command
        .split_first()
        .map(|(program, args)| (program.as_str(), args))
        .ok_or_else(|| BumpError::Config("command must not be empty".to_string()))
}
