use crate::build::runner::{split_command, CommandRunner};
use crate::build::verifier::BuildVerifier;
use crate::context::Context;
use crate::core::version::Version;
use crate::core::{BumpError, BumpResult};
use crate::hash::to_local_encoding;
use crate::manifest::client::ManifestSource;
use crate::manifest::parser::ManifestInfo;
use crate::package::state::{read_current_state, PackageState};
use crate::package::updater::PackageFileUpdater;
use std::fmt;

/// Lines of build output kept in the log when verification fails
const BUILD_LOG_TAIL: usize = 40;

/// Flags controlling a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Report only; never touch the package file
    pub check: bool,
    /// Update even when the versions already match
    pub force: bool,
}

/// What to do after comparing local and upstream versions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateDecision {
    UpToDate,
    UpdateAvailable,
    Forced,
}

impl UpdateDecision {
    pub fn decide(current: &str, latest: &str, force: bool) -> Self {
        if current != latest {
            UpdateDecision::UpdateAvailable
        } else if force {
            UpdateDecision::Forced
        } else {
            UpdateDecision::UpToDate
        }
    }
}

/// Machine-readable result of `--check`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub update_available: bool,
    pub current_version: String,
    pub new_version: String,
    pub current_hash: String,
    pub new_hash: String,
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "UPDATE_AVAILABLE={}", self.update_available)?;
        writeln!(f, "CURRENT_VERSION={}", self.current_version)?;
        writeln!(f, "NEW_VERSION={}", self.new_version)?;
        writeln!(f, "CURRENT_HASH={}", self.current_hash)?;
        writeln!(f, "NEW_HASH={}", self.new_hash)
    }
}

/// What a verified update changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSummary {
    pub old_version: String,
    pub new_version: String,
    pub old_hash: String,
    pub new_hash: String,
    /// Output of the diff command, when it ran
    pub diff: Option<String>,
}

/// How a run ended when nothing went wrong
///
/// `UpdateAvailable` is not an error even though the binary reports it
/// with a non-zero exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    UpToDate { version: String },
    UpdateAvailable(CheckReport),
    Updated(UpdateSummary),
}

/// Sequences state reading, manifest fetching, updating and verification
pub struct Workflow<'a, S: ManifestSource, R: CommandRunner> {
    ctx: &'a Context,
    source: &'a S,
    runner: &'a R,
}

impl<'a, S: ManifestSource, R: CommandRunner> Workflow<'a, S, R> {
    pub fn new(ctx: &'a Context, source: &'a S, runner: &'a R) -> Self {
        Self {
            ctx,
            source,
            runner,
        }
    }

    pub async fn run(&self, options: RunOptions) -> BumpResult<Outcome> {
        self.ctx.check_preconditions(self.runner)?;

        let updater = PackageFileUpdater::new(&self.ctx.package_file);
        if updater.has_backup() {
            tracing::warn!(
                "Found leftover backup {} from an earlier interrupted run; it will be replaced",
                updater.backup_path().display()
            );
        }

        let current = read_current_state(&self.ctx.package_file)?;
        tracing::info!("Current version: {}", display_or_missing(&current.version));

        let raw = self.source.fetch(&self.ctx.config.manifest_url).await?;
        let latest = ManifestInfo::from_document(&raw)?;
        let new_hash = to_local_encoding(&latest.hash_hex)?;
        tracing::info!("Latest version: {}", latest.version);

        let decision = UpdateDecision::decide(&current.version, &latest.version, options.force);
        if decision == UpdateDecision::UpToDate {
            tracing::info!("Already up to date ({})", current.version);
            return Ok(Outcome::UpToDate {
                version: current.version,
            });
        }

        warn_on_downgrade(&current.version, &latest.version);

        if options.check {
            return Ok(Outcome::UpdateAvailable(CheckReport {
                update_available: decision == UpdateDecision::UpdateAvailable,
                current_version: current.version,
                new_version: latest.version,
                current_hash: current.hash,
                new_hash,
            }));
        }

        if decision == UpdateDecision::Forced {
            tracing::info!("Forcing update of {}", current.version);
        } else {
            tracing::info!("Updating {} -> {}", current.version, latest.version);
        }

        self.update(&updater, current, latest.version, new_hash)
    }

    fn update(
        &self,
        updater: &PackageFileUpdater,
        current: PackageState,
        new_version: String,
        new_hash: String,
    ) -> BumpResult<Outcome> {
        updater.apply_update(&new_version, &new_hash)?;

        let verifier = BuildVerifier::new(
            self.runner,
            &self.ctx.config.build_command,
            &self.ctx.project_root,
        );
        let build = verifier.verify_build();

        if !build.ok {
            tracing::error!("Build failed:\n{}", build.log_tail(BUILD_LOG_TAIL));
            tracing::warn!("Restoring {}", updater.path().display());
            if let Err(e) = updater.restore() {
                return Err(BumpError::BuildVerification(format!(
                    "build of {} failed and restoring the backup also failed: {}",
                    new_version, e
                )));
            }
            return Err(BumpError::BuildVerification(format!(
                "build of {} failed; {} was restored",
                new_version,
                updater.path().display()
            )));
        }

        updater.cleanup()?;
        tracing::info!("Build succeeded");

        if let Some(command) = &self.ctx.config.lock_command {
            if let Err(e) = self.run_best_effort(command) {
                tracing::warn!("Lock file refresh failed: {}", e);
            }
        }

        let diff = match &self.ctx.config.diff_command {
            Some(command) => match self.run_best_effort(command) {
                Ok(output) => Some(output),
                Err(e) => {
                    tracing::debug!("Diff unavailable: {}", e);
                    None
                }
            },
            None => None,
        };

        Ok(Outcome::Updated(UpdateSummary {
            old_version: current.version,
            new_version,
            old_hash: current.hash,
            new_hash,
            diff,
        }))
    }

    /// Run a post-update command whose failure must not fail the run
    fn run_best_effort(&self, command: &[String]) -> BumpResult<String> {
        let (program, args) = split_command(command)?;
        let output = self.runner.run(program, args, &self.ctx.project_root)?;

        if !output.success {
            return Err(BumpError::Precondition(format!(
                "'{}' exited with code {}",
                command.join(" "),
                output.code.map_or("unknown".to_string(), |c| c.to_string())
            )));
        }

        Ok(output.log)
    }
}

fn display_or_missing(value: &str) -> &str {
    if value.is_empty() {
        "<missing>"
    } else {
        value
    }
}

fn warn_on_downgrade(current: &str, latest: &str) {
    if let (Ok(current_v), Ok(latest_v)) = (Version::parse(current), Version::parse(latest)) {
        if latest_v < current_v {
            tracing::warn!(
                "Manifest version {} is older than the recorded {}",
                latest,
                current
            );
        }
    }
}
