use recipe_bump::build::runner::SystemRunner;
use recipe_bump::context::Context;
use recipe_bump::core::BumpResult;
use recipe_bump::manifest::client::ManifestClient;
use recipe_bump::workflow::{Outcome, RunOptions, UpdateSummary, Workflow};
use std::process::ExitCode;

pub async fn run(check: bool, force: bool) -> BumpResult<ExitCode> {
    let ctx = Context::from_current_dir()?;
    let client = ManifestClient::new(&ctx.config)?;
    let runner = SystemRunner;

    let outcome = Workflow::new(&ctx, &client, &runner)
        .run(RunOptions { check, force })
        .await?;

    match outcome {
        Outcome::UpToDate { version } => {
            eprintln!("✓ {} is up to date ({})", ctx.config.package_file, version);
            Ok(ExitCode::SUCCESS)
        }
        Outcome::UpdateAvailable(report) => {
            // Non-zero tells automation an update is pending
            print!("{}", report);
            Ok(ExitCode::FAILURE)
        }
        Outcome::Updated(summary) => {
            print_summary(&ctx.config.package_file, &summary);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_summary(package_file: &str, summary: &UpdateSummary) {
    println!("✓ Updated {}", package_file);
    println!("  version: {} → {}", summary.old_version, summary.new_version);
    println!("  sha256:  {} → {}", summary.old_hash, summary.new_hash);

    if let Some(diff) = &summary.diff {
        if !diff.trim().is_empty() {
            println!();
            print!("{}", diff);
        }
    }
}
