use clap::error::ErrorKind;
use clap::Parser;
use recipe_bump::core::BumpError;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser, Debug)]
#[command(name = "recipe-bump")]
#[command(about = "Update a package recipe to the latest upstream release")]
struct Cli {
    /// Only report whether an update is available (exit code 1 if so)
    #[arg(long)]
    check: bool,
    /// Rewrite and rebuild even when the version is unchanged
    #[arg(long)]
    force: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Diagnostics go to stderr; stdout is reserved for check output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return usage_error(e),
    };

    match cli::update::run(cli.check, cli.force).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\n{}", recipe_bump::core::format_error_with_help(&e));
            ExitCode::FAILURE
        }
    }
}

/// `--help` exits 0; anything else prints usage and exits 1
fn usage_error(err: clap::Error) -> ExitCode {
    match err.kind() {
        ErrorKind::DisplayHelp => {
            let _ = err.print();
            ExitCode::SUCCESS
        }
        _ => {
            let arg_err = BumpError::Arg(
                err.kind().as_str().unwrap_or("invalid arguments").to_string(),
            );
            // clap's rendering already carries the usage line
            eprintln!("{}", err.render());
            eprintln!("\n{}", recipe_bump::core::format_error_with_help(&arg_err));
            ExitCode::FAILURE
        }
    }
}
