//! tubefetch CLI - yt-dlp download adapter

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tubefetch::cli::{Cli, error_summary, failure_status, run};
use tubefetch::console::{Console, Status};

fn main() -> ExitCode {
    let (non_blocking, _guard) = tracing_appender::non_blocking(std::io::stderr());

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Usage errors go to stderr with status 1; --help and --version succeed
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let status = failure_status(&e);
            match status {
                Status::CancelledByUser => tracing::info!("download cancelled"),
                _ => tracing::error!(error = %error_summary(&e), "download failed"),
            }
            Console::stdout().emit_or_log(&status);
            ExitCode::FAILURE
        }
    }
}
