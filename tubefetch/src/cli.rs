//! CLI argument definitions using clap.

use crate::console::{Console, Status};
use crate::control::ControlState;
use crate::dl::{Config, TransportConfig};
use crate::listener;
use clap::Parser;
use eyre::Result;
use std::convert::Infallible;
use std::path::PathBuf;
use std::sync::Arc;
use tubefetch_dl::Error;
use tubefetch_dl::dl::YtDlp;
use tubefetch_dl::quality::Quality;

#[derive(Debug, Parser)]
#[command(name = "tubefetch")]
#[command(about = "Download a video with yt-dlp; pause, resume or cancel over stdin")]
#[command(version)]
pub struct Cli {
    /// Video URL (http:// or https://)
    #[arg(value_parser = parse_url)]
    pub url: String,

    /// Quality: low, medium, high or highest (anything else means highest)
    #[arg(value_parser = parse_quality)]
    pub quality: String,

    /// Destination folder, created if missing
    pub folder: PathBuf,

    #[command(flatten)]
    pub transport: TransportConfig,
}

fn parse_url(url: &str) -> Result<String, String> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(url.to_string())
    } else {
        Err("URL must start with http:// or https://".to_string())
    }
}

fn parse_quality(token: &str) -> Result<String, Infallible> {
    Ok(token.to_lowercase())
}

impl TryFrom<Cli> for Config {
    type Error = eyre::Error;

    fn try_from(cli: Cli) -> Result<Self> {
        Ok(Self {
            url: cli.url,
            quality: Quality::from_token(&cli.quality),
            quality_label: cli.quality,
            folder: cli.folder,
            transport: cli.transport,
        })
    }
}

/// Execute CLI command - separated for testing.
pub fn run(cli: Cli) -> Result<()> {
    tracing::debug!(?cli, "parsed arguments");

    let config = Config::try_from(cli)?;

    match YtDlp.version() {
        Ok(version) => tracing::debug!(version, "found yt-dlp"),
        Err(e) => tracing::warn!(error = %e, "could not determine yt-dlp version"),
    }

    let control = Arc::new(ControlState::new());

    crate::dl::execute(
        &config,
        control,
        Console::stdout(),
        &YtDlp,
        |control, console| {
            listener::spawn(control, console)?;
            Ok(())
        },
    )
}

/// One-line `context: cause` rendering of a report, without backtrace.
pub fn error_summary(err: &eyre::Report) -> String {
    format!("{err:#}")
}

/// Final status line for a failed run.
pub fn failure_status(err: &eyre::Report) -> Status {
    let cancelled = err
        .chain()
        .any(|e| e.downcast_ref::<Error>().is_some_and(Error::is_cancelled));

    if cancelled {
        Status::CancelledByUser
    } else {
        Status::Failed {
            message: error_summary(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eyre::Context;

    #[test]
    fn parses_three_positionals() {
        let cli = Cli::parse_from(["tubefetch", "https://example.com/v", "MEDIUM", "/tmp/out"]);

        assert!(matches!(
            &cli,
            Cli {
                url,
                quality,
                folder,
                transport,
            } if url == "https://example.com/v"
                && quality == "medium"
                && folder.to_str() == Some("/tmp/out")
                && *transport == TransportConfig::default()
        ));
    }

    #[test]
    fn unknown_quality_means_highest() {
        let cli = Cli::parse_from(["tubefetch", "http://example.com/v", "Ultra", "out"]);
        let config = Config::try_from(cli).unwrap();

        assert_eq!(config.quality, Quality::Highest);
        assert_eq!(config.quality_label, "ultra");
    }

    #[test]
    fn parses_transport_flags() {
        let cli = Cli::parse_from([
            "tubefetch",
            "https://example.com/v",
            "low",
            "out",
            "--retries",
            "5",
            "--fragment-retries",
            "6",
            "--socket-timeout",
            "7",
        ]);

        assert_eq!(
            cli.transport,
            TransportConfig {
                retries: 5,
                fragment_retries: 6,
                socket_timeout: 7,
            }
        );
    }

    #[test]
    fn rejects_non_http_url() {
        for url in ["ftp://example.com/v", "example.com/v", "file:///tmp/v", "HTTPS://x"] {
            let err = Cli::try_parse_from(["tubefetch", url, "high", "out"]).unwrap_err();
            assert!(err.use_stderr(), "url {url:?}");
            assert!(err.to_string().contains("http:// or https://"));
        }
    }

    #[test]
    fn rejects_wrong_argument_count() {
        assert!(Cli::try_parse_from(["tubefetch"]).is_err());
        assert!(Cli::try_parse_from(["tubefetch", "https://example.com/v", "high"]).is_err());
        assert!(
            Cli::try_parse_from(["tubefetch", "https://example.com/v", "high", "out", "extra"])
                .is_err()
        );
    }

    #[test]
    fn config_from_cli() {
        let cli = Cli::parse_from(["tubefetch", "https://example.com/v", "high", "/tmp/out"]);
        let config = Config::try_from(cli).unwrap();

        assert_eq!(config.url, "https://example.com/v");
        assert_eq!(config.quality, Quality::High);
        assert_eq!(config.quality_label, "high");
        assert_eq!(config.folder, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn cancellation_reports_cancelled_by_user() {
        assert_eq!(
            failure_status(&eyre::Report::new(Error::Cancelled)),
            Status::CancelledByUser
        );

        let wrapped: Result<()> = Err(Error::Cancelled).wrap_err("while downloading");
        assert_eq!(
            failure_status(&wrapped.unwrap_err()),
            Status::CancelledByUser
        );
    }

    #[test]
    fn other_failures_report_message() {
        assert_eq!(
            failure_status(&eyre::Report::new(Error::Status(2))),
            Status::Failed {
                message: "yt-dlp finished with return code 2".to_string()
            }
        );

        let io: Result<()> =
            Err(std::io::Error::other("disk full")).wrap_err("failed to create download folder");
        assert_eq!(
            failure_status(&io.unwrap_err()),
            Status::Failed {
                message: "failed to create download folder: disk full".to_string()
            }
        );
    }

    #[test]
    fn error_summary_is_one_line() {
        let err: Result<()> = Err(Error::Status(2))
            .wrap_err("download step")
            .wrap_err("while fetching https://example.com/v");
        let summary = error_summary(&err.unwrap_err());

        assert_eq!(
            summary,
            "while fetching https://example.com/v: download step: yt-dlp finished with return code 2"
        );
        assert!(!summary.contains('\n'));
    }
}
