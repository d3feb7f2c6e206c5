//! Download orchestrator: configure yt-dlp and enforce pause/cancel from its progress hook.

use crate::console::{Console, Status};
use crate::control::ControlState;
use chrono::{DateTime, Local};
use eyre::{Context, Result};
use std::io::Write;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tubefetch_dl::dl::{
    DEFAULT_RETRIES, DEFAULT_SOCKET_TIMEOUT, DownloadOptions, Downloader, OutputTemplates,
};
use tubefetch_dl::progress::{Progress, ProgressCallback};
use tubefetch_dl::quality::Quality;

/// Timestamp embedded in output filenames to avoid collisions.
const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Transport resilience options, passed to yt-dlp unchanged.
#[derive(clap::Args, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransportConfig {
    /// Number of retries for a failed request
    #[arg(long, default_value_t = DEFAULT_RETRIES)]
    pub retries: u32,

    /// Number of retries for a failed fragment
    #[arg(long, default_value_t = DEFAULT_RETRIES)]
    pub fragment_retries: u32,

    /// Socket timeout in seconds
    #[arg(long, default_value_t = DEFAULT_SOCKET_TIMEOUT)]
    pub socket_timeout: u32,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            retries: DEFAULT_RETRIES,
            fragment_retries: DEFAULT_RETRIES,
            socket_timeout: DEFAULT_SOCKET_TIMEOUT,
        }
    }
}

/// Resolved configuration for one download.
#[derive(Debug)]
pub struct Config {
    pub url: String,
    pub quality: Quality,
    /// Lower-cased token as given, echoed in the `Downloading` line
    pub quality_label: String,
    pub folder: PathBuf,
    pub transport: TransportConfig,
}

/// Output template `<folder>/%(title)s_<timestamp>.%(ext)s`.
pub fn output_template(folder: &Path, now: DateTime<Local>) -> OutputTemplates {
    let file = format!("%(title)s_{}.%(ext)s", now.format(TIMESTAMP_FORMAT));
    OutputTemplates::in_dir(folder, &file)
}

/// yt-dlp options for `config`, with filenames stamped at `now`.
pub fn build_options(config: &Config, now: DateTime<Local>) -> DownloadOptions {
    let mut opts: DownloadOptions = config.quality.into();

    opts.outtmpl = output_template(&config.folder, now);
    opts.retries = config.transport.retries;
    opts.fragment_retries = config.transport.fragment_retries;
    opts.socket_timeout = config.transport.socket_timeout;

    opts
}

/// Progress callback: blocks while paused, aborts once canceled, prints everything else.
pub fn progress_callback<W>(control: Arc<ControlState>, console: Console<W>) -> ProgressCallback
where
    W: Write + Send + 'static,
{
    Box::new(move |progress: Progress| {
        if control.wait_while_paused().is_break() {
            return ControlFlow::Break(());
        }

        if let Some(status) = Status::from_progress(progress) {
            console.emit_or_log(&status);
        }

        ControlFlow::Continue(())
    })
}

/// Download `config.url` into `config.folder`.
///
/// `start_listener` runs once the folder exists, right before the download is configured.
pub fn execute<W, D>(
    config: &Config,
    control: Arc<ControlState>,
    console: Console<W>,
    downloader: &D,
    start_listener: impl FnOnce(Arc<ControlState>, Console<W>) -> Result<()>,
) -> Result<()>
where
    W: Write + Send + 'static,
    D: Downloader,
{
    console.emit(&Status::Started {
        url: config.url.clone(),
    })?;

    std::fs::create_dir_all(&config.folder).wrap_err_with(|| {
        format!(
            "failed to create download folder: {:?}",
            config.folder.display()
        )
    })?;

    start_listener(Arc::clone(&control), console.clone())?;

    let opts = build_options(config, Local::now());

    tracing::info!(
        url = config.url,
        quality = config.quality_label,
        format = opts.format,
        template = ?opts.outtmpl.default_template(),
        "starting download"
    );

    console.emit(&Status::Downloading {
        url: config.url.clone(),
        quality: config.quality_label.clone(),
    })?;

    downloader.download(&config.url, opts, progress_callback(control, console))?;

    tracing::info!(url = config.url, "download finished");

    Ok(())
}
