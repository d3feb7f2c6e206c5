//! Progress hook bridge between yt-dlp and Rust callbacks.
//!
//! yt-dlp calls every entry of `progress_hooks` with a status dict. [`ProgressHook`] is
//! the Python callable installed there: it converts the dict to a [`Progress`], runs the
//! Rust callback with the GIL released, and raises `DownloadCancelled` when the callback
//! returns [`ControlFlow::Break`].

use pyo3::prelude::*;
use std::ops::ControlFlow;

/// Rust-side progress callback. `Break` aborts the download.
pub type ProgressCallback = Box<dyn Fn(Progress) -> ControlFlow<()> + Send + Sync>;

/// Progress event reported by yt-dlp.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Progress {
    /// Transfer in progress, values pre-formatted by yt-dlp
    Downloading {
        percent: String,
        total: String,
        speed: String,
        eta: String,
    },
    /// A file finished downloading (before any merge/post-processing)
    Finished { filename: String },
    /// yt-dlp reported a download error for the current file
    Error,
    /// Any status this crate does not interpret
    Other(String),
}

/// Raw fields of the yt-dlp status dict.
///
/// The `_*_str` fields are filled in by yt-dlp's own console reporter, which runs as the
/// first progress hook.
#[derive(Debug, FromPyObject)]
#[pyo3(from_item_all)]
struct StatusDict {
    status: String,
    #[pyo3(default)]
    filename: Option<String>,
    #[pyo3(item("_percent_str"), default)]
    percent: Option<String>,
    #[pyo3(item("_total_bytes_str"), default)]
    total: Option<String>,
    #[pyo3(item("_speed_str"), default)]
    speed: Option<String>,
    #[pyo3(item("_eta_str"), default)]
    eta: Option<String>,
}

fn trimmed_or(value: Option<String>, fallback: &str) -> String {
    value
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| fallback.to_string())
}

impl From<StatusDict> for Progress {
    fn from(dict: StatusDict) -> Self {
        match dict.status.as_str() {
            "downloading" => Self::Downloading {
                percent: trimmed_or(dict.percent, "0%"),
                total: trimmed_or(dict.total, "?"),
                speed: trimmed_or(dict.speed, "?"),
                eta: trimmed_or(dict.eta, "?"),
            },
            "finished" => Self::Finished {
                filename: dict.filename.unwrap_or_else(|| "unknown file".to_string()),
            },
            "error" => Self::Error,
            _ => Self::Other(dict.status),
        }
    }
}

impl Progress {
    /// Extract from a yt-dlp status dict.
    pub fn extract(obj: &Bound<'_, PyAny>) -> PyResult<Self> {
        Ok(obj.extract::<StatusDict>()?.into())
    }
}

/// Python callable installed into `progress_hooks`.
#[pyclass(frozen)]
pub struct ProgressHook {
    callback: ProgressCallback,
}

impl ProgressHook {
    pub fn new(callback: ProgressCallback) -> Self {
        Self { callback }
    }
}

#[pymethods]
impl ProgressHook {
    fn __call__(&self, py: Python<'_>, status: &Bound<'_, PyAny>) -> PyResult<()> {
        let progress = Progress::extract(status)?;

        // The callback may block for a long time while paused
        match py.detach(|| (self.callback)(progress)) {
            ControlFlow::Continue(()) => Ok(()),
            ControlFlow::Break(()) => {
                tracing::debug!("progress callback requested cancellation");
                Err(download_cancelled(py)?)
            }
        }
    }
}

/// Build the `yt_dlp.utils.DownloadCancelled` exception yt-dlp propagates unchanged.
pub(crate) fn download_cancelled(py: Python<'_>) -> PyResult<PyErr> {
    let exc = cancelled_type(py)?.call0()?;
    Ok(PyErr::from_value(exc))
}

pub(crate) fn cancelled_type(py: Python<'_>) -> PyResult<Bound<'_, PyAny>> {
    py.import("yt_dlp.utils")?.getattr("DownloadCancelled")
}
