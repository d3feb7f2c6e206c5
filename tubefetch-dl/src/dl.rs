//! yt-dlp Python API wrappers.
//!
//! Type-safe bindings to [yt-dlp](https://github.com/yt-dlp/yt-dlp) `YoutubeDL` parameters.
//!
//! ```no_run
//! use std::ops::ControlFlow;
//! use tubefetch_dl::dl::{Downloader, YtDlp};
//! use tubefetch_dl::quality::Quality;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! YtDlp.download(
//!     "https://youtube.com/watch?v=example",
//!     Quality::Medium.into(),
//!     Box::new(|progress| {
//!         println!("{progress:?}");
//!         ControlFlow::Continue(())
//!     }),
//! )?;
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, Result};
use crate::progress::{ProgressCallback, ProgressHook, cancelled_type};
use pyo3::prelude::*;
use pyo3::types::PyList;
use std::collections::HashMap;
use std::path::Path;

/// Default number of retries for whole requests and for fragments.
pub const DEFAULT_RETRIES: u32 = 3;

/// Default socket timeout in seconds.
pub const DEFAULT_SOCKET_TIMEOUT: u32 = 30;

/// Filename templates using `%(field)s` syntax. Key `default` required.
#[derive(Clone, Debug, Default, IntoPyObject)]
pub struct OutputTemplates(pub HashMap<String, String>);

impl OutputTemplates {
    /// Create with a single default template.
    pub fn simple(default: String) -> Self {
        Self(HashMap::from([("default".to_string(), default)]))
    }

    /// Default template rooted at `dir`.
    pub fn in_dir(dir: &Path, file_template: &str) -> Self {
        Self::simple(dir.join(file_template).to_string_lossy().to_string())
    }

    pub fn default_template(&self) -> Option<&str> {
        self.0.get("default").map(String::as_str)
    }
}

/// yt-dlp download configuration passed to `YoutubeDL(params)`.
///
/// Transport options (`socket_timeout`, `retries`, `fragment_retries`) are handed to
/// yt-dlp's own retry machinery unchanged.
#[derive(Clone, Debug, IntoPyObject)]
pub struct DownloadOptions {
    pub format: String,
    pub merge_output_format: Option<String>,
    pub outtmpl: OutputTemplates,
    pub extract_flat: bool,
    pub noprogress: bool,
    pub quiet: bool,
    pub continuedl: bool,
    pub socket_timeout: u32,
    pub retries: u32,
    pub fragment_retries: u32,
    pub skip_unavailable_fragments: bool,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            format: "best".to_string(),
            merge_output_format: None,
            outtmpl: OutputTemplates::default(),
            extract_flat: false,
            noprogress: false,
            quiet: false,
            continuedl: true,
            socket_timeout: DEFAULT_SOCKET_TIMEOUT,
            retries: DEFAULT_RETRIES,
            fragment_retries: DEFAULT_RETRIES,
            skip_unavailable_fragments: true,
        }
    }
}

/// Blocking download backend.
pub trait Downloader {
    /// Download a single URL, reporting progress through `on_progress`.
    ///
    /// Returns [`Error::Cancelled`] when `on_progress` breaks.
    fn download(&self, url: &str, opts: DownloadOptions, on_progress: ProgressCallback)
    -> Result<()>;
}

/// The yt-dlp Python package, driven in-process.
#[derive(Clone, Copy, Debug, Default)]
pub struct YtDlp;

impl YtDlp {
    /// Installed yt-dlp version string.
    pub fn version(&self) -> Result<String> {
        Python::attach(|py| {
            let version = py.import("yt_dlp.version")?.getattr("__version__")?;
            Ok(version.extract()?)
        })
    }
}

impl Downloader for YtDlp {
    /// Runs `with YoutubeDL(params) as ydl: ydl.download([url])`.
    fn download(
        &self,
        url: &str,
        opts: DownloadOptions,
        on_progress: ProgressCallback,
    ) -> Result<()> {
        Python::attach(|py| {
            let module = py.import("yt_dlp")?;

            let params = opts.into_pyobject(py)?;
            let hook = Bound::new(py, ProgressHook::new(on_progress))?;
            params.set_item("progress_hooks", PyList::new(py, [hook])?)?;

            let ydl = module.getattr("YoutubeDL")?.call1((params,))?;
            let ydl = ydl.call_method0("__enter__")?;

            let result = ydl.call_method1("download", ([url],));

            // `__exit__` saves cookies and closes the request director either way
            ydl.call_method1("__exit__", (py.None(), py.None(), py.None()))?;

            let cancelled = cancelled_type(py)?;
            match result {
                Ok(code) => match code.extract::<i64>()? {
                    0 => Ok(()),
                    code => Err(Error::Status(code)),
                },
                Err(e) if e.is_instance(py, &cancelled) => Err(Error::Cancelled),
                Err(e) => Err(Error::Python(e)),
            }
        })
    }
}
