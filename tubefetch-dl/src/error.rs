//! Error types for yt-dlp downloads.

use pyo3::PyErr;
use thiserror::Error;

/// Download failure variants.
#[derive(Debug, Error)]
pub enum Error {
    /// Progress callback requested cancellation
    #[error("download cancelled")]
    Cancelled,

    /// `YoutubeDL.download` returned a non-zero code
    #[error("yt-dlp finished with return code {0}")]
    Status(i64),

    /// Exception raised by yt-dlp or the Python runtime
    #[error(transparent)]
    Python(#[from] PyErr),
}

impl Error {
    /// Whether this error is a user-requested cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}

/// Result type alias for tubefetch-dl operations.
pub type Result<T> = std::result::Result<T, Error>;
