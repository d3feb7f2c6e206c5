//! Line protocol written to stdout for the host UI.
//!
//! The host matches on these lines, so their text must stay stable.

use parking_lot::Mutex;
use std::fmt;
use std::io::{self, Stdout, Write};
use std::sync::Arc;
use tubefetch_dl::progress::Progress;

/// One status line (or a blank line followed by one) of the stdout protocol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Started { url: String },
    Downloading { url: String, quality: String },
    Paused,
    Resumed,
    Cancelled,
    Progress {
        percent: String,
        total: String,
        speed: String,
        eta: String,
    },
    Complete { filename: String },
    CancelledByUser,
    Failed { message: String },
}

impl Status {
    /// Status line for a progress event, if it has one.
    pub fn from_progress(progress: Progress) -> Option<Self> {
        match progress {
            Progress::Downloading {
                percent,
                total,
                speed,
                eta,
            } => Some(Self::Progress {
                percent,
                total,
                speed,
                eta,
            }),
            Progress::Finished { filename } => Some(Self::Complete { filename }),
            Progress::Error | Progress::Other(_) => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started { url } => write!(f, "Download started: {url}"),
            Self::Downloading { url, quality } => {
                write!(f, "Downloading: {url} at {quality} quality...")
            }
            Self::Paused => write!(f, "\n⏸ Download paused"),
            Self::Resumed => write!(f, "\n▶ Download resumed"),
            Self::Cancelled => write!(f, "\n❌ Download cancelled"),
            Self::Progress {
                percent,
                total,
                speed,
                eta,
            } => write!(f, "[download] {percent} of {total} at {speed} ETA {eta}"),
            Self::Complete { filename } => write!(f, "\n✅ Download complete: {filename}"),
            Self::CancelledByUser => write!(f, "\n❌ Download cancelled by user"),
            Self::Failed { message } => write!(f, "\n❌ Download failed: {message}"),
        }
    }
}

/// Shared line writer. Each status is written and flushed under one lock.
#[derive(Debug)]
pub struct Console<W = Stdout> {
    out: Arc<Mutex<W>>,
}

impl<W> Clone for Console<W> {
    fn clone(&self) -> Self {
        Self {
            out: Arc::clone(&self.out),
        }
    }
}

impl Console {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Arc::new(Mutex::new(out)),
        }
    }

    pub fn emit(&self, status: &Status) -> io::Result<()> {
        let mut out = self.out.lock();
        writeln!(out, "{status}")?;
        out.flush()
    }

    /// Like [`Console::emit`], but only logs write failures.
    ///
    /// Used where there is no caller to report to, e.g. inside the progress hook.
    pub fn emit_or_log(&self, status: &Status) {
        if let Err(e) = self.emit(status) {
            tracing::warn!(error = %e, ?status, "failed to write status line");
        }
    }
}

#[cfg(test)]
impl Console<Vec<u8>> {
    /// Captured output as text.
    pub(crate) fn contents(&self) -> String {
        String::from_utf8(self.out.lock().clone()).unwrap()
    }
}
