//! Type-safe Rust bindings to the [yt-dlp](https://github.com/yt-dlp/yt-dlp) Python library.
//!
//! ## Modules
//!
//! - [`dl`] - `YoutubeDL` options and the [`dl::Downloader`] backend
//! - [`progress`] - progress events and the hook yt-dlp calls back into
//! - [`quality`] - quality presets mapped to format selectors
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::ops::ControlFlow;
//! use std::path::Path;
//! use tubefetch_dl::dl::{DownloadOptions, Downloader, OutputTemplates, YtDlp};
//! use tubefetch_dl::progress::Progress;
//! use tubefetch_dl::quality::Quality;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut opts: DownloadOptions = Quality::High.into();
//! opts.outtmpl = OutputTemplates::in_dir(Path::new("videos"), "%(title)s.%(ext)s");
//!
//! YtDlp.download(
//!     "https://youtube.com/watch?v=example",
//!     opts,
//!     Box::new(|progress| {
//!         if let Progress::Finished { filename } = progress {
//!             println!("saved {filename}");
//!         }
//!         ControlFlow::Continue(())
//!     }),
//! )?;
//! # Ok(())
//! # }
//! ```
//!
//! Returning [`ControlFlow::Break`](std::ops::ControlFlow::Break) from the callback aborts
//! the download with [`Error::Cancelled`].

pub mod dl;
pub mod error;
pub mod progress;
pub mod quality;

#[cfg(test)]
mod fake;

pub use error::{Error, Result};
