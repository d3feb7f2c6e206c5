//! Quality presets: user tokens mapped to yt-dlp format selectors.
//!
//! **Tokens:** `low`, `medium` (≤720p), `high` (≤1080p), `highest` (best available)
//!
//! ```no_run
//! use tubefetch_dl::{dl::DownloadOptions, quality::Quality};
//! let opts: DownloadOptions = Quality::from_token("Medium").into();
//! assert_eq!(opts.format, Quality::Medium.format_selector());
//! ```
//!
//! Unrecognized tokens fall back to [`Quality::Highest`].

use crate::dl::DownloadOptions;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Container used when yt-dlp merges separate video and audio streams.
pub const MERGE_OUTPUT_FORMAT: &str = "mp4";

/// Requested video quality.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Quality {
    /// Smallest available format
    Low,
    /// Up to 720p
    Medium,
    /// Up to 1080p
    High,
    /// Best video and audio available
    #[default]
    Highest,
}

impl Quality {
    /// Parse a user token, case-insensitively. Unknown tokens resolve to [`Quality::Highest`].
    pub fn from_token(token: &str) -> Self {
        match token.to_lowercase().as_str() {
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            "highest" => Self::Highest,
            other => {
                tracing::debug!(token = other, "unrecognized quality, using highest");
                Self::Highest
            }
        }
    }

    /// yt-dlp format selection expression.
    pub fn format_selector(self) -> &'static str {
        match self {
            Self::Low => "worst",
            Self::Medium => "bestvideo[height<=720]+bestaudio/best[height<=720]",
            Self::High => "bestvideo[height<=1080]+bestaudio/best[height<=1080]",
            Self::Highest => "bestvideo*+bestaudio/best",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Highest => "highest",
        }
    }
}

impl FromStr for Quality {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_token(s))
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Quality> for DownloadOptions {
    /// Video preset: quality selector, merged into mp4, transport defaults.
    fn from(quality: Quality) -> Self {
        Self {
            format: quality.format_selector().to_string(),
            merge_output_format: Some(MERGE_OUTPUT_FORMAT.to_string()),
            ..Default::default()
        }
    }
}
