//! tubefetch: yt-dlp download adapter for desktop shells.
//!
//! The host process starts `tubefetch <url> <quality> <folder>`, reads status lines from
//! stdout and writes `pause`, `resume`, `cancel` or `quit` to stdin.
//!
//! - [`control`] - pause/cancel flags shared between threads
//! - [`listener`] - stdin command loop
//! - [`dl`] - download orchestration and the progress callback
//! - [`console`] - stdout line protocol

pub mod cli;
pub mod console;
pub mod control;
pub mod dl;
pub mod listener;
