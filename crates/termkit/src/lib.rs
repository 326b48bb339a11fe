//! # termkit
//!
//! Terminal UI toolkit for building beautiful CLI applications.
//!
//! This crate provides the moving parts of a CLI interface:
//! - **Progress**: Spinners, progress bars, multi-stage tracking
//! - **Formatting**: Human-readable sizes, durations, counts, path truncation
//! - **Color**: `NO_COLOR`/`CLICOLOR` aware styling switch
//!
//! ## Quick Start
//!
//! ```no_run
//! use termkit::{format, progress};
//!
//! termkit::init();
//!
//! // Progress
//! let spinner = progress::spinner("Loading...");
//! // ... do work ...
//! spinner.success("Loaded");
//!
//! // Formatting
//! let size = format::human_size(1024 * 1024 * 50);
//! assert_eq!(size, "50.0 MB");
//! ```
//!
//! ## Design Philosophy
//!
//! termkit provides opinionated defaults for a consistent look:
//! - Success: green checkmark (✓)
//! - Error: red cross (✗), written to stderr
//! - Warning: yellow warning sign (⚠)
//! - Skipped: dim open circle (○)
//! - Spinners: cyan braille dots at 80 ms per frame

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod color;
pub mod error;
pub mod format;
pub mod progress;
pub mod style;
pub mod term;
pub mod ticker;

// Re-export commonly used items at crate root for convenience
pub use color::ColorState;
pub use error::{Error, Result, SizeIssue};
pub use format::{human_count, human_duration, human_size, parse_size, pluralize, truncate_path};
pub use progress::{BarHandle, SpinnerHandle, StageProgress, bar, spinner};
pub use term::Console;

/// Configure color output from the environment.
///
/// Re-reads `NO_COLOR`, `CLICOLOR_FORCE` and `CLICOLOR` and checks
/// whether stdout is a terminal. See [`color`] for the precedence.
///
/// ```no_run
/// termkit::init();
/// ```
pub fn init() {
    ColorState::global().refresh_from_env();
}

/// Explicitly enable or disable colored output.
///
/// Overrides environment detection until called again. Running spinners
/// pick up the change on their next frame.
///
/// ```no_run
/// termkit::set_color(false);
/// ```
pub fn set_color(enabled: bool) {
    log::debug!("Color explicitly {}", if enabled { "enabled" } else { "disabled" });
    ColorState::global().set(enabled);
}

/// Whether the process-wide color state is enabled.
pub fn color_enabled() -> bool {
    ColorState::global().enabled()
}
