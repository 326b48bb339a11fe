//! Progress indicators for long-running operations.
//!
//! ## Spinner (Indeterminate Progress)
//!
//! ```no_run
//! let spinner = termkit::progress::spinner("Connecting to server...");
//! // ... do work ...
//! spinner.success("Connected");
//! ```
//!
//! ## Progress Bar (Determinate Progress)
//!
//! ```no_run
//! let bar = termkit::progress::bar(100, "Downloading");
//! for _ in 0..100 {
//!     // ... do work ...
//!     bar.add(1);
//! }
//! bar.success("Downloaded");
//! ```
//!
//! ## Multi-Stage Progress
//!
//! See [`StageProgress`].
//!
//! Spinners and bars are `indicatif` progress bars drawn through a
//! [`ConsoleTerm`](crate::term::ConsoleTerm). All indicators write to the
//! default [`Console`](crate::term::Console) unless built with one
//! explicitly, and check its color state on every redraw.

use indicatif::ProgressStyle;

mod bar;
mod spinner;
mod stage;

pub use bar::{BarHandle, BarOptions, cells};
pub use spinner::{DEFAULT_INTERVAL, DOTS, SpinnerHandle, SpinnerOptions};
pub use stage::StageProgress;

/// Start a spinner for indeterminate progress.
pub fn spinner(message: &str) -> SpinnerHandle {
    SpinnerHandle::new(message)
}

/// Create a progress bar for `total` units of work.
pub fn bar(total: u64, description: &str) -> BarHandle {
    BarHandle::new(total, description)
}

fn template(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template).unwrap_or_else(|e| {
        log::debug!("Invalid progress template {template:?}: {e}");
        ProgressStyle::default_spinner()
    })
}
