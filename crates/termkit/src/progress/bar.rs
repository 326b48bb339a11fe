//! Determinate progress: a bar redrawn on every update.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use indicatif::{ProgressBar, ProgressState, ProgressStyle};

use crate::style::{self, Icon};
use crate::term::{Console, Stream};

/// Default bar width in cells.
pub const DEFAULT_WIDTH: usize = 40;

/// Glyphs and width of a progress bar.
#[derive(Debug, Clone, Copy)]
pub struct BarOptions {
    /// Number of cells between the brackets.
    pub width: usize,
    /// Completed cells.
    pub filled: &'static str,
    /// The cell at the filled/empty boundary.
    pub head: &'static str,
    /// Remaining cells.
    pub empty: &'static str,
}

impl BarOptions {
    /// Replace the width (at least one cell).
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(1);
        self
    }

    /// Replace the glyphs.
    pub fn with_glyphs(
        mut self,
        filled: &'static str,
        head: &'static str,
        empty: &'static str,
    ) -> Self {
        self.filled = filled;
        self.head = head;
        self.empty = empty;
        self
    }
}

impl Default for BarOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            filled: "━",
            head: "╸",
            empty: "─",
        }
    }
}

/// Cell counts for a bar of `width` cells.
///
/// Returns `(filled, head, empty)` where `head` is 0 or 1 and the three
/// sum to `width`. `current` is clamped to `total`; a zero total counts
/// as complete.
pub fn cells(current: u64, total: u64, width: usize) -> (usize, usize, usize) {
    let filled = if total == 0 {
        width
    } else {
        let done = u128::from(current.min(total));
        (done * width as u128 / u128::from(total)) as usize
    };
    let head = usize::from(filled < width);
    (filled, head, width - filled - head)
}

const TEMPLATE: &str = "{prefix}[{cells}] {pos}/{len}";

/// The bar cells for `current` of `total`, styled.
fn render_cells(current: u64, total: u64, options: &BarOptions) -> String {
    let (filled, head, empty) = cells(current, total, options.width);
    format!(
        "{}{}",
        style::paint(
            &format!(
                "{}{}",
                options.filled.repeat(filled),
                options.head.repeat(head)
            ),
            &style::bar_filled_style(),
            true,
        ),
        style::paint(
            &options.empty.repeat(empty),
            &style::bar_empty_style(),
            true
        ),
    )
}

fn bar_style(options: BarOptions) -> ProgressStyle {
    // Always styled here; the draw target strips codes while color is off.
    super::template(TEMPLATE).with_key(
        "cells",
        move |state: &ProgressState, w: &mut dyn fmt::Write| {
            let _ = w.write_str(&render_cells(
                state.pos(),
                state.len().unwrap_or(0),
                &options,
            ));
        },
    )
}

/// A determinate progress bar.
///
/// Renders `<description> [━━━━╸────] <current>/<total>` on stdout each
/// time the position changes. Updates after a finishing call are ignored,
/// as are repeated finishing calls. Dropping an unfinished bar clears it.
pub struct BarHandle {
    bar: ProgressBar,
    console: Console,
    description: String,
    state: Mutex<BarState>,
}

struct BarState {
    current: u64,
    finished: bool,
}

impl BarHandle {
    /// Create a bar on the default console.
    pub fn new(total: u64, description: &str) -> Self {
        Self::with_options(Console::default(), total, description, BarOptions::default())
    }

    /// Create a bar on `console`.
    pub fn with_console(console: Console, total: u64, description: &str) -> Self {
        Self::with_options(console, total, description, BarOptions::default())
    }

    /// Create a bar with custom options and draw it at zero.
    pub fn with_options(
        console: Console,
        total: u64,
        description: &str,
        options: BarOptions,
    ) -> Self {
        log::trace!("Bar started: {description} (0/{total})");
        let bar = ProgressBar::hidden();
        bar.set_length(total);
        bar.set_style(bar_style(options.with_width(options.width)));
        if !description.is_empty() {
            bar.set_prefix(format!("{description} "));
        }
        bar.set_draw_target(console.draw_target(Stream::Stdout));
        bar.tick();

        Self {
            bar,
            console,
            description: description.to_string(),
            state: Mutex::new(BarState {
                current: 0,
                finished: false,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BarState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Advance by `n` and redraw.
    pub fn add(&self, n: u64) {
        self.update(|current| current.saturating_add(n));
    }

    /// Move to `n` and redraw.
    pub fn set(&self, n: u64) {
        self.update(|_| n);
    }

    fn update(&self, f: impl FnOnce(u64) -> u64) {
        let mut state = self.lock();
        if state.finished {
            return;
        }
        state.current = f(state.current);
        self.bar.set_position(state.current);
    }

    /// Stored position. May exceed the total.
    pub fn position(&self) -> u64 {
        self.lock().current
    }

    /// Total units of work.
    pub fn total(&self) -> u64 {
        self.bar.length().unwrap_or(0)
    }

    /// Whether a finishing call has happened.
    pub fn is_finished(&self) -> bool {
        self.lock().finished
    }

    /// Erase the bar and print `✓ <message>` on stdout.
    pub fn success(&self, message: &str) {
        self.finish(Some((Icon::Success, Stream::Stdout, message)));
    }

    /// Erase the bar and print `✗ <message>` on stderr.
    pub fn error(&self, message: &str) {
        self.finish(Some((Icon::Error, Stream::Stderr, message)));
    }

    /// Erase the bar, printing nothing.
    pub fn clear(&self) {
        self.finish(None);
    }

    fn finish(&self, outcome: Option<(Icon, Stream, &str)>) {
        let mut state = self.lock();
        if state.finished {
            return;
        }
        state.finished = true;

        self.bar.finish_and_clear();
        self.console.clear_line(Stream::Stdout);
        if let Some((icon, stream, message)) = outcome {
            let icon = icon.paint(self.console.color_enabled());
            self.console.line(stream, &format!("{icon} {message}"));
        }
        log::trace!("Bar finished: {}", self.description);
    }
}

impl Drop for BarHandle {
    fn drop(&mut self) {
        self.clear();
    }
}

impl fmt::Debug for BarHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BarHandle")
            .field("description", &self.description)
            .field("current", &self.position())
            .field("total", &self.total())
            .field("finished", &self.is_finished())
            .finish()
    }
}
