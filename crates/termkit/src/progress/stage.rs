//! Multi-stage progress.

use crate::style::Icon;
use crate::term::{Console, Stream};

use super::spinner::{SpinnerHandle, SpinnerOptions};

/// Tracks progress through a sequence of named stages.
///
/// Each [`next`](Self::next) starts a spinner prefixed with
/// `[current/total]`; [`skip`](Self::skip) prints a static skipped line.
/// Going past `total` is allowed: the counter keeps climbing and the
/// tracker stays complete.
///
/// ```no_run
/// use termkit::progress::StageProgress;
///
/// let mut stages = StageProgress::new(3);
///
/// let s = stages.next("Downloading");
/// s.success("Downloaded");
///
/// stages.skip("Verifying");
///
/// let s = stages.next("Installing");
/// s.success("Installed");
///
/// assert!(stages.is_complete());
/// ```
#[derive(Debug)]
pub struct StageProgress {
    current: usize,
    total: usize,
    console: Console,
    options: SpinnerOptions,
}

impl StageProgress {
    /// Tracker for `total` stages on the default console.
    pub fn new(total: usize) -> Self {
        Self::with_console(Console::default(), total)
    }

    /// Tracker for `total` stages on `console`.
    pub fn with_console(console: Console, total: usize) -> Self {
        Self {
            current: 0,
            total,
            console,
            options: SpinnerOptions::default(),
        }
    }

    /// Use `options` for the spinners of later stages.
    pub fn with_spinner_options(mut self, options: SpinnerOptions) -> Self {
        self.options = options;
        self
    }

    /// Start the next stage and return its spinner.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self, name: &str) -> SpinnerHandle {
        self.current += 1;
        log::debug!("Stage {}/{}: {name}", self.current, self.total);
        SpinnerHandle::start(
            self.console.clone(),
            Some(format!("{} ", self.counter())),
            name,
            self.options,
        )
    }

    /// Count a stage as done without running it.
    pub fn skip(&mut self, name: &str) {
        self.current += 1;
        log::debug!("Stage {}/{} skipped: {name}", self.current, self.total);
        let icon = Icon::Skip.paint(self.console.color_enabled());
        self.console.line(
            Stream::Stdout,
            &format!("  {icon} {} {name} (skipped)", self.counter()),
        );
    }

    /// Stages started or skipped so far.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Total number of stages.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Whether every stage has been started or skipped.
    pub fn is_complete(&self) -> bool {
        self.current >= self.total
    }

    fn counter(&self) -> String {
        format!("[{}/{}]", self.current, self.total)
    }
}
