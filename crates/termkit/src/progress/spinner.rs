//! Indeterminate progress: an animated single-line spinner.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::style::{self, Icon};
use crate::term::{Console, Stream};
use crate::ticker::AnimationTicker;

/// Braille dots, the default spinner animation.
pub const DOTS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Default time between frames.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(80);

/// Animation settings for a spinner.
#[derive(Debug, Clone, Copy)]
pub struct SpinnerOptions {
    /// Frames cycled in order.
    pub frames: &'static [&'static str],
    /// Time between frames.
    pub interval: Duration,
}

impl SpinnerOptions {
    /// Options with the given frames and interval.
    ///
    /// Empty frames fall back to [`DOTS`]; a zero interval becomes 1 ms.
    pub fn new(frames: &'static [&'static str], interval: Duration) -> Self {
        Self::default().with_frames(frames).with_interval(interval)
    }

    /// Replace the frame sequence.
    pub fn with_frames(mut self, frames: &'static [&'static str]) -> Self {
        self.frames = if frames.is_empty() { DOTS } else { frames };
        self
    }

    /// Replace the interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval.max(Duration::from_millis(1));
        self
    }
}

impl Default for SpinnerOptions {
    fn default() -> Self {
        Self {
            frames: DOTS,
            interval: DEFAULT_INTERVAL,
        }
    }
}

const TEMPLATE: &str = "{spinner} {prefix}{msg}";

fn spinner_style(frames: &[&str]) -> ProgressStyle {
    // Always styled here; the draw target strips codes while color is off.
    let painted: Vec<String> = frames
        .iter()
        .map(|frame| style::paint(frame, &style::frame_style(), true))
        .collect();
    let mut ticks: Vec<&str> = painted.iter().map(String::as_str).collect();
    // The last tick string is the finished frame, which is never drawn.
    ticks.push(" ");
    super::template(TEMPLATE).tick_strings(&ticks)
}

struct Lifecycle {
    ticker: Option<AnimationTicker>,
    finished: bool,
}

/// A running spinner.
///
/// Created by [`spinner`](crate::progress::spinner) or
/// [`StageProgress::next`](crate::progress::StageProgress::next). Ends with
/// exactly one of [`success`](Self::success), [`error`](Self::error),
/// [`warn`](Self::warn) or [`clear`](Self::clear); later finishing calls
/// are ignored. Dropping a running spinner clears it.
pub struct SpinnerHandle {
    bar: ProgressBar,
    console: Console,
    prefix: Option<String>,
    lifecycle: Mutex<Lifecycle>,
}

impl SpinnerHandle {
    /// Start a spinner on the default console.
    pub fn new(message: &str) -> Self {
        Self::start(Console::default(), None, message, SpinnerOptions::default())
    }

    /// Start a spinner on `console`.
    pub fn with_console(console: Console, message: &str) -> Self {
        Self::start(console, None, message, SpinnerOptions::default())
    }

    /// Start a spinner with an optional prefix drawn before the message.
    ///
    /// The first frame is drawn before this returns.
    pub fn start(
        console: Console,
        prefix: Option<String>,
        message: &str,
        options: SpinnerOptions,
    ) -> Self {
        let options = options
            .with_frames(options.frames)
            .with_interval(options.interval);
        log::trace!("Spinner started: {message}");

        let bar = ProgressBar::hidden();
        bar.set_style(spinner_style(options.frames));
        if let Some(prefix) = &prefix {
            bar.set_prefix(prefix.clone());
        }
        bar.set_message(message.to_string());
        bar.set_draw_target(console.draw_target(Stream::Stdout));
        bar.tick();

        let ticker = AnimationTicker::start(&bar, options.interval);
        Self {
            bar,
            console,
            prefix,
            lifecycle: Mutex::new(Lifecycle {
                ticker: Some(ticker),
                finished: false,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Lifecycle> {
        self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the message shown next to the animation.
    pub fn update_message(&self, message: &str) {
        let lifecycle = self.lock();
        if lifecycle.finished {
            return;
        }
        self.bar.set_message(message.to_string());
    }

    /// The message currently shown.
    pub fn message(&self) -> String {
        self.bar.message()
    }

    /// The prefix, if any.
    pub fn prefix(&self) -> Option<String> {
        self.prefix.clone()
    }

    /// Whether a finishing call has happened.
    pub fn is_finished(&self) -> bool {
        self.lock().finished
    }

    /// Whether the background animation is still running.
    pub fn is_animating(&self) -> bool {
        self.lock()
            .ticker
            .as_ref()
            .is_some_and(AnimationTicker::is_running)
    }

    /// Stop and print `✓ <message>` on stdout.
    pub fn success(&self, message: &str) {
        self.finish(Some((Icon::Success, Stream::Stdout, message)));
    }

    /// Stop and print `✗ <message>` on stderr.
    pub fn error(&self, message: &str) {
        self.finish(Some((Icon::Error, Stream::Stderr, message)));
    }

    /// Stop and print `⚠ <message>` on stdout.
    pub fn warn(&self, message: &str) {
        self.finish(Some((Icon::Warn, Stream::Stdout, message)));
    }

    /// Stop and erase the spinner line, printing nothing.
    pub fn clear(&self) {
        self.finish(None);
    }

    fn finish(&self, outcome: Option<(Icon, Stream, &str)>) {
        // Held for the whole sequence so concurrent finishes serialize
        // behind the first one's join.
        let mut lifecycle = self.lock();
        if lifecycle.finished {
            return;
        }
        lifecycle.finished = true;

        if let Some(mut ticker) = lifecycle.ticker.take() {
            ticker.stop();
        }
        self.bar.finish_and_clear();
        // indicatif only erases lines it drew itself.
        self.console.clear_line(Stream::Stdout);

        if let Some((icon, stream, message)) = outcome {
            let icon = icon.paint(self.console.color_enabled());
            self.console.line(stream, &format!("{icon} {message}"));
        }
        log::trace!("Spinner finished");
    }
}

impl Drop for SpinnerHandle {
    fn drop(&mut self) {
        self.clear();
    }
}

impl std::fmt::Debug for SpinnerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpinnerHandle")
            .field("message", &self.bar.message())
            .field("prefix", &self.prefix)
            .field("finished", &self.lock().finished)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::CLEAR_LINE;
    use std::thread;

    fn fast() -> SpinnerOptions {
        SpinnerOptions::default().with_interval(Duration::from_millis(20))
    }

    fn slow() -> SpinnerOptions {
        SpinnerOptions::default().with_interval(Duration::from_secs(60))
    }

    fn drawn_frames(out: &str, message: &str) -> Vec<String> {
        let suffix = format!(" {message}");
        out.split('\r')
            .filter_map(|chunk| chunk.trim_end().strip_suffix(suffix.as_str()))
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_first_frame_drawn_immediately() {
        let (console, capture) = Console::capture(false);
        let s = SpinnerHandle::start(console, None, "Loading", slow());
        let out = capture.stdout();
        assert!(out.starts_with('\r'), "output: {out:?}");
        let frames = drawn_frames(&out, "Loading");
        assert!(!frames.is_empty(), "output: {out:?}");
        assert!(DOTS.contains(&frames[0].as_str()));
        s.clear();
    }

    #[test]
    fn test_prefix_rendered_before_message() {
        let (console, capture) = Console::capture(false);
        let s = SpinnerHandle::start(console, Some("[1/3] ".to_string()), "Fetch", slow());
        assert!(capture.stdout().contains(" [1/3] Fetch"));
        assert_eq!(s.prefix().as_deref(), Some("[1/3] "));
        s.clear();
    }

    #[test]
    fn test_frames_cycle_through_dots() {
        let (console, capture) = Console::capture(false);
        let s = SpinnerHandle::start(console, None, "x", fast());
        thread::sleep(Duration::from_millis(300));
        s.clear();

        let out = capture.stdout();
        let mut frames = drawn_frames(&out, "x");
        assert!(frames.iter().all(|f| DOTS.contains(&f.as_str())), "output: {out:?}");
        frames.dedup();
        assert!(frames.len() >= 2, "output: {out:?}");
    }

    #[test]
    fn test_success_line() {
        let (console, capture) = Console::capture(false);
        let s = SpinnerHandle::start(console, None, "Working", slow());
        s.success("Done");
        assert!(capture.stdout().contains("Working"));
        assert!(capture.stdout().ends_with(&format!("{CLEAR_LINE}✓ Done\n")));
        assert!(capture.stderr().is_empty());
    }

    #[test]
    fn test_error_goes_to_stderr() {
        let (console, capture) = Console::capture(false);
        let s = SpinnerHandle::start(console, None, "Working", slow());
        s.error("Failed");
        assert!(capture.stdout().ends_with(CLEAR_LINE));
        assert_eq!(capture.stderr(), "✗ Failed\n");
    }

    #[test]
    fn test_warn_line() {
        let (console, capture) = Console::capture(false);
        let s = SpinnerHandle::start(console, None, "Checking", slow());
        s.warn("Partial");
        assert!(capture.stdout().ends_with(&format!("{CLEAR_LINE}⚠ Partial\n")));
    }

    #[test]
    fn test_clear_prints_nothing_final() {
        let (console, capture) = Console::capture(false);
        let s = SpinnerHandle::start(console, None, "Working", slow());
        s.clear();
        let out = capture.stdout();
        assert!(out.ends_with(CLEAR_LINE));
        assert!(!out.contains('\n'));
    }

    #[test]
    fn test_second_finish_is_noop() {
        let (console, capture) = Console::capture(false);
        let s = SpinnerHandle::start(console, None, "Working", slow());
        s.success("Done");
        let after_first = capture.stdout();
        s.error("Again");
        s.warn("Again");
        s.clear();
        assert_eq!(capture.stdout(), after_first);
        assert!(capture.stderr().is_empty());
    }

    #[test]
    fn test_update_message_redraws() {
        let (console, capture) = Console::capture(false);
        let s = SpinnerHandle::start(console, None, "Long message", slow());
        s.update_message("Short");
        assert_eq!(s.message(), "Short");
        s.clear();
        assert!(capture.stdout().contains(" Short"));
    }

    #[test]
    fn test_update_after_finish_ignored() {
        let (console, capture) = Console::capture(false);
        let s = SpinnerHandle::start(console, None, "a", slow());
        s.success("b");
        let before = capture.stdout();
        s.update_message("c");
        assert_eq!(capture.stdout(), before);
        assert_eq!(s.message(), "a");
    }

    #[test]
    fn test_colored_frame() {
        let (console, capture) = Console::capture(true);
        let s = SpinnerHandle::start(console, None, "x", slow());
        assert!(capture.stdout().contains("\u{1b}["));
        s.clear();
    }

    #[test]
    fn test_plain_frame_when_color_off() {
        let (console, capture) = Console::capture(false);
        let s = SpinnerHandle::start(console, None, "x", slow());
        s.success("ok");
        assert!(!capture.stdout().contains("\u{1b}[3"));
    }

    #[test]
    fn test_finish_stops_animation() {
        let (console, _capture) = Console::capture(false);
        let s = SpinnerHandle::start(console, None, "x", fast());
        assert!(s.is_animating());
        s.success("ok");
        assert!(!s.is_animating());
        assert!(s.is_finished());
    }

    #[test]
    fn test_drop_clears() {
        let (console, capture) = Console::capture(false);
        {
            let _s = SpinnerHandle::start(console, None, "x", slow());
        }
        assert!(capture.stdout().ends_with(CLEAR_LINE));
    }
}
