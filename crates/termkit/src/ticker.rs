//! Fixed-cadence redraws for a progress line.
//!
//! [`AnimationTicker`] owns the steady tick of an [`indicatif::ProgressBar`].
//! Stopping it takes the bar's ticker thread out and joins it, so once
//! [`AnimationTicker::stop`] returns the line is never redrawn by the
//! ticker again.

use std::time::Duration;

use indicatif::ProgressBar;

/// Keeps a bar redrawing every interval until stopped.
pub struct AnimationTicker {
    bar: ProgressBar,
    running: bool,
}

impl AnimationTicker {
    /// Start ticking `bar` every `interval`.
    ///
    /// A zero interval is raised to 1 ms.
    pub fn start(bar: &ProgressBar, interval: Duration) -> Self {
        bar.enable_steady_tick(interval.max(Duration::from_millis(1)));
        Self {
            bar: bar.clone(),
            running: true,
        }
    }

    /// Whether the ticker is still redrawing.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop ticking and wait for the ticker thread to exit.
    ///
    /// Idempotent.
    pub fn stop(&mut self) {
        if self.running {
            self.bar.disable_steady_tick();
            self.running = false;
        }
    }
}

impl std::fmt::Debug for AnimationTicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationTicker")
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}

impl Drop for AnimationTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::{Console, Stream};
    use indicatif::ProgressStyle;
    use std::thread;

    fn ticking_bar(console: &Console) -> ProgressBar {
        let bar = ProgressBar::with_draw_target(None, console.draw_target(Stream::Stdout));
        bar.set_style(
            ProgressStyle::with_template("{spinner} tick")
                .unwrap()
                .tick_strings(&["a", "b", "c", " "]),
        );
        bar
    }

    #[test]
    fn test_ticks_until_stopped() {
        let (console, capture) = Console::capture(false);
        let bar = ticking_bar(&console);
        let mut ticker = AnimationTicker::start(&bar, Duration::from_millis(20));
        assert!(ticker.is_running());

        thread::sleep(Duration::from_millis(200));
        ticker.stop();
        assert!(!ticker.is_running());

        let stopped_at = capture.stdout();
        assert!(stopped_at.contains(" tick"), "output: {stopped_at:?}");

        thread::sleep(Duration::from_millis(100));
        assert_eq!(capture.stdout(), stopped_at);
        bar.finish_and_clear();
    }

    #[test]
    fn test_stop_is_prompt_with_long_interval() {
        let (console, _capture) = Console::capture(false);
        let bar = ticking_bar(&console);
        let mut ticker = AnimationTicker::start(&bar, Duration::from_secs(60));
        let started = std::time::Instant::now();
        ticker.stop();
        assert!(started.elapsed() < Duration::from_secs(5));
        bar.finish_and_clear();
    }

    #[test]
    fn test_stop_twice() {
        let (console, _capture) = Console::capture(false);
        let bar = ticking_bar(&console);
        let mut ticker = AnimationTicker::start(&bar, Duration::from_millis(5));
        ticker.stop();
        ticker.stop();
        assert!(!ticker.is_running());
        bar.finish_and_clear();
    }

    #[test]
    fn test_drop_stops_ticking() {
        let (console, capture) = Console::capture(false);
        let bar = ticking_bar(&console);
        let ticker = AnimationTicker::start(&bar, Duration::from_millis(20));
        thread::sleep(Duration::from_millis(60));
        drop(ticker);

        let after_drop = capture.stdout();
        thread::sleep(Duration::from_millis(100));
        assert_eq!(capture.stdout(), after_drop);
        bar.finish_and_clear();
    }
}
