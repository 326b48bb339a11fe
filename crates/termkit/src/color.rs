//! Color output switch.
//!
//! A [`ColorState`] decides whether styling escape codes are emitted.
//! Renderers read it every time they write, so flipping it takes effect
//! on the very next frame.
//!
//! # Environment Variables
//!
//! Resolution order, first match wins:
//! 1. `NO_COLOR` set to any non-empty value: off
//! 2. `CLICOLOR_FORCE` truthy (non-empty, not `0`/`false`): on, even when piped
//! 3. `CLICOLOR` set: off if `0`, on otherwise
//! 4. On when stdout is a terminal

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Disables color when set to any non-empty value.
pub const ENV_NO_COLOR: &str = "NO_COLOR";

/// Forces color on when truthy, even if stdout is not a terminal.
pub const ENV_CLICOLOR_FORCE: &str = "CLICOLOR_FORCE";

/// Disables color when set to `0`.
pub const ENV_CLICOLOR: &str = "CLICOLOR";

static GLOBAL: OnceLock<Arc<ColorState>> = OnceLock::new();

/// Whether styled output is enabled.
#[derive(Debug)]
pub struct ColorState {
    enabled: AtomicBool,
}

impl ColorState {
    /// Create a state with an explicit value.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
        }
    }

    /// Create a state from the process environment and stdout.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(detect_from_env())
    }

    /// The process-wide state used by the default console.
    ///
    /// Initialized from the environment on first access.
    pub fn global() -> &'static Arc<ColorState> {
        GLOBAL.get_or_init(|| Arc::new(Self::from_env()))
    }

    /// Whether color is currently enabled.
    pub fn enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Override the current value.
    pub fn set(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
    }

    /// Re-run environment detection and store the result.
    pub fn refresh_from_env(&self) {
        self.set(detect_from_env());
    }
}

impl Default for ColorState {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Resolve the color setting from a variable lookup and a terminal flag.
///
/// `lookup` returns the value of an environment variable, if set.
pub fn detect<F>(lookup: F, is_terminal: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    if lookup(ENV_NO_COLOR).is_some_and(|v| !v.is_empty()) {
        log::debug!("Color disabled by {ENV_NO_COLOR}");
        return false;
    }

    if lookup(ENV_CLICOLOR_FORCE).is_some_and(|v| is_truthy(&v)) {
        log::debug!("Color forced by {ENV_CLICOLOR_FORCE}");
        return true;
    }

    if let Some(val) = lookup(ENV_CLICOLOR) {
        let enabled = val != "0";
        log::debug!("Color {} by {ENV_CLICOLOR}={val}", on_off(enabled));
        return enabled;
    }

    log::debug!("Color {} by terminal detection", on_off(is_terminal));
    is_terminal
}

fn detect_from_env() -> bool {
    detect(
        |name| std::env::var(name).ok(),
        console::Term::stdout().is_term(),
    )
}

fn is_truthy(value: &str) -> bool {
    !value.is_empty() && value != "0" && !value.eq_ignore_ascii_case("false")
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "enabled" } else { "disabled" }
}
