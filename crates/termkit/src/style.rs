//! Icons and color-gated styling.
//!
//! Styling never consults the `console` crate's own global switch: the
//! caller passes the color decision in, usually straight from a
//! [`ColorState`](crate::color::ColorState).

use console::Style;

/// Checkmark: ✓
pub const OK: &str = "✓";

/// Cross: ✗
pub const FAIL: &str = "✗";

/// Warning sign: ⚠
pub const WARN: &str = "⚠";

/// Info: ℹ
pub const INFO: &str = "ℹ";

/// Open circle, for skipped items: ○
pub const SKIP: &str = "○";

/// Status icons with their design-system colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    /// Green checkmark.
    Success,
    /// Red cross.
    Error,
    /// Yellow warning sign.
    Warn,
    /// Blue info icon.
    Info,
    /// Dimmed open circle.
    Skip,
}

impl Icon {
    /// The raw glyph.
    #[must_use]
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Success => OK,
            Self::Error => FAIL,
            Self::Warn => WARN,
            Self::Info => INFO,
            Self::Skip => SKIP,
        }
    }

    /// The default style for this icon.
    #[must_use]
    pub fn style(&self) -> Style {
        match self {
            Self::Success => Style::new().green(),
            Self::Error => Style::new().red(),
            Self::Warn => Style::new().yellow(),
            Self::Info => Style::new().blue(),
            Self::Skip => Style::new().dim(),
        }
    }

    /// The glyph, styled only if `color` is set.
    #[must_use]
    pub fn paint(&self, color: bool) -> String {
        paint(self.glyph(), &self.style(), color)
    }
}

/// Spinner frames.
pub fn frame_style() -> Style {
    Style::new().cyan()
}

/// Filled bar cells and the bar head.
pub fn bar_filled_style() -> Style {
    Style::new().cyan()
}

/// Empty bar cells.
pub fn bar_empty_style() -> Style {
    Style::new().blue()
}

/// Apply `style` to `text` if `color` is set, otherwise return it unchanged.
pub fn paint(text: &str, style: &Style, color: bool) -> String {
    if text.is_empty() {
        return String::new();
    }
    style.clone().force_styling(color).apply_to(text).to_string()
}
