//! Formatting utilities for human-readable output.
//!
//! Every function here is pure and reentrant.
//!
//! ```
//! use termkit::format;
//!
//! assert_eq!(format::human_size(1024), "1.0 KB");
//! assert_eq!(format::parse_size("100MB").unwrap(), 104_857_600);
//! assert_eq!(format::pluralize(2, "file", "files"), "2 files");
//! ```

use std::time::Duration;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::error::{Error, Result, SizeIssue};

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;
const TB: u64 = GB * 1024;

/// Suffixes in match order: longest first so `KB` never parses as a trailing `B`.
const SUFFIXES: [(&str, u64); 5] = [("TB", TB), ("GB", GB), ("MB", MB), ("KB", KB), ("B", 1)];

const ELLIPSIS: &str = "...";

/// Format bytes as a human-readable size string.
///
/// Binary units. Bytes are printed as an integer, KB/MB/GB with one
/// decimal, TB with two.
///
/// ```
/// use termkit::format::human_size;
///
/// assert_eq!(human_size(0), "0 B");
/// assert_eq!(human_size(1023), "1023 B");
/// assert_eq!(human_size(1024), "1.0 KB");
/// assert_eq!(human_size(1024u64.pow(4)), "1.00 TB");
/// ```
pub fn human_size(bytes: u64) -> String {
    if bytes >= TB {
        format!("{:.2} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

/// Parse a human-readable size string into bytes.
///
/// Accepts `<number>[<unit>]` with unit one of B, KB, MB, GB, TB in any
/// case, surrounding whitespace ignored. No unit means bytes. Decimal
/// numbers are allowed; the product is rounded to the nearest byte.
///
/// ```
/// use termkit::format::parse_size;
///
/// assert_eq!(parse_size("100").unwrap(), 100);
/// assert_eq!(parse_size("1kb").unwrap(), 1024);
/// assert_eq!(parse_size("1.5GB").unwrap(), 1_610_612_736);
/// assert!(parse_size("-100MB").is_err());
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidFormat`] when the string is empty, has a unit
/// but no number, or is negative. The number must be plain digits with an
/// optional fractional part, so signs and exponents are rejected, as is
/// any value past `u64::MAX` bytes.
pub fn parse_size(input: &str) -> Result<u64> {
    let normalized = input.trim().to_uppercase();

    if normalized.is_empty() {
        return Err(Error::invalid_format(input, SizeIssue::Empty));
    }

    let (number, multiplier) = SUFFIXES
        .iter()
        .find_map(|(suffix, mult)| normalized.strip_suffix(suffix).map(|n| (n, *mult)))
        .unwrap_or((normalized.as_str(), 1));

    let number = number.trim();
    if number.is_empty() {
        return Err(Error::invalid_format(input, SizeIssue::MissingNumber));
    }
    if number.strip_prefix('-').is_some_and(is_decimal) {
        return Err(Error::invalid_format(input, SizeIssue::Negative));
    }
    if !is_decimal(number) {
        return Err(Error::invalid_format(input, SizeIssue::NotANumber));
    }

    let value: f64 = number
        .parse()
        .map_err(|_| Error::invalid_format(input, SizeIssue::NotANumber))?;

    let bytes = (value * multiplier as f64).round();
    // u64::MAX rounds up to 2^64 as f64, the first value that does not fit.
    if bytes >= u64::MAX as f64 {
        return Err(Error::invalid_format(input, SizeIssue::TooLarge));
    }

    Ok(bytes as u64)
}

/// `digits` or `digits.digits`, ASCII only.
fn is_decimal(number: &str) -> bool {
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    match number.split_once('.') {
        Some((whole, fraction)) => digits(whole) && digits(fraction),
        None => digits(number),
    }
}

/// Format a duration in a human-readable way.
///
/// Sub-second values print as milliseconds, under a minute as seconds
/// with one truncated decimal, under an hour as minutes and seconds,
/// anything longer as hours and minutes.
///
/// ```
/// use std::time::Duration;
/// use termkit::format::human_duration;
///
/// assert_eq!(human_duration(Duration::from_millis(500)), "500ms");
/// assert_eq!(human_duration(Duration::from_secs(5)), "5.0s");
/// assert_eq!(human_duration(Duration::from_secs(90)), "1m 30s");
/// assert_eq!(human_duration(Duration::from_secs(3661)), "1h 1m");
/// ```
pub fn human_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if secs == 0 {
        format!("{millis}ms")
    } else if secs < 60 {
        format!("{secs}.{}s", millis / 100)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}

/// Format a count with its singular or plural noun.
///
/// Only exactly one takes the singular form.
pub fn pluralize(count: i64, singular: &str, plural: &str) -> String {
    let word = if count == 1 { singular } else { plural };
    format!("{count} {word}")
}

/// Format a number with comma thousands separators.
///
/// ```
/// use termkit::format::human_count;
///
/// assert_eq!(human_count(999), "999");
/// assert_eq!(human_count(1_234_567), "1,234,567");
/// ```
pub fn human_count(n: u64) -> String {
    let digits = n.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result
}

/// Truncate a path for display, keeping its end.
///
/// `max_len` is measured in terminal columns. A path that fits is
/// returned unchanged; otherwise it is cut from the front and prefixed
/// with `...`. Wide characters are never split, so the result may be
/// one column narrower than `max_len`, and combining marks are never kept
/// without their base character.
///
/// ```
/// use termkit::format::truncate_path;
///
/// assert_eq!(truncate_path("short.txt", 20), "short.txt");
/// assert_eq!(truncate_path("/very/long/path/to/file.txt", 15), ".../to/file.txt");
/// assert_eq!(truncate_path("test", 3), "...");
/// ```
pub fn truncate_path(path: &str, max_len: usize) -> String {
    if path.width() <= max_len {
        return path.to_string();
    }

    if max_len <= ELLIPSIS.len() {
        return ELLIPSIS.to_string();
    }

    let budget = max_len - ELLIPSIS.len();
    let mut start = path.len();
    for (idx, _) in path.char_indices().rev() {
        if path[idx..].width() > budget {
            break;
        }
        start = idx;
    }

    let kept = path[start..].trim_start_matches(|ch: char| ch.width() == Some(0));
    format!("{ELLIPSIS}{kept}")
}
