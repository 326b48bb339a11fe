//! Rendered output of the progress indicators, captured in memory.

use std::io;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use termkit::progress::{BarHandle, BarOptions, SpinnerHandle, SpinnerOptions, StageProgress};
use termkit::term::CLEAR_LINE;
use termkit::{ColorState, Console};

fn fast() -> SpinnerOptions {
    SpinnerOptions::default().with_interval(Duration::from_millis(20))
}

fn slow() -> SpinnerOptions {
    SpinnerOptions::default().with_interval(Duration::from_secs(60))
}

fn last_line(out: &str) -> &str {
    out.rsplit('\r').next().unwrap_or("").trim_end()
}

#[test]
fn no_redraw_after_finish() {
    for _ in 0..20 {
        let (console, capture) = Console::capture(false);
        let spinner = SpinnerHandle::start(console, None, "Working", fast());
        thread::sleep(Duration::from_millis(50));

        spinner.success("Done");
        assert!(!spinner.is_animating());
        let at_finish = capture.stdout();
        assert!(at_finish.ends_with(&format!("{CLEAR_LINE}✓ Done\n")));

        thread::sleep(Duration::from_millis(60));
        assert_eq!(capture.stdout(), at_finish);
    }
}

#[test]
fn concurrent_finishes_print_one_line() {
    let (console, capture) = Console::capture(false);
    let spinner = Arc::new(SpinnerHandle::start(console, None, "Working", fast()));
    thread::sleep(Duration::from_millis(50));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let s = Arc::clone(&spinner);
            thread::spawn(move || s.success(&format!("Done {i}")))
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let out = capture.stdout();
    assert_eq!(out.matches('✓').count(), 1);
    assert!(out.ends_with('\n'));
    // Nothing but the final line follows the erase.
    let tail = out.rsplit(CLEAR_LINE).next().unwrap();
    assert!(tail.starts_with("✓ Done "));
}

#[test]
fn color_toggle_applies_to_running_spinner() {
    let (console, capture) = Console::capture(false);
    let state = Arc::clone(console.color_state());
    let spinner = SpinnerHandle::start(console, None, "x", fast());
    thread::sleep(Duration::from_millis(100));
    assert!(!capture.stdout().replace(CLEAR_LINE, "").contains('\u{1b}'));

    state.set(true);
    thread::sleep(Duration::from_millis(150));
    spinner.clear();

    // Escape codes other than line clears appear once color is on.
    let out = capture.stdout().replace(CLEAR_LINE, "");
    assert!(out.contains("\u{1b}[3"));
}

#[test]
fn staged_install_flow() {
    let (console, capture) = Console::capture(false);
    let mut stages = StageProgress::with_console(console, 3)
        .with_spinner_options(slow());

    let s = stages.next("Downloading");
    s.success("Downloaded");
    stages.skip("Verifying");
    let s = stages.next("Installing");
    s.error("Install failed");

    assert!(stages.is_complete());
    assert_eq!(stages.current(), 3);

    let out = capture.stdout();
    assert!(out.contains(" [1/3] Downloading"));
    assert!(out.contains("✓ Downloaded\n"));
    assert!(out.contains("  ○ [2/3] Verifying (skipped)\n"));
    assert!(out.contains(" [3/3] Installing"));
    assert_eq!(capture.stderr(), "✗ Install failed\n");
}

#[test]
fn shorter_message_erases_wide_one() {
    let (console, capture) = Console::capture(false);
    let spinner = SpinnerHandle::start(console, None, "日本語のメッセージ", slow());
    thread::sleep(Duration::from_millis(30));
    spinner.update_message("ok");
    thread::sleep(Duration::from_millis(30));

    let out = capture.stdout();
    let erased = out.rfind(CLEAR_LINE).unwrap();
    assert!(out[..erased].contains("日本語のメッセージ"));
    assert!(last_line(&out[erased..]).ends_with(" ok"), "output: {out:?}");
    spinner.clear();
}

#[test]
fn bar_writes_to_file_sink() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let console = Console::new(
        Arc::new(ColorState::new(false)),
        file.reopen().unwrap(),
        io::sink(),
    );

    let bar = BarHandle::with_options(
        console,
        4,
        "Syncing",
        BarOptions::default().with_width(4),
    );
    for _ in 0..4 {
        bar.add(1);
    }
    bar.success("Synced");

    let written = std::fs::read_to_string(file.path()).unwrap();
    assert!(written.contains("\rSyncing [━━╸─] 2/4"));
    assert!(written.contains("\rSyncing [━━━━] 4/4"));
    assert!(!written.replace(CLEAR_LINE, "").contains('\u{1b}'));
    assert!(written.ends_with(&format!("{CLEAR_LINE}✓ Synced\n")));
}

#[test]
fn bar_with_zero_total_renders_complete() {
    let (console, capture) = Console::capture(false);
    let bar = BarHandle::with_options(console, 0, "", BarOptions::default().with_width(3));
    assert_eq!(last_line(&capture.stdout()), "[━━━] 0/0");
    bar.clear();
}
