//! Output target for progress indicators.
//!
//! A [`Console`] bundles the two output streams with the [`ColorState`]
//! that gates styling. The default console writes to the real stdout and
//! stderr and follows the process-wide color state; tests build one over
//! in-memory buffers with [`Console::capture`].
//!
//! Progress indicators draw through a [`ConsoleTerm`], which lets
//! `indicatif` render into a console instead of owning the stream.

use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use indicatif::{ProgressDrawTarget, TermLike};

use crate::color::ColorState;

/// Return to column zero and erase the whole line.
pub const CLEAR_LINE: &str = "\r\x1b[2K";

/// Terminal width (columns) used when detection fails.
pub const DEFAULT_WIDTH: usize = 80;

/// Terminal height (rows) used when detection fails.
pub const DEFAULT_HEIGHT: usize = 24;

/// Redraw rate limit for progress indicators.
const REFRESH_HZ: u8 = 60;

/// Current terminal width in columns, or [`DEFAULT_WIDTH`] when stdout
/// is not a terminal.
pub fn width() -> usize {
    console::Term::stdout()
        .size_checked()
        .map_or(DEFAULT_WIDTH, |(_, cols)| usize::from(cols))
}

/// Current terminal height in rows, or [`DEFAULT_HEIGHT`] when stdout
/// is not a terminal.
pub fn height() -> usize {
    console::Term::stdout()
        .size_checked()
        .map_or(DEFAULT_HEIGHT, |(rows, _)| usize::from(rows))
}

/// Which stream a write goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    /// Informational output, spinners and bars.
    Stdout,
    /// Error output.
    Stderr,
}

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

/// Streams plus color state.
///
/// Cloning is cheap and clones share the same writers.
#[derive(Clone)]
pub struct Console {
    color: Arc<ColorState>,
    out: SharedWriter,
    err: SharedWriter,
}

impl Console {
    /// Console over arbitrary writers.
    pub fn new<O, E>(color: Arc<ColorState>, out: O, err: E) -> Self
    where
        O: Write + Send + 'static,
        E: Write + Send + 'static,
    {
        let out: Box<dyn Write + Send> = Box::new(out);
        let err: Box<dyn Write + Send> = Box::new(err);
        Self {
            color,
            out: Arc::new(Mutex::new(out)),
            err: Arc::new(Mutex::new(err)),
        }
    }

    /// Console over the process stdout/stderr, using the global color state.
    pub fn stdio() -> Self {
        Self::new(ColorState::global().clone(), io::stdout(), io::stderr())
    }

    /// Console over in-memory buffers with its own color state.
    pub fn capture(color: bool) -> (Self, Capture) {
        let capture = Capture::default();
        let console = Self::new(
            Arc::new(ColorState::new(color)),
            capture.out.clone(),
            capture.err.clone(),
        );
        (console, capture)
    }

    /// The color state this console renders with.
    pub fn color_state(&self) -> &Arc<ColorState> {
        &self.color
    }

    /// Whether styling is enabled right now.
    pub fn color_enabled(&self) -> bool {
        self.color.enabled()
    }

    /// Write `text` and flush.
    ///
    /// Write failures are logged and dropped.
    pub fn write(&self, stream: Stream, text: &str) {
        let writer = match stream {
            Stream::Stdout => &self.out,
            Stream::Stderr => &self.err,
        };
        let result = {
            let mut guard = writer.lock().unwrap_or_else(PoisonError::into_inner);
            guard.write_all(text.as_bytes()).and_then(|()| guard.flush())
        };
        if let Err(e) = result {
            log::debug!("Failed to write to {stream:?}: {e}");
        }
    }

    /// Write `text` followed by a newline.
    pub fn line(&self, stream: Stream, text: &str) {
        self.write(stream, &format!("{text}\n"));
    }

    /// Erase the current line on `stream`.
    pub fn clear_line(&self, stream: Stream) {
        self.write(stream, CLEAR_LINE);
    }

    /// An `indicatif` draw target that renders into `stream`.
    pub fn draw_target(&self, stream: Stream) -> ProgressDrawTarget {
        ProgressDrawTarget::term_like_with_hz(
            Box::new(ConsoleTerm::new(self.clone(), stream)),
            REFRESH_HZ,
        )
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::stdio()
    }
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console")
            .field("color", &self.color.enabled())
            .finish_non_exhaustive()
    }
}

/// [`TermLike`] over one stream of a [`Console`].
///
/// Styled text is written as-is while the console's color state is on and
/// stripped of escape codes while it is off, checked on every write. Each
/// line starts with a carriage return so redraws land in column zero.
#[derive(Debug)]
pub struct ConsoleTerm {
    console: Console,
    stream: Stream,
    line_start: AtomicBool,
}

impl ConsoleTerm {
    /// Adapter writing to `stream` of `console`.
    pub fn new(console: Console, stream: Stream) -> Self {
        Self {
            console,
            stream,
            line_start: AtomicBool::new(true),
        }
    }

    fn emit(&self, text: &str) {
        if self.console.color_enabled() {
            self.console.write(self.stream, text);
        } else {
            self.console
                .write(self.stream, &console::strip_ansi_codes(text));
        }
    }

    fn cursor(&self, n: usize, code: char) -> io::Result<()> {
        if n > 0 {
            self.console.write(self.stream, &format!("\x1b[{n}{code}"));
            self.line_start.store(true, Ordering::Release);
        }
        Ok(())
    }
}

impl TermLike for ConsoleTerm {
    fn width(&self) -> u16 {
        u16::try_from(width()).unwrap_or(u16::MAX)
    }

    fn height(&self) -> u16 {
        u16::try_from(height()).unwrap_or(u16::MAX)
    }

    fn move_cursor_up(&self, n: usize) -> io::Result<()> {
        self.cursor(n, 'A')
    }

    fn move_cursor_down(&self, n: usize) -> io::Result<()> {
        self.cursor(n, 'B')
    }

    fn move_cursor_right(&self, n: usize) -> io::Result<()> {
        self.cursor(n, 'C')
    }

    fn move_cursor_left(&self, n: usize) -> io::Result<()> {
        self.cursor(n, 'D')
    }

    fn write_line(&self, s: &str) -> io::Result<()> {
        self.write_str(s)?;
        self.console.write(self.stream, "\n");
        self.line_start.store(true, Ordering::Release);
        Ok(())
    }

    fn write_str(&self, s: &str) -> io::Result<()> {
        if s.is_empty() {
            return Ok(());
        }
        if self.line_start.swap(false, Ordering::AcqRel) {
            self.emit(&format!("\r{s}"));
        } else {
            self.emit(s);
        }
        Ok(())
    }

    fn clear_line(&self) -> io::Result<()> {
        self.console.clear_line(self.stream);
        self.line_start.store(true, Ordering::Release);
        Ok(())
    }

    fn flush(&self) -> io::Result<()> {
        // Console::write flushes after every write.
        Ok(())
    }
}

/// In-memory stdout/stderr pair filled by a capturing [`Console`].
#[derive(Debug, Clone, Default)]
pub struct Capture {
    out: Buffer,
    err: Buffer,
}

impl Capture {
    /// Everything written to stdout so far.
    pub fn stdout(&self) -> String {
        self.out.contents()
    }

    /// Everything written to stderr so far.
    pub fn stderr(&self) -> String {
        self.err.contents()
    }
}

#[derive(Debug, Clone, Default)]
struct Buffer(Arc<Mutex<Vec<u8>>>);

impl Buffer {
    fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
