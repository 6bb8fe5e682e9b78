//! A thread-safe ASCII progress bar for terminals.
//!
//! # Features
//!
//! - Lock-free counting from any number of worker threads.
//! - Serialized, single-write redraws that never interleave.
//! - Optional background redraw thread that stops on its own.
//! - Renders to any [`std::io::Write`], not just `Stdout`.
//!
//! # Usage
//!
//! A [`ProgressBar`] knows how many units of work there are in total, and is
//! told each time one of them finishes:
//!
//! ```
//! use asciibar::ProgressBar;
//!
//! let mut out = Vec::new();
//! let bar = ProgressBar::new(&mut out, 4);
//!
//! bar.increment();
//! bar.increment_by(1);
//! bar.draw().unwrap();
//!
//! assert_eq!(50, bar.percent());
//! assert_eq!(2, bar.left());
//! drop(bar);
//!
//! assert!(out.starts_with(b"\r[######"));
//! assert!(out.ends_with(b"] 50%"));
//! ```
//!
//! ## Concurrent Workers
//!
//! `ProgressBar` is cheap to [`Clone`] and is [`Sync`] whenever its writer is
//! [`Send`], so it can be shared between threads as-is. Increments never take
//! a lock:
//!
//! ```
//! use asciibar::ProgressBar;
//! use rayon::prelude::*;
//!
//! let bar = ProgressBar::new(std::io::sink(), 100);
//!
//! (0..100).into_par_iter().for_each(|_| {
//!     // ... Your logic ...
//!     bar.increment();
//! });
//!
//! assert!(bar.completed());
//! ```
//!
//! ## Background Redraws
//!
//! [`ProgressBar::draw_every`] hands redrawing off to a detached thread, which
//! exits by itself once the bar is complete. Use
//! [`ProgressBar::draw_every_until`] if you need to stop it early.
//!
//! ```no_run
//! use asciibar::ProgressBar;
//! use std::time::Duration;
//!
//! let bar = ProgressBar::new(std::io::stdout(), 1000);
//! bar.draw_every(Duration::from_millis(100));
//!
//! for _ in 0..1000 {
//!     // ... Your logic ...
//!     bar.increment();
//! }
//! ```
//!
//! # Output
//!
//! Each draw is a single line, prefixed with a carriage return and never
//! followed by a newline, so that successive draws overwrite each other:
//!
//! ```text
//! [######################################--------------------------------------] 50%
//! ```
//!
//! # Caveats
//!
//! - The bar is always [`BAR_WIDTH`] glyphs wide. The terminal is not measured.
//! - No colours, no ANSI codes, no multi-bars.
//! - A `max` of zero or less is accepted, but gives meaningless ratios. Supply
//!   a positive `max` if you want sensible output.
//! - Errors from background redraws are discarded.

use parking_lot::Mutex;
use std::fmt::{self, Write as _};
use std::io::{self, Write};
use std::iter;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::debug;

/// The number of glyphs between the brackets of a rendered bar.
pub const BAR_WIDTH: usize = 76;

const BAR_BEGIN: char = '[';
const BAR_END: char = ']';
const BAR_COMPLETE: char = '#';
const BAR_INCOMPLETE: char = '-';

/// Enough for the carriage return, the bar, and any percentage.
const LINE_CAPACITY: usize = BAR_WIDTH + 32;

/// A progress bar to share between threads.
///
/// Clones are handles to the same bar.
pub struct ProgressBar<W> {
    inner: Arc<Inner<W>>,
}

struct Inner<W> {
    /// Units of work needed for completion. Fixed at construction.
    max: i64,
    /// Units of work finished so far. Only ever touched atomically.
    count: AtomicI64,
    /// The render lock. Guards the writer, never the counter.
    out: Mutex<W>,
}

impl<W> Clone for ProgressBar<W> {
    fn clone(&self) -> Self {
        ProgressBar {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<W> ProgressBar<W> {
    /// Create a new bar that will be complete once it has been incremented
    /// `max` times, and which draws itself to `out`.
    ///
    /// `max` is not validated. Zero or negative values produce `NaN`, infinite
    /// or negative ratios instead of an error.
    pub fn new(out: W, max: i64) -> ProgressBar<W> {
        let inner = Inner {
            max,
            count: AtomicI64::new(0),
            out: Mutex::new(out),
        };

        ProgressBar {
            inner: Arc::new(inner),
        }
    }

    /// The total given at construction.
    pub fn max(&self) -> i64 {
        self.inner.max
    }

    /// The current number of finished units of work.
    pub fn progress(&self) -> i64 {
        self.inner.count.load(Ordering::Relaxed)
    }

    /// How many more units of work are needed for completion.
    ///
    /// Negative if the bar has been incremented past its `max`. Wraps on
    /// overflow, as the counter itself does.
    pub fn left(&self) -> i64 {
        self.inner.max.wrapping_sub(self.progress())
    }

    /// Has the bar reached its `max`?
    pub fn completed(&self) -> bool {
        self.progress() >= self.inner.max
    }

    /// The current ratio of completion, nominally within `0.0..=1.0`.
    ///
    /// Exceeds `1.0` when over-incremented, and is `NaN` or infinite when
    /// `max` is zero.
    pub fn ratio(&self) -> f64 {
        self.progress() as f64 / self.inner.max as f64
    }

    /// The current percentage of completion, rounded down.
    pub fn percent(&self) -> i64 {
        percent_of(self.ratio())
    }

    /// Atomically increment the bar by 1.
    pub fn increment(&self) {
        self.increment_by(1);
    }

    /// Atomically increment the bar by `n`, which may be zero or negative.
    pub fn increment_by(&self, n: i64) {
        self.inner.count.fetch_add(n, Ordering::Relaxed);
    }
}

impl<W: Write> ProgressBar<W> {
    /// Write the current state of the bar to the underlying writer, then flush
    /// it.
    ///
    /// The line is written in one piece while holding the render lock, so
    /// concurrent draws never interleave. Any error from the writer is
    /// returned as-is.
    pub fn draw(&self) -> io::Result<()> {
        let mut out = self.inner.out.lock();
        let mut line = String::with_capacity(LINE_CAPACITY);
        line.push('\r');
        render(self.ratio(), &mut line);
        out.write_all(line.as_bytes())?;

        // Very important, or nothing appears on a line-buffered terminal.
        out.flush()
    }
}

impl<W: Write + Send + 'static> ProgressBar<W> {
    /// Spawn a detached thread that draws the bar immediately, and then again
    /// after every `interval` until the bar is complete.
    ///
    /// There is no handle and no way to stop the thread other than completing
    /// the bar. Errors from its draws are discarded.
    pub fn draw_every(&self, interval: Duration) {
        self.draw_every_until(interval, Arc::new(AtomicBool::new(false)));
    }

    /// Like [`ProgressBar::draw_every`], but the thread also exits once `stop`
    /// is set to `true`.
    ///
    /// Both conditions are checked before each sleep, so the thread notices
    /// either within one `interval`.
    pub fn draw_every_until(&self, interval: Duration, stop: Arc<AtomicBool>) {
        let bar = self.clone();
        let spawned = thread::Builder::new()
            .name("asciibar-redraw".to_string())
            .spawn(move || bar.redraw_loop(interval, &stop));

        if let Err(e) = spawned {
            debug!(error = %e, "Could not spawn the redraw thread.");
        }
    }

    fn redraw_loop(&self, interval: Duration, stop: &AtomicBool) {
        debug!(max = self.max(), ?interval, "Redraw thread started.");
        self.redraw();

        loop {
            if self.completed() {
                debug!(progress = self.progress(), "Bar complete, redraw thread exiting.");
                break;
            }

            if stop.load(Ordering::Acquire) {
                debug!(progress = self.progress(), "Redraw thread stopped.");
                break;
            }

            thread::sleep(interval);
            self.redraw();
        }
    }

    fn redraw(&self) {
        if let Err(e) = self.draw() {
            debug!(error = %e, "Discarding a failed redraw.");
        }
    }
}

/// The same line as [`ProgressBar::draw`] writes, without the leading
/// carriage return.
impl<W> fmt::Display for ProgressBar<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut line = String::with_capacity(LINE_CAPACITY);
        render(self.ratio(), &mut line);
        f.write_str(&line)
    }
}

impl<W> fmt::Debug for ProgressBar<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressBar")
            .field("max", &self.max())
            .field("count", &self.progress())
            .finish()
    }
}

/// `NaN` yields 0, and infinities saturate.
fn percent_of(ratio: f64) -> i64 {
    (ratio * 100.0).floor() as i64
}

/// Append `[<complete><incomplete>] <percent>%` for the given ratio.
fn render(ratio: f64, line: &mut String) {
    let percent = percent_of(ratio);

    // A full bar from 100% on, so that float error or over-completion can
    // neither leave a stray incomplete glyph nor overflow the bar.
    let filled = if percent >= 100 {
        BAR_WIDTH
    } else {
        ((ratio * BAR_WIDTH as f64).floor() as usize).min(BAR_WIDTH)
    };

    line.push(BAR_BEGIN);
    line.extend(iter::repeat(BAR_COMPLETE).take(filled));
    line.extend(iter::repeat(BAR_INCOMPLETE).take(BAR_WIDTH - filled));
    line.push(BAR_END);

    // Writing to a `String` can't fail.
    let _ = write!(line, " {}%", percent);
}
