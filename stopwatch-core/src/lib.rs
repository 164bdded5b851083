//! Pure timing logic library with no platform dependencies.
//! Testable on host, driven by the terminal app through injected time.

use std::fmt;
use std::str::FromStr;

pub mod engine;
pub mod results;

pub use engine::{ClockEngine, TickHandle, Ticker, DEFAULT_TICK_MS, MAX_TICK_MS};
pub use results::{LogOrder, RenderedLines, ResultEntry, ResultLog};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ClockStatus {
    Idle,
    Running,
    Paused,
}

/// Elapsed-time bookkeeping. All times are monotonic milliseconds.
///
/// While running, elapsed = `now - start_epoch_ms`, where the epoch was set
/// to `now - accumulated` when the clock was started, so a resume continues
/// from the prior accumulation. While stopped, `accumulated_ms` is the
/// frozen total.
#[derive(Clone, Debug, Default)]
pub struct ClockState {
    running: bool,
    start_epoch_ms: u64,
    accumulated_ms: u64,
}

impl ClockState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, now_ms: u64) {
        if self.running {
            return;
        }
        self.start_epoch_ms = now_ms.saturating_sub(self.accumulated_ms);
        self.running = true;
    }

    pub fn stop(&mut self, now_ms: u64) {
        if !self.running {
            return;
        }
        self.accumulated_ms = self.elapsed_ms(now_ms);
        self.running = false;
    }

    pub fn reset(&mut self) {
        self.running = false;
        self.start_epoch_ms = 0;
        self.accumulated_ms = 0;
    }

    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        if self.running {
            now_ms.saturating_sub(self.start_epoch_ms)
        } else {
            self.accumulated_ms
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn accumulated_ms(&self) -> u64 {
        self.accumulated_ms
    }

    pub fn status(&self) -> ClockStatus {
        match (self.running, self.accumulated_ms) {
            (true, _) => ClockStatus::Running,
            (false, 0) => ClockStatus::Idle,
            (false, _) => ClockStatus::Paused,
        }
    }
}

/// Delimiter between seconds and hundredths.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Separator {
    /// `MM:SS.HH`
    #[default]
    Dot,
    /// `MM:SS:HH`
    Colon,
}

impl Separator {
    pub fn as_char(self) -> char {
        match self {
            Separator::Dot => '.',
            Separator::Colon => ':',
        }
    }
}

impl FromStr for Separator {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dot" | "." => Ok(Separator::Dot),
            "colon" | ":" => Ok(Separator::Colon),
            other => Err(ParseError::new("separator", other, "dot, colon")),
        }
    }
}

/// Returned when a separator or log order name is not recognised.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    what: &'static str,
    value: String,
    expected: &'static str,
}

impl ParseError {
    pub(crate) fn new(what: &'static str, value: &str, expected: &'static str) -> Self {
        Self {
            what,
            value: value.to_string(),
            expected,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown {} '{}' (expected one of: {})",
            self.what, self.value, self.expected
        )
    }
}

impl std::error::Error for ParseError {}

/// Format milliseconds as "MM:SS.HH" or "MM:SS:HH".
///
/// Hundredths are truncated, not rounded. Minutes are never capped, so
/// 61 minutes shows as "61" and 100 minutes or more grows past two digits.
pub fn format_elapsed(ms: u64, sep: Separator) -> String {
    let hundredths = ms / 10;
    let minutes = hundredths / 6000;
    let seconds = (hundredths % 6000) / 100;
    let h = hundredths % 100;
    format!("{:02}:{:02}{}{:02}", minutes, seconds, sep.as_char(), h)
}
