//! Start/stop/lap state machine with a cancellable periodic refresh.

use crate::results::ResultLog;
use crate::{format_elapsed, ClockState, ClockStatus, Separator};

/// Refresh cadence while running. Fine enough for the hundredths digit to advance.
pub const DEFAULT_TICK_MS: u64 = 10;
/// Coarsest cadence that still looks smooth.
pub const MAX_TICK_MS: u64 = 16;

/// Identifies one scheduled repeating tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct TickHandle(pub u64);

/// Source of periodic refresh callbacks.
///
/// Cancelling a handle that was already cancelled, or never scheduled, must
/// be a no-op.
pub trait Ticker {
    fn schedule(&mut self, interval_ms: u64) -> TickHandle;
    fn cancel(&mut self, handle: TickHandle);
}

pub struct ClockEngine<T: Ticker> {
    clock: ClockState,
    ticker: T,
    tick: Option<TickHandle>,
    interval_ms: u64,
}

impl<T: Ticker> ClockEngine<T> {
    pub fn new(ticker: T) -> Self {
        Self::with_interval(ticker, DEFAULT_TICK_MS)
    }

    pub fn with_interval(ticker: T, interval_ms: u64) -> Self {
        Self {
            clock: ClockState::new(),
            ticker,
            tick: None,
            interval_ms: interval_ms.clamp(1, MAX_TICK_MS),
        }
    }

    pub fn start(&mut self, now_ms: u64) {
        if self.clock.is_running() {
            return;
        }
        self.clock.start(now_ms);
        self.cancel_tick();
        self.tick = Some(self.ticker.schedule(self.interval_ms));
    }

    pub fn stop(&mut self, now_ms: u64) {
        if !self.clock.is_running() {
            return;
        }
        self.clock.stop(now_ms);
        self.cancel_tick();
    }

    /// Lap-and-continue: logs the current duration when non-zero, then
    /// restarts from zero. Returns the logged duration, if any.
    pub fn reset_and_restart(&mut self, now_ms: u64, log: &mut ResultLog) -> Option<u64> {
        let lapped = self.clock.elapsed_ms(now_ms);
        let logged = if lapped > 0 {
            log.add(lapped);
            Some(lapped)
        } else {
            None
        };
        self.cancel_tick();
        self.clock.reset();
        self.start(now_ms);
        logged
    }

    pub fn clear_all(&mut self, log: &mut ResultLog) {
        self.cancel_tick();
        self.clock.reset();
        log.clear();
    }

    pub fn current_elapsed(&self, now_ms: u64) -> u64 {
        self.clock.elapsed_ms(now_ms)
    }

    pub fn display(&self, now_ms: u64, sep: Separator) -> String {
        format_elapsed(self.current_elapsed(now_ms), sep)
    }

    /// Handles a tick callback. Ticks from a handle that is no longer live
    /// are ignored and yield `None`.
    pub fn tick(&self, handle: TickHandle, now_ms: u64) -> Option<u64> {
        if self.clock.is_running() && self.tick == Some(handle) {
            Some(self.current_elapsed(now_ms))
        } else {
            None
        }
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn status(&self) -> ClockStatus {
        self.clock.status()
    }

    pub fn live_tick(&self) -> Option<TickHandle> {
        self.tick
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }

    fn cancel_tick(&mut self) {
        if let Some(handle) = self.tick.take() {
            self.ticker.cancel(handle);
        }
    }
}
