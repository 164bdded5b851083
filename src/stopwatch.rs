use stopwatch_core::{ClockEngine, ClockStatus, ResultLog, Separator, TickHandle, Ticker};

use crate::config::Settings;

/// Everything the stopwatch screen owns: the clock, its results, and
/// where the results list is scrolled to.
pub struct StopwatchState<T: Ticker> {
    pub engine: ClockEngine<T>,
    pub results: ResultLog,
    pub separator: Separator,
    pub result_scroll_offset: usize,
}

impl<T: Ticker> StopwatchState<T> {
    pub fn new(ticker: T, settings: &Settings) -> Self {
        Self {
            engine: ClockEngine::with_interval(ticker, settings.tick_ms),
            results: ResultLog::new(settings.order),
            separator: settings.separator,
            result_scroll_offset: 0,
        }
    }

    pub fn start(&mut self, now_ms: u64) {
        self.engine.start(now_ms);
    }

    pub fn stop(&mut self, now_ms: u64) {
        self.engine.stop(now_ms);
    }

    pub fn toggle(&mut self, now_ms: u64) {
        if self.engine.is_running() {
            self.stop(now_ms);
        } else {
            self.start(now_ms);
        }
    }

    /// Lap-and-continue. Returns the recorded duration, if any.
    pub fn lap(&mut self, now_ms: u64) -> Option<u64> {
        let logged = self.engine.reset_and_restart(now_ms, &mut self.results);
        if logged.is_some() {
            self.result_scroll_offset = 0;
        }
        logged
    }

    pub fn clear_all(&mut self) {
        self.engine.clear_all(&mut self.results);
        self.result_scroll_offset = 0;
    }

    /// True if the tick belongs to the live refresh and the display should update.
    pub fn tick(&self, handle: TickHandle, now_ms: u64) -> bool {
        self.engine.tick(handle, now_ms).is_some()
    }

    pub fn display_text(&self, now_ms: u64) -> String {
        self.engine.display(now_ms, self.separator)
    }

    pub fn status(&self) -> ClockStatus {
        self.engine.status()
    }

    pub fn copy_text(&self, title: &str) -> String {
        self.results.copy_text(title, self.separator)
    }

    pub fn scroll_up(&mut self) -> bool {
        if self.result_scroll_offset > 0 {
            self.result_scroll_offset -= 1;
            true
        } else {
            false
        }
    }

    pub fn scroll_down(&mut self, max_visible: usize) -> bool {
        if self.result_scroll_offset + max_visible < self.results.len() {
            self.result_scroll_offset += 1;
            true
        } else {
            false
        }
    }
}
