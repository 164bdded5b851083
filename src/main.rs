mod clipboard;
mod config;
mod error;
mod flash;
mod stopwatch;
mod ui;

use std::io::{self, Stdout, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, terminal};
use num_traits::FromPrimitive;
use stopwatch_core::{TickHandle, Ticker};

use crate::clipboard::{
    copy_with_fallback, ClipboardSink, CommandClipboard, CopyTier, DisabledClipboard, SystemClipboard,
};
use crate::config::{Args, Settings};
use crate::error::ClipboardError;
use crate::flash::{FlashState, COPIED, COPY_FAILED, FLASH_MS};
use crate::stopwatch::StopwatchState;

const MENU_ITEMS: &[&str] = &["Info", "Start/Stop", "Lap", "Copy log", "Clear all", "Quit"];

#[derive(Debug, num_derive::FromPrimitive)]
enum MenuItem {
    Info = 0,
    StartStop,
    Lap,
    CopyLog,
    ClearAll,
    Quit,
}

#[derive(Debug)]
enum AppMsg {
    Key(KeyEvent),
    Resize(u16, u16),
    Pump(TickHandle),
    CopyFinished(Result<CopyTier, ClipboardError>),
    FlashExpired(u64),
}

#[derive(Debug)]
enum PumpCtl {
    Start { handle: TickHandle, interval_ms: u64 },
    Stop { handle: TickHandle },
    Quit,
}

/// Drives the refresh pump thread. Each `schedule` gets a fresh handle so
/// ticks still in flight from an older schedule can be told apart.
struct PumpTicker {
    pump_conn: Sender<PumpCtl>,
    next: u64,
}

impl Ticker for PumpTicker {
    fn schedule(&mut self, interval_ms: u64) -> TickHandle {
        self.next += 1;
        let handle = TickHandle(self.next);
        self.pump_conn.send(PumpCtl::Start { handle, interval_ms }).ok();
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        self.pump_conn.send(PumpCtl::Stop { handle }).ok();
    }
}

/// Raw mode plus alternate screen, undone on drop (including unwinding).
struct TerminalGuard;

impl TerminalGuard {
    fn new(out: &mut Stdout) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(out, terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen).ok();
        terminal::disable_raw_mode().ok();
    }
}

struct StopwatchApp<W: Write> {
    out: W,
    screensize: ui::ScreenSize,
    started: Instant,
    settings: Settings,
    stopwatch: StopwatchState<PumpTicker>,
    flash: FlashState,
    clip_conn: Sender<String>,
    main_conn: Sender<AppMsg>,

    // Overlay state
    menu_visible: bool,
    menu_cursor: usize,
    help_visible: bool,
    confirm_clear: bool,
    confirm_exit: bool,
    quit: bool,
}

impl<W: Write> StopwatchApp<W> {
    fn new(
        out: W,
        settings: Settings,
        ticker: PumpTicker,
        clip_conn: Sender<String>,
        main_conn: Sender<AppMsg>,
        screensize: ui::ScreenSize,
    ) -> Self {
        let stopwatch = StopwatchState::new(ticker, &settings);
        Self {
            out,
            screensize,
            started: Instant::now(),
            settings,
            stopwatch,
            flash: FlashState::default(),
            clip_conn,
            main_conn,
            menu_visible: false,
            menu_cursor: 0,
            help_visible: false,
            confirm_clear: false,
            confirm_exit: false,
            quit: false,
        }
    }

    fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    fn overlay_visible(&self) -> bool {
        self.help_visible || self.confirm_clear || self.confirm_exit || self.menu_visible
    }

    fn redraw(&mut self) {
        let result = if self.help_visible {
            ui::draw_help(&mut self.out, self.screensize, HELP_TEXT)
        } else if self.confirm_clear {
            ui::draw_confirm(
                &mut self.out,
                "Clear All",
                "Stop the clock and discard every result?",
                "  y = Clear everything\n  n = Cancel",
            )
        } else if self.confirm_exit {
            ui::draw_confirm(
                &mut self.out,
                "Stopwatch Running",
                "The stopwatch is still running.\nQuit anyway?",
                "  y = Stop & quit\n  n = Cancel",
            )
        } else if self.menu_visible {
            ui::draw_menu(&mut self.out, self.screensize, MENU_ITEMS, self.menu_cursor)
        } else {
            let now = self.now_ms();
            ui::draw_stopwatch(&mut self.out, self.screensize, &self.stopwatch, self.flash.current(), now)
        };
        if let Err(e) = result {
            log::error!("redraw failed: {}", e);
        }
    }

    fn handle_pump(&mut self, handle: TickHandle) {
        let now = self.now_ms();
        if !self.stopwatch.tick(handle, now) {
            log::trace!("ignoring stale tick {:?}", handle);
            return;
        }
        if !self.overlay_visible() {
            let text = self.stopwatch.display_text(now);
            if let Err(e) = ui::draw_display(&mut self.out, &text) {
                log::error!("display refresh failed: {}", e);
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit_now();
            return;
        }

        // F-keys always processed first
        match key.code {
            KeyCode::F(1) => {
                self.toggle_menu();
                return;
            }
            KeyCode::F(2) if !self.overlay_visible() => {
                self.toggle_running();
                return;
            }
            KeyCode::F(3) if !self.overlay_visible() => {
                self.lap();
                return;
            }
            KeyCode::F(4) => {
                self.handle_back();
                return;
            }
            _ => {}
        }

        // If help screen is showing, any key dismisses it
        if self.help_visible {
            self.help_visible = false;
            self.redraw();
            return;
        }

        if self.confirm_clear {
            match key.code {
                KeyCode::Char('y') => {
                    self.confirm_clear = false;
                    self.clear_all();
                }
                KeyCode::Char('n') | KeyCode::Esc => {
                    self.confirm_clear = false;
                    self.redraw();
                }
                _ => {}
            }
            return;
        }

        if self.confirm_exit {
            match key.code {
                KeyCode::Char('y') => self.quit_now(),
                KeyCode::Char('n') | KeyCode::Esc => {
                    self.confirm_exit = false;
                    self.redraw();
                }
                _ => {}
            }
            return;
        }

        if self.menu_visible {
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    if self.menu_cursor > 0 {
                        self.menu_cursor -= 1;
                        self.redraw();
                    }
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    if self.menu_cursor + 1 < MENU_ITEMS.len() {
                        self.menu_cursor += 1;
                        self.redraw();
                    }
                }
                KeyCode::Enter => self.menu_select_item(),
                KeyCode::Esc => self.toggle_menu(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle_running(),
            KeyCode::Char('s') => {
                let now = self.now_ms();
                self.stopwatch.start(now);
                self.redraw();
            }
            KeyCode::Char('p') => {
                let now = self.now_ms();
                self.stopwatch.stop(now);
                self.redraw();
            }
            KeyCode::Char('r') => self.lap(),
            KeyCode::Char('c') => self.copy_log(),
            KeyCode::Char('x') => {
                self.confirm_clear = true;
                self.redraw();
            }
            KeyCode::Char('i') | KeyCode::Char('?') => {
                self.help_visible = true;
                self.redraw();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if self.stopwatch.scroll_up() {
                    self.redraw();
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let visible = ui::max_visible_results(self.screensize);
                if self.stopwatch.scroll_down(visible) {
                    self.redraw();
                }
            }
            KeyCode::Char('q') | KeyCode::Esc => self.handle_back(),
            _ => {}
        }
    }

    fn toggle_menu(&mut self) {
        if self.help_visible {
            self.help_visible = false;
            self.redraw();
            return;
        }
        if self.confirm_clear || self.confirm_exit {
            return;
        }
        self.menu_visible = !self.menu_visible;
        self.menu_cursor = 0;
        self.redraw();
    }

    fn menu_select_item(&mut self) {
        self.menu_visible = false;
        match MenuItem::from_usize(self.menu_cursor) {
            Some(MenuItem::Info) => self.help_visible = true,
            Some(MenuItem::StartStop) => {
                let now = self.now_ms();
                self.stopwatch.toggle(now);
            }
            Some(MenuItem::Lap) => {
                let now = self.now_ms();
                self.stopwatch.lap(now);
            }
            Some(MenuItem::CopyLog) => self.copy_log(),
            Some(MenuItem::ClearAll) => self.confirm_clear = true,
            Some(MenuItem::Quit) => {
                self.handle_back();
                return;
            }
            None => log::warn!("menu cursor out of range: {}", self.menu_cursor),
        }
        self.redraw();
    }

    /// Closes the top overlay, or asks to quit.
    fn handle_back(&mut self) {
        if self.help_visible || self.menu_visible || self.confirm_clear || self.confirm_exit {
            self.help_visible = false;
            self.menu_visible = false;
            self.confirm_clear = false;
            self.confirm_exit = false;
            self.redraw();
            return;
        }
        if self.stopwatch.engine.is_running() {
            self.confirm_exit = true;
            self.redraw();
        } else {
            self.quit_now();
        }
    }

    fn toggle_running(&mut self) {
        let now = self.now_ms();
        self.stopwatch.toggle(now);
        self.redraw();
    }

    fn lap(&mut self) {
        let now = self.now_ms();
        if let Some(ms) = self.stopwatch.lap(now) {
            log::info!("lap recorded: {} ms ({} total)", ms, self.stopwatch.results.len());
        }
        self.redraw();
    }

    fn clear_all(&mut self) {
        self.stopwatch.clear_all();
        log::info!("cleared all results");
        self.redraw();
    }

    fn copy_log(&mut self) {
        let text = self.stopwatch.copy_text(&self.settings.title);
        if self.clip_conn.send(text).is_err() {
            log::error!("clipboard worker is gone");
            self.show_flash(COPY_FAILED);
        }
    }

    fn handle_copy_finished(&mut self, result: Result<CopyTier, ClipboardError>) {
        match result {
            Ok(tier) => {
                log::info!("results copied ({:?})", tier);
                self.show_flash(COPIED);
            }
            Err(e) => {
                log::warn!("copy failed: {}", e);
                self.show_flash(COPY_FAILED);
            }
        }
    }

    fn show_flash(&mut self, message: &str) {
        let id = self.flash.show(message);
        let conn = self.main_conn.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(FLASH_MS));
            conn.send(AppMsg::FlashExpired(id)).ok();
        });
        self.redraw();
    }

    fn quit_now(&mut self) {
        let now = self.now_ms();
        self.stopwatch.stop(now);
        self.quit = true;
    }
}

const HELP_TEXT: &str = "STOPWATCH HELP\n\n\
    ENTER  Start/Stop\n\
    s      Start (resume)\n\
    p      Stop (pause, nothing logged)\n\
    r      Lap: log the time, restart at zero\n\
    c      Copy results to clipboard\n\
    x      Clear the clock and all results\n\
    Up/Dn  Scroll results\n\n\
    F1     Menu\n\
    F2     Start/Stop\n\
    F3     Lap\n\
    F4     Back\n\
    q      Quit";

fn pump_thread(ctl: Receiver<PumpCtl>, main_conn: Sender<AppMsg>) {
    let mut live: Option<(TickHandle, Duration)> = None;

    loop {
        // Block-wait when no tick is scheduled
        let msg = match live {
            Some((handle, interval)) => match ctl.recv_timeout(interval) {
                Ok(msg) => msg,
                Err(RecvTimeoutError::Timeout) => {
                    if main_conn.send(AppMsg::Pump(handle)).is_err() {
                        break;
                    }
                    continue;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            },
            None => match ctl.recv() {
                Ok(msg) => msg,
                Err(_) => break,
            },
        };

        match msg {
            PumpCtl::Start { handle, interval_ms } => {
                live = Some((handle, Duration::from_millis(interval_ms.max(1))));
            }
            PumpCtl::Stop { handle } => {
                if live.map(|(h, _)| h) == Some(handle) {
                    live = None;
                }
            }
            PumpCtl::Quit => break,
        }
    }
    log::debug!("pump thread exiting");
}

fn clipboard_thread(requests: Receiver<String>, main_conn: Sender<AppMsg>, fallback_enabled: bool) {
    let mut system = SystemClipboard::default();
    let mut fallback: Box<dyn ClipboardSink> = if fallback_enabled {
        Box::new(CommandClipboard::default())
    } else {
        Box::new(DisabledClipboard)
    };

    for text in requests {
        let result = copy_with_fallback(&mut system, fallback.as_mut(), &text);
        if main_conn.send(AppMsg::CopyFinished(result)).is_err() {
            break;
        }
    }
}

fn input_thread(main_conn: Sender<AppMsg>) {
    loop {
        let msg = match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => AppMsg::Key(key),
            Ok(Event::Resize(w, h)) => AppMsg::Resize(w, h),
            Ok(_) => continue,
            Err(e) => {
                log::error!("terminal input failed: {}", e);
                break;
            }
        };
        if main_conn.send(msg).is_err() {
            break;
        }
    }
}

fn main() -> anyhow::Result<()> {
    let settings = Settings::try_from(Args::parse())?;
    config::init_logging(&settings)?;
    log::info!("Stopwatch PID is {}", std::process::id());

    let (main_conn, inbox) = mpsc::channel();

    let (pump_conn, pump_rx) = mpsc::channel();
    let pump_main = main_conn.clone();
    let pump = thread::Builder::new()
        .name("pump".into())
        .spawn(move || pump_thread(pump_rx, pump_main))
        .context("can't spawn pump thread")?;

    let (clip_conn, clip_rx) = mpsc::channel();
    let clip_main = main_conn.clone();
    let fallback_enabled = settings.clipboard_fallback;
    thread::Builder::new()
        .name("clipboard".into())
        .spawn(move || clipboard_thread(clip_rx, clip_main, fallback_enabled))
        .context("can't spawn clipboard thread")?;

    let mut stdout = io::stdout();
    let guard = TerminalGuard::new(&mut stdout).context("can't set up terminal")?;
    let screensize = terminal::size().context("can't read terminal size")?;

    let input_main = main_conn.clone();
    thread::Builder::new()
        .name("input".into())
        .spawn(move || input_thread(input_main))
        .context("can't spawn input thread")?;

    let ticker = PumpTicker {
        pump_conn: pump_conn.clone(),
        next: 0,
    };
    let mut app = StopwatchApp::new(stdout, settings, ticker, clip_conn, main_conn, screensize);
    app.redraw();

    while !app.quit {
        let Ok(msg) = inbox.recv() else { break };
        match msg {
            AppMsg::Key(key) => app.handle_key(key),
            AppMsg::Resize(w, h) => {
                app.screensize = (w, h);
                app.redraw();
            }
            AppMsg::Pump(handle) => app.handle_pump(handle),
            AppMsg::CopyFinished(result) => app.handle_copy_finished(result),
            AppMsg::FlashExpired(id) => {
                if app.flash.expire(id) && !app.overlay_visible() {
                    app.redraw();
                }
            }
        }
    }

    // Clean up
    pump_conn.send(PumpCtl::Quit).ok();
    drop(guard);
    if pump.join().is_err() {
        log::error!("pump thread panicked");
    }
    log::info!("Stopwatch exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stopwatch_core::ClockStatus;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    struct Harness {
        app: StopwatchApp<Vec<u8>>,
        pump_rx: Receiver<PumpCtl>,
        clip_rx: Receiver<String>,
        _inbox: Receiver<AppMsg>,
    }

    fn harness() -> Harness {
        let (pump_conn, pump_rx) = mpsc::channel();
        let (clip_conn, clip_rx) = mpsc::channel();
        let (main_conn, inbox) = mpsc::channel();
        let ticker = PumpTicker { pump_conn, next: 0 };
        let app = StopwatchApp::new(Vec::new(), Settings::default(), ticker, clip_conn, main_conn, (80, 24));
        Harness {
            app,
            pump_rx,
            clip_rx,
            _inbox: inbox,
        }
    }

    fn with_three_laps(h: &mut Harness) {
        h.app.stopwatch.start(0);
        h.app.stopwatch.lap(1_000);
        h.app.stopwatch.lap(2_500);
        h.app.stopwatch.lap(4_000);
        h.app.stopwatch.stop(4_000);
        assert_eq!(h.app.stopwatch.results.len(), 3);
    }

    fn drain_ticks(inbox: &Receiver<AppMsg>) -> Vec<TickHandle> {
        inbox
            .try_iter()
            .filter_map(|msg| match msg {
                AppMsg::Pump(handle) => Some(handle),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_pump_ignores_stop_for_old_handle() {
        let (ctl, ctl_rx) = mpsc::channel();
        let (main_conn, inbox) = mpsc::channel();
        let pump = thread::spawn(move || pump_thread(ctl_rx, main_conn));

        ctl.send(PumpCtl::Start { handle: TickHandle(1), interval_ms: 5 }).unwrap();
        ctl.send(PumpCtl::Start { handle: TickHandle(2), interval_ms: 5 }).unwrap();
        ctl.send(PumpCtl::Stop { handle: TickHandle(1) }).unwrap();
        thread::sleep(Duration::from_millis(60));

        let ticks = drain_ticks(&inbox);
        assert!(!ticks.is_empty(), "stop for an old handle halted the pump");
        assert!(ticks.iter().all(|h| *h == TickHandle(2)));

        ctl.send(PumpCtl::Stop { handle: TickHandle(2) }).unwrap();
        thread::sleep(Duration::from_millis(30));
        drain_ticks(&inbox);
        thread::sleep(Duration::from_millis(40));
        assert!(drain_ticks(&inbox).is_empty());

        ctl.send(PumpCtl::Quit).unwrap();
        assert!(pump.join().is_ok());
    }

    #[test]
    fn test_pump_exits_when_control_channel_closes() {
        let (ctl, ctl_rx) = mpsc::channel::<PumpCtl>();
        let (main_conn, _inbox) = mpsc::channel();
        let pump = thread::spawn(move || pump_thread(ctl_rx, main_conn));
        ctl.send(PumpCtl::Start { handle: TickHandle(1), interval_ms: 5 }).unwrap();
        drop(ctl);
        assert!(pump.join().is_ok());
    }

    #[test]
    fn test_pump_exits_when_app_is_gone() {
        let (ctl, ctl_rx) = mpsc::channel();
        let (main_conn, inbox) = mpsc::channel();
        let pump = thread::spawn(move || pump_thread(ctl_rx, main_conn));
        ctl.send(PumpCtl::Start { handle: TickHandle(1), interval_ms: 5 }).unwrap();
        drop(inbox);
        assert!(pump.join().is_ok());
    }

    #[test]
    fn test_pump_ticker_hands_out_fresh_handles() {
        let (pump_conn, pump_rx) = mpsc::channel();
        let mut ticker = PumpTicker { pump_conn, next: 0 };
        let first = ticker.schedule(10);
        ticker.cancel(first);
        let second = ticker.schedule(10);
        assert_ne!(first, second);

        let sent: Vec<PumpCtl> = pump_rx.try_iter().collect();
        assert!(matches!(sent[0], PumpCtl::Start { handle, interval_ms: 10 } if handle == first));
        assert!(matches!(sent[1], PumpCtl::Stop { handle } if handle == first));
        assert!(matches!(sent[2], PumpCtl::Start { handle, .. } if handle == second));
    }

    #[test]
    fn test_clear_all_cancelled_keeps_results() {
        let mut h = harness();
        with_three_laps(&mut h);

        h.app.handle_key(key(KeyCode::Char('x')));
        assert!(h.app.confirm_clear);
        h.app.handle_key(key(KeyCode::Char('n')));
        assert!(!h.app.confirm_clear);
        assert_eq!(h.app.stopwatch.results.len(), 3);

        h.app.handle_key(key(KeyCode::Char('x')));
        h.app.handle_key(key(KeyCode::Esc));
        assert_eq!(h.app.stopwatch.results.len(), 3);
        assert!(!h.app.quit);
    }

    #[test]
    fn test_clear_all_confirmed_empties_results() {
        let mut h = harness();
        with_three_laps(&mut h);

        h.app.handle_key(key(KeyCode::Char('x')));
        // Other keys are swallowed while the confirmation is up
        h.app.handle_key(key(KeyCode::Char('r')));
        assert_eq!(h.app.stopwatch.results.len(), 3);

        h.app.handle_key(key(KeyCode::Char('y')));
        assert!(!h.app.confirm_clear);
        assert!(h.app.stopwatch.results.is_empty());
        assert_eq!(h.app.stopwatch.status(), ClockStatus::Idle);
        assert_eq!(h.app.stopwatch.engine.live_tick(), None);
    }

    #[test]
    fn test_quit_while_running_asks_first() {
        let mut h = harness();
        h.app.handle_key(key(KeyCode::Enter));
        assert!(h.app.stopwatch.engine.is_running());

        h.app.handle_key(key(KeyCode::Char('q')));
        assert!(h.app.confirm_exit);
        assert!(!h.app.quit);

        h.app.handle_key(key(KeyCode::Char('n')));
        assert!(!h.app.confirm_exit);
        assert!(h.app.stopwatch.engine.is_running());

        h.app.handle_key(key(KeyCode::Char('q')));
        h.app.handle_key(key(KeyCode::Char('y')));
        assert!(h.app.quit);
        assert!(!h.app.stopwatch.engine.is_running());
    }

    #[test]
    fn test_quit_when_stopped_is_immediate() {
        let mut h = harness();
        h.app.handle_key(key(KeyCode::Char('q')));
        assert!(h.app.quit);
        assert!(!h.app.confirm_exit);
    }

    #[test]
    fn test_lap_key_restarts_refresh() {
        let mut h = harness();
        h.app.stopwatch.start(0);
        let before = h.app.stopwatch.engine.live_tick();
        h.app.handle_key(key(KeyCode::Char('r')));
        assert!(h.app.stopwatch.engine.is_running());
        assert_ne!(h.app.stopwatch.engine.live_tick(), before);

        h.app.handle_key(key(KeyCode::Char('p')));
        assert!(!h.app.stopwatch.engine.is_running());
        let sent: Vec<PumpCtl> = h.pump_rx.try_iter().collect();
        assert!(matches!(sent.last(), Some(PumpCtl::Stop { .. })));
    }

    #[test]
    fn test_menu_items_map_to_actions() {
        assert_eq!(MENU_ITEMS.len(), MenuItem::Quit as usize + 1);
        assert!(matches!(MenuItem::from_usize(0), Some(MenuItem::Info)));
        assert!(matches!(MenuItem::from_usize(4), Some(MenuItem::ClearAll)));
        assert!(MenuItem::from_usize(MENU_ITEMS.len()).is_none());
    }

    #[test]
    fn test_menu_copy_log_sends_results() {
        let mut h = harness();
        with_three_laps(&mut h);

        h.app.handle_key(key(KeyCode::F(1)));
        assert!(h.app.menu_visible);
        for _ in 0..MenuItem::CopyLog as usize {
            h.app.handle_key(key(KeyCode::Down));
        }
        h.app.handle_key(key(KeyCode::Enter));
        assert!(!h.app.menu_visible);

        let text = h.clip_rx.try_recv().unwrap();
        assert_eq!(
            text,
            "Stopwatch Results\n1. 00:01.50\n2. 00:01.50\n3. 00:01.00"
        );
    }

    #[test]
    fn test_menu_clear_all_still_needs_confirmation() {
        let mut h = harness();
        with_three_laps(&mut h);

        h.app.handle_key(key(KeyCode::F(1)));
        for _ in 0..MenuItem::ClearAll as usize {
            h.app.handle_key(key(KeyCode::Char('j')));
        }
        h.app.handle_key(key(KeyCode::Enter));
        assert!(h.app.confirm_clear);
        assert_eq!(h.app.stopwatch.results.len(), 3);

        h.app.handle_key(key(KeyCode::Char('y')));
        assert!(h.app.stopwatch.results.is_empty());
    }

    #[test]
    fn test_copy_result_flashes() {
        let mut h = harness();
        h.app.handle_copy_finished(Ok(CopyTier::Fallback));
        assert_eq!(h.app.flash.current(), Some(COPIED));
        h.app.handle_copy_finished(Err(ClipboardError::NoUtility));
        assert_eq!(h.app.flash.current(), Some(COPY_FAILED));
        assert!(!h.app.out.is_empty());
    }
}
