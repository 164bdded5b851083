use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{Clear, ClearType};
use crossterm::queue;
use stopwatch_core::{ClockStatus, Ticker};

use crate::stopwatch::StopwatchState;

pub type ScreenSize = (u16, u16);

const DISPLAY_ROW: u16 = 2;
const FLASH_ROW: u16 = 4;
const LIST_TOP: u16 = 6;
const FOOTER_LINES: u16 = 3;

#[derive(Clone, Copy, PartialEq)]
enum Style {
    Bold,
    Regular,
    Dim,
}

fn put(out: &mut impl Write, x: u16, y: u16, text: &str, style: Style) -> io::Result<()> {
    queue!(out, MoveTo(x, y), Clear(ClearType::CurrentLine))?;
    match style {
        Style::Bold => queue!(out, SetAttribute(Attribute::Bold))?,
        Style::Dim => queue!(out, SetAttribute(Attribute::Dim))?,
        Style::Regular => {}
    }
    queue!(out, Print(text), SetAttribute(Attribute::Reset))
}

pub fn clear_screen(out: &mut impl Write) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))
}

/// Rows available to the results list.
pub fn max_visible_results(screensize: ScreenSize) -> usize {
    screensize.1.saturating_sub(LIST_TOP + 1 + FOOTER_LINES) as usize
}

pub fn draw_menu(out: &mut impl Write, screensize: ScreenSize, items: &[&str], cursor: usize) -> io::Result<()> {
    clear_screen(out)?;
    put(out, 2, 1, "MENU", Style::Bold)?;
    for (i, item) in items.iter().enumerate() {
        let marker = if i == cursor { "> " } else { "  " };
        put(out, 3, 3 + i as u16, &format!("{}{}", marker, item), Style::Regular)?;
    }
    put(out, 2, screensize.1.saturating_sub(2), "arrows=select  ENTER=open  F1/Esc=close", Style::Dim)?;
    out.flush()
}

pub fn draw_help(out: &mut impl Write, screensize: ScreenSize, help_text: &str) -> io::Result<()> {
    clear_screen(out)?;
    let last_row = screensize.1.saturating_sub(3);
    for (i, line) in help_text.lines().enumerate() {
        let y = 1 + i as u16;
        if y > last_row {
            break;
        }
        let style = if i == 0 { Style::Bold } else { Style::Regular };
        put(out, 3, y, line, style)?;
    }
    put(out, 2, screensize.1.saturating_sub(2), "Press any key to close", Style::Dim)?;
    out.flush()
}

pub fn draw_confirm(out: &mut impl Write, title: &str, message: &str, options: &str) -> io::Result<()> {
    clear_screen(out)?;
    put(out, 2, 2, title, Style::Bold)?;
    let mut y = 4;
    for line in message.lines() {
        put(out, 2, y, line, Style::Regular)?;
        y += 1;
    }
    for line in options.lines() {
        put(out, 2, y + 1, line, Style::Regular)?;
        y += 1;
    }
    out.flush()
}

fn status_label(status: ClockStatus) -> &'static str {
    match status {
        ClockStatus::Idle => "READY",
        ClockStatus::Running => "RUNNING",
        ClockStatus::Paused => "PAUSED",
    }
}

pub fn draw_stopwatch<T: Ticker>(
    out: &mut impl Write,
    screensize: ScreenSize,
    state: &StopwatchState<T>,
    flash: Option<&str>,
    now_ms: u64,
) -> io::Result<()> {
    clear_screen(out)?;
    put(out, 2, 0, &format!("STOPWATCH  [{}]", status_label(state.status())), Style::Bold)?;
    draw_display(out, &state.display_text(now_ms))?;
    if let Some(msg) = flash {
        put(out, 6, FLASH_ROW, msg, Style::Bold)?;
    }

    // Results are hidden entirely while the log is empty
    if !state.results.is_empty() {
        put(
            out,
            2,
            LIST_TOP - 1,
            &format!("RESULTS ({})", state.results.len()),
            Style::Bold,
        )?;
        let max_visible = max_visible_results(screensize);
        let rows = state
            .results
            .render_all(state.separator)
            .zip(state.results.entries())
            .skip(state.result_scroll_offset)
            .take(max_visible);
        for (i, (line, entry)) in rows.enumerate() {
            let stamp = entry.recorded_at().format("%H:%M:%S");
            put(out, 4, LIST_TOP + i as u16, &format!("{:<16} {}", line, stamp), Style::Regular)?;
        }
        let hidden = state.results.len().saturating_sub(state.result_scroll_offset + max_visible);
        if hidden > 0 {
            put(out, 4, LIST_TOP + max_visible as u16, &format!("... {} more", hidden), Style::Dim)?;
        }
    }

    let footer = screensize.1.saturating_sub(FOOTER_LINES - 1);
    put(out, 2, footer, "ENTER=start/stop  r=lap  c=copy  x=clear all", Style::Dim)?;
    put(out, 2, footer + 1, "F1=menu  i=info  arrows=scroll  q=quit", Style::Dim)?;
    out.flush()
}

/// Redraws only the elapsed time. Used for every refresh tick.
pub fn draw_display(out: &mut impl Write, text: &str) -> io::Result<()> {
    put(out, 6, DISPLAY_ROW, text, Style::Bold)?;
    out.flush()
}
