//! Recorded lap durations.

use std::str::FromStr;

use chrono::{DateTime, Local};

use crate::{format_elapsed, ParseError, Separator};

/// Display numbering of the log.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum LogOrder {
    /// Entry 1 is the most recent lap.
    #[default]
    NewestFirst,
    /// Entry 1 is the first lap recorded.
    OldestFirst,
}

impl FromStr for LogOrder {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest-first" | "newest" => Ok(LogOrder::NewestFirst),
            "oldest-first" | "oldest" => Ok(LogOrder::OldestFirst),
            other => Err(ParseError::new("log order", other, "newest-first, oldest-first")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultEntry {
    duration_ms: u64,
    recorded_at: DateTime<Local>,
}

impl ResultEntry {
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn recorded_at(&self) -> DateTime<Local> {
        self.recorded_at
    }
}

/// Entries are stored in insertion order; `order` only affects how they
/// are numbered and listed.
#[derive(Clone, Debug, Default)]
pub struct ResultLog {
    entries: Vec<ResultEntry>,
    order: LogOrder,
}

impl ResultLog {
    pub fn new(order: LogOrder) -> Self {
        Self {
            entries: Vec::new(),
            order,
        }
    }

    pub fn add(&mut self, duration_ms: u64) {
        self.add_at(duration_ms, Local::now());
    }

    pub fn add_at(&mut self, duration_ms: u64, recorded_at: DateTime<Local>) {
        self.entries.push(ResultEntry {
            duration_ms,
            recorded_at,
        });
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn order(&self) -> LogOrder {
        self.order
    }

    pub fn total_ms(&self) -> u64 {
        self.entries.iter().map(|e| e.duration_ms).sum()
    }

    /// Entries in display order; the first one is number 1.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &ResultEntry> + ExactSizeIterator + Clone {
        (0..self.entries.len()).map(move |position| &self.entries[self.storage_index(position)])
    }

    /// One `"<n>. <time>"` line per entry. Cloning the iterator restarts it.
    pub fn render_all(&self, sep: Separator) -> RenderedLines<'_> {
        RenderedLines {
            log: self,
            sep,
            next: 0,
        }
    }

    /// Clipboard text: a title line followed by the rendered entries.
    pub fn copy_text(&self, title: &str, sep: Separator) -> String {
        let mut text = String::from(title);
        text.push('\n');
        if self.is_empty() {
            text.push_str("No results.");
        } else {
            let lines: Vec<String> = self.render_all(sep).collect();
            text.push_str(&lines.join("\n"));
        }
        text
    }

    /// Maps a display position (0 = number 1) to an index into `entries`.
    /// `position` must be below `len()`.
    fn storage_index(&self, position: usize) -> usize {
        match self.order {
            LogOrder::NewestFirst => self.entries.len() - 1 - position,
            LogOrder::OldestFirst => position,
        }
    }

    fn display_entry(&self, position: usize) -> Option<&ResultEntry> {
        if position >= self.entries.len() {
            return None;
        }
        self.entries.get(self.storage_index(position))
    }
}

#[derive(Clone, Debug)]
pub struct RenderedLines<'a> {
    log: &'a ResultLog,
    sep: Separator,
    next: usize,
}

impl Iterator for RenderedLines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let entry = self.log.display_entry(self.next)?;
        self.next += 1;
        Some(format!("{}. {}", self.next, format_elapsed(entry.duration_ms, self.sep)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.log.len().saturating_sub(self.next);
        (left, Some(left))
    }
}

impl ExactSizeIterator for RenderedLines<'_> {}
