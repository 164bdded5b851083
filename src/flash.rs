/// How long an acknowledgment stays on screen.
pub const FLASH_MS: u64 = 1000;

pub const COPIED: &str = "Copied!";
pub const COPY_FAILED: &str = "Copy failed";

/// A transient one-line message. Each `show` supersedes the previous one,
/// and only the expiry for the current message clears it.
#[derive(Debug, Default)]
pub struct FlashState {
    current: Option<(u64, String)>,
    next_id: u64,
}

impl FlashState {
    pub fn show(&mut self, message: &str) -> u64 {
        self.next_id += 1;
        self.current = Some((self.next_id, message.to_string()));
        self.next_id
    }

    /// Returns true if the visible message changed.
    pub fn expire(&mut self, id: u64) -> bool {
        match &self.current {
            Some((current, _)) if *current == id => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_ref().map(|(_, msg)| msg.as_str())
    }
}
