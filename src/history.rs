//! Session command history with bidirectional recall
//!
//! History lives only as long as the session. Entries are kept in submission
//! order, duplicates included, and a recall cursor walks them for Up/Down.

/// In-memory command history
#[derive(Debug, Clone, Default)]
pub struct CommandHistory {
    /// Submitted commands, oldest first
    entries: Vec<String>,
    /// Recall cursor; `entries.len()` means "not recalling"
    cursor: usize,
}

/// Outcome of a single recall step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recall {
    /// Replace the pending input with this history entry
    Entry(String),
    /// Recall exhausted; the pending input becomes a fresh line
    Fresh,
    /// Nothing to do
    Unchanged,
}

impl CommandHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a submitted command and reset the cursor past the newest entry
    ///
    /// Blank commands are ignored.
    pub fn push(&mut self, command: impl Into<String>) -> bool {
        let command = command.into();
        if command.trim().is_empty() {
            return false;
        }
        self.entries.push(command);
        self.cursor = self.entries.len();
        true
    }

    /// Step towards older entries
    pub fn previous(&mut self) -> Recall {
        if self.cursor == 0 {
            return Recall::Unchanged;
        }
        self.cursor -= 1;
        Recall::Entry(self.entries[self.cursor].clone())
    }

    /// Step towards newer entries, ending on a fresh line
    pub fn next(&mut self) -> Recall {
        let len = self.entries.len();
        if self.cursor >= len {
            return Recall::Unchanged;
        }
        if self.cursor + 1 < len {
            self.cursor += 1;
            Recall::Entry(self.entries[self.cursor].clone())
        } else {
            self.cursor = len;
            Recall::Fresh
        }
    }

    /// Get all entries, oldest first
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Current recall cursor
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the cursor is on a history entry
    pub fn is_recalling(&self) -> bool {
        self.cursor < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
