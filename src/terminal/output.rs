//! Output Log
//!
//! The append-only log of rendered entries and the display surface it
//! mirrors to. Only the session holds the log; handlers return entries and
//! never touch it directly.

use crate::models::OutputEntry;

/// Display capability the log mirrors every mutation to
pub trait OutputSurface {
    /// Render one new entry at the tail
    fn append_entry(&mut self, entry: &OutputEntry);

    /// Remove everything from the display
    fn clear(&mut self);

    /// Pin the view to the newest entry
    fn scroll_to_end(&mut self);
}

/// Surface that displays nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl OutputSurface for NullSurface {
    fn append_entry(&mut self, _entry: &OutputEntry) {}

    fn clear(&mut self) {}

    fn scroll_to_end(&mut self) {}
}

/// Ordered log of output entries
pub struct OutputLog {
    entries: Vec<OutputEntry>,
    surface: Box<dyn OutputSurface>,
    /// Number of times the log has been reset
    resets: u64,
}

impl OutputLog {
    /// Create an empty log mirroring to `surface`
    pub fn new(surface: Box<dyn OutputSurface>) -> Self {
        Self {
            entries: Vec::new(),
            surface,
            resets: 0,
        }
    }

    /// Create a log without a display
    pub fn detached() -> Self {
        Self::new(Box::new(NullSurface))
    }

    /// Append one entry
    pub fn append(&mut self, entry: OutputEntry) {
        self.surface.append_entry(&entry);
        self.entries.push(entry);
    }

    /// Append entries in order
    pub fn extend(&mut self, entries: impl IntoIterator<Item = OutputEntry>) {
        for entry in entries {
            self.append(entry);
        }
    }

    /// Truncate the log to empty
    pub fn reset(&mut self) {
        debug!("Resetting output log ({} entries)", self.entries.len());
        self.entries.clear();
        self.resets += 1;
        self.surface.clear();
    }

    pub fn scroll_to_end(&mut self) {
        self.surface.scroll_to_end();
    }

    pub fn entries(&self) -> &[OutputEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&OutputEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of resets since creation
    pub fn resets(&self) -> u64 {
        self.resets
    }
}

impl std::fmt::Debug for OutputLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputLog")
            .field("entries", &self.entries.len())
            .field("resets", &self.resets)
            .finish()
    }
}
