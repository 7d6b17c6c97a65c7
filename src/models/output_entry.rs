//! Output Entry Model
//!
//! Represents one styled unit of rendered output in the session log.
//! Content may span several lines; renderers split it with [`OutputEntry::lines`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Visual class of an output entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleClass {
    /// Ordinary response text
    #[default]
    Plain,
    /// Headings and confirmations
    Success,
    /// Hints and secondary information
    Info,
    /// Failures reported back to the visitor
    Error,
    /// The prompt plus the submitted command
    EchoLine,
}

/// A single entry in the output log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputEntry {
    /// Text content, possibly multi-line
    pub content: String,

    /// Visual class
    pub style: StyleClass,

    /// When this entry was created
    pub timestamp: DateTime<Utc>,
}

impl OutputEntry {
    /// Create a new entry with the given style
    pub fn new(content: impl Into<String>, style: StyleClass) -> Self {
        Self {
            content: content.into(),
            style,
            timestamp: Utc::now(),
        }
    }

    pub fn plain(content: impl Into<String>) -> Self {
        Self::new(content, StyleClass::Plain)
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self::new(content, StyleClass::Success)
    }

    pub fn info(content: impl Into<String>) -> Self {
        Self::new(content, StyleClass::Info)
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self::new(content, StyleClass::Error)
    }

    /// Empty spacer line
    pub fn blank() -> Self {
        Self::plain(String::new())
    }

    /// Echo of a submitted command behind the prompt
    pub fn echo(prompt: &str, command: &str) -> Self {
        Self::new(format!("{} {}", prompt, command), StyleClass::EchoLine)
    }

    /// Iterate over the display lines of this entry
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        // An empty entry still occupies one row
        let content = self.content.as_str();
        let empty = content.is_empty();
        content.lines().chain(empty.then_some(""))
    }

    /// Check whether this is a spacer entry
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Timestamps are not part of an entry's identity.
impl PartialEq for OutputEntry {
    fn eq(&self, other: &Self) -> bool {
        self.content == other.content && self.style == other.style
    }
}

impl Eq for OutputEntry {}

impl From<&str> for OutputEntry {
    fn from(text: &str) -> Self {
        Self::plain(text)
    }
}

impl From<String> for OutputEntry {
    fn from(text: String) -> Self {
        Self::plain(text)
    }
}
