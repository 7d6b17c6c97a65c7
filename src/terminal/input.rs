//! Command Input Processing
//!
//! The pending, not-yet-submitted line and the key events that edit it.
//! History recall and submission are driven by the session; this module only
//! owns the edit buffer.

/// Key events the session understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character
    Char(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    /// Submit the pending line
    Enter,
    /// Recall an older command
    Up,
    /// Recall a newer command
    Down,
}

/// Result of processing a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResult {
    /// A non-empty command was submitted and dispatched
    CommandSubmitted(String),
    /// Enter on a blank line
    EmptyCommand,
    /// Text was changed
    TextChanged,
    /// Cursor was moved
    CursorMoved,
    /// No operation performed
    NoOp,
}

/// The in-progress input line
#[derive(Debug, Clone)]
pub struct PendingInput {
    /// Current text
    text: String,
    /// Cursor position as a char index
    cursor: usize,
    /// Whether the input surface has capture focus
    focused: bool,
}

impl PendingInput {
    /// Create an empty, focused input line
    pub fn new() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            focused: true,
        }
    }

    /// Apply an editing key; Enter/Up/Down are not editing keys
    pub fn edit(&mut self, key: KeyInput) -> InputResult {
        match key {
            KeyInput::Char(ch) if !ch.is_control() => self.insert_char(ch),
            KeyInput::Backspace => self.backspace(),
            KeyInput::Delete => self.delete(),
            KeyInput::Left => self.move_cursor(self.cursor.saturating_sub(1)),
            KeyInput::Right => self.move_cursor((self.cursor + 1).min(self.char_len())),
            KeyInput::Home => self.move_cursor(0),
            KeyInput::End => self.move_cursor(self.char_len()),
            _ => InputResult::NoOp,
        }
    }

    fn insert_char(&mut self, ch: char) -> InputResult {
        let at = self.byte_offset(self.cursor);
        self.text.insert(at, ch);
        self.cursor += 1;
        InputResult::TextChanged
    }

    fn backspace(&mut self) -> InputResult {
        if self.cursor == 0 {
            return InputResult::NoOp;
        }
        let at = self.byte_offset(self.cursor - 1);
        self.text.remove(at);
        self.cursor -= 1;
        InputResult::TextChanged
    }

    fn delete(&mut self) -> InputResult {
        if self.cursor >= self.char_len() {
            return InputResult::NoOp;
        }
        let at = self.byte_offset(self.cursor);
        self.text.remove(at);
        InputResult::TextChanged
    }

    fn move_cursor(&mut self, to: usize) -> InputResult {
        if to == self.cursor {
            InputResult::NoOp
        } else {
            self.cursor = to;
            InputResult::CursorMoved
        }
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(offset, _)| offset)
            .unwrap_or(self.text.len())
    }

    /// Replace the whole line, cursor at the end
    pub fn replace(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.char_len();
    }

    /// Take the current text, leaving an empty line
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Current text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position as a char index
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

impl Default for PendingInput {
    fn default() -> Self {
        Self::new()
    }
}
