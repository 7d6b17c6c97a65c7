//! Crossterm rendering
//!
//! The output surface, the palette the surface colors with, and the matrix
//! rain overlay. Everything writes in raw mode, so lines end in `\r\n`.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use std::time::Duration;

use crossterm::cursor::{MoveTo, MoveToColumn, RestorePosition, SavePosition};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::queue;

use crate::animation::{AnimationSurface, MatrixRain};
use crate::config::theme::{Color, Palette, ThemeManager, ThemeSurface};
use crate::error::Result;
use crate::models::{OutputEntry, StyleClass};
use crate::terminal::{KeyInput, OutputSurface};

/// Palette shared between the theme surface and the renderers
pub type SharedPalette = Rc<RefCell<Palette>>;

const ERROR_COLOR: TermColor = TermColor::Rgb { r: 0xff, g: 0x55, b: 0x55 };
const INFO_COLOR: TermColor = TermColor::Rgb { r: 0x88, g: 0xcc, b: 0xff };

/// What the host does with a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostKey {
    Session(KeyInput),
    Quit,
    Ignore,
}

/// Translate a crossterm key event
pub fn map_key(event: &KeyEvent) -> HostKey {
    if event.kind == KeyEventKind::Release {
        return HostKey::Ignore;
    }

    if event.modifiers.contains(KeyModifiers::CONTROL) {
        return match event.code {
            KeyCode::Char('c') | KeyCode::Char('d') => HostKey::Quit,
            _ => HostKey::Ignore,
        };
    }

    let key = match event.code {
        KeyCode::Char(ch) => KeyInput::Char(ch),
        KeyCode::Backspace => KeyInput::Backspace,
        KeyCode::Delete => KeyInput::Delete,
        KeyCode::Left => KeyInput::Left,
        KeyCode::Right => KeyInput::Right,
        KeyCode::Home => KeyInput::Home,
        KeyCode::End => KeyInput::End,
        KeyCode::Enter => KeyInput::Enter,
        KeyCode::Up => KeyInput::Up,
        KeyCode::Down => KeyInput::Down,
        _ => return HostKey::Ignore,
    };
    HostKey::Session(key)
}

fn term_color(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Foreground color and boldness for a style under a palette
pub fn entry_style(style: StyleClass, palette: &Palette) -> (TermColor, bool) {
    match style {
        StyleClass::Plain | StyleClass::EchoLine => (term_color(palette.primary), false),
        StyleClass::Success => (term_color(palette.primary), true),
        StyleClass::Info => (INFO_COLOR, false),
        StyleClass::Error => (ERROR_COLOR, true),
    }
}

/// Write one entry at the cursor, one terminal row per content line
pub fn write_entry<W: Write>(out: &mut W, entry: &OutputEntry, palette: &Palette) -> io::Result<()> {
    let (color, bold) = entry_style(entry.style, palette);
    for line in entry.lines() {
        queue!(out, MoveToColumn(0), Clear(ClearType::CurrentLine), SetForegroundColor(color))?;
        if bold {
            queue!(out, SetAttribute(Attribute::Bold))?;
        }
        queue!(out, Print(line), SetAttribute(Attribute::Reset), ResetColor, Print("\r\n"))?;
    }
    Ok(())
}

/// Write the prompt and pending input on the current row
pub fn write_prompt<W: Write>(
    out: &mut W,
    prompt: &str,
    text: &str,
    cursor: usize,
    palette: &Palette,
) -> io::Result<()> {
    let column = prompt.chars().count() + 1 + cursor;
    queue!(
        out,
        MoveToColumn(0),
        Clear(ClearType::CurrentLine),
        SetForegroundColor(term_color(palette.primary)),
        SetAttribute(Attribute::Bold),
        Print(prompt),
        SetAttribute(Attribute::Reset),
        ResetColor,
        Print(" "),
        SetForegroundColor(term_color(palette.primary)),
        Print(text),
        ResetColor,
        MoveToColumn(u16::try_from(column).unwrap_or(u16::MAX)),
    )?;
    out.flush()
}

/// Output surface that prints to stdout
pub struct CrosstermSurface {
    palette: SharedPalette,
}

impl CrosstermSurface {
    pub fn new(palette: SharedPalette) -> Self {
        Self { palette }
    }

    fn try_append(&self, entry: &OutputEntry) -> io::Result<()> {
        let mut out = io::stdout().lock();
        write_entry(&mut out, entry, &self.palette.borrow())
    }
}

impl OutputSurface for CrosstermSurface {
    fn append_entry(&mut self, entry: &OutputEntry) {
        if let Err(e) = self.try_append(entry) {
            warn!("Failed to render entry: {}", e);
        }
    }

    fn clear(&mut self) {
        let mut out = io::stdout().lock();
        if let Err(e) = queue!(out, Clear(ClearType::All), Clear(ClearType::Purge), MoveTo(0, 0)) {
            warn!("Failed to clear screen: {}", e);
        }
    }

    fn scroll_to_end(&mut self) {
        if let Err(e) = io::stdout().flush() {
            warn!("Failed to flush output: {}", e);
        }
    }
}

/// Theme surface that mirrors the active palette to the renderers
pub struct SharedThemes {
    manager: ThemeManager,
    shared: SharedPalette,
}

impl SharedThemes {
    pub fn new(manager: ThemeManager) -> Self {
        let shared = Rc::new(RefCell::new(manager.active().clone()));
        Self { manager, shared }
    }

    pub fn palette(&self) -> SharedPalette {
        Rc::clone(&self.shared)
    }
}

impl ThemeSurface for SharedThemes {
    fn apply_palette(&mut self, name: &str) -> Result<()> {
        self.manager.apply_palette(name)?;
        *self.shared.borrow_mut() = self.manager.active().clone();
        Ok(())
    }

    fn palette_names(&self) -> Vec<String> {
        self.manager.palette_names()
    }

    fn active_palette(&self) -> Option<&Palette> {
        Some(self.manager.active())
    }
}

/// A rain effect in progress
#[derive(Debug)]
pub struct RainPlayback {
    rain: MatrixRain,
    elapsed: Duration,
    drawn: Vec<(u16, u16)>,
}

impl RainPlayback {
    pub fn new(rain: MatrixRain) -> Self {
        Self {
            rain,
            elapsed: Duration::ZERO,
            drawn: Vec::new(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.rain.is_finished(self.elapsed)
    }

    /// Screen cells of the visible glyphs on a `width` x `height` screen
    pub fn cells(&self, width: u16, height: u16) -> Vec<(u16, u16, char)> {
        let max_col = f32::from(width.saturating_sub(2));
        let max_row = f32::from(height.saturating_sub(2));
        self.rain
            .visible_at(self.elapsed)
            .map(|drop| {
                let col = (drop.column / 100.0 * max_col) as u16;
                let row = (drop.progress(self.elapsed) * max_row) as u16;
                (col, row, drop.glyph)
            })
            .collect()
    }

    /// Advance the effect and repaint it; erases itself once finished
    pub fn step<W: Write>(
        &mut self,
        out: &mut W,
        elapsed: Duration,
        size: (u16, u16),
        palette: &Palette,
    ) -> io::Result<()> {
        self.elapsed += elapsed;
        queue!(out, SavePosition)?;
        for (col, row) in self.drawn.drain(..) {
            queue!(out, MoveTo(col, row), Print("  "))?;
        }
        if !self.is_finished() {
            queue!(out, SetForegroundColor(term_color(palette.primary)))?;
            for (col, row, glyph) in self.cells(size.0, size.1) {
                queue!(out, MoveTo(col, row), Print(glyph))?;
                self.drawn.push((col, row));
            }
            queue!(out, ResetColor)?;
        }
        queue!(out, RestorePosition)?;
        out.flush()
    }
}

/// Slot the session's animation surface fills and the host plays from
pub type RainSlot = Rc<RefCell<Option<RainPlayback>>>;

/// Animation surface that queues rain for the host loop
pub struct RainAnimator {
    slot: RainSlot,
}

impl RainAnimator {
    pub fn new(slot: RainSlot) -> Self {
        Self { slot }
    }
}

impl AnimationSurface for RainAnimator {
    fn play(&mut self, rain: MatrixRain) {
        debug!("Starting rain with {} drops", rain.drops.len());
        *self.slot.borrow_mut() = Some(RainPlayback::new(rain));
    }
}
