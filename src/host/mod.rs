//! Terminal host
//!
//! Drives a [`TerminalSession`] from a real terminal: key events come from a
//! crossterm event stream, a tick interval advances the session clock, and
//! output is drawn inline in raw mode.

pub mod render;

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::event::{Event, EventStream};
use crossterm::queue;
use crossterm::terminal::{self, disable_raw_mode, enable_raw_mode, Clear, ClearType};
use futures::StreamExt;
use tokio::time::{Instant, MissedTickBehavior};

use crate::config::theme::ThemeManager;
use crate::error::Result;
use crate::terminal::TerminalSession;
use render::{
    map_key, write_entry, write_prompt, CrosstermSurface, HostKey, RainAnimator, RainSlot,
    SharedPalette, SharedThemes,
};

/// How often the session clock and the animation advance
pub const TICK: Duration = Duration::from_millis(50);

/// Raw mode for the lifetime of the guard
struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut out = io::stdout();
        let _ = out.write_all(b"\r\n");
        let _ = out.flush();
    }
}

/// Capabilities to hand to the session builder
pub struct HostParts {
    pub surface: CrosstermSurface,
    pub themes: SharedThemes,
    pub animation: RainAnimator,
}

/// The interactive front end
pub struct Host {
    palette: SharedPalette,
    rain: RainSlot,
}

impl Host {
    /// Create the host and the session capabilities wired to it
    pub fn new(themes: ThemeManager) -> (Self, HostParts) {
        let themes = SharedThemes::new(themes);
        let palette = themes.palette();
        let rain: RainSlot = Rc::new(RefCell::new(None));

        let parts = HostParts {
            surface: CrosstermSurface::new(Rc::clone(&palette)),
            themes,
            animation: RainAnimator::new(Rc::clone(&rain)),
        };
        (Self { palette, rain }, parts)
    }

    /// Run until the visitor quits or input ends
    pub async fn run(&mut self, session: &mut TerminalSession) -> Result<()> {
        let _guard = RawModeGuard::enter()?;
        let mut events = EventStream::new();
        let mut ticker = tokio::time::interval(TICK);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_tick = Instant::now();

        self.redraw(session)?;

        loop {
            tokio::select! {
                event = events.next() => match event {
                    Some(Ok(Event::Key(key))) => match map_key(&key) {
                        HostKey::Quit => {
                            info!("Quit requested");
                            break;
                        }
                        HostKey::Session(key) => {
                            session.handle_key(key);
                            self.draw_prompt(session)?;
                        }
                        HostKey::Ignore => {}
                    },
                    Some(Ok(Event::Resize(cols, rows))) => {
                        debug!("Resized to {}x{}", cols, rows);
                        self.redraw(session)?;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                },
                _ = ticker.tick() => {
                    let now = Instant::now();
                    let elapsed = now - last_tick;
                    last_tick = now;

                    if session.advance(elapsed) > 0 {
                        self.draw_prompt(session)?;
                    }
                    self.animate(session, elapsed)?;
                }
            }
        }

        Ok(())
    }

    fn draw_prompt(&self, session: &TerminalSession) -> Result<()> {
        let input = session.input();
        let mut out = io::stdout().lock();
        write_prompt(
            &mut out,
            session.prompt(),
            input.text(),
            input.cursor(),
            &self.palette.borrow(),
        )?;
        Ok(())
    }

    /// Repaint the tail of the log that fits on screen
    fn redraw(&self, session: &TerminalSession) -> Result<()> {
        let (_, rows) = terminal::size()?;
        let palette = self.palette.borrow();
        let mut out = io::stdout().lock();
        queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;

        // Walk back from the newest entry until the screen minus the prompt row is full
        let budget = usize::from(rows.saturating_sub(1));
        let entries = session.log().entries();
        let mut used = 0;
        let mut start = entries.len();
        while start > 0 {
            let height = entries[start - 1].lines().count();
            if used + height > budget {
                break;
            }
            used += height;
            start -= 1;
        }
        for entry in &entries[start..] {
            write_entry(&mut out, entry, &palette)?;
        }
        drop(out);
        drop(palette);
        self.draw_prompt(session)
    }

    fn animate(&self, session: &TerminalSession, elapsed: Duration) -> Result<()> {
        let finished = {
            let mut slot = self.rain.borrow_mut();
            let Some(playback) = slot.as_mut() else {
                return Ok(());
            };
            let size = terminal::size()?;
            let mut out = io::stdout().lock();
            playback.step(&mut out, elapsed, size, &self.palette.borrow())?;
            if playback.is_finished() {
                *slot = None;
                true
            } else {
                false
            }
        };

        if finished {
            debug!("Rain finished");
            self.redraw(session)?;
        }
        Ok(())
    }
}
