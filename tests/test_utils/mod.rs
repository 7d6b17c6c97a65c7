//! Test Utilities and Mocks
//!
//! Recording stand-ins for the session capabilities (display, opener,
//! animation) and helpers for building deterministic sessions.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Local, TimeZone};
use folioterm::animation::{AnimationSurface, MatrixRain};
use folioterm::platform::ExternalOpener;
use folioterm::terminal::OutputSurface;
use folioterm::{Error, KeyInput, OutputEntry, SessionBuilder, TerminalSession};

/// What a [`RecordingSurface`] saw, in order
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    Append(OutputEntry),
    Clear,
    Scroll,
}

/// Display surface that records every call
#[derive(Clone, Default)]
pub struct RecordingSurface {
    pub events: Rc<RefCell<Vec<SurfaceEvent>>>,
}

impl RecordingSurface {
    pub fn appended(&self) -> Vec<OutputEntry> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                SurfaceEvent::Append(entry) => Some(entry.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clears(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| **event == SurfaceEvent::Clear)
            .count()
    }
}

impl OutputSurface for RecordingSurface {
    fn append_entry(&mut self, entry: &OutputEntry) {
        self.events
            .borrow_mut()
            .push(SurfaceEvent::Append(entry.clone()));
    }

    fn clear(&mut self) {
        self.events.borrow_mut().push(SurfaceEvent::Clear);
    }

    fn scroll_to_end(&mut self) {
        self.events.borrow_mut().push(SurfaceEvent::Scroll);
    }
}

/// Opener that records URLs, optionally failing every launch
#[derive(Clone, Default)]
pub struct RecordingOpener {
    pub opened: Rc<RefCell<Vec<String>>>,
    pub failure: Option<String>,
}

impl RecordingOpener {
    pub fn failing(reason: &str) -> Self {
        Self {
            opened: Rc::default(),
            failure: Some(reason.to_string()),
        }
    }
}

impl ExternalOpener for RecordingOpener {
    fn open(&mut self, url: &str) -> folioterm::Result<()> {
        self.opened.borrow_mut().push(url.to_string());
        match &self.failure {
            Some(reason) => Err(Error::OpenFailed {
                url: url.to_string(),
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

/// Animation surface that keeps every plan it is handed
#[derive(Clone, Default)]
pub struct RecordingAnimation {
    pub played: Rc<RefCell<Vec<MatrixRain>>>,
}

impl AnimationSurface for RecordingAnimation {
    fn play(&mut self, rain: MatrixRain) {
        self.played.borrow_mut().push(rain);
    }
}

/// Recorders shared with a session built by [`recorded_session`]
pub struct Recorders {
    pub surface: RecordingSurface,
    pub opener: RecordingOpener,
    pub animation: RecordingAnimation,
}

/// Fixed wall clock: Tue Oct 20 2026 14:03:11 local time
pub fn fixed_now() -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2026, 10, 20, 14, 3, 11)
        .single()
        .expect("unambiguous local time")
}

/// Seeded session on the built-in persona, wired to fresh recorders
pub fn recorded_session() -> (TerminalSession, Recorders) {
    recorded_session_with(SessionBuilder::new(), RecordingOpener::default())
}

pub fn recorded_session_with(
    builder: SessionBuilder,
    opener: RecordingOpener,
) -> (TerminalSession, Recorders) {
    let recorders = Recorders {
        surface: RecordingSurface::default(),
        opener,
        animation: RecordingAnimation::default(),
    };
    let session = builder
        .seed(42)
        .clock(fixed_now)
        .surface(recorders.surface.clone())
        .opener(recorders.opener.clone())
        .animation(recorders.animation.clone())
        .build()
        .expect("session builds");
    (session, recorders)
}

/// Type a line key by key and press Enter
pub fn type_line(session: &mut TerminalSession, line: &str) {
    for ch in line.chars() {
        session.handle_key(KeyInput::Char(ch));
    }
    session.handle_key(KeyInput::Enter);
}

/// Contents of every entry in the log
pub fn log_texts(session: &TerminalSession) -> Vec<String> {
    session
        .log()
        .entries()
        .iter()
        .map(|entry| entry.content.clone())
        .collect()
}
