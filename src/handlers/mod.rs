//! Command handlers
//!
//! A handler is a value implementing [`CommandHandler`]. It gets the
//! lowercased arguments and a [`CommandContext`] and returns the entries to
//! append plus any [`SessionAction`]s. Handlers never see the output log, the
//! display, or mutable history; the session applies what they return.

use std::sync::Arc;

use chrono::{DateTime, Local};
use rand::rngs::StdRng;

use crate::animation::MatrixRain;
use crate::commands::CommandRegistry;
use crate::config::theme::ThemeSurface;
use crate::config::NotesConfig;
use crate::content::ContentStore;
use crate::error::Result;
use crate::models::OutputEntry;
use crate::scheduler::DeferredTask;

pub mod files;
pub mod fun;
pub mod notes;
pub mod sections;
pub mod shell;
pub mod theme;

pub use files::{CatHandler, LsHandler, ResumeHandler};
pub use fun::{ArtHandler, MatrixHandler};
pub use notes::NotesHandler;
pub use sections::SectionHandler;
pub use shell::{ClearHandler, DateHandler, EchoHandler, HelpHandler, HistoryHandler};
pub use theme::ThemeHandler;

/// Names owned by built-in handlers; persona sections cannot take them
pub const RESERVED_NAMES: &[&str] = &[
    "notes", "docs", "knowledge", "resume", "art", "ls", "cat", "echo", "history", "date",
    "matrix", "theme", "clear", "help",
];

/// Something the session does on a handler's behalf
#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    /// Reset the log, then re-append the echo entry before the handler's entries
    ClearLog,
    /// Queue a deferred task chain
    Schedule(DeferredTask),
    /// Hand an animation plan to the animation surface
    PlayAnimation(MatrixRain),
}

/// What a handler returns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandOutput {
    pub entries: Vec<OutputEntry>,
    pub actions: Vec<SessionAction>,
}

impl CommandOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<OutputEntry>) -> Self {
        Self {
            entries,
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: OutputEntry) {
        self.entries.push(entry);
    }

    pub fn with_action(mut self, action: SessionAction) -> Self {
        self.actions.push(action);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.actions.is_empty()
    }
}

/// Read access to session state, plus the capabilities a handler may use
pub struct CommandContext<'a> {
    /// Submitted commands, oldest first, including the current one
    pub history: &'a [String],
    pub registry: &'a CommandRegistry,
    pub content: &'a ContentStore,
    pub themes: &'a mut dyn ThemeSurface,
    pub now: DateTime<Local>,
    pub prompt: &'a str,
    pub rng: &'a mut StdRng,
}

/// A command implementation
pub trait CommandHandler: Send + Sync {
    /// Usage column in help, e.g. `cat [file]`
    fn usage(&self) -> &str;

    fn description(&self) -> &str;

    fn execute(&self, args: &[String], ctx: &mut CommandContext<'_>) -> CommandOutput;
}

/// Registry with the persona sections and every built-in command
///
/// Order: persona sections, then `notes` and its aliases, then the built-ins
/// ending with `help`. Help lists commands in this order.
pub fn builtin_registry(content: &ContentStore, notes: &NotesConfig) -> Result<CommandRegistry> {
    let mut registry = CommandRegistry::new();

    for section in &content.sections {
        if RESERVED_NAMES.contains(&section.name.as_str()) {
            warn!(
                "Persona section '{}' shadows a built-in command; skipped",
                section.name
            );
            continue;
        }
        registry.register(&section.name, Arc::new(SectionHandler::new(section.clone())))?;
    }

    registry.register(
        "notes",
        Arc::new(NotesHandler::new(
            content.notes.description.clone(),
            notes.warn_delay(),
            notes.open_delay(),
        )),
    )?;
    registry.alias("docs", "notes")?;
    registry.alias("knowledge", "notes")?;

    registry.register("resume", Arc::new(ResumeHandler))?;
    registry.register("art", Arc::new(ArtHandler))?;
    registry.register("ls", Arc::new(LsHandler))?;
    registry.register("cat", Arc::new(CatHandler))?;
    registry.register("echo", Arc::new(EchoHandler))?;
    registry.register("history", Arc::new(HistoryHandler))?;
    registry.register("date", Arc::new(DateHandler))?;
    registry.register("matrix", Arc::new(MatrixHandler))?;
    registry.register("theme", Arc::new(ThemeHandler))?;
    registry.register("clear", Arc::new(ClearHandler))?;
    registry.register("help", Arc::new(HelpHandler))?;

    debug!("Registered {} commands", registry.len());
    Ok(registry)
}
