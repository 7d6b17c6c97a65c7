//! Terminal Session Core
//!
//! [`TerminalSession`] owns the pending input, the command history, the
//! output log, and the deferred-task scheduler. It turns key events into
//! dispatches, applies what handlers return, and fires deferred effects as
//! the host advances the clock.

pub mod input;
pub mod output;

pub use input::{InputResult, KeyInput, PendingInput};
pub use output::{NullSurface, OutputLog, OutputSurface};

use std::time::Duration;

use chrono::{DateTime, Local};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::animation::{AnimationSurface, NoAnimation};
use crate::commands::{tokenize, CommandRegistry};
use crate::config::theme::ThemeSurface;
use crate::config::{Config, RuntimeConfig};
use crate::content::{self, ContentStore};
use crate::error::{Error, Result};
use crate::handlers::{builtin_registry, CommandContext, CommandOutput, SessionAction};
use crate::history::{CommandHistory, Recall};
use crate::models::OutputEntry;
use crate::platform::{ExternalOpener, LogOnlyOpener};
use crate::scheduler::{DeferredAction, DeferredTask, Scheduler, TaskToken};

type Clock = Box<dyn Fn() -> DateTime<Local>>;

/// One visitor's terminal
pub struct TerminalSession {
    registry: CommandRegistry,
    content: ContentStore,
    themes: Box<dyn ThemeSurface>,
    history: CommandHistory,
    log: OutputLog,
    input: PendingInput,
    scheduler: Scheduler,
    opener: Box<dyn ExternalOpener>,
    animation: Box<dyn AnimationSurface>,
    rng: StdRng,
    prompt: String,
    clock: Clock,
}

impl TerminalSession {
    /// Session with the built-in persona and default config
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Process one key event
    pub fn handle_key(&mut self, key: KeyInput) -> InputResult {
        match key {
            KeyInput::Enter => {
                let text = self.input.take();
                self.submit(&text)
            }
            KeyInput::Up => self.recall_previous(),
            KeyInput::Down => self.recall_next(),
            other => self.input.edit(other),
        }
    }

    /// Submit a line as if typed and confirmed with Enter
    ///
    /// Blank lines leave the log and history untouched. The pending input
    /// is cleared and the view scrolled either way.
    pub fn submit(&mut self, raw: &str) -> InputResult {
        self.input.clear();
        let text = raw.trim();
        if text.is_empty() {
            self.log.scroll_to_end();
            return InputResult::EmptyCommand;
        }

        self.history.push(text);
        let echo = OutputEntry::echo(&self.prompt, text);
        self.log.append(echo.clone());
        self.dispatch(text, echo);
        self.log.scroll_to_end();

        InputResult::CommandSubmitted(text.to_string())
    }

    fn dispatch(&mut self, text: &str, echo: OutputEntry) {
        let Some(parsed) = tokenize(text) else {
            return;
        };

        let Some(handler) = self.registry.resolve(&parsed.name) else {
            debug!("Unknown command '{}'", parsed.name);
            self.log.append(OutputEntry::error(format!(
                "Command '{}' not found. Type 'help' for available commands.",
                parsed.name
            )));
            return;
        };

        trace!("Dispatching '{}' with {:?}", parsed.name, parsed.args);
        let output = {
            let mut ctx = CommandContext {
                history: self.history.entries(),
                registry: &self.registry,
                content: &self.content,
                themes: self.themes.as_mut(),
                now: (self.clock)(),
                prompt: &self.prompt,
                rng: &mut self.rng,
            };
            handler.execute(&parsed.args, &mut ctx)
        };
        self.apply(output, echo);
    }

    fn apply(&mut self, output: CommandOutput, echo: OutputEntry) {
        if output.actions.contains(&SessionAction::ClearLog) {
            self.log.reset();
            let cancelled = self.scheduler.cancel_all();
            if cancelled > 0 {
                info!("Clear cancelled {} pending task(s)", cancelled);
            }
            self.log.append(echo);
        }

        self.log.extend(output.entries);

        for action in output.actions {
            match action {
                SessionAction::ClearLog => {}
                SessionAction::Schedule(task) => {
                    self.scheduler.schedule(task);
                }
                SessionAction::PlayAnimation(rain) => self.animation.play(rain),
            }
        }
    }

    /// Up: replace the pending input with the previous history entry
    pub fn recall_previous(&mut self) -> InputResult {
        let recall = self.history.previous();
        self.apply_recall(recall)
    }

    /// Down: step forward through history, ending on an empty line
    pub fn recall_next(&mut self) -> InputResult {
        let recall = self.history.next();
        self.apply_recall(recall)
    }

    fn apply_recall(&mut self, recall: Recall) -> InputResult {
        match recall {
            Recall::Entry(text) => {
                self.input.replace(text);
                InputResult::TextChanged
            }
            Recall::Fresh => {
                self.input.clear();
                InputResult::TextChanged
            }
            Recall::Unchanged => InputResult::NoOp,
        }
    }

    /// Move the session clock forward and run whatever came due
    ///
    /// Returns the number of tasks that fired.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let fired = self.scheduler.advance(elapsed);
        let count = fired.len();

        for task in fired {
            match task.action {
                DeferredAction::Append(entries) => self.log.extend(entries),
                DeferredAction::OpenResource { url, confirmation } => {
                    match self.opener.open(&url) {
                        Ok(()) => self.log.extend(confirmation),
                        Err(e) => {
                            warn!("Task {} could not open {}: {}", task.token, url, e);
                            let reason = match e {
                                Error::OpenFailed { reason, .. } => reason,
                                other => other.to_string(),
                            };
                            self.log.append(OutputEntry::error(format!(
                                "Could not open {}: {}",
                                url, reason
                            )));
                        }
                    }
                }
            }
        }

        if count > 0 {
            self.log.scroll_to_end();
        }
        count
    }

    /// Queue a deferred task directly
    pub fn schedule(&mut self, task: DeferredTask) -> TaskToken {
        self.scheduler.schedule(task)
    }

    /// Cancel a pending chain; false if it already finished
    pub fn cancel(&mut self, token: TaskToken) -> bool {
        self.scheduler.cancel(token)
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending_count()
    }

    /// Time until the next deferred task fires
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.time_until_next()
    }

    /// Append the persona's welcome lines
    pub fn greet(&mut self) {
        self.log.extend(content::entries(&self.content.welcome));
        self.log.scroll_to_end();
    }

    /// Current pending input text
    pub fn pending_input(&self) -> &str {
        self.input.text()
    }

    /// Replace the pending input, cursor at the end
    pub fn set_pending_input(&mut self, text: impl Into<String>) {
        self.input.replace(text);
    }

    pub fn input(&self) -> &PendingInput {
        &self.input
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.input.set_focused(focused);
    }

    pub fn log(&self) -> &OutputLog {
        &self.log
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn content(&self) -> &ContentStore {
        &self.content
    }

    pub fn themes(&self) -> &dyn ThemeSurface {
        self.themes.as_ref()
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

impl std::fmt::Debug for TerminalSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalSession")
            .field("prompt", &self.prompt)
            .field("registry", &self.registry)
            .field("history", &self.history.len())
            .field("log", &self.log)
            .field("pending_tasks", &self.scheduler.pending_count())
            .finish()
    }
}

/// Assembles a [`TerminalSession`] from config, content, and capabilities
pub struct SessionBuilder {
    config: Config,
    content: Option<ContentStore>,
    registry: Option<CommandRegistry>,
    themes: Option<Box<dyn ThemeSurface>>,
    surface: Option<Box<dyn OutputSurface>>,
    opener: Option<Box<dyn ExternalOpener>>,
    animation: Option<Box<dyn AnimationSurface>>,
    seed: Option<u64>,
    clock: Option<Clock>,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            content: None,
            registry: None,
            themes: None,
            surface: None,
            opener: None,
            animation: None,
            seed: None,
            clock: None,
        }
    }

    /// Start from a loaded runtime configuration
    pub fn from_runtime(runtime: RuntimeConfig) -> Self {
        let (config, content, themes) = runtime.into_parts();
        Self::new().config(config).content(content).themes(themes)
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn content(mut self, content: ContentStore) -> Self {
        self.content = Some(content);
        self
    }

    /// Use a custom registry instead of the built-in commands
    pub fn registry(mut self, registry: CommandRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn themes(mut self, themes: impl ThemeSurface + 'static) -> Self {
        self.themes = Some(Box::new(themes));
        self
    }

    pub fn surface(mut self, surface: impl OutputSurface + 'static) -> Self {
        self.surface = Some(Box::new(surface));
        self
    }

    pub fn opener(mut self, opener: impl ExternalOpener + 'static) -> Self {
        self.opener = Some(Box::new(opener));
        self
    }

    pub fn boxed_opener(mut self, opener: Box<dyn ExternalOpener>) -> Self {
        self.opener = Some(opener);
        self
    }

    pub fn animation(mut self, animation: impl AnimationSurface + 'static) -> Self {
        self.animation = Some(Box::new(animation));
        self
    }

    /// Seed the RNG used by `art` and `matrix`
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Override the wall clock used by `date`
    pub fn clock(mut self, clock: impl Fn() -> DateTime<Local> + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    pub fn build(self) -> Result<TerminalSession> {
        let content = match self.content {
            Some(content) => content,
            None => self.config.resolve_content()?,
        };
        let registry = match self.registry {
            Some(registry) => registry,
            None => builtin_registry(&content, &self.config.notes)?,
        };
        let themes = match self.themes {
            Some(themes) => themes,
            None => Box::new(self.config.resolve_themes()),
        };
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let prompt = self.config.prompt.render();

        info!(
            "Session ready: {} commands, prompt '{}'",
            registry.len(),
            prompt
        );

        Ok(TerminalSession {
            registry,
            content,
            themes,
            history: CommandHistory::new(),
            log: OutputLog::new(self.surface.unwrap_or_else(|| Box::new(NullSurface))),
            input: PendingInput::new(),
            scheduler: Scheduler::new(),
            opener: self.opener.unwrap_or_else(|| Box::new(LogOnlyOpener)),
            animation: self.animation.unwrap_or_else(|| Box::new(NoAnimation)),
            rng,
            prompt,
            clock: self.clock.unwrap_or_else(|| Box::new(Local::now)),
        })
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
