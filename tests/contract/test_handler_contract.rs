//! Contract Tests for Command Handlers
//!
//! Custom handlers plugged into a custom registry: what they receive, what
//! the session does with what they return.

#[path = "../test_utils/mod.rs"]
mod test_utils;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use folioterm::handlers::builtin_registry;
use folioterm::scheduler::{DeferredAction, DeferredTask};
use folioterm::{
    CommandContext, CommandHandler, CommandOutput, CommandRegistry, ContentStore, OutputEntry,
    SessionAction, SessionBuilder,
};
use test_utils::{log_texts, recorded_session_with, RecordingOpener};

/// Records every invocation and answers with a fixed entry
#[derive(Default)]
struct Tally {
    calls: Mutex<Vec<Vec<String>>>,
    seen_history: Mutex<Vec<Vec<String>>>,
}

impl CommandHandler for Tally {
    fn usage(&self) -> &str {
        "tally [args]"
    }

    fn description(&self) -> &str {
        "Record arguments"
    }

    fn execute(&self, args: &[String], ctx: &mut CommandContext<'_>) -> CommandOutput {
        self.calls.lock().unwrap().push(args.to_vec());
        self.seen_history.lock().unwrap().push(ctx.history.to_vec());
        CommandOutput::from_entries(vec![OutputEntry::info(format!("tallied {}", args.len()))])
    }
}

/// Produces nothing at all
struct Silent;

impl CommandHandler for Silent {
    fn usage(&self) -> &str {
        "silent"
    }

    fn description(&self) -> &str {
        "Say nothing"
    }

    fn execute(&self, _args: &[String], _ctx: &mut CommandContext<'_>) -> CommandOutput {
        CommandOutput::new()
    }
}

/// Schedules a reminder and clears the log
struct Wiper;

impl CommandHandler for Wiper {
    fn usage(&self) -> &str {
        "wipe"
    }

    fn description(&self) -> &str {
        "Clear, then remind later"
    }

    fn execute(&self, _args: &[String], _ctx: &mut CommandContext<'_>) -> CommandOutput {
        CommandOutput::from_entries(vec![OutputEntry::plain("wiped")])
            .with_action(SessionAction::ClearLog)
            .with_action(SessionAction::Schedule(DeferredTask::after(
                Duration::from_secs(1),
                DeferredAction::Append(vec![OutputEntry::info("reminder")]),
            )))
    }
}

fn registry(tally: Arc<Tally>) -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    registry.register("tally", tally).unwrap();
    registry.alias("p", "tally").unwrap();
    registry.register("silent", Arc::new(Silent)).unwrap();
    registry.register("wipe", Arc::new(Wiper)).unwrap();
    registry
}

#[test]
fn test_handler_receives_lowercased_args_once() {
    let tally = Arc::new(Tally::default());
    let (mut session, _) = recorded_session_with(
        SessionBuilder::new().registry(registry(Arc::clone(&tally))),
        RecordingOpener::default(),
    );

    session.submit("TALLY Arg1  ARG2");
    assert_eq!(
        *tally.calls.lock().unwrap(),
        vec![vec!["arg1".to_string(), "arg2".to_string()]]
    );
    assert_eq!(
        log_texts(&session),
        vec!["artist@universe:~$ TALLY Arg1  ARG2", "tallied 2"]
    );
}

#[test]
fn test_alias_invokes_same_handler() {
    let tally = Arc::new(Tally::default());
    let (mut session, _) = recorded_session_with(
        SessionBuilder::new().registry(registry(Arc::clone(&tally))),
        RecordingOpener::default(),
    );

    session.submit("p x");
    session.submit("tally y");
    assert_eq!(tally.calls.lock().unwrap().len(), 2);
}

#[test]
fn test_handler_sees_history_including_current() {
    let tally = Arc::new(Tally::default());
    let (mut session, _) = recorded_session_with(
        SessionBuilder::new().registry(registry(Arc::clone(&tally))),
        RecordingOpener::default(),
    );

    session.submit("silent");
    session.submit("tally");
    assert_eq!(
        *tally.seen_history.lock().unwrap(),
        vec![vec!["silent".to_string(), "tally".to_string()]]
    );
}

#[test]
fn test_empty_output_leaves_only_echo() {
    let (mut session, _) = recorded_session_with(
        SessionBuilder::new().registry(registry(Arc::new(Tally::default()))),
        RecordingOpener::default(),
    );

    session.submit("silent");
    assert_eq!(log_texts(&session), vec!["artist@universe:~$ silent"]);
}

#[test]
fn test_clear_action_then_schedule() {
    let (mut session, _) = recorded_session_with(
        SessionBuilder::new().registry(registry(Arc::new(Tally::default()))),
        RecordingOpener::default(),
    );

    session.submit("silent");
    session.submit("silent");
    session.submit("wipe");
    assert_eq!(log_texts(&session), vec!["artist@universe:~$ wipe", "wiped"]);
    assert_eq!(session.pending_tasks(), 1);

    session.advance(Duration::from_secs(1));
    assert_eq!(
        log_texts(&session),
        vec!["artist@universe:~$ wipe", "wiped", "reminder"]
    );
}

#[test]
fn test_custom_registry_replaces_builtins() {
    let (mut session, _) = recorded_session_with(
        SessionBuilder::new().registry(registry(Arc::new(Tally::default()))),
        RecordingOpener::default(),
    );

    session.submit("help");
    assert_eq!(
        session.log().last(),
        Some(&OutputEntry::error(
            "Command 'help' not found. Type 'help' for available commands."
        ))
    );
}

#[test]
fn test_builtin_registry_contents() {
    let content = ContentStore::builtin().unwrap();
    let registry = builtin_registry(&content, &Default::default()).unwrap();

    let names: Vec<&str> = registry.names().collect();
    assert_eq!(
        &names[..8],
        &["whoami", "about", "skills", "projects", "contact", "social", "tools", "universe"]
    );
    assert_eq!(&names[8..11], &["notes", "docs", "knowledge"]);
    assert_eq!(names.last(), Some(&"help"));

    let rows = registry.help_rows();
    assert_eq!(rows.len(), 20);
    assert!(rows.iter().all(|row| !row.description.is_empty()));
}

#[test]
fn test_handlers_are_shareable() {
    fn assert_send_sync<T: Send + Sync + ?Sized>() {}
    assert_send_sync::<dyn CommandHandler>();
}
