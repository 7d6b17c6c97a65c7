//! Contract Tests for History Recall
//!
//! Up/Down only rehydrate the pending input; they never dispatch.

#[path = "../test_utils/mod.rs"]
mod test_utils;

use folioterm::history::{CommandHistory, Recall};
use folioterm::{InputResult, KeyInput};
use test_utils::{recorded_session, type_line};

#[test]
fn test_round_trip_up_then_down() {
    let (mut session, _) = recorded_session();
    for cmd in ["whoami", "skills", "echo hi"] {
        session.submit(cmd);
    }
    let log_len = session.log().len();

    let mut seen = Vec::new();
    for _ in 0..3 {
        session.handle_key(KeyInput::Up);
        seen.push(session.pending_input().to_string());
    }
    assert_eq!(seen, vec!["echo hi", "skills", "whoami"]);

    let mut seen = Vec::new();
    for _ in 0..3 {
        session.handle_key(KeyInput::Down);
        seen.push(session.pending_input().to_string());
    }
    assert_eq!(seen, vec!["skills", "echo hi", ""]);

    assert_eq!(session.log().len(), log_len);
    assert_eq!(session.history().len(), 3);
}

#[test]
fn test_up_stops_at_oldest() {
    let (mut session, _) = recorded_session();
    session.submit("ls");
    session.submit("date");

    session.handle_key(KeyInput::Up);
    session.handle_key(KeyInput::Up);
    for _ in 0..5 {
        assert_eq!(session.handle_key(KeyInput::Up), InputResult::NoOp);
        assert_eq!(session.pending_input(), "ls");
    }
    assert_eq!(session.history().cursor(), 0);
}

#[test]
fn test_down_at_fresh_line_is_noop() {
    let (mut session, _) = recorded_session();
    session.submit("ls");
    session.set_pending_input("draft");
    assert_eq!(session.handle_key(KeyInput::Down), InputResult::NoOp);
    assert_eq!(session.pending_input(), "draft");
}

#[test]
fn test_recall_on_empty_history() {
    let (mut session, _) = recorded_session();
    assert_eq!(session.handle_key(KeyInput::Up), InputResult::NoOp);
    assert_eq!(session.handle_key(KeyInput::Down), InputResult::NoOp);
    assert_eq!(session.pending_input(), "");
}

#[test]
fn test_recalled_line_can_be_edited_and_resubmitted() {
    let (mut session, _) = recorded_session();
    type_line(&mut session, "echo one");
    session.handle_key(KeyInput::Up);
    for _ in 0..3 {
        session.handle_key(KeyInput::Backspace);
    }
    for ch in "two".chars() {
        session.handle_key(KeyInput::Char(ch));
    }
    assert_eq!(session.pending_input(), "echo two");
    session.handle_key(KeyInput::Enter);

    assert_eq!(session.history().entries(), &["echo one", "echo two"]);
    assert!(!session.history().is_recalling());
}

#[test]
fn test_submission_resets_cursor() {
    let (mut session, _) = recorded_session();
    session.submit("a");
    session.submit("b");
    session.handle_key(KeyInput::Up);
    session.handle_key(KeyInput::Up);
    session.submit("c");

    assert_eq!(session.history().cursor(), 3);
    session.handle_key(KeyInput::Up);
    assert_eq!(session.pending_input(), "c");
}

#[test]
fn test_history_keeps_raw_case_and_duplicates() {
    let (mut session, _) = recorded_session();
    session.submit("  Echo   Mixed  ");
    session.submit("ls");
    session.submit("ls");
    assert_eq!(session.history().entries(), &["Echo   Mixed", "ls", "ls"]);
}

#[test]
fn test_blank_lines_never_enter_history() {
    let mut history = CommandHistory::new();
    assert!(!history.push("   "));
    assert!(!history.push(""));
    assert!(history.push("help"));
    assert_eq!(history.len(), 1);
    assert_eq!(history.cursor(), 1);
}

#[test]
fn test_history_steps_directly() {
    let mut history = CommandHistory::new();
    history.push("one");
    history.push("two");

    assert_eq!(history.previous(), Recall::Entry("two".to_string()));
    assert_eq!(history.previous(), Recall::Entry("one".to_string()));
    assert_eq!(history.previous(), Recall::Unchanged);
    assert_eq!(history.next(), Recall::Entry("two".to_string()));
    assert_eq!(history.next(), Recall::Fresh);
    assert_eq!(history.next(), Recall::Unchanged);
}
