//! Integration Tests for Dispatch Flows
//!
//! Drives a full session through typed keys and checks what lands in the
//! log, the history, and on the display surface.

#[path = "../test_utils/mod.rs"]
mod test_utils;

use folioterm::models::StyleClass;
use folioterm::{InputResult, KeyInput, OutputEntry};
use test_utils::{log_texts, recorded_session, type_line, SurfaceEvent};

#[test]
fn test_echo_scenario() {
    let (mut session, _) = recorded_session();
    type_line(&mut session, "echo Hello World");

    let entries = session.log().entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].style, StyleClass::EchoLine);
    assert_eq!(entries[0].content, "artist@universe:~$ echo Hello World");
    assert_eq!(entries[1], OutputEntry::plain("hello world"));
    assert_eq!(session.history().entries(), &["echo Hello World"]);
}

#[test]
fn test_cat_resume_streams_document() {
    let (mut session, _) = recorded_session();
    session.submit("cat resume.pdf");

    let entries = session.log().entries();
    assert!(entries.len() > 10, "resume should be many entries");
    assert_eq!(entries[1], OutputEntry::success("Contents of resume.pdf:"));
    assert!(entries.iter().all(|e| e.style != StyleClass::Error));
}

#[test]
fn test_resume_matches_cat_resume() {
    let (mut a, _) = recorded_session();
    let (mut b, _) = recorded_session();
    a.submit("resume");
    b.submit("CAT Resume.PDF");
    assert_eq!(a.log().entries()[1..], b.log().entries()[1..]);
}

#[test]
fn test_cat_unknown_file() {
    let (mut session, _) = recorded_session();
    session.submit("cat Nope.TXT");

    assert_eq!(session.log().len(), 2);
    assert_eq!(
        session.log().entries()[1],
        OutputEntry::error("cat: nope.txt: No such file or directory")
    );
}

#[test]
fn test_cat_without_argument() {
    let (mut session, _) = recorded_session();
    session.submit("cat");
    assert_eq!(
        session.log().entries()[1],
        OutputEntry::info("Usage: cat [filename]")
    );
}

#[test]
fn test_cat_known_file() {
    let (mut session, _) = recorded_session();
    session.submit("cat README.md");
    assert_eq!(
        log_texts(&session)[1..],
        [
            "Contents of readme.md:".to_string(),
            "Welcome to Artist Universe - Where creativity meets code!".to_string(),
        ]
    );
}

#[test]
fn test_unknown_command_names_token() {
    let (mut session, _) = recorded_session();
    session.submit("Sudo rm -rf /");

    let entries = session.log().entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].style, StyleClass::Error);
    assert!(entries[1].content.contains("'sudo'"));
    assert!(entries[1].content.contains("help"));
}

#[test]
fn test_case_insensitive_dispatch() {
    let mut outputs = Vec::new();
    for line in ["help", "Help", "HELP"] {
        let (mut session, _) = recorded_session();
        session.submit(line);
        outputs.push(session.log().entries()[1..].to_vec());
    }
    assert_eq!(outputs[0], outputs[1]);
    assert_eq!(outputs[1], outputs[2]);
}

#[test]
fn test_notes_aliases_share_output() {
    let mut outputs = Vec::new();
    for line in ["notes", "docs", "knowledge"] {
        let (mut session, _) = recorded_session();
        session.submit(line);
        outputs.push(session.log().entries()[1..].to_vec());
        assert_eq!(session.pending_tasks(), 1);
    }
    assert_eq!(outputs[0], outputs[1]);
    assert_eq!(outputs[0], outputs[2]);
}

#[test]
fn test_every_command_dispatches() {
    let (session, _) = recorded_session();
    let names: Vec<String> = session.registry().names().map(str::to_string).collect();
    assert_eq!(names.len(), 22);

    for name in names {
        let (mut session, _) = recorded_session();
        session.submit(&name);
        let entries = session.log().entries();
        assert!(entries.len() >= 2, "'{}' produced no output", name);
        assert_eq!(entries[0].style, StyleClass::EchoLine);
        assert!(
            !entries[1].content.contains("not found"),
            "'{}' did not resolve",
            name
        );
    }
}

#[test]
fn test_help_lists_sections_then_builtins() {
    let (mut session, _) = recorded_session();
    session.submit("help");
    let texts = log_texts(&session);

    assert_eq!(texts[1], "Available Commands:");
    assert!(texts[3].starts_with("whoami      - Display user information"));
    assert!(texts
        .iter()
        .any(|t| t.starts_with("notes") && t.ends_with("(also: docs, knowledge)")));
    assert!(texts.iter().any(|t| t == "cat [file]  - Display file contents"));
    assert_eq!(
        texts.last().map(String::as_str),
        Some("Try 'ls' to see available files, then 'cat [filename]' to view them!")
    );
}

#[test]
fn test_history_lists_current_command() {
    let (mut session, _) = recorded_session();
    session.submit("whoami");
    session.submit("ls");
    session.submit("history");
    assert_eq!(
        log_texts(&session)[log_texts(&session).len() - 4..],
        [
            "Command History:".to_string(),
            "  1  whoami".to_string(),
            "  2  ls".to_string(),
            "  3  history".to_string(),
        ]
    );
}

#[test]
fn test_date_uses_session_clock() {
    let (mut session, _) = recorded_session();
    session.submit("date");
    let texts = log_texts(&session);
    assert_eq!(texts[1], "Current Date & Time:");
    assert!(texts[2].starts_with("Tue Oct 20 2026 14:03:11 GMT"));
}

#[test]
fn test_theme_switch_and_unknown() {
    let (mut session, _) = recorded_session();
    session.submit("theme Ocean");
    assert_eq!(
        session.log().last(),
        Some(&OutputEntry::success("Theme changed to: ocean"))
    );
    assert_eq!(
        session.themes().active_palette().map(|p| p.name.as_str()),
        Some("ocean")
    );

    session.submit("theme plaid");
    let texts = log_texts(&session);
    assert!(texts.contains(&"Unknown theme: 'plaid'".to_string()));
    assert!(texts.contains(&"matrix, cyberpunk, ocean, fire, amber, default".to_string()));
    assert_eq!(
        session.themes().active_palette().map(|p| p.name.as_str()),
        Some("ocean")
    );
}

#[test]
fn test_matrix_hands_plan_to_animation() {
    let (mut session, recorders) = recorded_session();
    session.submit("matrix");

    assert_eq!(recorders.animation.played.borrow().len(), 1);
    assert_eq!(recorders.animation.played.borrow()[0].drops.len(), 50);
    assert_eq!(session.log().len(), 4);
}

#[test]
fn test_art_is_deterministic_with_seed() {
    let (mut a, _) = recorded_session();
    let (mut b, _) = recorded_session();
    a.submit("art");
    b.submit("art");
    assert_eq!(a.log().entries(), b.log().entries());
    assert_eq!(a.log().len(), 2);
}

#[test]
fn test_surface_mirrors_log() {
    let (mut session, recorders) = recorded_session();
    session.submit("whoami");
    session.submit("nope");

    assert_eq!(recorders.surface.appended(), session.log().entries());
    assert_eq!(
        recorders.surface.events.borrow().last(),
        Some(&SurfaceEvent::Scroll)
    );
}

#[test]
fn test_clear_resets_surface() {
    let (mut session, recorders) = recorded_session();
    session.submit("about");
    session.submit("clear");

    assert_eq!(recorders.surface.clears(), 1);
    assert_eq!(session.log().len(), 2);
    assert_eq!(session.log().resets(), 1);
    assert_eq!(
        session.log().entries()[1],
        OutputEntry::plain("Terminal cleared. Type \"help\" for available commands.")
    );
    assert_eq!(session.history().entries(), &["about", "clear"]);
}

#[test]
fn test_blank_enter_still_scrolls() {
    let (mut session, recorders) = recorded_session();
    session.set_pending_input("  \t ");
    assert_eq!(session.handle_key(KeyInput::Enter), InputResult::EmptyCommand);

    assert!(session.log().is_empty());
    assert!(session.history().is_empty());
    assert_eq!(session.pending_input(), "");
    assert_eq!(*recorders.surface.events.borrow(), vec![SurfaceEvent::Scroll]);
}

#[test]
fn test_editing_keys_before_submit() {
    let (mut session, _) = recorded_session();
    for ch in "ecxho hi".chars() {
        session.handle_key(KeyInput::Char(ch));
    }
    session.handle_key(KeyInput::Home);
    session.handle_key(KeyInput::Right);
    session.handle_key(KeyInput::Right);
    session.handle_key(KeyInput::Delete);
    assert_eq!(session.pending_input(), "echo hi");

    session.handle_key(KeyInput::End);
    session.handle_key(KeyInput::Backspace);
    session.handle_key(KeyInput::Char('o'));
    session.handle_key(KeyInput::Enter);
    assert_eq!(session.log().last(), Some(&OutputEntry::plain("ho")));
}

#[test]
fn test_greeting_precedes_commands() {
    let (mut session, _) = recorded_session();
    session.greet();
    session.submit("whoami");
    let texts = log_texts(&session);
    assert_eq!(texts[0], "Welcome to the Artist Universe terminal!");
    assert_eq!(texts[3], "artist@universe:~$ whoami");
}
