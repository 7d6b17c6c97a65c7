//! Integration Tests for Configuration Loading
//!
//! Config files and persona files on disk, through to a running session.

#[path = "../test_utils/mod.rs"]
mod test_utils;

use std::fs;
use std::time::Duration;

use folioterm::config::loader::{validate_config, ConfigLoader};
use folioterm::config::Config;
use folioterm::{init_with_config, Error, SessionBuilder, ThemeSurface};
use tempfile::TempDir;
use test_utils::{log_texts, recorded_session_with, RecordingOpener};

const PERSONA: &str = r#"
listing = ["cv.pdf", "hello.txt"]
resume_file = "cv.pdf"

[[sections]]
name = "whoami"
description = "Who is this"
lines = ["A test persona", { text = "Hi!", style = "success" }]

[[sections]]
name = "echo"
description = "Tries to shadow a built-in"
lines = ["never shown"]

[notes]
url = "https://example.invalid/notes"
description = "Notes"
lines = ["notes blurb"]
confirmation = [{ text = "opened", style = "success" }]

[files]
"hello.txt" = "hi there"

[[resume]]
text = "CV"
style = "success"

[[art]]
title = "dot"
body = "."
"#;

fn write(dir: &TempDir, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn test_full_config_drives_session() {
    let dir = TempDir::new().unwrap();
    let persona = write(&dir, "persona.toml", PERSONA);
    let config = write(
        &dir,
        "config.toml",
        &format!(
            r##"
[prompt]
user = "guest"
host = "gallery"

[theme]
default = "teal"
palettes = [{{ name = "Teal", primary = "#00b3b3" }}]

[notes]
warn_delay_ms = 10
open_delay_ms = 20

[content]
persona = "{}"
"##,
            persona.display()
        ),
    );

    let runtime = init_with_config(&config).unwrap();
    assert_eq!(runtime.config_path(), Some(config.as_path()));
    assert_eq!(runtime.prompt(), "guest@gallery:~$");
    assert_eq!(runtime.themes().active().name, "teal");

    let (mut session, recorders) =
        recorded_session_with(SessionBuilder::from_runtime(runtime), RecordingOpener::default());

    session.submit("whoami");
    assert_eq!(
        log_texts(&session),
        vec!["guest@gallery:~$ whoami", "A test persona", "Hi!"]
    );

    // Reserved names never become sections
    session.submit("echo hi");
    assert_eq!(session.log().last().map(|e| e.content.as_str()), Some("hi"));

    session.submit("cat cv.pdf");
    assert!(log_texts(&session).contains(&"Contents of cv.pdf:".to_string()));

    session.submit("theme");
    assert!(log_texts(&session)
        .contains(&"matrix, cyberpunk, ocean, fire, amber, default, teal".to_string()));

    session.submit("notes");
    session.advance(Duration::from_millis(30));
    assert_eq!(
        *recorders.opener.opened.borrow(),
        vec!["https://example.invalid/notes".to_string()]
    );
    assert_eq!(session.log().last().map(|e| e.content.as_str()), Some("opened"));
}

#[test]
fn test_notes_url_override() {
    let dir = TempDir::new().unwrap();
    let config = write(
        &dir,
        "config.toml",
        "[notes]\nurl = \"https://elsewhere.invalid\"\n",
    );

    let runtime = init_with_config(&config).unwrap();
    assert_eq!(runtime.content().notes.url, "https://elsewhere.invalid");
}

#[test]
fn test_json_config() {
    let dir = TempDir::new().unwrap();
    let config = write(
        &dir,
        "config.json",
        r#"{ "prompt": { "symbol": "%" }, "theme": { "default": "amber" } }"#,
    );

    let runtime = init_with_config(&config).unwrap();
    assert_eq!(runtime.prompt(), "artist@universe:~%");
    assert_eq!(
        runtime.themes().active_palette().map(|p| p.name.as_str()),
        Some("amber")
    );
}

#[test]
fn test_unknown_default_theme_keeps_default() {
    let dir = TempDir::new().unwrap();
    let config = write(&dir, "config.toml", "[theme]\ndefault = \"plaid\"\n");

    let runtime = init_with_config(&config).unwrap();
    assert_eq!(runtime.themes().active().name, "default");
}

#[test]
fn test_invalid_config_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config = write(&dir, "config.toml", "[notes]\nwarn_delay_ms = 0\n");

    match init_with_config(&config) {
        Err(Error::ConfigValidationFailed { field, .. }) => {
            assert_eq!(field, "notes.warn_delay_ms")
        }
        other => panic!("expected validation failure, got {:?}", other),
    }
}

#[test]
fn test_malformed_config_is_an_error() {
    let dir = TempDir::new().unwrap();
    let config = write(&dir, "config.toml", "[prompt\nuser = ");
    assert!(init_with_config(&config).is_err());
}

#[test]
fn test_missing_persona_file() {
    let dir = TempDir::new().unwrap();
    let config = write(
        &dir,
        "config.toml",
        "[content]\npersona = \"/no/such/persona.toml\"\n",
    );

    assert!(matches!(init_with_config(&config), Err(Error::Content(_))));
}

#[test]
fn test_persona_with_uppercase_section_is_rejected() {
    let dir = TempDir::new().unwrap();
    let persona = write(
        &dir,
        "persona.toml",
        &PERSONA.replace("name = \"whoami\"", "name = \"WhoAmI\""),
    );
    let config = write(
        &dir,
        "config.toml",
        &format!("[content]\npersona = \"{}\"\n", persona.display()),
    );

    assert!(matches!(init_with_config(&config), Err(Error::Content(_))));
}

#[test]
fn test_save_then_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.prompt.host = "studio".to_string();
    config.theme.default = "fire".to_string();

    let loader = ConfigLoader::new();
    loader.save_to_path(&config, &path).unwrap();

    let loaded = ConfigLoader::new().load_from_path(&path).unwrap();
    assert_eq!(loaded.prompt.host, "studio");
    assert_eq!(loaded.theme.default, "fire");
    assert!(validate_config(&loaded).is_ok());
}

#[test]
fn test_search_path_discovery() {
    let dir = TempDir::new().unwrap();
    write(&dir, "config.toml", "[prompt]\nuser = \"found\"\n");

    let mut loader = ConfigLoader::new();
    loader.set_search_path(dir.path().join("config"));
    let config = loader.load_config(&Default::default()).unwrap();

    if std::env::var_os("FOLIOTERM_CONFIG").is_none() {
        assert_eq!(config.prompt.user, "found");
        assert_eq!(loader.current_path(), Some(dir.path().join("config.toml").as_path()));
    }
}
