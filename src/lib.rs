//! folioterm - a portfolio terminal
//!
//! A fake shell for a personal portfolio. Visitors type commands, the session
//! dispatches them to handlers from a registry, and the handlers answer with
//! styled output entries. There is no real shell, process, or file system
//! behind it: every "file" is persona content loaded from TOML.
//!
//! ## Module Organization
//!
//! ### Core
//!
//! - [`terminal`] - [`TerminalSession`]: input, dispatch, output log
//! - [`commands`] - Command registry and line tokenizing
//! - [`handlers`] - The handler contract and the built-in commands
//! - [`history`] - Command history with bidirectional recall
//! - [`scheduler`] - Deferred, cancellable one-shot effects
//!
//! ### Content and configuration
//!
//! - [`content`] - Persona content (sections, files, resume, art)
//! - [`config`] - Config loading, palettes, runtime bundle
//! - [`models`] - Output entries and their styles
//! - [`mod@error`] - Error types and Result aliases
//!
//! ### Host side
//!
//! - [`host`] - Crossterm front end driving a session
//! - [`platform`] - Config paths and opening links per OS
//! - [`animation`] - Matrix rain plans
//!
//! ## Quick Start
//!
//! ```no_run
//! use folioterm::{init, KeyInput, SessionBuilder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let runtime = init()?;
//! let mut session = SessionBuilder::from_runtime(runtime).build()?;
//!
//! session.submit("help");
//! session.handle_key(KeyInput::Up);
//! assert_eq!(session.pending_input(), "help");
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The session is single-threaded and synchronous. Deferred effects run on a
//! virtual clock that the host advances with [`TerminalSession::advance`], so
//! tests drive time explicitly and never sleep.

#[macro_use]
extern crate tracing;

pub mod animation;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod handlers;
pub mod history;
pub mod host;
pub mod models;
pub mod platform;
pub mod scheduler;
pub mod terminal;

// Re-exports for core functionality
pub use config::{Config, RuntimeConfig};
pub use error::{Error, Result};
pub use terminal::{InputResult, KeyInput, SessionBuilder, TerminalSession};

// Convenience re-exports for common types
pub use commands::CommandRegistry;
pub use config::loader::ConfigLoader;
pub use config::theme::{ThemeManager, ThemeSurface};
pub use content::ContentStore;
pub use handlers::{CommandContext, CommandHandler, CommandOutput, SessionAction};
pub use models::{OutputEntry, StyleClass};

/// The current version of folioterm from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The application name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// The application description from Cargo.toml
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Initialize folioterm from the default config locations
///
/// Loads the first config file found on the search path, or defaults when
/// there is none, then resolves persona content and palettes.
///
/// # Errors
///
/// Fails when a config file exists but does not validate, or when the
/// configured persona file cannot be loaded.
pub fn init() -> Result<RuntimeConfig> {
    info!("Initializing {} v{}", NAME, VERSION);
    let runtime = RuntimeConfig::new()?;
    match runtime.config_path() {
        Some(path) => info!("Configuration loaded from {}", path.display()),
        None => info!("Using default configuration"),
    }
    Ok(runtime)
}

/// Initialize folioterm with an explicit config file
pub fn init_with_config(config_path: &std::path::Path) -> Result<RuntimeConfig> {
    info!(
        "Initializing {} v{} with config: {}",
        NAME,
        VERSION,
        config_path.display()
    );

    if !config_path.exists() {
        return Err(Error::ConfigLoadFailed {
            path: config_path.to_path_buf(),
            reason: "Configuration file does not exist".to_string(),
        });
    }

    RuntimeConfig::load_from_file(config_path)
}
