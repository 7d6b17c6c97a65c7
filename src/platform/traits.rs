//! Platform-specific operation traits
//!
//! These traits keep OS differences out of the session, and let tests
//! substitute recorders for the real side effects.

use crate::error::Result;
use std::path::PathBuf;

/// Directory name used under the platform config directory and the home directory
pub(crate) const APP_DIR: &str = "folioterm";

/// Where folioterm keeps its files on this platform
pub trait PathOps: Send + Sync {
    /// Per-user folioterm config directory
    fn app_config_dir(&self) -> Result<PathBuf>;

    /// Dot-directory in the home directory, searched after [`PathOps::app_config_dir`]
    fn dotfile_dir(&self) -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(format!(".{}", APP_DIR)))
    }
}

/// Opens a resource outside the terminal (a browser tab, usually)
pub trait ExternalOpener {
    /// Fire-and-forget open; errors only report that the launch failed
    fn open(&mut self, url: &str) -> Result<()>;
}

/// Opener that only logs the request
#[derive(Debug, Default, Clone, Copy)]
pub struct LogOnlyOpener;

impl ExternalOpener for LogOnlyOpener {
    fn open(&mut self, url: &str) -> Result<()> {
        info!("Open requested for {}", url);
        Ok(())
    }
}
