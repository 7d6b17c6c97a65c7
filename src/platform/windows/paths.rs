//! Windows config locations

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::platform::traits::{PathOps, APP_DIR};

pub struct WindowsPaths;

impl WindowsPaths {
    pub fn new() -> Self {
        Self
    }
}

impl PathOps for WindowsPaths {
    fn app_config_dir(&self) -> Result<PathBuf> {
        // %APPDATA%\folioterm
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| Error::ConfigLoadFailed {
                path: PathBuf::from("%APPDATA%"),
                reason: "no roaming app data directory".to_string(),
            })
    }
}
