//! Unix config locations

use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::platform::traits::{PathOps, APP_DIR};

pub struct UnixPaths;

impl UnixPaths {
    pub fn new() -> Self {
        Self
    }
}

impl PathOps for UnixPaths {
    fn app_config_dir(&self) -> Result<PathBuf> {
        // XDG_CONFIG_HOME wins on macOS too
        let base = env::var_os("XDG_CONFIG_HOME")
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .or_else(dirs::config_dir)
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .ok_or_else(|| Error::ConfigLoadFailed {
                path: PathBuf::from("~/.config"),
                reason: "no home or config directory".to_string(),
            })?;
        Ok(base.join(APP_DIR))
    }
}
