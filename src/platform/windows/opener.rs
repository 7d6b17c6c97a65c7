//! Windows link opener

use std::process::Command;

use crate::error::Result;
use crate::platform::launch_detached;
use crate::platform::traits::ExternalOpener;

/// Hands URLs to `cmd /C start`
pub struct WindowsOpener;

impl WindowsOpener {
    pub fn new() -> Self {
        Self
    }
}

impl ExternalOpener for WindowsOpener {
    fn open(&mut self, url: &str) -> Result<()> {
        debug!("Opening {} with cmd /C start", url);
        // Empty title argument so `start` does not treat the URL as one
        launch_detached(Command::new("cmd").args(["/C", "start", "", url]), url)
    }
}
