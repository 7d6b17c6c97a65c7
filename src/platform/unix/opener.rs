//! Unix link opener

use std::process::Command;

use crate::error::Result;
use crate::platform::launch_detached;
use crate::platform::traits::ExternalOpener;

/// Hands URLs to `open` (macOS) or `xdg-open` (everything else)
pub struct UnixOpener {
    program: &'static str,
}

impl UnixOpener {
    pub fn new() -> Self {
        let program = if cfg!(target_os = "macos") {
            "open"
        } else {
            "xdg-open"
        };
        Self { program }
    }

    #[cfg(test)]
    fn with_program(program: &'static str) -> Self {
        Self { program }
    }
}

impl ExternalOpener for UnixOpener {
    fn open(&mut self, url: &str) -> Result<()> {
        debug!("Opening {} with {}", url, self.program);
        launch_detached(Command::new(self.program).arg(url), url)
    }
}
