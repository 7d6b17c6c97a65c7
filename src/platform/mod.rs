//! Platform abstraction layer
//!
//! Config directory lookup and launching external resources, abstracted over
//! Unix and Windows.

mod traits;
#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

pub use traits::*;

use std::process::{Command, Stdio};
use std::thread;

use crate::error::{Error, Result};

/// Launch `command` with `url` detached from the terminal's stdio
///
/// The child is waited on from a background thread so it never lingers as a
/// zombie. Only a failed launch is reported.
pub(crate) fn launch_detached(command: &mut Command, url: &str) -> Result<()> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| Error::OpenFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let reaper = thread::Builder::new()
        .name("opener-reaper".to_string())
        .spawn(move || match child.wait() {
            Ok(status) => trace!("Opener exited with {}", status),
            Err(e) => debug!("Could not wait on opener: {}", e),
        });
    if let Err(e) = reaper {
        warn!("Could not start opener reaper: {}", e);
    }
    Ok(())
}

/// Platform implementation factory
pub struct Platform;

impl Platform {
    /// Get the platform-specific path operations
    pub fn paths() -> Box<dyn PathOps> {
        #[cfg(unix)]
        {
            Box::new(unix::UnixPaths::new())
        }

        #[cfg(windows)]
        {
            Box::new(windows::WindowsPaths::new())
        }

        #[cfg(not(any(unix, windows)))]
        {
            compile_error!("Unsupported platform");
        }
    }

    /// Get the platform-specific opener for external links
    pub fn opener() -> Box<dyn ExternalOpener> {
        #[cfg(unix)]
        {
            Box::new(unix::UnixOpener::new())
        }

        #[cfg(windows)]
        {
            Box::new(windows::WindowsOpener::new())
        }

        #[cfg(not(any(unix, windows)))]
        {
            compile_error!("Unsupported platform");
        }
    }
}
