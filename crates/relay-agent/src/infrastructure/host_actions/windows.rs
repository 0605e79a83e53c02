//! Windows host actions.
//!
//! Only reboot is implemented, through the built-in `shutdown.exe`:
//! `/f` forces running applications closed, `/r` restarts, `/t 0` skips the
//! countdown.  Killing the player is a no-op and display power has no
//! implementation; the relay drives Windows-hosted displays over serial.

use tracing::debug;

use super::HostCommand;
use crate::application::dispatch::{HostActionError, HostActions};

/// Windows implementation of [`HostActions`].
pub struct WindowsHostActions;

impl WindowsHostActions {
    /// The player process name is unused on Windows.
    pub fn new(_player_process: &str) -> Self {
        Self
    }
}

pub fn reboot_command() -> HostCommand {
    HostCommand::new("shutdown", &["/f", "/r", "/t", "0"])
}

impl HostActions for WindowsHostActions {
    fn reboot(&self) -> Result<(), HostActionError> {
        reboot_command().run()
    }

    fn kill_player(&self) -> Result<(), HostActionError> {
        debug!("kill is a no-op on Windows");
        Ok(())
    }

    fn set_display_power(&self, _on: bool) -> Result<(), HostActionError> {
        Err(HostActionError::Unsupported {
            action: "display power",
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
