//! Linux host actions via external commands.
//!
//! - Reboot goes through `sudo shutdown -r now`; the service account needs a
//!   passwordless sudoers entry for `shutdown`.
//! - The player is stopped with `pkill -f`, which matches the full command
//!   line so wrapper scripts and child processes named after the player are
//!   caught too.
//! - Display power uses the Raspberry Pi firmware tool `vcgencmd`.
//!
//! `pkill` exits with code 1 when nothing matched.  That is not a failure for
//! the relay: the player simply was not running.

use tracing::info;

use super::HostCommand;
use crate::application::dispatch::{HostActionError, HostActions};

/// Linux implementation of [`HostActions`].
pub struct LinuxHostActions {
    player_process: String,
}

impl LinuxHostActions {
    /// `player_process` is the pattern handed to `pkill -f`.
    pub fn new(player_process: &str) -> Self {
        Self {
            player_process: player_process.to_string(),
        }
    }
}

pub fn reboot_command() -> HostCommand {
    HostCommand::new("sudo", &["shutdown", "-r", "now"])
}

pub fn kill_command(player_process: &str) -> HostCommand {
    HostCommand::new("pkill", &["-f", player_process])
}

pub fn display_power_command(on: bool) -> HostCommand {
    HostCommand::new("vcgencmd", &["display_power", if on { "1" } else { "0" }])
}

impl HostActions for LinuxHostActions {
    fn reboot(&self) -> Result<(), HostActionError> {
        reboot_command().run()
    }

    fn kill_player(&self) -> Result<(), HostActionError> {
        let cmd = kill_command(&self.player_process);
        match cmd.status()? {
            Some(0) => Ok(()),
            Some(1) => {
                info!("no process matching {:?} was running", self.player_process);
                Ok(())
            }
            code => Err(cmd.failed(code)),
        }
    }

    fn set_display_power(&self, on: bool) -> Result<(), HostActionError> {
        display_power_command(on).run()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
