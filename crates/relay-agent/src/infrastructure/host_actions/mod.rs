//! Platform-specific host actions.
//!
//! Each platform implements [`HostActions`]; the correct one is selected at
//! compile time via `#[cfg(target_os = ...)]` and re-exported as
//! `NativeHostActions`:
//!
//! | Module        | OS        | reboot                    | kill player          | display power                   |
//! |---------------|-----------|---------------------------|----------------------|---------------------------------|
//! | `linux`       | Linux     | `sudo shutdown -r now`    | `pkill -f <process>` | `vcgencmd display_power <0\|1>` |
//! | `windows`     | Windows   | `shutdown /f /r /t 0`     | no-op                | unsupported                     |
//! | (fallback)    | other     | unsupported               | no-op                | unsupported                     |
//!
//! A [`mock::RecordingHostActions`] is always compiled so tests on any
//! platform can observe actions without rebooting the test machine.

pub mod mock;

use std::fmt;
use std::process::Command as Process;

use tracing::{debug, info};

use crate::application::dispatch::HostActionError;
#[cfg(not(any(target_os = "linux", target_os = "windows")))]
use crate::application::dispatch::HostActions;

/// An external command line, built separately from running it so the exact
/// argv can be tested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl HostCommand {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Runs the command to completion and returns its exit code.
    ///
    /// # Errors
    ///
    /// Returns [`HostActionError::Spawn`] if the program cannot be started.
    pub fn status(&self) -> Result<Option<i32>, HostActionError> {
        info!("running {self}");
        let status = Process::new(&self.program)
            .args(&self.args)
            .status()
            .map_err(|source| HostActionError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        debug!("{} exited with {status}", self.program);
        Ok(status.code())
    }

    /// Runs the command and requires a zero exit code.
    ///
    /// # Errors
    ///
    /// Returns [`HostActionError::Spawn`] if the program cannot be started and
    /// [`HostActionError::CommandFailed`] if it exits non-zero or is killed by
    /// a signal.
    pub fn run(&self) -> Result<(), HostActionError> {
        match self.status()? {
            Some(0) => Ok(()),
            code => Err(self.failed(code)),
        }
    }

    fn failed(&self, code: Option<i32>) -> HostActionError {
        HostActionError::CommandFailed {
            program: self.program.clone(),
            status: match code {
                Some(c) => format!("exit code {c}"),
                None => "termination by signal".to_string(),
            },
        }
    }
}

impl fmt::Display for HostCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

// ── Linux implementation ──────────────────────────────────────────────────────

#[cfg(target_os = "linux")]
pub mod linux;

/// Re-export the Linux implementation as `NativeHostActions` on Linux.
#[cfg(target_os = "linux")]
pub use linux::LinuxHostActions as NativeHostActions;

// ── Windows implementation ────────────────────────────────────────────────────

#[cfg(target_os = "windows")]
pub mod windows;

/// Re-export the Windows implementation as `NativeHostActions` on Windows.
#[cfg(target_os = "windows")]
pub use windows::WindowsHostActions as NativeHostActions;

// ── Fallback for other platforms ──────────────────────────────────────────────

/// Host actions for platforms without an implementation.  Every action is
/// either a no-op or reports [`HostActionError::Unsupported`].
#[cfg(not(any(target_os = "linux", target_os = "windows")))]
pub struct NativeHostActions;

#[cfg(not(any(target_os = "linux", target_os = "windows")))]
impl NativeHostActions {
    /// The player process name is unused on this platform.
    pub fn new(_player_process: &str) -> Self {
        Self
    }
}

#[cfg(not(any(target_os = "linux", target_os = "windows")))]
impl HostActions for NativeHostActions {
    fn reboot(&self) -> Result<(), HostActionError> {
        Err(HostActionError::Unsupported { action: "reboot" })
    }

    fn kill_player(&self) -> Result<(), HostActionError> {
        debug!("kill is a no-op on this platform");
        Ok(())
    }

    fn set_display_power(&self, _on: bool) -> Result<(), HostActionError> {
        Err(HostActionError::Unsupported {
            action: "display power",
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_command_display_joins_argv() {
        let cmd = HostCommand::new("sudo", &["shutdown", "-r", "now"]);
        assert_eq!(cmd.to_string(), "sudo shutdown -r now");
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        // Arrange
        let cmd = HostCommand::new("relay-agent-test-no-such-program", &[]);

        // Act
        let result = cmd.run();

        // Assert
        assert!(matches!(result, Err(HostActionError::Spawn { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_is_command_failed() {
        let cmd = HostCommand::new("false", &[]);

        match cmd.run() {
            Err(HostActionError::CommandFailed { program, status }) => {
                assert_eq!(program, "false");
                assert_eq!(status, "exit code 1");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_zero_exit_is_ok() {
        assert!(HostCommand::new("true", &[]).run().is_ok());
    }
}
