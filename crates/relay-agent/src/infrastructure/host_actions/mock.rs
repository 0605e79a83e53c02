//! Recording host actions for tests.
//!
//! The real implementations reboot the machine or kill processes, which no
//! test should do.  `RecordingHostActions` pushes each call into a
//! `Mutex<Vec<HostCall>>` so assertions can check exactly which actions ran
//! and in what order.
//!
//! Set `should_fail = true` to make every action return
//! [`HostActionError::CommandFailed`].

use std::sync::Mutex;

use crate::application::dispatch::{HostActionError, HostActions};

/// One recorded host action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCall {
    Reboot,
    KillPlayer,
    DisplayPower(bool),
}

/// A mock that records all calls without running any command.
#[derive(Default)]
pub struct RecordingHostActions {
    pub calls: Mutex<Vec<HostCall>>,
    pub should_fail: bool,
}

impl RecordingHostActions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the calls made so far.
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn record(&self, call: HostCall) -> Result<(), HostActionError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
        if self.should_fail {
            return Err(HostActionError::CommandFailed {
                program: "mock".to_string(),
                status: "exit code 1".to_string(),
            });
        }
        Ok(())
    }
}

impl HostActions for RecordingHostActions {
    fn reboot(&self) -> Result<(), HostActionError> {
        self.record(HostCall::Reboot)
    }

    fn kill_player(&self) -> Result<(), HostActionError> {
        self.record(HostCall::KillPlayer)
    }

    fn set_display_power(&self, on: bool) -> Result<(), HostActionError> {
        self.record(HostCall::DisplayPower(on))
    }
}
