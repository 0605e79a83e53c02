//! DispatchUseCase: turns one received datagram into at most one effect.
//!
//! The dispatcher sits at the application layer and delegates every side
//! effect to an injected port:
//!
//! - [`HostActions`] for OS-level actions (reboot, kill the player, display
//!   power).  One implementation per target OS lives in the infrastructure
//!   layer.
//! - [`SerialSink`] for bytes written to the serial-attached device.
//!
//! Nothing is reported back to the sender.  Failures are logged and the
//! caller carries on with the next datagram.

use std::net::SocketAddr;
use std::sync::Arc;

use relay_core::{
    encode_display_action, protocol::projector_power, Command, DeviceOutput, DeviceProfile,
    DisplayAction,
};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Error type for host action operations.
#[derive(Debug, Error)]
pub enum HostActionError {
    /// The action has no implementation on this operating system.
    #[error("{action} is not supported on this platform")]
    Unsupported { action: &'static str },
    /// The external command could not be started.
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// The external command ran and reported failure.
    #[error("{program} exited with {status}")]
    CommandFailed { program: String, status: String },
}

/// OS-level actions the relay can trigger.
///
/// Each supported OS provides an implementation in the infrastructure layer.
#[cfg_attr(test, mockall::automock)]
pub trait HostActions: Send + Sync {
    /// Reboots the machine immediately.
    fn reboot(&self) -> Result<(), HostActionError>;

    /// Terminates the local player process family.  A no-op on platforms
    /// without an implementation.
    fn kill_player(&self) -> Result<(), HostActionError>;

    /// Switches the host's own display output on or off.
    fn set_display_power(&self, on: bool) -> Result<(), HostActionError>;
}

/// Byte sink for the serial-attached display or projector.
pub trait SerialSink: Send {
    /// Writes one complete command frame.
    fn write_frame(&mut self, frame: &[u8]) -> std::io::Result<()>;

    /// Flushes buffered output to the device.
    fn flush(&mut self) -> std::io::Result<()>;

    /// Device path used in log lines.
    fn port_name(&self) -> &str;
}

/// Static dispatch settings, fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchSettings {
    /// Selects the vendor command set.
    pub profile: DeviceProfile,
    /// The local hostname; a payload equal to it reboots the machine.
    pub hostname: String,
}

/// What a single dispatch did.  Returned for logging and tests; the sender
/// never sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The payload matched no token.
    Ignored,
    /// The command matched but the configured profile has nothing to do for it.
    NotApplicable(Command),
    /// A reboot was requested.
    Rebooted,
    /// The player process family was signalled.
    PlayerKilled,
    /// `bytes` were written to the serial port.
    SerialWritten { command: Command, bytes: usize },
    /// The host display was switched on (`true`) or off.
    DisplayPower(bool),
    /// The action was attempted and failed; the failure was logged.
    Failed(Command),
}

/// The dispatch use case.
pub struct Dispatcher {
    settings: DispatchSettings,
    host: Arc<dyn HostActions>,
    serial: Option<Box<dyn SerialSink>>,
}

impl Dispatcher {
    /// Creates a dispatcher.
    ///
    /// `serial` may be `None` for profiles that never write to a serial
    /// device (see [`DeviceProfile::uses_serial`]).
    pub fn new(
        settings: DispatchSettings,
        host: Arc<dyn HostActions>,
        serial: Option<Box<dyn SerialSink>>,
    ) -> Self {
        Self {
            settings,
            host,
            serial,
        }
    }

    /// Handles one received payload.
    ///
    /// `sender` is logged only; it is never checked.
    pub fn dispatch(&mut self, payload: &[u8], sender: SocketAddr) -> DispatchOutcome {
        info!(
            "received message {:?} from {sender}",
            String::from_utf8_lossy(payload)
        );

        let Some(command) = Command::classify(payload, &self.settings.hostname) else {
            debug!("ignoring unrecognised payload ({} bytes)", payload.len());
            return DispatchOutcome::Ignored;
        };

        match command {
            Command::Restart => match self.host.reboot() {
                Ok(()) => DispatchOutcome::Rebooted,
                Err(e) => self.failed(command, &e),
            },
            Command::KillPlayer => match self.host.kill_player() {
                Ok(()) => DispatchOutcome::PlayerKilled,
                Err(e) => self.failed(command, &e),
            },
            Command::ProjectorOn | Command::ProjectorOff => {
                if self.settings.profile != DeviceProfile::Projector {
                    debug!(
                        "{command} ignored: device profile is {}",
                        self.settings.profile
                    );
                    return DispatchOutcome::NotApplicable(command);
                }
                let frame = projector_power(command == Command::ProjectorOn);
                self.write_serial(command, &frame)
            }
            Command::Sleep => self.display(command, DisplayAction::Sleep),
            Command::Wake => self.display(command, DisplayAction::Wake),
        }
    }

    /// Flushes the serial sink, if one is attached.
    pub fn flush(&mut self) {
        if let Some(serial) = self.serial.as_mut() {
            if let Err(e) = serial.flush() {
                warn!("failed to flush {}: {e}", serial.port_name());
            }
        }
    }

    fn display(&mut self, command: Command, action: DisplayAction) -> DispatchOutcome {
        match encode_display_action(self.settings.profile, action) {
            DeviceOutput::Serial(frame) => self.write_serial(command, &frame),
            DeviceOutput::DisplayPower(on) => match self.host.set_display_power(on) {
                Ok(()) => DispatchOutcome::DisplayPower(on),
                Err(e) => self.failed(command, &e),
            },
            DeviceOutput::Unsupported => {
                warn!(
                    "{command} has no encoding for device profile {}",
                    self.settings.profile
                );
                DispatchOutcome::NotApplicable(command)
            }
        }
    }

    fn write_serial(&mut self, command: Command, frame: &[u8]) -> DispatchOutcome {
        let Some(serial) = self.serial.as_mut() else {
            warn!("{command} needs a serial port but none is open");
            return DispatchOutcome::Failed(command);
        };

        match serial.write_frame(frame) {
            Ok(()) => {
                info!("sent a {command} command to {}", serial.port_name());
                DispatchOutcome::SerialWritten {
                    command,
                    bytes: frame.len(),
                }
            }
            Err(e) => {
                warn!("failed to write {command} to {}: {e}", serial.port_name());
                DispatchOutcome::Failed(command)
            }
        }
    }

    fn failed(&self, command: Command, error: &HostActionError) -> DispatchOutcome {
        warn!("{command} failed: {error}");
        DispatchOutcome::Failed(command)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // ── Recording serial sink ─────────────────────────────────────────────────

    #[derive(Clone, Default)]
    struct SharedSink {
        writes: Arc<Mutex<Vec<Vec<u8>>>>,
        flushes: Arc<Mutex<usize>>,
        should_fail: bool,
    }

    impl SerialSink for SharedSink {
        fn write_frame(&mut self, frame: &[u8]) -> std::io::Result<()> {
            if self.should_fail {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::TimedOut,
                    "injected failure",
                ));
            }
            self.writes.lock().unwrap().push(frame.to_vec());
            Ok(())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            *self.flushes.lock().unwrap() += 1;
            Ok(())
        }

        fn port_name(&self) -> &str {
            "/dev/null"
        }
    }

    fn sender() -> SocketAddr {
        "192.168.1.20:50000".parse().unwrap()
    }

    fn settings(profile: DeviceProfile) -> DispatchSettings {
        DispatchSettings {
            profile,
            hostname: "stage-left".to_string(),
        }
    }

    /// A host mock that fails the test if any action is invoked.
    fn idle_host() -> Arc<dyn HostActions> {
        let mut host = MockHostActions::new();
        host.expect_reboot().never();
        host.expect_kill_player().never();
        host.expect_set_display_power().never();
        Arc::new(host)
    }

    fn dispatcher_with_sink(
        profile: DeviceProfile,
        host: Arc<dyn HostActions>,
    ) -> (Dispatcher, SharedSink) {
        let sink = SharedSink::default();
        let dispatcher = Dispatcher::new(settings(profile), host, Some(Box::new(sink.clone())));
        (dispatcher, sink)
    }

    // ── Host actions ──────────────────────────────────────────────────────────

    #[test]
    fn test_restart_reboots_once_without_serial_write() {
        // Arrange
        let mut host = MockHostActions::new();
        host.expect_reboot().times(1).returning(|| Ok(()));
        host.expect_kill_player().never();
        host.expect_set_display_power().never();
        let (mut dispatcher, sink) = dispatcher_with_sink(DeviceProfile::Iiyama, Arc::new(host));

        // Act
        let outcome = dispatcher.dispatch(b"restart", sender());

        // Assert
        assert_eq!(outcome, DispatchOutcome::Rebooted);
        assert!(sink.writes.lock().unwrap().is_empty());
    }

    #[test]
    fn test_hostname_payload_reboots() {
        let mut host = MockHostActions::new();
        host.expect_reboot().times(1).returning(|| Ok(()));
        let (mut dispatcher, _sink) = dispatcher_with_sink(DeviceProfile::Sharp, Arc::new(host));

        assert_eq!(
            dispatcher.dispatch(b"stage-left", sender()),
            DispatchOutcome::Rebooted
        );
    }

    #[test]
    fn test_kill_calls_kill_player() {
        let mut host = MockHostActions::new();
        host.expect_kill_player().times(1).returning(|| Ok(()));
        host.expect_reboot().never();
        let (mut dispatcher, sink) = dispatcher_with_sink(DeviceProfile::Iiyama, Arc::new(host));

        assert_eq!(
            dispatcher.dispatch(b"kill", sender()),
            DispatchOutcome::PlayerKilled
        );
        assert!(sink.writes.lock().unwrap().is_empty());
    }

    #[test]
    fn test_failed_reboot_is_reported_as_failed_outcome() {
        let mut host = MockHostActions::new();
        host.expect_reboot().times(1).returning(|| {
            Err(HostActionError::CommandFailed {
                program: "shutdown".to_string(),
                status: "exit status: 1".to_string(),
            })
        });
        let (mut dispatcher, _sink) = dispatcher_with_sink(DeviceProfile::Iiyama, Arc::new(host));

        assert_eq!(
            dispatcher.dispatch(b"restart", sender()),
            DispatchOutcome::Failed(Command::Restart)
        );
    }

    // ── Serial writes ─────────────────────────────────────────────────────────

    #[test]
    fn test_iiyama_sleep_and_wake_write_frames() {
        // Arrange
        let (mut dispatcher, sink) = dispatcher_with_sink(DeviceProfile::Iiyama, idle_host());

        // Act
        dispatcher.dispatch(b"sleep", sender());
        dispatcher.dispatch(b"wake", sender());

        // Assert
        let writes = sink.writes.lock().unwrap();
        assert_eq!(
            *writes,
            vec![
                vec![0xA6, 0x01, 0x00, 0x00, 0x00, 0x04, 0x01, 0x18, 0x01, 0xBB],
                vec![0xA6, 0x01, 0x00, 0x00, 0x00, 0x04, 0x01, 0x18, 0x02, 0xB8],
            ]
        );
    }

    #[test]
    fn test_sharp_sleep_writes_ascii() {
        let (mut dispatcher, sink) = dispatcher_with_sink(DeviceProfile::Sharp, idle_host());

        let outcome = dispatcher.dispatch(b"sleep", sender());

        assert_eq!(
            outcome,
            DispatchOutcome::SerialWritten {
                command: Command::Sleep,
                bytes: 10
            }
        );
        assert_eq!(sink.writes.lock().unwrap()[0], b"POWR0000\r\n");
    }

    #[test]
    fn test_projector_commands_write_with_proj_profile() {
        let (mut dispatcher, sink) = dispatcher_with_sink(DeviceProfile::Projector, idle_host());

        dispatcher.dispatch(b"projON", sender());
        dispatcher.dispatch(b"projOFF", sender());

        let writes = sink.writes.lock().unwrap();
        assert_eq!(writes.len(), 2);
        assert_eq!(writes[0], b"~0000 1\r");
        assert_eq!(writes[1], b"~0000 0\r");
    }

    #[test]
    fn test_projector_commands_ignored_for_other_profiles() {
        for profile in [DeviceProfile::Iiyama, DeviceProfile::Sharp, DeviceProfile::Custom] {
            // Arrange
            let (mut dispatcher, sink) = dispatcher_with_sink(profile, idle_host());

            // Act
            let on = dispatcher.dispatch(b"projON", sender());
            let off = dispatcher.dispatch(b"projOFF", sender());

            // Assert
            assert_eq!(on, DispatchOutcome::NotApplicable(Command::ProjectorOn));
            assert_eq!(off, DispatchOutcome::NotApplicable(Command::ProjectorOff));
            assert!(sink.writes.lock().unwrap().is_empty());
        }
    }

    #[test]
    fn test_projector_profile_ignores_sleep() {
        let (mut dispatcher, sink) = dispatcher_with_sink(DeviceProfile::Projector, idle_host());

        assert_eq!(
            dispatcher.dispatch(b"sleep", sender()),
            DispatchOutcome::NotApplicable(Command::Sleep)
        );
        assert!(sink.writes.lock().unwrap().is_empty());
    }

    #[test]
    fn test_serial_write_failure_is_not_fatal() {
        // Arrange
        let sink = SharedSink {
            should_fail: true,
            ..SharedSink::default()
        };
        let mut dispatcher = Dispatcher::new(
            settings(DeviceProfile::Sharp),
            idle_host(),
            Some(Box::new(sink)),
        );

        // Act / Assert
        assert_eq!(
            dispatcher.dispatch(b"wake", sender()),
            DispatchOutcome::Failed(Command::Wake)
        );
    }

    #[test]
    fn test_serial_command_without_port_fails_softly() {
        let mut dispatcher = Dispatcher::new(settings(DeviceProfile::Sharp), idle_host(), None);

        assert_eq!(
            dispatcher.dispatch(b"sleep", sender()),
            DispatchOutcome::Failed(Command::Sleep)
        );
    }

    // ── Custom profile ────────────────────────────────────────────────────────

    #[test]
    fn test_custom_profile_toggles_host_display_power() {
        // Arrange
        let mut host = MockHostActions::new();
        host.expect_set_display_power()
            .withf(|on| !*on)
            .times(1)
            .returning(|_| Ok(()));
        host.expect_set_display_power()
            .withf(|on| *on)
            .times(1)
            .returning(|_| Ok(()));
        let mut dispatcher = Dispatcher::new(settings(DeviceProfile::Custom), Arc::new(host), None);

        // Act
        let sleep = dispatcher.dispatch(b"sleep", sender());
        let wake = dispatcher.dispatch(b"wake", sender());

        // Assert
        assert_eq!(sleep, DispatchOutcome::DisplayPower(false));
        assert_eq!(wake, DispatchOutcome::DisplayPower(true));
    }

    #[test]
    fn test_custom_profile_unsupported_display_power_is_logged_not_fatal() {
        let mut host = MockHostActions::new();
        host.expect_set_display_power()
            .returning(|_| Err(HostActionError::Unsupported { action: "display power" }));
        let mut dispatcher = Dispatcher::new(settings(DeviceProfile::Custom), Arc::new(host), None);

        assert_eq!(
            dispatcher.dispatch(b"wake", sender()),
            DispatchOutcome::Failed(Command::Wake)
        );
    }

    // ── Ignored payloads ──────────────────────────────────────────────────────

    #[test]
    fn test_unknown_payloads_cause_no_effects() {
        let (mut dispatcher, sink) = dispatcher_with_sink(DeviceProfile::Iiyama, idle_host());

        for payload in [&b"hello"[..], b"", b"SLEEP", b"wake\n", &[0u8; 64]] {
            assert_eq!(dispatcher.dispatch(payload, sender()), DispatchOutcome::Ignored);
        }
        assert!(sink.writes.lock().unwrap().is_empty());
    }

    #[test]
    fn test_repeated_command_produces_identical_writes() {
        let (mut dispatcher, sink) = dispatcher_with_sink(DeviceProfile::Sharp, idle_host());

        let first = dispatcher.dispatch(b"wake", sender());
        let second = dispatcher.dispatch(b"wake", sender());

        assert_eq!(first, second);
        let writes = sink.writes.lock().unwrap();
        assert_eq!(writes.len(), 2);
        assert_eq!(writes[0], writes[1]);
    }

    #[test]
    fn test_flush_reaches_sink() {
        let (mut dispatcher, sink) = dispatcher_with_sink(DeviceProfile::Sharp, idle_host());

        dispatcher.flush();

        assert_eq!(*sink.flushes.lock().unwrap(), 1);
    }
}
