//! Serial port adapter for the attached display or projector.
//!
//! Opens the device once at startup (8 data bits, no parity, one stop bit,
//! no flow control) and keeps it for the life of the process.  Writes are
//! fire-and-forget: nothing is ever read back from the device.
//!
//! # Default device paths
//!
//! | OS        | Path           |
//! |-----------|----------------|
//! | Windows   | `COM2`         |
//! | elsewhere | `/dev/ttyAMA0` |
//!
//! The handle is flushed when the [`SerialPortSink`] is dropped, so every exit
//! path (clean shutdown, receive failure, panic unwinding) pushes out any
//! buffered bytes before the port is closed.

pub mod mock;

use std::io::Write;
use std::time::Duration;

use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::application::dispatch::SerialSink;

/// Default baud rate for every supported device.
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// A write that cannot complete within this time fails instead of hanging the loop.
pub const WRITE_TIMEOUT: Duration = Duration::from_secs(1);

/// Error type for serial port setup.
#[derive(Debug, Error)]
pub enum SerialError {
    /// The device could not be opened or configured.
    #[error("failed to open serial port {device} at {baud_rate} baud: {source}")]
    Open {
        device: String,
        baud_rate: u32,
        #[source]
        source: serialport::Error,
    },
}

/// Platform default serial device.
pub fn default_device() -> &'static str {
    if cfg!(target_os = "windows") {
        "COM2"
    } else {
        "/dev/ttyAMA0"
    }
}

/// A [`SerialSink`] backed by a real serial port.
pub struct SerialPortSink {
    port: Box<dyn SerialPort>,
    device: String,
}

impl SerialPortSink {
    /// Opens `device` at `baud_rate`, 8N1.
    ///
    /// # Errors
    ///
    /// Returns [`SerialError::Open`] if the device does not exist, is busy, or
    /// rejects the settings.
    pub fn open(device: &str, baud_rate: u32) -> Result<Self, SerialError> {
        let port = serialport::new(device, baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(WRITE_TIMEOUT)
            .open()
            .map_err(|source| SerialError::Open {
                device: device.to_string(),
                baud_rate,
                source,
            })?;

        info!("opened serial port {device} at {baud_rate} baud");
        Ok(Self {
            port,
            device: device.to_string(),
        })
    }
}

impl SerialSink for SerialPortSink {
    fn write_frame(&mut self, frame: &[u8]) -> std::io::Result<()> {
        debug!("writing {} bytes to {}", frame.len(), self.device);
        self.port.write_all(frame)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.port.flush()
    }

    fn port_name(&self) -> &str {
        &self.device
    }
}

impl Drop for SerialPortSink {
    fn drop(&mut self) {
        if let Err(e) = self.port.flush() {
            warn!("failed to flush {} on close: {e}", self.device);
        }
        info!("closed serial port {}", self.device);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
