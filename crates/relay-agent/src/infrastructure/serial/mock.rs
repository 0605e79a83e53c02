//! Recording serial sink for tests.
//!
//! The real [`SerialPortSink`](super::SerialPortSink) needs hardware.  The
//! `RecordingSerial` stores every frame in a shared log instead, so a test can
//! hand the sink to a dispatcher and still inspect what was written:
//!
//! ```ignore
//! let serial = RecordingSerial::new("/dev/ttyTEST");
//! let log = serial.log();
//! let dispatcher = Dispatcher::new(settings, host, Some(Box::new(serial)));
//! // ... dispatch ...
//! assert_eq!(log.frames(), vec![b"POWR0001\r\n".to_vec()]);
//! ```

use std::sync::{Arc, Mutex};

use crate::application::dispatch::SerialSink;

/// Shared view of everything a [`RecordingSerial`] saw.
#[derive(Debug, Clone, Default)]
pub struct SerialLog {
    inner: Arc<Mutex<SerialLogInner>>,
}

#[derive(Debug, Default)]
struct SerialLogInner {
    frames: Vec<Vec<u8>>,
    flushes: usize,
    closed: bool,
}

impl SerialLog {
    /// Frames written so far, in order.
    pub fn frames(&self) -> Vec<Vec<u8>> {
        self.lock().frames.clone()
    }

    /// Number of `flush` calls, including the one made on drop.
    pub fn flushes(&self) -> usize {
        self.lock().flushes
    }

    /// Whether the sink has been dropped.
    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SerialLogInner> {
        // A poisoned log only means another test thread panicked mid-write.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// A [`SerialSink`] that records frames without touching hardware.
pub struct RecordingSerial {
    name: String,
    log: SerialLog,
    /// When `true`, every write fails with `TimedOut`.
    pub should_fail: bool,
}

impl RecordingSerial {
    /// Creates a sink that reports `name` as its device path.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            log: SerialLog::default(),
            should_fail: false,
        }
    }

    /// Returns a handle to the shared log.
    pub fn log(&self) -> SerialLog {
        self.log.clone()
    }
}

impl SerialSink for RecordingSerial {
    fn write_frame(&mut self, frame: &[u8]) -> std::io::Result<()> {
        if self.should_fail {
            return Err(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                "mock failure",
            ));
        }
        self.log.lock().frames.push(frame.to_vec());
        Ok(())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.log.lock().flushes += 1;
        Ok(())
    }

    fn port_name(&self) -> &str {
        &self.name
    }
}

impl Drop for RecordingSerial {
    fn drop(&mut self) {
        let mut log = self.log.lock();
        log.flushes += 1;
        log.closed = true;
    }
}
