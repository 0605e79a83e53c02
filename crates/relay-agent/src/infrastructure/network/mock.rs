//! Scripted datagram source for tests.
//!
//! Replaces the UDP socket with a fixed sequence of steps so the run loop
//! can be driven deterministically.  Once the script is exhausted the source
//! clears the shared `running` flag, which stops the loop cleanly.
//!
//! ```ignore
//! let running = Arc::new(AtomicBool::new(true));
//! let mut source = ScriptedSource::new(Arc::clone(&running))
//!     .datagram(b"sleep")
//!     .idle()
//!     .datagram(b"wake");
//! run_relay(&mut source, &mut dispatcher, &running)?;
//! ```

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::application::run_relay::{Datagram, DatagramSource};

/// One scripted receive result.
#[derive(Debug)]
pub enum ScriptStep {
    /// A datagram arrives.
    Datagram(Datagram),
    /// The poll interval elapses with no traffic.
    Idle,
    /// The transport fails with this error kind.
    Fail(std::io::ErrorKind),
}

/// A [`DatagramSource`] that replays a script.
pub struct ScriptedSource {
    steps: VecDeque<ScriptStep>,
    sender: SocketAddr,
    running: Arc<AtomicBool>,
}

impl ScriptedSource {
    /// Creates an empty script.  Datagrams appear to come from
    /// `192.168.1.10:50000`.
    pub fn new(running: Arc<AtomicBool>) -> Self {
        Self {
            steps: VecDeque::new(),
            sender: SocketAddr::from(([192, 168, 1, 10], 50000)),
            running,
        }
    }

    /// Appends a datagram carrying `payload`.
    pub fn datagram(mut self, payload: &[u8]) -> Self {
        self.steps.push_back(ScriptStep::Datagram(Datagram {
            payload: payload.to_vec(),
            sender: self.sender,
        }));
        self
    }

    /// Appends an empty poll.
    pub fn idle(mut self) -> Self {
        self.steps.push_back(ScriptStep::Idle);
        self
    }

    /// Appends a transport failure.
    pub fn fail(mut self, kind: std::io::ErrorKind) -> Self {
        self.steps.push_back(ScriptStep::Fail(kind));
        self
    }

    /// Steps not yet replayed.
    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

impl DatagramSource for ScriptedSource {
    fn recv(&mut self) -> std::io::Result<Option<Datagram>> {
        match self.steps.pop_front() {
            Some(ScriptStep::Datagram(d)) => Ok(Some(d)),
            Some(ScriptStep::Idle) => Ok(None),
            Some(ScriptStep::Fail(kind)) => Err(std::io::Error::new(kind, "scripted failure")),
            None => {
                self.running.store(false, Ordering::Relaxed);
                Ok(None)
            }
        }
    }
}
