//! The relay run loop: receive one datagram, dispatch it, repeat.
//!
//! The loop is strictly sequential.  A serial write for one datagram
//! completes (or fails) before the next datagram is read, so a stalled device
//! stalls the loop.  There is no retry anywhere.
//!
//! # Cancellation
//!
//! The loop checks a shared `running` flag between receives.  Transports
//! return `Ok(None)` when their poll interval elapses without traffic, which
//! gives the loop a chance to notice the flag even on a silent network.
//!
//! # Exit paths
//!
//! | Cause                        | Result                        |
//! |------------------------------|-------------------------------|
//! | `running` cleared            | `Ok(RelayStats)`              |
//! | transport receive failure    | `Err(RelayError::Receive)`    |
//!
//! On both paths the dispatcher's serial sink is flushed before returning.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tracing::{error, info};

use crate::application::dispatch::{DispatchOutcome, Dispatcher};

/// Error type for the run loop.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The transport failed while waiting for a datagram.
    #[error("receive failed: {0}")]
    Receive(#[source] std::io::Error),
}

/// One received datagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Datagram {
    pub payload: Vec<u8>,
    pub sender: SocketAddr,
}

/// A source of datagrams.
///
/// Implemented by the UDP listener in production and by scripted sources in
/// tests.
pub trait DatagramSource {
    /// Blocks for at most one poll interval.
    ///
    /// Returns `Ok(Some(..))` for a datagram, `Ok(None)` when nothing arrived
    /// in time, and `Err` when the transport is broken.
    fn recv(&mut self) -> std::io::Result<Option<Datagram>>;
}

/// Counters reported when the loop stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelayStats {
    /// Datagrams read from the transport.
    pub received: u64,
    /// Datagrams that matched a command and produced an effect.
    pub handled: u64,
    /// Datagrams that matched no command or did not apply to the profile.
    pub ignored: u64,
    /// Commands whose action or write failed.
    pub failed: u64,
}

impl RelayStats {
    fn record(&mut self, outcome: &DispatchOutcome) {
        match outcome {
            DispatchOutcome::Ignored | DispatchOutcome::NotApplicable(_) => self.ignored += 1,
            DispatchOutcome::Failed(_) => self.failed += 1,
            _ => self.handled += 1,
        }
    }
}

/// Runs the relay until `running` is cleared or the transport fails.
///
/// # Errors
///
/// Returns [`RelayError::Receive`] if the transport reports an error; the
/// loop does not retry.
pub fn run_relay(
    source: &mut dyn DatagramSource,
    dispatcher: &mut Dispatcher,
    running: &AtomicBool,
) -> Result<RelayStats, RelayError> {
    let mut stats = RelayStats::default();

    let result = loop {
        if !running.load(Ordering::Relaxed) {
            break Ok(stats);
        }

        match source.recv() {
            Ok(Some(datagram)) => {
                stats.received += 1;
                let outcome = dispatcher.dispatch(&datagram.payload, datagram.sender);
                stats.record(&outcome);
            }
            Ok(None) => continue,
            Err(e) => {
                error!("error while listening for commands: {e}");
                break Err(RelayError::Receive(e));
            }
        }
    };

    dispatcher.flush();
    info!(
        "relay loop stopped: {} received, {} handled, {} ignored, {} failed",
        stats.received, stats.handled, stats.ignored, stats.failed
    );
    result
}

// ── Tests ─────────────────────────────────────────────────────────────────────
