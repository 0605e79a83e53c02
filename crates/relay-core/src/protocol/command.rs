//! Recognized command tokens carried in relay datagrams.
//!
//! A datagram payload is compared byte-for-byte against a fixed table of
//! tokens.  There is no framing, no length prefix, and no tolerance for case
//! differences or trailing whitespace: `sleep\n` is not `sleep`.
//!
//! # Match priority
//!
//! When a payload could match more than one entry (for example a host that is
//! literally named `kill`), the first entry in this order wins:
//!
//! | Priority | Payload                         | Command                    |
//! |----------|---------------------------------|----------------------------|
//! | 1        | `restart` or the local hostname | [`Command::Restart`]       |
//! | 2        | `kill`                          | [`Command::KillPlayer`]    |
//! | 3        | `projON` / `projOFF`            | [`Command::ProjectorOn`] / [`Command::ProjectorOff`] |
//! | 4        | `sleep` / `wake`                | [`Command::Sleep`] / [`Command::Wake`] |
//!
//! Everything else classifies as `None` and is dropped by the caller.

use std::fmt;

// ── Wire constants ────────────────────────────────────────────────────────────

/// UDP port the relay listens on unless configured otherwise.
pub const DEFAULT_PORT: u16 = 44444;

/// Largest datagram the relay accepts.  Longer datagrams are never a command.
pub const MAX_DATAGRAM_SIZE: usize = 64;

pub const RESTART_TOKEN: &[u8] = b"restart";
pub const KILL_TOKEN: &[u8] = b"kill";
pub const PROJECTOR_ON_TOKEN: &[u8] = b"projON";
pub const PROJECTOR_OFF_TOKEN: &[u8] = b"projOFF";
pub const SLEEP_TOKEN: &[u8] = b"sleep";
pub const WAKE_TOKEN: &[u8] = b"wake";

// ── Command ───────────────────────────────────────────────────────────────────

/// A logical command decoded from a datagram payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Reboot the host.  Triggered by `restart` or by the host's own name.
    Restart,
    /// Terminate the local player process family.
    KillPlayer,
    /// Switch the serial-attached projector on.
    ProjectorOn,
    /// Switch the serial-attached projector off.
    ProjectorOff,
    /// Put the display into standby.
    Sleep,
    /// Bring the display out of standby.
    Wake,
}

impl Command {
    /// Classifies a raw payload.
    ///
    /// `hostname` is the local machine name; a payload equal to its UTF-8
    /// bytes is treated as [`Command::Restart`].  An empty hostname never
    /// matches, so an empty datagram cannot reboot the machine.
    ///
    /// Returns `None` for any payload that is not an exact token.
    pub fn classify(payload: &[u8], hostname: &str) -> Option<Self> {
        if payload == RESTART_TOKEN || (!hostname.is_empty() && payload == hostname.as_bytes()) {
            return Some(Command::Restart);
        }

        match payload {
            KILL_TOKEN => Some(Command::KillPlayer),
            PROJECTOR_ON_TOKEN => Some(Command::ProjectorOn),
            PROJECTOR_OFF_TOKEN => Some(Command::ProjectorOff),
            SLEEP_TOKEN => Some(Command::Sleep),
            WAKE_TOKEN => Some(Command::Wake),
            _ => None,
        }
    }

    /// Returns the literal token for this command.
    ///
    /// [`Command::Restart`] always reports `restart`, even when it was
    /// triggered by the hostname.
    pub fn token(self) -> &'static [u8] {
        match self {
            Command::Restart => RESTART_TOKEN,
            Command::KillPlayer => KILL_TOKEN,
            Command::ProjectorOn => PROJECTOR_ON_TOKEN,
            Command::ProjectorOff => PROJECTOR_OFF_TOKEN,
            Command::Sleep => SLEEP_TOKEN,
            Command::Wake => WAKE_TOKEN,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Tokens are ASCII literals, so the lossy conversion never replaces anything.
        f.write_str(&String::from_utf8_lossy(self.token()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
