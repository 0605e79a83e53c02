//! ASCII command encodings for Sharp displays and Optoma-style projectors.
//!
//! Sharp displays take eight characters (a four-letter command followed by a
//! four-character parameter) terminated by CR LF:
//! ```text
//! POWR0001\r\n   -> power on
//! POWR0000\r\n   -> power off
//! ```
//!
//! Optoma-style projectors take `~`, a two-digit projector ID, a two-digit
//! command code, a space, the value, and a bare CR:
//! ```text
//! ~0000 1\r      -> projector 00, command 00 (power), value 1
//! ```

use std::fmt::Write as _;

/// Sharp power command name.
pub const SHARP_POWER: [u8; 4] = *b"POWR";

/// Optoma command code for power.
pub const OPTOMA_POWER: u8 = 0;

/// Projector ID that every projector answers to.
pub const OPTOMA_ALL_PROJECTORS: u8 = 0;

/// A Sharp RS-232 command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharpCommand {
    pub command: [u8; 4],
    pub parameter: u16,
}

impl SharpCommand {
    /// Encodes the command.  The parameter is zero-padded to four digits.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(10);
        out.extend_from_slice(&self.command);
        out.extend_from_slice(format!("{:04}", self.parameter).as_bytes());
        out.extend_from_slice(b"\r\n");
        out
    }
}

/// An Optoma-style projector command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptomaCommand {
    pub projector_id: u8,
    pub command: u8,
    pub value: u8,
}

impl OptomaCommand {
    /// Encodes the command with a trailing carriage return only.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = String::with_capacity(8);
        // Writing into a String cannot fail.
        let _ = write!(
            out,
            "~{:02}{:02} {}\r",
            self.projector_id, self.command, self.value
        );
        out.into_bytes()
    }
}

/// Sharp power on/off.
pub fn sharp_power(on: bool) -> Vec<u8> {
    SharpCommand {
        command: SHARP_POWER,
        parameter: u16::from(on),
    }
    .encode()
}

/// Projector power on/off, addressed to all projectors.
pub fn projector_power(on: bool) -> Vec<u8> {
    OptomaCommand {
        projector_id: OPTOMA_ALL_PROJECTORS,
        command: OPTOMA_POWER,
        value: u8::from(on),
    }
    .encode()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
