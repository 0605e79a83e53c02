//! # relay-core
//!
//! Shared library for the LTC relay containing the command token table,
//! the device profile model, and the byte encodings written to serial-attached
//! displays and projectors.
//!
//! This crate has zero dependencies on OS APIs, sockets, or serial ports.
//! Everything in it is a pure function of its inputs, which keeps the wire
//! formats testable on any machine.
//!
//! # Architecture overview
//!
//! The relay listens for short UDP datagrams (`restart`, `sleep`, `wake`, ...)
//! and turns each one into either a host action (reboot, kill the player,
//! toggle display power) or a fixed byte string sent down a serial line.
//!
//! - **`protocol`** – What arrives on the wire and what leaves on the serial
//!   line: the recognized command tokens, the iiyama binary frame, and the
//!   ASCII commands for Sharp displays and Optoma-style projectors.
//!
//! - **`domain`** – The device profile chosen at startup and the mapping from
//!   a logical display action to the concrete output for that profile.

pub mod domain;
pub mod protocol;

pub use domain::device::{
    encode_display_action, DeviceOutput, DeviceProfile, DisplayAction, ProfileParseError,
};
pub use protocol::command::{Command, DEFAULT_PORT, MAX_DATAGRAM_SIZE};
