//! relay-agent library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does the agent do?
//!
//! The agent runs on the machine that drives a display or projector.  It:
//!
//! 1. Binds a broadcast-enabled UDP socket (port 44444 by default).
//! 2. Opens the serial port the display or projector is attached to.
//! 3. Reads one datagram at a time and hands it to the dispatcher, which
//!    either writes a vendor command to the serial port or runs a host
//!    action (reboot, kill the player, display power).
//!
//! No reply is ever sent to the datagram's sender.

/// Application layer: dispatch and the run loop.
pub mod application;

/// Infrastructure layer: sockets, serial port, OS commands, configuration.
pub mod infrastructure;
