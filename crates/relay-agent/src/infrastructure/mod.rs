//! Infrastructure layer for the relay agent.
//!
//! Contains OS-facing adapters.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `relay_core`, but MUST NOT be imported by the `application` layer.
//!
//! # Sub-modules
//!
//! - **`network`** – Blocking UDP listener implementing `DatagramSource`,
//!   plus a scripted source for tests.
//! - **`serial`** – `SerialSink` backed by the `serialport` crate, plus a
//!   recording sink for tests.
//! - **`host_actions`** – OS-specific `HostActions` selected at compile time,
//!   plus a recording mock.
//! - **`hostname`** – Resolves the name used by the reboot-by-hostname token.
//! - **`shutdown`** – Ctrl-C / SIGTERM handling that clears the run flag.
//! - **`storage`** – TOML configuration.

pub mod host_actions;
pub mod hostname;
pub mod network;
pub mod serial;
pub mod shutdown;
pub mod storage;
