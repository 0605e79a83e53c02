//! Application layer use cases for the relay agent.
//!
//! - **`dispatch`** – Classifies a received payload and carries out the
//!   matching effect through the injected [`dispatch::HostActions`] and
//!   [`dispatch::SerialSink`] ports.
//!
//! - **`run_relay`** – The receive/dispatch loop over any
//!   [`run_relay::DatagramSource`], stoppable through a shared flag.

pub mod dispatch;
pub mod run_relay;
