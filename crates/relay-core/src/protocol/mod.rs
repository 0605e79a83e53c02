//! Protocol module containing the inbound command tokens and the outbound
//! vendor encodings.

pub mod ascii;
pub mod command;
pub mod sicp;

pub use ascii::{projector_power, sharp_power, OptomaCommand, SharpCommand};
pub use command::Command;
pub use sicp::{xor_checksum, SicpFrame, POWER_OFF_FRAME, POWER_ON_FRAME};
