//! Domain entities for the relay.
//!
//! Pure configuration-driven logic with no infrastructure dependencies: the
//! device profile selected at startup and what a logical display action means
//! for that profile.

/// Device profiles and the display action encoder.
pub mod device;
