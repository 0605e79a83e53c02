//! Storage infrastructure: configuration file loading.
//!
//! The `config` sub-module reads the TOML configuration file from the
//! platform-appropriate directory (or an explicit path) and supplies defaults
//! for everything the file leaves out.

pub mod config;
