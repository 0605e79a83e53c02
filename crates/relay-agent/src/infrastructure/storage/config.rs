//! TOML-based configuration for the relay agent.
//!
//! Reads `AppConfig` from the platform-appropriate config file:
//! - Windows:  `%APPDATA%\ltc-relay\config.toml`
//! - Linux:    `~/.config/ltc-relay/config.toml`
//! - macOS:    `~/Library/Application Support/ltc-relay/config.toml`
//!
//! ```toml
//! [relay]
//! device_profile = "illyama"
//! log_level = "info"
//! player_process = "ltcPlayer"
//!
//! [network]
//! bind_address = "0.0.0.0"
//! port = 44444
//!
//! [serial]
//! device = "/dev/ttyAMA0"
//! baud_rate = 9600
//! ```
//!
//! Every field has a serde default, so a missing file, an empty file, or a
//! file with only some sections all produce a usable configuration.  A file
//! that exists but cannot be read or parsed is an error.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use relay_core::{DeviceProfile, DEFAULT_PORT};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infrastructure::serial::{default_device, DEFAULT_BAUD_RATE};

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level agent configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub relay: RelayConfig,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub serial: SerialConfig,
}

/// Dispatch behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelayConfig {
    /// Which vendor command set `sleep` / `wake` use.
    #[serde(default)]
    pub device_profile: DeviceProfile,
    /// `tracing` level used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Pattern matched by `kill` (passed to `pkill -f` on Linux).
    #[serde(default = "default_player_process")]
    pub player_process: String,
    /// Overrides the detected hostname for the reboot-by-name token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
}

/// Listener settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkConfig {
    /// IP address to bind.  `0.0.0.0` listens on every interface.
    #[serde(default = "default_bind_address")]
    pub bind_address: IpAddr,
    /// UDP port for command datagrams.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Serial line settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SerialConfig {
    /// Device path (`COM2`, `/dev/ttyAMA0`, `/dev/ttyUSB0`, ...).
    #[serde(default = "default_serial_device")]
    pub device: String,
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
}

impl NetworkConfig {
    /// The socket address to bind.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_player_process() -> String {
    "ltcPlayer".to_string()
}
fn default_bind_address() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_serial_device() -> String {
    default_device().to_string()
}
fn default_baud_rate() -> u32 {
    DEFAULT_BAUD_RATE
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            device_profile: DeviceProfile::default(),
            log_level: default_log_level(),
            player_process: default_player_process(),
            hostname: None,
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            device: default_serial_device(),
            baud_rate: default_baud_rate(),
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the default config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads `AppConfig` from the default location, returning defaults if the
/// platform has no config directory or the file does not exist.
///
/// # Errors
///
/// See [`load_config_from`].
pub fn load_config() -> Result<AppConfig, ConfigError> {
    match config_file_path() {
        Ok(path) => load_config_from(&path),
        Err(ConfigError::NoPlatformConfigDir) => Ok(AppConfig::default()),
        Err(e) => Err(e),
    }
}

/// Loads `AppConfig` from `path`, returning `AppConfig::default()` if the
/// file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Parses TOML text into an `AppConfig`.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] if the TOML is malformed or a value has
/// the wrong type (for example an unknown device profile).
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Renders `config` as pretty TOML.
///
/// # Errors
///
/// Returns [`ConfigError::Serialize`] if serialization fails.
pub fn render_config(config: &AppConfig) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(config)?)
}

/// Resolves the platform config base directory including the `ltc-relay`
/// subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        // %APPDATA% e.g. C:\Users\<user>\AppData\Roaming
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("ltc-relay"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("ltc-relay"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("ltc-relay")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
