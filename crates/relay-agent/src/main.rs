//! LTC relay agent entry point.
//!
//! Loads configuration, opens the UDP socket and the serial port, then runs
//! the blocking relay loop on a dedicated thread until Ctrl-C, SIGTERM or a
//! receive failure.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ Cli::load_config()          -- TOML file + CLI/env overrides
//!  └─ UdpListener::bind()         -- fatal on failure
//!  └─ SerialPortSink::open()      -- fatal on failure (serial profiles only)
//!  └─ spawn_blocking(run_relay)   -- receive → dispatch → write, one at a time
//!       ├─ restart / <hostname>   -> HostActions::reboot
//!       ├─ kill                   -> HostActions::kill_player
//!       ├─ projON / projOFF       -> serial (proj profile only)
//!       └─ sleep / wake           -> serial or HostActions::set_display_power
//! ```
//!
//! # Usage
//!
//! ```text
//! relay-agent [OPTIONS]
//!
//! Options:
//!   --config <PATH>          Config file [env: RELAY_CONFIG]
//!   --profile <PROFILE>      illyama | sharp | proj | custom [env: RELAY_PROFILE]
//!   --serial-device <PATH>   Serial device path [env: RELAY_SERIAL_DEVICE]
//!   --port <PORT>            UDP port [env: RELAY_PORT]
//!   --print-config           Print the effective configuration and exit
//! ```
//!
//! # Startup failures
//!
//! A socket that cannot be bound or a serial port that cannot be opened
//! stops the agent with a non-zero exit code.

use std::path::PathBuf;
use std::sync::{atomic::AtomicBool, Arc};

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use relay_agent::application::dispatch::{DispatchSettings, Dispatcher, HostActions, SerialSink};
use relay_agent::application::run_relay::run_relay;
use relay_agent::infrastructure::{
    host_actions::NativeHostActions,
    hostname::resolve_hostname,
    network::UdpListener,
    serial::SerialPortSink,
    shutdown,
    storage::config::{load_config, load_config_from, render_config, AppConfig},
};
use relay_core::DeviceProfile;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// UDP remote-control relay for serial-attached displays and projectors.
#[derive(Debug, Parser)]
#[command(
    name = "relay-agent",
    about = "Relays UDP commands to a serial display/projector or the host OS",
    version
)]
struct Cli {
    /// Path to the TOML config file.  Defaults to the platform config dir.
    #[arg(long, env = "RELAY_CONFIG")]
    config: Option<PathBuf>,

    /// Device profile, overriding `relay.device_profile`.
    #[arg(long, env = "RELAY_PROFILE")]
    profile: Option<DeviceProfile>,

    /// Serial device path, overriding `serial.device`.
    #[arg(long, env = "RELAY_SERIAL_DEVICE")]
    serial_device: Option<String>,

    /// UDP port, overriding `network.port`.
    #[arg(long, env = "RELAY_PORT")]
    port: Option<u16>,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    print_config: bool,
}

impl Cli {
    /// Loads the config file and applies command-line overrides on top.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    fn load_config(&self) -> anyhow::Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => load_config_from(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => load_config().context("failed to load config")?,
        };

        if let Some(profile) = self.profile {
            config.relay.device_profile = profile;
        }
        if let Some(device) = &self.serial_device {
            config.serial.device = device.clone();
        }
        if let Some(port) = self.port {
            config.network.port = port;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;

    if cli.print_config {
        print!("{}", render_config(&config)?);
        return Ok(());
    }

    // Initialise structured logging.  `RUST_LOG` wins over the config file.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&config.relay.log_level))
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("LTC relay agent starting");

    let profile = config.relay.device_profile;
    let hostname = resolve_hostname(config.relay.hostname.as_deref());
    if hostname.is_empty() {
        warn!("could not determine hostname; reboot-by-name is disabled");
    } else {
        info!("my name is {hostname}");
    }
    info!("device profile is {profile}");

    // ── UDP listener ──────────────────────────────────────────────────────────
    let mut listener = UdpListener::bind(config.network.listen_addr())
        .context("failed to start UDP listener")?;

    // ── Serial port ───────────────────────────────────────────────────────────
    let serial: Option<Box<dyn SerialSink>> = if profile.uses_serial() {
        let port = SerialPortSink::open(&config.serial.device, config.serial.baud_rate)
            .context("failed to open serial port")?;
        Some(Box::new(port))
    } else {
        info!("profile {profile} does not use a serial port");
        None
    };

    // ── Dispatcher ────────────────────────────────────────────────────────────
    let host: Arc<dyn HostActions> = Arc::new(NativeHostActions::new(&config.relay.player_process));
    let mut dispatcher = Dispatcher::new(DispatchSettings { profile, hostname }, host, serial);

    // ── Shutdown signals (Ctrl-C, SIGTERM) ────────────────────────────────────
    let running = Arc::new(AtomicBool::new(true));
    shutdown::watch(Arc::clone(&running)).context("failed to install signal handlers")?;

    // ── Relay loop ────────────────────────────────────────────────────────────
    info!("LTC relay agent ready.  Press Ctrl-C to exit.");

    let loop_running = Arc::clone(&running);
    let result = tokio::task::spawn_blocking(move || {
        let result = run_relay(&mut listener, &mut dispatcher, &loop_running);
        // Close the serial port (flushing it) and the socket before reporting.
        drop(dispatcher);
        drop(listener);
        result
    })
    .await
    .context("relay thread panicked")?;

    let stats = result.context("relay loop failed")?;
    info!(
        "LTC relay agent stopped after {} datagrams",
        stats.received
    );
    Ok(())
}
