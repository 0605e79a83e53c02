//! Device profiles and the display action encoder.
//!
//! The device profile is chosen once at startup.  It decides what a logical
//! `sleep` or `wake` means for the hardware attached to this host:
//!
//! | Profile   | `sleep`                         | `wake`                          |
//! |-----------|---------------------------------|---------------------------------|
//! | `illyama` | iiyama power-off frame (serial) | iiyama power-on frame (serial)  |
//! | `sharp`   | `POWR0000\r\n` (serial)         | `POWR0001\r\n` (serial)         |
//! | `proj`    | unsupported                     | unsupported                     |
//! | `custom`  | host display power off          | host display power on           |
//!
//! The `proj` profile only reacts to `projON` / `projOFF`, which the
//! dispatcher handles before reaching this encoder.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::protocol::{ascii, sicp::SicpFrame};

/// Error returned when a profile name is not recognized.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown device profile {0:?} (expected one of: illyama, sharp, proj, custom)")]
pub struct ProfileParseError(pub String);

/// The hardware family the relay drives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceProfile {
    /// iiyama displays, binary frames with an XOR checksum.
    #[default]
    #[serde(rename = "illyama", alias = "iiyama")]
    Iiyama,
    /// Sharp displays, `POWRxxxx` ASCII commands.
    #[serde(rename = "sharp")]
    Sharp,
    /// Optoma-style projectors, `~0000 n` ASCII commands.
    #[serde(rename = "proj")]
    Projector,
    /// No serial device; display power goes through a host command.
    #[serde(rename = "custom")]
    Custom,
}

impl DeviceProfile {
    /// Canonical configuration name.
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceProfile::Iiyama => "illyama",
            DeviceProfile::Sharp => "sharp",
            DeviceProfile::Projector => "proj",
            DeviceProfile::Custom => "custom",
        }
    }

    /// Whether this profile ever writes to the serial port.
    pub fn uses_serial(self) -> bool {
        !matches!(self, DeviceProfile::Custom)
    }
}

impl fmt::Display for DeviceProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceProfile {
    type Err = ProfileParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "illyama" | "iiyama" => Ok(DeviceProfile::Iiyama),
            "sharp" => Ok(DeviceProfile::Sharp),
            "proj" => Ok(DeviceProfile::Projector),
            "custom" => Ok(DeviceProfile::Custom),
            other => Err(ProfileParseError(other.to_string())),
        }
    }
}

/// A logical display power action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayAction {
    Sleep,
    Wake,
}

impl DisplayAction {
    /// `true` when the action turns the display on.
    pub fn is_power_on(self) -> bool {
        matches!(self, DisplayAction::Wake)
    }
}

/// What the relay has to do to carry out a display action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceOutput {
    /// Write these bytes to the serial port.
    Serial(Vec<u8>),
    /// Ask the host to switch its own display output on (`true`) or off.
    DisplayPower(bool),
    /// The profile has no encoding for this action.
    Unsupported,
}

/// Maps a display action to the concrete output for `profile`.
pub fn encode_display_action(profile: DeviceProfile, action: DisplayAction) -> DeviceOutput {
    let on = action.is_power_on();
    match profile {
        DeviceProfile::Iiyama => DeviceOutput::Serial(SicpFrame::power(on).encode().to_vec()),
        DeviceProfile::Sharp => DeviceOutput::Serial(ascii::sharp_power(on)),
        DeviceProfile::Custom => DeviceOutput::DisplayPower(on),
        DeviceProfile::Projector => DeviceOutput::Unsupported,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
