//! Binary command frames for iiyama displays.
//!
//! Frame layout (10 bytes, no padding):
//! ```text
//! [header:1][monitor_id:1][category:1][code0:1][code1:1][length:1][data_control:1][data0:1][data1:1][checksum:1]
//! ```
//!
//! `length` counts the bytes from `data_control` through `checksum`
//! inclusive, which is always 4 for the power frames used here.  The checksum
//! is the bitwise XOR of every preceding byte in the frame.
//!
//! The display never answers on the relay's wiring, so a wrong byte fails
//! silently on real hardware.  The two power frames are therefore also kept as
//! literal constants and the encoder is tested against them.

/// First byte of every frame.
pub const HEADER: u8 = 0xA6;

/// Monitor ID for a single display on a point-to-point RS-232 link.
pub const DEFAULT_MONITOR_ID: u8 = 0x01;

/// Data-control byte value used for "set" commands.
pub const DATA_CONTROL_SET: u8 = 0x01;

/// `data0` command code: set power state.
pub const CMD_POWER_STATE_SET: u8 = 0x18;

/// `data1` value for power state off (deep sleep).
pub const POWER_STATE_OFF: u8 = 0x01;

/// `data1` value for power state on.
pub const POWER_STATE_ON: u8 = 0x02;

/// Encoded frame size in bytes.
pub const FRAME_LEN: usize = 10;

/// Power-off frame, byte-for-byte.
pub const POWER_OFF_FRAME: [u8; FRAME_LEN] =
    [0xA6, 0x01, 0x00, 0x00, 0x00, 0x04, 0x01, 0x18, 0x01, 0xBB];

/// Power-on frame, byte-for-byte.
pub const POWER_ON_FRAME: [u8; FRAME_LEN] =
    [0xA6, 0x01, 0x00, 0x00, 0x00, 0x04, 0x01, 0x18, 0x02, 0xB8];

/// Returns the XOR of all bytes in `bytes`.
pub fn xor_checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0, |acc, b| acc ^ b)
}

/// A single iiyama command frame before encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SicpFrame {
    pub monitor_id: u8,
    pub category: u8,
    pub code0: u8,
    pub code1: u8,
    pub data_control: u8,
    pub data: [u8; 2],
}

impl SicpFrame {
    /// Builds the "set power state" frame for the default monitor.
    pub fn power(on: bool) -> Self {
        Self {
            monitor_id: DEFAULT_MONITOR_ID,
            category: 0x00,
            code0: 0x00,
            code1: 0x00,
            data_control: DATA_CONTROL_SET,
            data: [
                CMD_POWER_STATE_SET,
                if on { POWER_STATE_ON } else { POWER_STATE_OFF },
            ],
        }
    }

    /// Encodes the frame, appending the XOR checksum.
    pub fn encode(&self) -> [u8; FRAME_LEN] {
        // data_control + data0 + data1 + checksum
        let length = (1 + self.data.len() + 1) as u8;
        let mut out = [
            HEADER,
            self.monitor_id,
            self.category,
            self.code0,
            self.code1,
            length,
            self.data_control,
            self.data[0],
            self.data[1],
            0,
        ];
        let checksum = xor_checksum(&out[..FRAME_LEN - 1]);
        out[FRAME_LEN - 1] = checksum;
        out
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_off_frame_matches_documented_bytes() {
        // Arrange
        let frame = SicpFrame::power(false);

        // Act
        let bytes = frame.encode();

        // Assert
        assert_eq!(bytes, POWER_OFF_FRAME);
    }

    #[test]
    fn test_power_on_frame_matches_documented_bytes() {
        assert_eq!(SicpFrame::power(true).encode(), POWER_ON_FRAME);
    }

    #[test]
    fn test_documented_frames_carry_valid_checksums() {
        for frame in [POWER_OFF_FRAME, POWER_ON_FRAME] {
            assert_eq!(frame[9], xor_checksum(&frame[..9]));
        }
        assert_eq!(POWER_OFF_FRAME[9], 0xBB);
        assert_eq!(POWER_ON_FRAME[9], 0xB8);
    }

    #[test]
    fn test_xor_of_whole_valid_frame_is_zero() {
        // XOR-ing the checksum into its own input cancels out.
        assert_eq!(xor_checksum(&POWER_OFF_FRAME), 0);
        assert_eq!(xor_checksum(&POWER_ON_FRAME), 0);
    }

    #[test]
    fn test_xor_checksum_of_empty_slice_is_zero() {
        assert_eq!(xor_checksum(&[]), 0);
    }

    #[test]
    fn test_length_byte_counts_control_data_and_checksum() {
        let bytes = SicpFrame::power(true).encode();
        assert_eq!(bytes[5], 0x04);
    }

    #[test]
    fn test_checksum_tracks_monitor_id() {
        // Arrange
        let mut frame = SicpFrame::power(false);
        frame.monitor_id = 0x02;

        // Act
        let bytes = frame.encode();

        // Assert: only byte 1 changed, so the checksum flips by 0x01 ^ 0x02.
        assert_eq!(bytes[1], 0x02);
        assert_eq!(bytes[9], 0xBB ^ 0x01 ^ 0x02);
    }
}
