//! Integration tests for the relay-core public API.
//!
//! These tests walk each recognized payload through classification and the
//! profile encoder, the same path the agent's dispatcher takes, and check the
//! exact bytes that would reach the serial line.

use relay_core::{
    encode_display_action,
    protocol::{projector_power, xor_checksum, POWER_OFF_FRAME, POWER_ON_FRAME},
    Command, DeviceOutput, DeviceProfile, DisplayAction, MAX_DATAGRAM_SIZE,
};

fn display_action(cmd: Command) -> DisplayAction {
    match cmd {
        Command::Sleep => DisplayAction::Sleep,
        Command::Wake => DisplayAction::Wake,
        other => panic!("{other} is not a display action"),
    }
}

fn serial_bytes(payload: &[u8], profile: DeviceProfile) -> Vec<u8> {
    let cmd = Command::classify(payload, "relay-host").expect("payload must classify");
    match encode_display_action(profile, display_action(cmd)) {
        DeviceOutput::Serial(bytes) => bytes,
        other => panic!("expected a serial write, got {other:?}"),
    }
}

#[test]
fn test_iiyama_sleep_payload_to_frame() {
    let bytes = serial_bytes(b"sleep", DeviceProfile::Iiyama);
    assert_eq!(bytes, [0xA6u8, 0x01, 0x00, 0x00, 0x00, 0x04, 0x01, 0x18, 0x01, 0xBB]);
    assert_eq!(bytes[9], xor_checksum(&bytes[..9]));
}

#[test]
fn test_iiyama_wake_payload_to_frame() {
    let bytes = serial_bytes(b"wake", DeviceProfile::Iiyama);
    assert_eq!(bytes, [0xA6u8, 0x01, 0x00, 0x00, 0x00, 0x04, 0x01, 0x18, 0x02, 0xB8]);
    assert_eq!(bytes[9], xor_checksum(&bytes[..9]));
}

#[test]
fn test_exported_frames_match_encoder() {
    assert_eq!(serial_bytes(b"sleep", DeviceProfile::Iiyama), POWER_OFF_FRAME);
    assert_eq!(serial_bytes(b"wake", DeviceProfile::Iiyama), POWER_ON_FRAME);
}

#[test]
fn test_sharp_payloads_to_ascii() {
    assert_eq!(serial_bytes(b"sleep", DeviceProfile::Sharp), b"POWR0000\r\n");
    assert_eq!(serial_bytes(b"wake", DeviceProfile::Sharp), b"POWR0001\r\n");
}

#[test]
fn test_projector_payloads_classify_and_encode() {
    assert_eq!(
        Command::classify(b"projON", "relay-host"),
        Some(Command::ProjectorOn)
    );
    assert_eq!(
        Command::classify(b"projOFF", "relay-host"),
        Some(Command::ProjectorOff)
    );
    assert_eq!(projector_power(true), b"~0000 1\r");
    assert_eq!(projector_power(false), b"~0000 0\r");
}

#[test]
fn test_encoding_is_stateless() {
    let first = serial_bytes(b"sleep", DeviceProfile::Sharp);
    let second = serial_bytes(b"sleep", DeviceProfile::Sharp);
    assert_eq!(first, second);
}

#[test]
fn test_every_token_fits_in_one_datagram() {
    for token in [
        "restart", "kill", "projON", "projOFF", "sleep", "wake",
    ] {
        assert!(token.len() <= MAX_DATAGRAM_SIZE);
    }
}
