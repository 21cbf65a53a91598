//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and protocol
//! constants live here so they can be tuned in one place.
//! [`ControllerConfig`] bundles the values the controller consults at
//! run time so tests can shrink or stretch them freely.

use crate::Millis;

// Camera identity

/// Substring a peer's advertised name must contain to qualify.
pub const CAMERA_NAME_FILTER: &str = "ESP32-CAM-BLE";

/// 128-bit UUID of the camera control service.
pub const CAMERA_SERVICE_UUID: u128 = 0x4fafc201_1fb5_459e_8fcc_c5c9c331914b;

/// 128-bit UUID of the write-capable command characteristic.
pub const CAMERA_COMMAND_CHAR_UUID: u128 = 0xbeb5483e_36e1_4688_b7f5_ea07361b26a8;

// `#[gatt_client]` only accepts string literals, so `ble/camera_client.rs`
// repeats these two strings verbatim.  Change all three places together;
// the tests below keep the text and numeric forms in step.
pub const CAMERA_SERVICE_UUID_STR: &str = "4fafc201-1fb5-459e-8fcc-c5c9c331914b";
pub const CAMERA_COMMAND_CHAR_UUID_STR: &str = "beb5483e-36e1-4688-b7f5-ea07361b26a8";

/// Command payloads, written as raw bytes with no framing.
pub const CMD_START: &[u8] = b"START";
pub const CMD_STOP: &[u8] = b"STOP";

// Timing (all values in milliseconds)

/// How long a discovery cycle may run before giving up.
pub const DISCOVERY_TIMEOUT_MS: Millis = 10_000;

/// Minimum spacing between accepted button presses.
pub const BUTTON_DEBOUNCE_MS: Millis = 300;

/// Time the camera is given to stop recording before the "Saving" phase.
pub const STOP_SETTLE_MS: Millis = 500;

/// Time the camera is given to finalise the file.
pub const SAVE_DELAY_MS: Millis = 1_000;

/// Main loop period.
pub const TICK_INTERVAL_MS: Millis = 50;

/// How long the boot splash stays up before the controller starts.
pub const SPLASH_MS: Millis = 1_000;

// BLE

/// GAP device name the remote itself uses.
pub const BLE_DEVICE_NAME: &str = "Camera_Controller";

/// Upper bound on a connect attempt (in 10 ms units). 500 = 5 s.
pub const CONNECT_TIMEOUT_10MS: u16 = 500;

/// BLE connection interval range (in 1.25 ms units).
pub const BLE_CONN_INTERVAL_MIN: u16 = 24;
pub const BLE_CONN_INTERVAL_MAX: u16 = 40;

/// BLE slave latency (number of connection events the peripheral can skip).
pub const BLE_SLAVE_LATENCY: u16 = 0;

/// BLE supervision timeout (in 10 ms units). 400 = 4 s.
pub const BLE_SUP_TIMEOUT: u16 = 400;

// Display (SSD1306 128x64 over I²C)

pub const SCREEN_HEIGHT: u32 = 64;

/// Vertical distance between rendered text lines (pixels).
pub const LINE_PITCH_PX: i32 = 12;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   Record button  → P0.11 (active-low, internal pull-up)
//   I²C SDA        → P0.26
//   I²C SCL        → P0.27

/// Timing and identity knobs the controller reads at run time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControllerConfig {
    pub target_name: &'static str,
    pub discovery_timeout_ms: Millis,
    pub debounce_ms: Millis,
    pub settle_ms: Millis,
    pub save_ms: Millis,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            target_name: CAMERA_NAME_FILTER,
            discovery_timeout_ms: DISCOVERY_TIMEOUT_MS,
            debounce_ms: BUTTON_DEBOUNCE_MS,
            settle_ms: STOP_SETTLE_MS,
            save_ms: SAVE_DELAY_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_firmware_constants() {
        let cfg = ControllerConfig::default();
        assert_eq!(cfg.target_name, "ESP32-CAM-BLE");
        assert_eq!(cfg.discovery_timeout_ms, 10_000);
        assert_eq!(cfg.debounce_ms, 300);
        assert_eq!(cfg.settle_ms, 500);
        assert_eq!(cfg.save_ms, 1_000);
    }

    fn parse_uuid(text: &str) -> u128 {
        let groups: Vec<usize> = text.split('-').map(str::len).collect();
        assert_eq!(groups, [8, 4, 4, 4, 12], "malformed UUID {text}");
        u128::from_str_radix(&text.replace('-', ""), 16).unwrap()
    }

    #[test]
    fn uuid_strings_match_numeric_constants() {
        assert_eq!(parse_uuid(CAMERA_SERVICE_UUID_STR), CAMERA_SERVICE_UUID);
        assert_eq!(
            parse_uuid(CAMERA_COMMAND_CHAR_UUID_STR),
            CAMERA_COMMAND_CHAR_UUID
        );
    }

    #[test]
    fn gatt_client_literals_match_config() {
        let client = include_str!("ble/camera_client.rs");
        assert!(client.contains(&format!("uuid = \"{CAMERA_SERVICE_UUID_STR}\"")));
        assert!(client.contains(&format!("uuid = \"{CAMERA_COMMAND_CHAR_UUID_STR}\"")));
    }
}
