//! Compile-time settings shared by every pacer target

use crate::cadence::Cadence;

/// Serial console speed used by the firmware UART and echoed in logs.
pub const CONSOLE_BAUD_RATE: u32 = 115_200;

/// Explicit on/off blink: one level per second, two second period.
pub const BLINK_ON_OFF_CADENCE: Cadence = Cadence::from_millis(1000);
/// Toggle blink: the pin flips every half second.
pub const BLINK_TOGGLE_CADENCE: Cadence = Cadence::from_millis(500);

pub const WIFI_SCAN_CADENCE: Cadence = Cadence::from_millis(5000);
/// Upper bound on access points reported per scan.
pub const MAX_ACCESS_POINTS: usize = 32;
/// Longest SSID the 802.11 standard allows.
pub const MAX_SSID_LEN: usize = 32;

pub const RGB_CYCLE_CADENCE: Cadence = Cadence::from_millis(1000);
/// Global brightness applied to the pixel strip on setup (0-255).
pub const RGB_BRIGHTNESS: u8 = 30;

pub const HELLO_WORLD_CADENCE: Cadence = Cadence::from_millis(1000);
/// First value printed by the restart countdown.
pub const RESTART_COUNTDOWN_FROM: u8 = 10;
