//! Peripheral seams the demos are written against
//!
//! Each trait describes the handful of operations a demo needs from its
//! hardware. The firmware implements them on top of `esp-hal`/`esp-radio`,
//! the simulator on top of `std`, and the unit tests with in-memory mocks.

use core::cell::Cell;
use core::future::Future;

use embedded_hal::digital::StatefulOutputPin;
use heapless::{String, Vec};
use smart_leds::RGB8;

use crate::config::{MAX_ACCESS_POINTS, MAX_SSID_LEN};
use crate::driver::DriverError;

/// Configured direction of a GPIO pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
}

/// A GPIO pin whose direction can be configured at runtime and whose output
/// latch can be read back.
pub trait LedPin: StatefulOutputPin {
    fn set_direction(&mut self, direction: Direction) -> Result<(), Self::Error>;

    fn direction(&self) -> Direction;
}

/// Authentication scheme advertised by an access point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Open,
    Wep,
    Wpa,
    Wpa2,
    WpaWpa2,
    Wpa2Enterprise,
    Wpa3,
    Wpa2Wpa3,
    Wapi,
    Unknown,
}

impl AuthMode {
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Wep => "WEP",
            Self::Wpa => "WPA",
            Self::Wpa2 => "WPA2",
            Self::WpaWpa2 => "WPA/WPA2",
            Self::Wpa2Enterprise => "WPA2-Enterprise",
            Self::Wpa3 => "WPA3",
            Self::Wpa2Wpa3 => "WPA2/WPA3",
            Self::Wapi => "WAPI",
            Self::Unknown => "unknown",
        }
    }
}

/// One entry of a Wi-Fi scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPoint {
    pub ssid: String<MAX_SSID_LEN>,
    /// Received signal strength in dBm.
    pub rssi: i8,
    pub channel: u8,
    pub auth: AuthMode,
}

impl AccessPoint {
    /// Build an entry, truncating the SSID at a character boundary if the
    /// radio reports more than [`MAX_SSID_LEN`] bytes.
    pub fn new(ssid: &str, rssi: i8, channel: u8, auth: AuthMode) -> Self {
        let mut name = String::new();
        for ch in ssid.chars() {
            if name.push(ch).is_err() {
                break;
            }
        }
        Self {
            ssid: name,
            rssi,
            channel,
            auth,
        }
    }
}

pub type ScanResults = Vec<AccessPoint, MAX_ACCESS_POINTS>;

/// Add `ap` to `results`. When the buffer is full the weakest of the stored
/// entries and `ap` is discarded, so the buffer always holds the strongest
/// access points seen so far.
///
/// Returns `false` when an entry had to be discarded.
pub fn push_strongest(results: &mut ScanResults, ap: AccessPoint) -> bool {
    let Err(ap) = results.push(ap) else {
        return true;
    };
    let weakest = results
        .iter()
        .enumerate()
        .min_by_key(|(_, stored)| stored.rssi)
        .map(|(index, _)| index);
    if let Some(index) = weakest
        && results[index].rssi < ap.rssi
    {
        results[index] = ap;
    }
    false
}

/// A Wi-Fi radio that can run station-mode scans.
pub trait WifiScanner {
    /// Put the radio in station mode and start it.
    fn start_station(&mut self) -> impl Future<Output = Result<(), DriverError>>;

    /// Drop any association left over from a previous boot.
    fn disconnect(&mut self) -> impl Future<Output = Result<(), DriverError>>;

    /// Run one blocking scan and add the results to `into`, keeping the
    /// strongest when there are more than fit (see [`push_strongest`]).
    ///
    /// Returns how many access points were left out.
    fn scan(
        &mut self,
        into: &mut ScanResults,
    ) -> impl Future<Output = Result<usize, DriverError>>;
}

/// An addressable RGB pixel strip (WS2812 / NeoPixel style).
///
/// Pixel writes are buffered until [`PixelStrip::show`]. Brightness is
/// applied by the implementation when the buffer is pushed out.
pub trait PixelStrip {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn set_brightness(&mut self, brightness: u8);

    fn set_pixel(&mut self, index: usize, color: RGB8) -> Result<(), DriverError>;

    fn show(&mut self) -> Result<(), DriverError>;
}

/// Heap figures exposed by the allocator.
pub trait MemoryStats {
    /// Free bytes in the external PSRAM region, zero when none is mapped.
    fn free_psram_bytes(&self) -> usize;

    /// Lowest free heap figure seen since boot.
    fn min_free_heap_bytes(&self) -> usize;
}

/// Lowest value ever observed of a free-memory figure.
///
/// Allocators that only report the current free size are sampled through
/// this; every reading goes through one instance so no dip is missed.
#[derive(Debug)]
pub struct LowWaterMark {
    low: Cell<usize>,
}

impl LowWaterMark {
    pub const fn new(initial: usize) -> Self {
        Self {
            low: Cell::new(initial),
        }
    }

    /// Record a reading and return the lowest value so far.
    pub fn observe(&self, free: usize) -> usize {
        let low = self.low.get().min(free);
        self.low.set(low);
        low
    }

    pub fn get(&self) -> usize {
        self.low.get()
    }
}

/// Static description of the chip the program runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipInfo {
    pub model: &'static str,
    pub cores: u8,
    pub wifi: bool,
    pub bluetooth_le: bool,
    pub flash_size_mb: u32,
}

/// Outcome of an NVS initialisation attempt that did not succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NvsInitError {
    /// The partition is full and has to be erased before use.
    NoFreePages,
    /// The partition was written by a newer format version.
    NewVersionFound,
    /// Anything else: not recoverable.
    Failed,
}

/// Board-level services used by the hello-world demo.
pub trait SystemServices: MemoryStats {
    fn init_nvs(&mut self) -> Result<(), NvsInitError>;

    fn erase_nvs(&mut self) -> Result<(), DriverError>;

    fn chip_info(&self) -> ChipInfo;
}
