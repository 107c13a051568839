//! In-memory peripherals on a virtual clock, for unit tests

use core::cell::Cell;
use std::collections::VecDeque;
use std::vec::Vec;

use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin, StatefulOutputPin};
use embedded_hal_async::delay::DelayNs;
use smart_leds::RGB8;

use crate::driver::DriverError;
use crate::peripherals::{
    AccessPoint, ChipInfo, Direction, LedPin, MemoryStats, NvsInitError, PixelStrip, ScanResults,
    SystemServices, WifiScanner, push_strongest,
};
use crate::runner::SystemControl;

/// Monotonic microsecond counter advanced only by [`MockDelay`].
pub struct VirtualClock {
    now: Cell<u64>,
    sleeps: Cell<u32>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self {
            now: Cell::new(0),
            sleeps: Cell::new(0),
        }
    }

    pub fn now_micros(&self) -> u64 {
        self.now.get()
    }

    /// Number of delay calls made so far.
    pub fn sleeps(&self) -> u32 {
        self.sleeps.get()
    }

    fn advance(&self, micros: u64) {
        self.now.set(self.now.get() + micros);
    }
}

pub struct MockDelay<'a> {
    clock: &'a VirtualClock,
}

impl<'a> MockDelay<'a> {
    pub fn new(clock: &'a VirtualClock) -> Self {
        Self { clock }
    }
}

impl DelayNs for MockDelay<'_> {
    async fn delay_ns(&mut self, ns: u32) {
        self.clock.sleeps.set(self.clock.sleeps.get() + 1);
        self.clock.advance(u64::from(ns) / 1000);
    }

    async fn delay_us(&mut self, us: u32) {
        self.clock.sleeps.set(self.clock.sleeps.get() + 1);
        self.clock.advance(u64::from(us));
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.clock.sleeps.set(self.clock.sleeps.get() + 1);
        self.clock.advance(u64::from(ms) * 1000);
    }
}

#[derive(Debug, Default)]
pub struct MockSystem;

impl SystemControl for MockSystem {
    fn restart(&mut self) -> ! {
        panic!("restart requested");
    }

    fn halt(&mut self) -> ! {
        panic!("halt requested");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockPinError;

impl embedded_hal::digital::Error for MockPinError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// A GPIO pin that records every level change with its timestamp.
pub struct MockPin<'a> {
    clock: &'a VirtualClock,
    direction: Direction,
    high: bool,
    pub edges: Vec<(u64, bool)>,
    pub fail_writes: bool,
}

impl<'a> MockPin<'a> {
    pub fn new(clock: &'a VirtualClock) -> Self {
        Self {
            clock,
            direction: Direction::Input,
            high: false,
            edges: Vec::new(),
            fail_writes: false,
        }
    }

    pub fn is_high(&self) -> bool {
        self.high
    }

    fn write(&mut self, high: bool) -> Result<(), MockPinError> {
        if self.fail_writes {
            return Err(MockPinError);
        }
        if self.direction != Direction::Output {
            // Writes to an input only touch the latch, nothing is driven.
            self.high = high;
            return Ok(());
        }
        if self.high != high || self.edges.is_empty() {
            self.edges.push((self.clock.now_micros(), high));
        }
        self.high = high;
        Ok(())
    }
}

impl ErrorType for MockPin<'_> {
    type Error = MockPinError;
}

impl OutputPin for MockPin<'_> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true)
    }
}

impl StatefulOutputPin for MockPin<'_> {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.high)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.high)
    }
}

impl LedPin for MockPin<'_> {
    fn set_direction(&mut self, direction: Direction) -> Result<(), Self::Error> {
        self.direction = direction;
        Ok(())
    }

    fn direction(&self) -> Direction {
        self.direction
    }
}

/// Radio that replays scripted scan results, one batch per scan.
#[derive(Default)]
pub struct MockWifi {
    pub batches: VecDeque<Vec<AccessPoint>>,
    pub station_started: bool,
    pub disconnects: u32,
    pub scans: u32,
    pub fail_scan: bool,
}

impl WifiScanner for MockWifi {
    async fn start_station(&mut self) -> Result<(), DriverError> {
        self.station_started = true;
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<(), DriverError> {
        self.disconnects += 1;
        Ok(())
    }

    async fn scan(&mut self, into: &mut ScanResults) -> Result<usize, DriverError> {
        if self.fail_scan {
            return Err(DriverError::peripheral("mock wifi", "scan"));
        }
        self.scans += 1;
        let mut dropped = 0;
        for ap in self.batches.pop_front().unwrap_or_default() {
            if !push_strongest(into, ap) {
                dropped += 1;
            }
        }
        Ok(dropped)
    }
}

/// Pixel strip that records each `show` as (timestamp, pixel 0 colour).
pub struct MockStrip<'a> {
    clock: &'a VirtualClock,
    pixels: Vec<RGB8>,
    pub brightness: u8,
    pub shown: Vec<(u64, RGB8)>,
}

impl<'a> MockStrip<'a> {
    pub fn new(clock: &'a VirtualClock, len: usize) -> Self {
        Self {
            clock,
            pixels: std::vec![RGB8::default(); len],
            brightness: 255,
            shown: Vec::new(),
        }
    }
}

impl PixelStrip for MockStrip<'_> {
    fn len(&self) -> usize {
        self.pixels.len()
    }

    fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    fn set_pixel(&mut self, index: usize, color: RGB8) -> Result<(), DriverError> {
        let pixel = self
            .pixels
            .get_mut(index)
            .ok_or(DriverError::peripheral("mock strip", "address pixel"))?;
        *pixel = color;
        Ok(())
    }

    fn show(&mut self) -> Result<(), DriverError> {
        let first = self.pixels.first().copied().unwrap_or_default();
        self.shown.push((self.clock.now_micros(), first));
        Ok(())
    }
}

/// Board services with scripted NVS behaviour.
pub struct MockBoard {
    pub nvs_results: VecDeque<Result<(), NvsInitError>>,
    pub erases: u32,
    pub psram_free: usize,
}

impl MockBoard {
    pub fn new() -> Self {
        Self {
            nvs_results: VecDeque::new(),
            erases: 0,
            psram_free: 2 * 1024 * 1024,
        }
    }
}

impl MemoryStats for MockBoard {
    fn free_psram_bytes(&self) -> usize {
        self.psram_free
    }

    fn min_free_heap_bytes(&self) -> usize {
        300_000
    }
}

impl SystemServices for MockBoard {
    fn init_nvs(&mut self) -> Result<(), NvsInitError> {
        self.nvs_results.pop_front().unwrap_or(Ok(()))
    }

    fn erase_nvs(&mut self) -> Result<(), DriverError> {
        self.erases += 1;
        Ok(())
    }

    fn chip_info(&self) -> ChipInfo {
        ChipInfo {
            model: "esp32s3",
            cores: 2,
            wifi: true,
            bluetooth_le: true,
            flash_size_mb: 8,
        }
    }
}
