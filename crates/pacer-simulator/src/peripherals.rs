//! Simulated peripherals backed by `std`

use std::convert::Infallible;
use std::io::Write as _;
use std::time::{Duration, Instant};

use embedded_hal::digital::{ErrorType, OutputPin, StatefulOutputPin};
use embedded_hal_async::delay::DelayNs;
use log::info;
use smart_leds::{RGB8, SmartLedsWrite};

use pacer_core::DriverError;
use pacer_core::SystemControl;
use pacer_core::peripherals::{
    AccessPoint, AuthMode, ChipInfo, Direction, LedPin, MemoryStats, NvsInitError, ScanResults,
    SystemServices, WifiScanner, push_strongest,
};

/// Sleeps on the calling thread, or only pretends to when `fast` is set.
pub struct StdDelay {
    pub fast: bool,
}

impl StdDelay {
    fn sleep(&self, duration: Duration) {
        if !self.fast {
            std::thread::sleep(duration);
        }
    }
}

impl DelayNs for StdDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.sleep(Duration::from_nanos(u64::from(ns)));
    }

    async fn delay_us(&mut self, us: u32) {
        self.sleep(Duration::from_micros(u64::from(us)));
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.sleep(Duration::from_millis(u64::from(ms)));
    }
}

/// The serial console: stdout.
pub struct StdoutConsole;

impl core::fmt::Write for StdoutConsole {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let mut out = std::io::stdout().lock();
        out.write_all(s.as_bytes())
            .and_then(|_| out.flush())
            .map_err(|_| core::fmt::Error)
    }
}

/// There is no chip to reset; a restart ends the process.
pub struct SimSystem;

impl SystemControl for SimSystem {
    fn restart(&mut self) -> ! {
        info!("Device restart requested, exiting simulator");
        std::process::exit(0)
    }

    fn halt(&mut self) -> ! {
        info!("Device halted, exiting simulator");
        std::process::exit(1)
    }
}

/// A GPIO pin that logs its level changes with the time since start.
pub struct SimPin {
    label: &'static str,
    started: Instant,
    direction: Direction,
    high: bool,
}

impl SimPin {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            started: Instant::now(),
            direction: Direction::Input,
            high: false,
        }
    }

    fn drive(&mut self, high: bool) {
        self.high = high;
        if self.direction == Direction::Output {
            info!(
                "[{:>8.3}s] {} -> {}",
                self.started.elapsed().as_secs_f64(),
                self.label,
                if high { "HIGH" } else { "LOW" }
            );
        }
    }
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(true);
        Ok(())
    }
}

impl StatefulOutputPin for SimPin {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.high)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.high)
    }
}

impl LedPin for SimPin {
    fn set_direction(&mut self, direction: Direction) -> Result<(), Self::Error> {
        info!("{} configured as {:?}", self.label, direction);
        self.direction = direction;
        Ok(())
    }

    fn direction(&self) -> Direction {
        self.direction
    }
}

/// (SSID, base RSSI, channel, auth)
const MOCK_NETWORKS: &[(&str, i8, u8, AuthMode)] = &[
    ("pacer-lab", -42, 1, AuthMode::Wpa2),
    ("coffee-shop", -71, 6, AuthMode::Open),
    ("neighbour-5G", -83, 11, AuthMode::Wpa2Wpa3),
    ("printer-setup", -64, 6, AuthMode::Open),
    ("warehouse", -77, 3, AuthMode::Wpa3),
];

/// A radio that "sees" a fixed set of networks whose signal drifts slowly.
#[derive(Default)]
pub struct SimWifi {
    scans: u32,
}

impl WifiScanner for SimWifi {
    async fn start_station(&mut self) -> Result<(), DriverError> {
        info!("Wi-Fi: station mode");
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<(), DriverError> {
        info!("Wi-Fi: disconnected");
        Ok(())
    }

    async fn scan(&mut self, into: &mut ScanResults) -> Result<usize, DriverError> {
        self.scans += 1;
        let t = f64::from(self.scans);
        let mut dropped = 0;
        for (i, &(ssid, rssi, channel, auth)) in MOCK_NETWORKS.iter().enumerate() {
            // Every third scan the weakest network drops out of range.
            if i == 2 && self.scans % 3 == 0 {
                continue;
            }
            let drift = (6.0 * (t / 3.0 + i as f64).sin()) as i8;
            let ap = AccessPoint::new(ssid, rssi.saturating_add(drift), channel, auth);
            if !push_strongest(into, ap) {
                dropped += 1;
            }
        }
        Ok(dropped)
    }
}

/// A `smart-leds` writer that paints each frame as coloured blocks on stderr.
pub struct TerminalLeds;

impl SmartLedsWrite for TerminalLeds {
    type Error = std::io::Error;
    type Color = RGB8;

    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        let mut err = std::io::stderr().lock();
        for pixel in iterator {
            let RGB8 { r, g, b } = pixel.into();
            write!(err, "\x1b[48;2;{r};{g};{b}m    \x1b[0m ")?;
        }
        writeln!(err)?;
        err.flush()
    }
}

/// Board description and heap figures for a pretend ESP32-S3 with 8 MB PSRAM.
pub struct SimBoard;

impl SimBoard {
    const PSRAM_SIZE: usize = 8 * 1024 * 1024;
}

impl MemoryStats for SimBoard {
    fn free_psram_bytes(&self) -> usize {
        Self::PSRAM_SIZE
    }

    fn min_free_heap_bytes(&self) -> usize {
        73_744
    }
}

impl SystemServices for SimBoard {
    fn init_nvs(&mut self) -> Result<(), NvsInitError> {
        info!("NVS: simulated partition ready");
        Ok(())
    }

    fn erase_nvs(&mut self) -> Result<(), DriverError> {
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
