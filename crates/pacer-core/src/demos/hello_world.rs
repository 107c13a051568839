use core::fmt::Write;

use log::{error, warn};

use crate::cadence::Cadence;
use crate::config::{HELLO_WORLD_CADENCE, RESTART_COUNTDOWN_FROM};
use crate::driver::{DriverError, PeriodicDriver, Step};
use crate::peripherals::{ChipInfo, NvsInitError, SystemServices};

/// Greets, describes the chip, counts down and asks for a restart.
pub struct HelloWorld<B, C> {
    board: B,
    console: C,
    countdown: Option<u8>,
}

impl<B: SystemServices, C: Write> HelloWorld<B, C> {
    pub fn new(board: B, console: C) -> Self {
        Self {
            board,
            console,
            countdown: Some(RESTART_COUNTDOWN_FROM),
        }
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn console(&self) -> &C {
        &self.console
    }
}

impl<B: SystemServices, C: Write> PeriodicDriver for HelloWorld<B, C> {
    fn name(&self) -> &'static str {
        "hello-world"
    }

    fn cadence(&self) -> Cadence {
        HELLO_WORLD_CADENCE
    }

    async fn init(&mut self) -> Result<(), DriverError> {
        init_nvs(&mut self.board)?;

        writeln!(self.console, "Hello world!")?;
        write_chip_banner(&mut self.console, &self.board.chip_info())?;
        writeln!(
            self.console,
            "Minimum free heap size: {} bytes",
            self.board.min_free_heap_bytes()
        )?;

        self.countdown = Some(RESTART_COUNTDOWN_FROM);
        Ok(())
    }

    async fn step(&mut self) -> Result<Step, DriverError> {
        match self.countdown {
            Some(seconds) => {
                writeln!(self.console, "Restarting in {} seconds...", seconds)?;
                self.countdown = seconds.checked_sub(1);
                Ok(Step::Continue)
            }
            None => {
                writeln!(self.console, "Restarting now.")?;
                Ok(Step::Restart)
            }
        }
    }
}

/// Bring NVS up, erasing it once if it is full or from a newer format.
pub fn init_nvs<B: SystemServices>(board: &mut B) -> Result<(), DriverError> {
    match board.init_nvs() {
        Ok(()) => Ok(()),
        Err(reason @ (NvsInitError::NoFreePages | NvsInitError::NewVersionFound)) => {
            warn!("NVS unusable ({:?}), erasing", reason);
            board.erase_nvs()?;
            board.init_nvs().map_err(|e| {
                error!("NVS init after erase failed: {:?}", e);
                DriverError::peripheral("NVS", "initialise after erase")
            })
        }
        Err(e) => {
            error!("NVS init failed: {:?}", e);
            Err(DriverError::peripheral("NVS", "initialise"))
        }
    }
}

/// `This is esp32s3 chip with 2 CPU core(s), WiFi/BLE, 8MB flash`
pub fn write_chip_banner<C: Write>(console: &mut C, chip: &ChipInfo) -> Result<(), DriverError> {
    write!(
        console,
        "This is {} chip with {} CPU core(s), ",
        chip.model, chip.cores
    )?;
    match (chip.wifi, chip.bluetooth_le) {
        (true, true) => console.write_str("WiFi/BLE")?,
        (true, false) => console.write_str("WiFi")?,
        (false, true) => console.write_str("BLE")?,
        (false, false) => console.write_str("no radio")?,
    }
    writeln!(console, ", {}MB flash", chip.flash_size_mb)?;
    Ok(())
}
