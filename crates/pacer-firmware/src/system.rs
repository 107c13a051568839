//! Reset, heap statistics and chip description for the ESP32-S3

use esp_alloc::MemoryCapability;
use log::debug;
use pacer_core::DriverError;
use pacer_core::SystemControl;
use pacer_core::peripherals::{ChipInfo, LowWaterMark, MemoryStats, NvsInitError, SystemServices};

use crate::config::FLASH_SIZE_MB;

/// Handle for resetting the chip. Holds no state, so the runner and any
/// early error path can each have one.
#[derive(Debug, Clone, Copy, Default)]
pub struct EspReset;

impl SystemControl for EspReset {
    fn restart(&mut self) -> ! {
        esp_hal::system::software_reset()
    }
}

/// Heap figures and board description. Create one per program and give it
/// to the driver that reports them.
pub struct EspSystem {
    heap_low: LowWaterMark,
}

impl EspSystem {
    pub fn new() -> Self {
        Self {
            heap_low: LowWaterMark::new(esp_alloc::HEAP.free()),
        }
    }
}

impl Default for EspSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStats for EspSystem {
    fn free_psram_bytes(&self) -> usize {
        esp_alloc::HEAP.free_caps(MemoryCapability::External.into())
    }

    fn min_free_heap_bytes(&self) -> usize {
        self.heap_low.observe(esp_alloc::HEAP.free())
    }
}

impl SystemServices for EspSystem {
    // The bare-metal runtime keeps no key-value partition, so there is
    // nothing to mount or recover.
    fn init_nvs(&mut self) -> Result<(), NvsInitError> {
        debug!("NVS: no partition in use on this runtime");
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
            flash_size_mb: FLASH_SIZE_MB,
        }
    }
}
