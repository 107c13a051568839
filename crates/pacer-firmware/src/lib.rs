//! ESP32-S3 firmware-specific modules for pacer
//!
//! This crate contains the hardware half of the board demos: chip bring-up,
//! the `esp-hal`/`esp-radio` adapters behind the `pacer-core` peripheral
//! traits, and the build-time configuration exported by `build.rs`. Every
//! binary under `src/bin` wires one demo driver to these adapters.

#![no_std]

pub mod board;
pub mod config;
pub mod console;
pub mod gpio;
pub mod system;
pub mod wifi;

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    rtt_target::rprintln!("PANIC: {}", info);
    esp_hal::system::software_reset()
}
