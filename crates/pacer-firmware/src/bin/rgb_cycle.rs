//! Cycles the on-board addressable RGB LED through red, green, blue and white
//!
//! The following wiring is assumed (ESP32-S3-DevKitC-1):
//! - WS2812 data => GPIO48

#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
#![deny(clippy::large_stack_frames)]

use embassy_executor::Spawner;
use esp_hal::rmt::Rmt;
use esp_hal::time::Rate;
use esp_hal_smartled::{SmartLedsAdapter, smart_led_buffer};
use log::error;
use pacer_core::demos::RgbCycle;
use pacer_core::strip::SmartLedStrip;
use pacer_core::{Runner, SystemControl};
use pacer_firmware::system::{EspReset, EspSystem};
use pacer_firmware::{board, console};

esp_bootloader_esp_idf::esp_app_desc!();

const PIXELS: usize = 1;

#[esp_rtos::main]
async fn main(_spawner: Spawner) -> ! {
    let peripherals = board::init();
    board::start_rtos(peripherals.TIMG0);
    let mut reset = EspReset;

    let rmt = match Rmt::new(peripherals.RMT, Rate::from_mhz(80)) {
        Ok(rmt) => rmt,
        Err(e) => {
            error!("Failed to initialize RMT: {:?}", e);
            reset.restart();
        }
    };
    let mut rmt_buffer = smart_led_buffer!(PIXELS);
    let adapter = SmartLedsAdapter::new(rmt.channel0, peripherals.GPIO48, &mut rmt_buffer);
    let strip: SmartLedStrip<_, PIXELS> = SmartLedStrip::new(adapter);

    let console = match console::uart0(peripherals.UART0, peripherals.GPIO43, peripherals.GPIO44) {
        Ok(console) => console,
        Err(e) => {
            error!("{}", e);
            reset.restart();
        }
    };

    let cycle = RgbCycle::new(strip, EspSystem::new(), console);
    Runner::new(cycle, embassy_time::Delay, reset).run().await
}
