//! Refuses to build unless `CONFIG_PACER_SECONDARY_LEVEL` is 4
//!
//! The value comes from `sdkconfig.defaults` (or the build environment)
//! through `build.rs`. Once built, the program only reports the value.

#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
#![deny(clippy::large_stack_frames)]

use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};
use log::info;
use pacer_firmware::{board, config};

pacer_core::assert_config_value!(env!("CONFIG_PACER_SECONDARY_LEVEL"), 4);

esp_bootloader_esp_idf::esp_app_desc!();

#[esp_rtos::main]
async fn main(_spawner: Spawner) -> ! {
    let peripherals = board::init();
    board::start_rtos(peripherals.TIMG0);

    loop {
        info!("CONFIG_PACER_SECONDARY_LEVEL = {} (checked at build time)", config::SECONDARY_LEVEL);
        Timer::after(Duration::from_secs(1)).await;
    }
}
