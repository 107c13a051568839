//! Prints a greeting and the chip description, counts down and restarts

#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
#![deny(clippy::large_stack_frames)]

use embassy_executor::Spawner;
use log::error;
use pacer_core::demos::HelloWorld;
use pacer_core::{Runner, SystemControl};
use pacer_firmware::system::{EspReset, EspSystem};
use pacer_firmware::{board, console};

esp_bootloader_esp_idf::esp_app_desc!();

#[esp_rtos::main]
async fn main(_spawner: Spawner) -> ! {
    let peripherals = board::init();
    board::start_rtos(peripherals.TIMG0);
    let mut reset = EspReset;

    let console = match console::uart0(peripherals.UART0, peripherals.GPIO43, peripherals.GPIO44) {
        Ok(console) => console,
        Err(e) => {
            error!("{}", e);
            reset.restart();
        }
    };

    let hello = HelloWorld::new(EspSystem::new(), console);
    Runner::new(hello, embassy_time::Delay, reset).run().await
}
