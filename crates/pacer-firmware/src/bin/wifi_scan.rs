//! Scans for Wi-Fi access points every five seconds and prints them on UART0

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
use pacer_core::Runner;
use pacer_core::SystemControl;
use pacer_core::demos::WifiScan;
use pacer_firmware::{board, console, system::EspReset, wifi::RadioScanner};
use static_cell::StaticCell;

esp_bootloader_esp_idf::esp_app_desc!();

#[allow(
    clippy::large_stack_frames,
    reason = "it's not unusual to allocate larger buffers etc. in main"
)]
#[esp_rtos::main]
async fn main(_spawner: Spawner) -> ! {
    let peripherals = board::init();
    board::start_rtos(peripherals.TIMG0);
    let mut reset = EspReset;

    static RADIO: StaticCell<esp_radio::Controller<'static>> = StaticCell::new();
    let radio = match esp_radio::init() {
        Ok(radio) => RADIO.init(radio),
        Err(e) => {
            error!("Failed to initialize Wi-Fi/BLE controller: {:?}", e);
            reset.restart();
        }
    };
    let controller = match esp_radio::wifi::new(radio, peripherals.WIFI, Default::default()) {
        Ok((controller, _interfaces)) => controller,
        Err(e) => {
            error!("Failed to initialize Wi-Fi controller: {:?}", e);
            reset.restart();
        }
    };

    let console = match console::uart0(peripherals.UART0, peripherals.GPIO43, peripherals.GPIO44) {
        Ok(console) => console,
        Err(e) => {
            error!("{}", e);
            reset.restart();
        }
    };

    let scan = WifiScan::new(RadioScanner::new(controller), console);
    Runner::new(scan, embassy_time::Delay, reset).run().await
}
