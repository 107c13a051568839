//! Blinks an LED
//!
//! The following wiring is assumed:
//! - LED => GPIO2
//!
//! `CONFIG_PACER_BLINK_TOGGLE` picks the 500 ms toggle style over the
//! 1000 ms on/off style.

#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
#![deny(clippy::large_stack_frames)]

use embassy_executor::Spawner;
use esp_hal::gpio::Flex;
use pacer_core::Runner;
use pacer_core::demos::{Blink, BlinkStyle};
use pacer_firmware::{board, config, gpio::FlexLed, system::EspReset};

// This creates a default app-descriptor required by the esp-idf bootloader.
// For more information see: <https://docs.espressif.com/projects/esp-idf/en/stable/esp32/api-reference/system/app_image_format.html#application-description>
esp_bootloader_esp_idf::esp_app_desc!();

#[esp_rtos::main]
async fn main(_spawner: Spawner) -> ! {
    let peripherals = board::init();
    board::start_rtos(peripherals.TIMG0);

    let style = if config::BLINK_TOGGLE {
        BlinkStyle::Toggle
    } else {
        BlinkStyle::OnOff
    };
    let led = FlexLed::new(Flex::new(peripherals.GPIO2));

    Runner::new(Blink::new(led, style), embassy_time::Delay, EspReset)
        .run()
        .await
}
