//! Chip bring-up shared by every binary
//!
//! Order matters: logging first so later steps can report, then clocks and
//! peripherals, then the heap (internal RAM and PSRAM), then the scheduler.

use esp_hal::clock::CpuClock;
use esp_hal::peripherals::{Peripherals, TIMG0};
use esp_hal::timer::timg::TimerGroup;
use log::info;
use pacer_core::config::CONSOLE_BAUD_RATE;

/// Initialise logging, clocks and the heap, and hand the peripherals back.
pub fn init() -> Peripherals {
    rtt_target::rtt_init_log!();

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    esp_alloc::heap_allocator!(#[esp_hal::ram(reclaimed)] size: 73744);
    esp_alloc::psram_allocator!(peripherals.PSRAM, esp_hal::psram);

    info!(
        "Board initialized, console at {} baud, {} bytes heap free",
        CONSOLE_BAUD_RATE,
        esp_alloc::HEAP.free()
    );

    peripherals
}

/// Start the esp-rtos scheduler on TIMG0 so `embassy-time` has a tick.
pub fn start_rtos(timg0: TIMG0<'static>) {
    let timg0 = TimerGroup::new(timg0);
    esp_rtos::start(timg0.timer0);
    info!("Embassy initialized!");
}
