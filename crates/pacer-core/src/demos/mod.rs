//! The board demos, each a [`PeriodicDriver`](crate::driver::PeriodicDriver)
//!
//! | Demo | Setup | Step | Cadence |
//! |------|-------|------|---------|
//! | [`Blink`] | pin to output, low | next level | 1000 ms / 500 ms |
//! | [`WifiScan`] | station mode, disconnect | scan and print | 5000 ms |
//! | [`RgbCycle`] | brightness 30 | next colour, print PSRAM free | 1000 ms |
//! | [`HelloWorld`] | NVS, chip banner | countdown, then restart | 1000 ms |

mod blink;
mod hello_world;
mod rgb_cycle;
mod wifi_scan;

pub use blink::*;
pub use hello_world::*;
pub use rgb_cycle::*;
pub use wifi_scan::*;
