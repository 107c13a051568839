//! Hardware-independent core library for pacer
//!
//! This crate contains the platform-agnostic half of the pacer board demos:
//! the [`Cadence`](cadence::Cadence) type, the
//! [`PeriodicDriver`](driver::PeriodicDriver) trait and the
//! [`Runner`](runner::Runner) that drives it, the peripheral traits each demo
//! is written against, and the demos themselves.
//!
//! It is `#![no_std]` so it compiles on both embedded targets (ESP32-S3) and
//! desktop hosts (for the simulator and tests).

#![no_std]

#[cfg(test)]
extern crate std;

pub mod build_config;
pub mod cadence;
pub mod config;
pub mod demos;
pub mod driver;
pub mod peripherals;
pub mod runner;
pub mod strip;

#[cfg(test)]
mod testing;

pub use cadence::Cadence;
pub use driver::{DriverError, PeriodicDriver, Step};
pub use runner::{FatalAction, RunError, RunReport, Runner, SystemControl};
