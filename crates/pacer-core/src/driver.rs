//! The periodic driver contract and its error type

use core::future::Future;

use thiserror_no_std::Error;

use crate::cadence::Cadence;

/// Errors a driver can surface to its [`Runner`](crate::runner::Runner).
///
/// None of these are recovered from in-program. The runner logs them and
/// restarts (or halts) the device.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverError {
    #[error("{peripheral} failed to {operation}")]
    Peripheral {
        peripheral: &'static str,
        operation: &'static str,
    },
    #[error("console write failed")]
    Console,
    #[error("cadence must be non-zero and representable in microseconds")]
    InvalidCadence,
    #[error("invalid configuration value for {key}")]
    Config { key: &'static str },
}

impl DriverError {
    pub const fn peripheral(peripheral: &'static str, operation: &'static str) -> Self {
        Self::Peripheral {
            peripheral,
            operation,
        }
    }
}

impl From<core::fmt::Error> for DriverError {
    fn from(_: core::fmt::Error) -> Self {
        Self::Console
    }
}

/// What the runner should do after a successful step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Sleep for one cadence and step again.
    Continue,
    /// Reboot the device now.
    Restart,
}

/// A demo that owns one peripheral and advances it at a fixed cadence.
///
/// `init` runs exactly once, before the first `step`. Each `step` performs a
/// single unit of work and returns; the pacing delay is the runner's job.
pub trait PeriodicDriver {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    /// Delay between two steps.
    fn cadence(&self) -> Cadence;

    /// Set the owned peripheral up.
    fn init(&mut self) -> impl Future<Output = Result<(), DriverError>>;

    /// Perform one step of the demo.
    fn step(&mut self) -> impl Future<Output = Result<Step, DriverError>>;
}
