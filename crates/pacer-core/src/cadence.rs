//! Fixed interval between two driver steps

use core::num::NonZeroU64;

use crate::driver::DriverError;

/// The fixed delay a [`Runner`](crate::runner::Runner) waits between two
/// calls to [`PeriodicDriver::step`](crate::driver::PeriodicDriver::step).
///
/// Stored in microseconds and never zero. The `const` constructors reject a
/// zero interval at compile time when used in a `const` item:
///
/// ```
/// use pacer_core::Cadence;
///
/// const BLINK: Cadence = Cadence::from_millis(1000);
/// assert_eq!(BLINK.as_millis(), 1000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cadence {
    micros: NonZeroU64,
}

impl Cadence {
    /// Create a cadence from milliseconds. Panics (at compile time in const
    /// context) if `millis` is zero or overflows.
    pub const fn from_millis(millis: u64) -> Self {
        match Self::checked_from_micros(millis.saturating_mul(1000)) {
            Some(cadence) if millis <= u64::MAX / 1000 => cadence,
            _ => panic!("cadence must be a non-zero number of milliseconds"),
        }
    }

    /// Create a cadence from microseconds. Panics (at compile time in const
    /// context) if `micros` is zero.
    pub const fn from_micros(micros: u64) -> Self {
        match Self::checked_from_micros(micros) {
            Some(cadence) => cadence,
            None => panic!("cadence must be a non-zero number of microseconds"),
        }
    }

    /// Non-panicking constructor, `None` for zero.
    pub const fn checked_from_micros(micros: u64) -> Option<Self> {
        match NonZeroU64::new(micros) {
            Some(micros) => Some(Self { micros }),
            None => None,
        }
    }

    /// Runtime constructor for values that come from configuration.
    pub fn try_from_millis(millis: u64) -> Result<Self, DriverError> {
        millis
            .checked_mul(1000)
            .and_then(Self::checked_from_micros)
            .ok_or(DriverError::InvalidCadence)
    }

    pub const fn as_micros(self) -> u64 {
        self.micros.get()
    }

    /// Whole milliseconds, rounded down.
    pub const fn as_millis(self) -> u64 {
        self.micros.get() / 1000
    }

    /// Length of one full waveform period when the driver alternates between
    /// two states once per step.
    pub const fn square_wave_period_micros(self) -> u64 {
        self.micros.get().saturating_mul(2)
    }
}

impl core::fmt::Display for Cadence {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let micros = self.as_micros();
        if micros % 1000 == 0 {
            write!(f, "{} ms", micros / 1000)
        } else {
            write!(f, "{} us", micros)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::format;

    #[test]
    fn test_millis_and_micros_agree() {
        assert_eq!(Cadence::from_millis(5), Cadence::from_micros(5000));
        assert_eq!(Cadence::from_millis(1000).as_micros(), 1_000_000);
    }

    #[test]
    fn test_zero_is_rejected_at_runtime() {
        assert_eq!(Cadence::try_from_millis(0), Err(DriverError::InvalidCadence));
        assert!(Cadence::checked_from_micros(0).is_none());
        assert_eq!(Cadence::try_from_millis(u64::MAX), Err(DriverError::InvalidCadence));
    }

    #[test]
    #[should_panic]
    fn test_zero_panics_in_const_constructor() {
        let _ = Cadence::from_millis(core::hint::black_box(0));
    }

    #[test]
    fn test_square_wave_period_is_twice_the_cadence() {
        assert_eq!(Cadence::from_millis(1000).square_wave_period_micros(), 2_000_000);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Cadence::from_millis(500)), "500 ms");
        assert_eq!(format!("{}", Cadence::from_micros(250)), "250 us");
    }
}
