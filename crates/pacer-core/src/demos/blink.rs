use log::{debug, error};

use crate::cadence::Cadence;
use crate::config::{BLINK_ON_OFF_CADENCE, BLINK_TOGGLE_CADENCE};
use crate::driver::{DriverError, PeriodicDriver, Step};
use crate::peripherals::{Direction, LedPin};

/// How the blink demo decides the next pin level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkStyle {
    /// Keep our own phase and write HIGH, LOW, HIGH, ...
    OnOff,
    /// Read the output latch back and invert it.
    Toggle,
}

impl BlinkStyle {
    pub const fn default_cadence(self) -> Cadence {
        match self {
            Self::OnOff => BLINK_ON_OFF_CADENCE,
            Self::Toggle => BLINK_TOGGLE_CADENCE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl Level {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Low => Self::High,
            Self::High => Self::Low,
        }
    }
}

/// Blinks one LED. The waveform period is twice the cadence.
pub struct Blink<P> {
    pin: P,
    style: BlinkStyle,
    cadence: Cadence,
    next: Level,
}

impl<P: LedPin> Blink<P> {
    pub fn new(pin: P, style: BlinkStyle) -> Self {
        Self {
            pin,
            style,
            cadence: style.default_cadence(),
            next: Level::High,
        }
    }

    pub fn with_cadence(mut self, cadence: Cadence) -> Self {
        self.cadence = cadence;
        self
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }

    pub fn style(&self) -> BlinkStyle {
        self.style
    }

    fn write(&mut self, level: Level) -> Result<(), DriverError> {
        let result = match level {
            Level::High => self.pin.set_high(),
            Level::Low => self.pin.set_low(),
        };
        result.map_err(|e| {
            error!("LED pin write {:?} failed: {:?}", level, e);
            DriverError::peripheral("LED pin", "drive level")
        })
    }
}

impl<P: LedPin> PeriodicDriver for Blink<P> {
    fn name(&self) -> &'static str {
        "blink"
    }

    fn cadence(&self) -> Cadence {
        self.cadence
    }

    async fn init(&mut self) -> Result<(), DriverError> {
        self.pin.set_direction(Direction::Output).map_err(|e| {
            error!("LED pin direction change failed: {:?}", e);
            DriverError::peripheral("LED pin", "switch to output")
        })?;
        self.write(Level::Low)?;
        self.next = Level::High;
        Ok(())
    }

    async fn step(&mut self) -> Result<Step, DriverError> {
        match self.style {
            BlinkStyle::OnOff => {
                let level = self.next;
                self.write(level)?;
                self.next = level.toggled();
                debug!("blink: {:?}", level);
            }
            BlinkStyle::Toggle => {
                self.pin.toggle().map_err(|e| {
                    error!("LED pin toggle failed: {:?}", e);
                    DriverError::peripheral("LED pin", "toggle")
                })?;
            }
        }
        Ok(Step::Continue)
    }
}
