//! GPIO pin whose direction the demo sets itself
//!
//! `esp_hal::gpio::Output` is an output from construction; the blink demo
//! wants to configure the direction during setup like the SDK sketches do,
//! so it gets a [`Flex`] pin and the direction is tracked here.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin, StatefulOutputPin};
use esp_hal::gpio::{Flex, OutputConfig};
use pacer_core::peripherals::{Direction, LedPin};

pub struct FlexLed<'d> {
    pin: Flex<'d>,
    direction: Direction,
}

impl<'d> FlexLed<'d> {
    /// Wrap a pin; it starts as an input until setup switches it.
    pub fn new(mut pin: Flex<'d>) -> Self {
        pin.set_output_enable(false);
        pin.set_input_enable(true);
        Self {
            pin,
            direction: Direction::Input,
        }
    }
}

impl ErrorType for FlexLed<'_> {
    type Error = Infallible;
}

impl OutputPin for FlexLed<'_> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.pin.set_low();
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.pin.set_high();
        Ok(())
    }
}

impl StatefulOutputPin for FlexLed<'_> {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.pin.is_set_high())
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.pin.is_set_low())
    }
}

impl LedPin for FlexLed<'_> {
    fn set_direction(&mut self, direction: Direction) -> Result<(), Self::Error> {
        match direction {
            Direction::Output => {
                self.pin.apply_output_config(&OutputConfig::default());
                self.pin.set_input_enable(false);
                self.pin.set_output_enable(true);
            }
            Direction::Input => {
                self.pin.set_output_enable(false);
                self.pin.set_input_enable(true);
            }
        }
        self.direction = direction;
        Ok(())
    }

    fn direction(&self) -> Direction {
        self.direction
    }
}
