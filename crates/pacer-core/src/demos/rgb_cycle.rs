use core::fmt::Write;

use log::debug;
use smart_leds::RGB8;

use crate::cadence::Cadence;
use crate::config::{RGB_BRIGHTNESS, RGB_CYCLE_CADENCE};
use crate::driver::{DriverError, PeriodicDriver, Step};
use crate::peripherals::{MemoryStats, PixelStrip};

/// Colour shown by the cycle, advancing once per step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colour {
    Red,
    Green,
    Blue,
    White,
}

impl Colour {
    pub const fn rgb(self) -> RGB8 {
        match self {
            Self::Red => RGB8::new(255, 0, 0),
            Self::Green => RGB8::new(0, 255, 0),
            Self::Blue => RGB8::new(0, 0, 255),
            Self::White => RGB8::new(255, 255, 255),
        }
    }

    pub const fn next(self) -> Self {
        match self {
            Self::Red => Self::Green,
            Self::Green => Self::Blue,
            Self::Blue => Self::White,
            Self::White => Self::Red,
        }
    }
}

/// Cycles the first pixel of a strip through red, green, blue and white,
/// reporting free PSRAM after every change.
pub struct RgbCycle<S, M, C> {
    strip: S,
    memory: M,
    console: C,
    colour: Colour,
}

impl<S: PixelStrip, M: MemoryStats, C: Write> RgbCycle<S, M, C> {
    pub fn new(strip: S, memory: M, console: C) -> Self {
        Self {
            strip,
            memory,
            console,
            colour: Colour::Red,
        }
    }

    pub fn strip(&self) -> &S {
        &self.strip
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    /// Colour the next step will show.
    pub fn next_colour(&self) -> Colour {
        self.colour
    }
}

impl<S: PixelStrip, M: MemoryStats, C: Write> PeriodicDriver for RgbCycle<S, M, C> {
    fn name(&self) -> &'static str {
        "rgb-cycle"
    }

    fn cadence(&self) -> Cadence {
        RGB_CYCLE_CADENCE
    }

    async fn init(&mut self) -> Result<(), DriverError> {
        if self.strip.is_empty() {
            return Err(DriverError::peripheral("pixel strip", "find a pixel"));
        }
        self.strip.set_brightness(RGB_BRIGHTNESS);
        self.colour = Colour::Red;
        Ok(())
    }

    async fn step(&mut self) -> Result<Step, DriverError> {
        let colour = self.colour;
        self.strip.set_pixel(0, colour.rgb())?;
        self.strip.show()?;
        debug!("rgb-cycle: {:?}", colour);

        writeln!(
            self.console,
            "PSRAM free: {} bytes",
            self.memory.free_psram_bytes()
        )?;

        self.colour = colour.next();
        Ok(Step::Continue)
    }
}
