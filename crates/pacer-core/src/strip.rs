//! [`PixelStrip`] on top of any `smart-leds` writer
//!
//! Keeps a frame buffer of `N` pixels and the global brightness, and pushes
//! the scaled frame out through [`SmartLedsWrite`] on every
//! [`PixelStrip::show`].

use log::error;
use smart_leds::{RGB8, SmartLedsWrite, brightness};

use crate::driver::DriverError;
use crate::peripherals::PixelStrip;

pub struct SmartLedStrip<W, const N: usize> {
    writer: W,
    pixels: [RGB8; N],
    brightness: u8,
}

impl<W, const N: usize> SmartLedStrip<W, N>
where
    W: SmartLedsWrite<Color = RGB8>,
    W::Error: core::fmt::Debug,
{
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pixels: [RGB8::default(); N],
            brightness: u8::MAX,
        }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn pixels(&self) -> &[RGB8; N] {
        &self.pixels
    }
}

impl<W, const N: usize> PixelStrip for SmartLedStrip<W, N>
where
    W: SmartLedsWrite<Color = RGB8>,
    W::Error: core::fmt::Debug,
{
    fn len(&self) -> usize {
        N
    }

    fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    fn set_pixel(&mut self, index: usize, color: RGB8) -> Result<(), DriverError> {
        let pixel = self.pixels.get_mut(index).ok_or_else(|| {
            error!("pixel {} out of range for a strip of {}", index, N);
            DriverError::peripheral("pixel strip", "address pixel")
        })?;
        *pixel = color;
        Ok(())
    }

    fn show(&mut self) -> Result<(), DriverError> {
        self.writer
            .write(brightness(self.pixels.iter().copied(), self.brightness))
            .map_err(|e| {
                error!("pixel strip write failed: {:?}", e);
                DriverError::peripheral("pixel strip", "write frame")
            })
    }
}
