//! Human-readable output on the serial console

use esp_hal::Blocking;
use esp_hal::peripherals::{GPIO43, GPIO44, UART0};
use esp_hal::uart::{Config as UartConfig, Uart};
use log::error;
use pacer_core::DriverError;
use pacer_core::config::CONSOLE_BAUD_RATE;

/// Adapts any `embedded-io` writer to `core::fmt::Write`, which is what the
/// demos print through.
pub struct SerialConsole<W> {
    writer: W,
}

impl<W: embedded_io::Write> SerialConsole<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: embedded_io::Write> core::fmt::Write for SerialConsole<W> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.writer.write_all(s.as_bytes()).map_err(|e| {
            error!("console write failed: {:?}", e);
            core::fmt::Error
        })
    }
}

pub type Uart0Console = SerialConsole<Uart<'static, Blocking>>;

/// UART0 on the USB-serial bridge pins of the DevKitC boards.
pub fn uart0(
    uart: UART0<'static>,
    tx: GPIO43<'static>,
    rx: GPIO44<'static>,
) -> Result<Uart0Console, DriverError> {
    let uart = Uart::new(uart, UartConfig::default().with_baudrate(CONSOLE_BAUD_RATE))
        .map_err(|e| {
            error!("UART0 configuration failed: {:?}", e);
            DriverError::peripheral("UART0", "configure")
        })?
        .with_tx(tx)
        .with_rx(rx);
    Ok(SerialConsole::new(uart))
}
