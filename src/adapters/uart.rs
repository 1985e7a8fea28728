//! UART transport for the host link.

use esp_idf_hal::delay::NON_BLOCK;
use esp_idf_hal::uart::UartDriver;
use esp_idf_sys::EspError;

use crate::link::transport::Transport;

/// Non-blocking byte channel over an ESP-IDF UART driver.
pub struct UartTransport {
    uart: UartDriver<'static>,
}

impl UartTransport {
    pub fn new(uart: UartDriver<'static>) -> Self {
        Self { uart }
    }
}

impl Transport for UartTransport {
    type Error = EspError;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, EspError> {
        self.uart.read(buf, NON_BLOCK)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, EspError> {
        self.uart.write(data)
    }
}
