//! Byte channel underneath the host link.
//!
//! On target this is UART1 (`adapters::uart`).  Tests script their own
//! in-memory channels, and [`NullTransport`] stands in when the sculpture
//! runs without a host attached.

/// Non-blocking byte pipe to the host.
pub trait Transport {
    type Error: core::fmt::Debug;

    /// Copy whatever is already buffered into `buf`, returning how many
    /// bytes arrived.  `Ok(0)` means nothing is pending; never blocks.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Queue `data` for sending and return how much was accepted.
    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error>;
}

/// No host: nothing ever arrives and everything sent is accepted.
pub struct NullTransport;

impl Transport for NullTransport {
    type Error = ();

    fn read(&mut self, _buf: &mut [u8]) -> Result<usize, ()> {
        Ok(0)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, ()> {
        Ok(data.len())
    }
}
