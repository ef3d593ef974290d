//! Raw bus transport interface.

use thiserror::Error;

/// Errors surfaced by a bus transport implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BusError {
    /// The underlying write failed.
    #[error("bus write failed: {0}")]
    Write(String),

    /// The underlying read failed.
    #[error("bus read failed: {0}")]
    Read(String),
}

/// Byte-level transport to the chip (I2C, SWI behind a bridge, a test
/// double). The driver owns all framing, timing and validation; a transport
/// only moves raw bytes.
///
/// The driver issues one transaction at a time and never overlaps a
/// transmit with a receive, so implementations need no internal queueing.
pub trait BusTransport {
    /// Write all of `bytes` to the chip.
    fn transmit(&mut self, bytes: &[u8]) -> Result<(), BusError>;

    /// Read into `buffer`, returning the number of bytes actually read.
    /// A count shorter than the buffer is not an error at this level; the
    /// driver treats it as a short read of the envelope.
    fn receive(&mut self, buffer: &mut [u8]) -> Result<usize, BusError>;
}
