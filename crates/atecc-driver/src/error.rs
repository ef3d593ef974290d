//! Driver error types.

use thiserror::Error;

use crate::bus::BusError;
use atecc_protocol::ProtocolError;

/// Errors that can occur while driving the chip.
///
/// Every failure is terminal for the call that produced it; nothing in the
/// driver retries. After any error the chip may need a fresh wake cycle
/// before it will accept the next command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The underlying bus transport failed.
    #[error("bus transport error: {0}")]
    Bus(#[from] BusError),

    /// The wire protocol rejected a response envelope.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The chip did not return the expected wake acknowledgment. The full
    /// wake sequence must be re-attempted before any further command.
    #[error("wake failed: unexpected acknowledgment {response:02X?}")]
    WakeFailed {
        /// The four bytes actually read back after the wake pulse.
        response: [u8; 4],
    },
}
