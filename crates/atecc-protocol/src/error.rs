//! Protocol error types.

use thiserror::Error;

/// Errors that can occur when framing commands or parsing responses.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Fewer bytes were available than the envelope requires. Not retryable
    /// at this layer; whether to reissue the transaction is the caller's
    /// decision.
    #[error("short read: expected at least {expected} bytes, got {actual}")]
    ShortRead {
        /// Minimum number of bytes required.
        expected: usize,
        /// Number of bytes actually available.
        actual: usize,
    },

    /// The recomputed CRC disagrees with the trailing checksum bytes,
    /// indicating transmission corruption or protocol desync.
    #[error("checksum mismatch: computed {computed:02X?}, received {received:02X?}")]
    ChecksumMismatch {
        /// CRC computed over the received body.
        computed: [u8; 2],
        /// CRC carried in the envelope trailer.
        received: [u8; 2],
    },

    /// The declared length byte disagrees with the protocol expectation for
    /// this response shape.
    #[error("unexpected response length byte: expected 0x{expected:02X}, got 0x{actual:02X}")]
    UnexpectedResponseLength {
        /// Length byte the protocol requires.
        expected: u8,
        /// Length byte the chip reported.
        actual: u8,
    },

    /// The observed lock bytes match none of the known combinations.
    #[error("unrecognized lock state: config byte 0x{config:02X}, data byte 0x{data:02X}")]
    UnrecognizedLockState {
        /// Config-zone lock byte.
        config: u8,
        /// Data-zone lock byte.
        data: u8,
    },
}
