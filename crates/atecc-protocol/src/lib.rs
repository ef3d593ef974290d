//! ATECC608 wire protocol.
//!
//! This crate provides types and utilities for framing commands to, and
//! parsing responses from, an ATECC608 cryptographic co-processor. The chip
//! speaks a byte-oriented transaction protocol where every command is an
//! opcode-addressed packet carrying a length byte, two parameters, an
//! optional payload and a trailing CRC, and every response is a
//! length-prefixed envelope closed by the same CRC.
//!
//! # Protocol Overview
//!
//! A command on the wire looks like:
//!
//! ```text
//! +------+-----+--------+--------+-------+-------+----------+--------+--------+
//! | 0x03 | len | opcode | param1 | p2_lo | p2_hi | payload… | crc_lo | crc_hi |
//! +------+-----+--------+--------+-------+-------+----------+--------+--------+
//! ```
//!
//! where `len = 7 + payload.len()` and the CRC covers every byte from the
//! length byte through the payload. The leading `0x03` packet-type byte is
//! outside the CRC.
//!
//! # Example
//!
//! ```rust,ignore
//! use atecc_protocol::{Command, parse_response};
//!
//! // Build a Random command ready for transmission
//! let frame = Command::Random.encode();
//!
//! // Extract the 32 random bytes from a 35-byte response envelope
//! let payload = parse_response(&received, 32, true)?;
//! ```

mod commands;
mod constants;
mod crc;
mod error;
mod frame;
mod types;

pub use commands::*;
pub use constants::*;
pub use crc::*;
pub use error::*;
pub use frame::*;
pub use types::*;
