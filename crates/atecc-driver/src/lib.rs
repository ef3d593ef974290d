//! Transaction driver for the ATECC608 cryptographic co-processor.
//!
//! The driver sits between the wire protocol (`atecc-protocol`) and a raw
//! byte transport supplied by the caller. Every chip operation is one or
//! more strictly sequential transactions, each following the same shape:
//!
//! ```text
//! (optional wake) → transmit frame → settle delay → receive envelope
//!                 → validate → decoded payload or typed error
//! ```
//!
//! There is no retry loop anywhere in this crate: a failed transaction is
//! surfaced to the caller, who may reissue the whole operation. Blind
//! retries against a half-finished transaction risk desynchronizing the
//! chip-side protocol state, so recovery always starts with a fresh wake.
//!
//! # Example
//!
//! ```rust,ignore
//! use atecc_driver::Atecc608;
//!
//! let mut chip = Atecc608::new(bus);
//! chip.wake()?;
//! let serial = chip.read_serial_number()?;
//! let value = chip.random_in_range(100, 65_535)?;
//! ```

mod bus;
mod driver;
mod error;

pub use bus::*;
pub use driver::*;
pub use error::*;
