//! Decoded chip state.

use crate::constants::{LOCK_BYTE_LOCKED, LOCK_BYTE_UNLOCKED};
use crate::error::ProtocolError;

/// Lock state of the configuration and data zones, decoded from the two
/// status bytes at the lock word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    /// Both the configuration and data zones are locked.
    FullyLocked,
    /// Neither zone is locked.
    Unlocked,
    /// Configuration zone locked, data zone still open.
    PartiallyLocked,
}

impl LockState {
    /// Classify the config-lock and data-lock bytes.
    ///
    /// Any pairing outside the three documented combinations is reported as
    /// [`ProtocolError::UnrecognizedLockState`] rather than guessed at; an
    /// unknown pairing usually means a corrupted read.
    pub fn from_bytes(config: u8, data: u8) -> Result<Self, ProtocolError> {
        match (config, data) {
            (LOCK_BYTE_LOCKED, LOCK_BYTE_LOCKED) => Ok(LockState::FullyLocked),
            (LOCK_BYTE_UNLOCKED, LOCK_BYTE_UNLOCKED) => Ok(LockState::Unlocked),
            (LOCK_BYTE_LOCKED, LOCK_BYTE_UNLOCKED) => Ok(LockState::PartiallyLocked),
            (config, data) => Err(ProtocolError::UnrecognizedLockState { config, data }),
        }
    }
}

impl std::fmt::Display for LockState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LockState::FullyLocked => write!(f, "fully locked (config & data)"),
            LockState::Unlocked => write!(f, "unlocked"),
            LockState::PartiallyLocked => write!(f, "partially locked (config locked, data open)"),
        }
    }
}
