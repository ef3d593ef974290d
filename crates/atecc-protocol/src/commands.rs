//! Commands that can be sent to the device.

use crate::constants::*;
use crate::frame::encode_command;

/// AES operation direction, carried in param1 of the AES command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AesMode {
    /// Encrypt the input block with the slot key.
    Encrypt,
    /// Decrypt the input block with the slot key.
    Decrypt,
}

impl From<AesMode> for u8 {
    fn from(mode: AesMode) -> Self {
        match mode {
            AesMode::Encrypt => AES_MODE_ENCRYPT,
            AesMode::Decrypt => AES_MODE_DECRYPT,
        }
    }
}

/// Commands understood by the device.
///
/// Each variant maps to one `(opcode, param1, param2, payload)` tuple fed
/// through [`encode_command`]; the settle delay and response shape belong to
/// the transaction layer driving the command.
#[derive(Debug, Clone)]
pub enum Command {
    /// Read four bytes from the configuration zone at a word address.
    Read {
        /// Word address within the zone.
        address: u16,
    },

    /// Generate a 32-byte random number.
    Random,

    /// Reset the SHA-256 engine state.
    ShaStart,

    /// Absorb one full input block into the running hash.
    ShaUpdate {
        /// Exactly one 64-byte message block.
        block: [u8; SHA_BLOCK_SIZE],
    },

    /// Absorb the final partial block and produce the digest.
    ShaEnd {
        /// Remaining tail bytes, fewer than one full block.
        tail: Vec<u8>,
    },

    /// Generate a random nonce.
    Nonce,

    /// Run one AES-128 block operation against a slot key.
    Aes {
        /// Encrypt or decrypt.
        mode: AesMode,
        /// Slot holding the AES key.
        key_slot: u16,
        /// Input block.
        block: [u8; AES_BLOCK_SIZE],
    },
}

impl Command {
    /// Encode the command as a complete wire frame.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Command::Read { address } => encode_command(OP_READ, ZONE_CONFIG, *address, &[]),
            Command::Random => encode_command(OP_RANDOM, 0x00, 0x0000, &[]),
            Command::ShaStart => encode_command(OP_SHA, SHA_MODE_START, 0x0000, &[]),
            Command::ShaUpdate { block } => {
                encode_command(OP_SHA, SHA_MODE_UPDATE, 0x0000, block)
            }
            Command::ShaEnd { tail } => {
                encode_command(OP_SHA, SHA_MODE_END, tail.len() as u16, tail)
            }
            Command::Nonce => encode_command(OP_NONCE, NONCE_MODE_RANDOM, 0x0000, &[]),
            Command::Aes {
                mode,
                key_slot,
                block,
            } => encode_command(OP_AES, (*mode).into(), *key_slot, block),
        }
    }

    /// Human-readable command name, used in transaction logging.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Read { .. } => "Read",
            Command::Random => "Random",
            Command::ShaStart => "SHA Start",
            Command::ShaUpdate { .. } => "SHA Update",
            Command::ShaEnd { .. } => "SHA End",
            Command::Nonce => "Nonce",
            Command::Aes { .. } => "AES",
        }
    }
}
