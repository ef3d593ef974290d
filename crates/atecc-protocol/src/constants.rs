//! Protocol constants
//!
//! These constants define the command opcodes, fixed addresses, response
//! geometry and settle delays used when talking to an ATECC608 device. They
//! come from the ATECC608 datasheet command set.

use std::time::Duration;

// ============================================================================
// Command Opcodes
// ============================================================================

/// Read four bytes from a zone at a word address.
pub const OP_READ: u8 = 0x02;
/// Generate a 32-byte random number from the on-chip RNG.
pub const OP_RANDOM: u8 = 0x1B;
/// SHA-256 engine (start/update/end selected via param1).
pub const OP_SHA: u8 = 0x47;
/// Load or generate a nonce for subsequent crypto operations.
pub const OP_NONCE: u8 = 0x16;
/// AES-128 ECB block operation (encrypt/decrypt selected via param1).
pub const OP_AES: u8 = 0x51;

// ============================================================================
// Parameter Values
// ============================================================================

/// Zone identifier for configuration-zone reads.
pub const ZONE_CONFIG: u8 = 0x00;
/// SHA param1: initialize the hash state.
pub const SHA_MODE_START: u8 = 0x00;
/// SHA param1: absorb one full 64-byte block.
pub const SHA_MODE_UPDATE: u8 = 0x01;
/// SHA param1: absorb the final partial block and emit the digest.
pub const SHA_MODE_END: u8 = 0x02;
/// Nonce param1: generate a random nonce.
pub const NONCE_MODE_RANDOM: u8 = 0x00;
/// AES param1: encrypt the input block.
pub const AES_MODE_ENCRYPT: u8 = 0x00;
/// AES param1: decrypt the input block.
pub const AES_MODE_DECRYPT: u8 = 0x01;

// ============================================================================
// Framing
// ============================================================================

/// Packet-type byte preceding every command frame on the bus.
pub const PACKET_TYPE_COMMAND: u8 = 0x03;
/// Word-address byte that puts the chip into the low-power idle state.
/// Idle is signalled by writing this single byte on its own, outside any
/// command frame. The value happens to match [`OP_READ`]; the two constants
/// are unrelated (word address vs. command opcode).
pub const WORD_ADDRESS_IDLE: u8 = 0x02;
/// Frame bytes besides the payload: length, opcode, param1, param2, CRC.
pub const FRAME_OVERHEAD: usize = 7;
/// Envelope bytes besides the payload: length byte plus two CRC bytes.
pub const ENVELOPE_OVERHEAD: usize = 3;

// ============================================================================
// Wake Handshake
// ============================================================================

/// Single byte transmitted as the wake pulse.
pub const WAKE_PULSE: u8 = 0x00;
/// Acknowledgment the chip returns once awake. This is itself a well-formed
/// envelope: length 4, status 0x11, CRC 0x33 0x43.
pub const WAKE_ACK: [u8; 4] = [0x04, 0x11, 0x33, 0x43];

// ============================================================================
// Response Geometry
// ============================================================================

/// Length byte announced by 35-byte responses (random, SHA digest).
pub const LONG_RESPONSE_LEN: u8 = 0x23;
/// Total size of the long response envelope.
pub const LONG_RESPONSE_SIZE: usize = 35;
/// Total size of the AES response envelope (16-byte block plus overhead).
pub const AES_RESPONSE_SIZE: usize = 19;
/// Bytes read back after a nonce command.
pub const NONCE_RESPONSE_SIZE: usize = 32;
/// Offset of raw random material within the long response.
pub const RANDOM_RAW_OFFSET: usize = 4;

// ============================================================================
// Data Sizes
// ============================================================================

/// SHA-256 processes input in blocks of this size.
pub const SHA_BLOCK_SIZE: usize = 64;
/// Size of the SHA-256 digest.
pub const SHA_DIGEST_SIZE: usize = 32;
/// AES-128 block size.
pub const AES_BLOCK_SIZE: usize = 16;
/// Length of the device serial number.
pub const SERIAL_NUMBER_SIZE: usize = 9;

// ============================================================================
// Configuration Zone Layout
// ============================================================================

/// Total size of the configuration zone.
pub const CONFIG_ZONE_SIZE: usize = 128;
/// Bytes returned per configuration-zone read.
pub const CONFIG_READ_BYTES: usize = 4;
/// Number of sequential reads covering the whole zone.
pub const CONFIG_ZONE_READS: usize = CONFIG_ZONE_SIZE / CONFIG_READ_BYTES;
/// Word addresses holding the three serial-number fragments.
pub const SERIAL_WORDS: [u16; 3] = [0x0000, 0x0002, 0x0003];
/// Word address of the config-lock and data-lock status bytes.
pub const LOCK_STATUS_WORD: u16 = 0x0015;
/// Lock byte value meaning the zone is locked.
pub const LOCK_BYTE_LOCKED: u8 = 0x00;
/// Lock byte value meaning the zone is open.
pub const LOCK_BYTE_UNLOCKED: u8 = 0x55;

// ============================================================================
// Settle Delays
// ============================================================================
//
// Mandatory waits between command transmission and response reception, sized
// to the chip's worst-case processing latency for each command class.

/// Delay after the wake pulse before reading the acknowledgment.
pub const WAKE_SETTLE: Duration = Duration::from_millis(1);
/// Delay for short commands (reads, SHA phases, nonce, AES).
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(5);
/// Delay for configuration-zone reads.
pub const CONFIG_READ_SETTLE: Duration = Duration::from_millis(20);
/// Delay for random generation and lock-status reads.
pub const RANDOM_SETTLE: Duration = Duration::from_millis(23);
