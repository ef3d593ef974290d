//! The command catalog.
//!
//! [`Atecc608`] wraps a [`BusTransport`] and exposes one method per chip
//! operation. Methods block for the full transaction including the settle
//! delay, and must be called from a single thread; the chip supports only
//! one outstanding transaction.

use std::thread;
use std::time::Duration;

use atecc_protocol::*;

use crate::bus::BusTransport;
use crate::error::Error;

/// Fold a 64-bit value into an inclusive `[min, max]` range.
pub fn map_to_range(value: u64, min: u64, max: u64) -> u64 {
    debug_assert!(min <= max);
    min + value % (max - min + 1)
}

/// Driver for one ATECC608 device on a bus.
pub struct Atecc608<B> {
    bus: B,
}

impl<B: BusTransport> Atecc608<B> {
    /// Create a driver over the given transport. The chip starts asleep;
    /// call [`Atecc608::wake`] before the first command.
    pub fn new(bus: B) -> Self {
        Atecc608 { bus }
    }

    /// Consume the driver and hand the transport back.
    pub fn into_bus(self) -> B {
        self.bus
    }

    // ========================================================================
    // Wake sequencer
    // ========================================================================

    /// Wake the chip and verify its acknowledgment.
    ///
    /// Sends the single-byte wake pulse, waits the wake settle delay, then
    /// reads the fixed 4-byte acknowledgment. Anything other than an exact
    /// match is [`Error::WakeFailed`].
    pub fn wake(&mut self) -> Result<(), Error> {
        self.bus.transmit(&[WAKE_PULSE])?;
        thread::sleep(WAKE_SETTLE);

        let mut ack = [0u8; 4];
        let read = self.bus.receive(&mut ack)?;
        if read != ack.len() || ack != WAKE_ACK {
            return Err(Error::WakeFailed { response: ack });
        }
        log::debug!("device awake, acknowledgment {ack:02X?}");
        Ok(())
    }

    /// Put the chip into its low-power idle state, discarding any pending
    /// operation. Used to reset protocol state before a fresh wake.
    pub fn idle(&mut self) -> Result<(), Error> {
        self.bus.transmit(&[WORD_ADDRESS_IDLE])?;
        Ok(())
    }

    // ========================================================================
    // Transaction plumbing
    // ========================================================================

    /// Transmit a command and wait out its settle delay, without reading a
    /// response. SHA start/update phases acknowledge nothing useful.
    fn send(&mut self, command: &Command, settle: Duration) -> Result<(), Error> {
        let frame = command.encode();
        log::trace!("{} command, {} bytes on the wire", command.name(), frame.len());
        self.bus.transmit(&frame)?;
        thread::sleep(settle);
        Ok(())
    }

    /// Run one full transaction: transmit, settle, then read exactly
    /// `response_len` bytes of the response envelope.
    fn transact(
        &mut self,
        command: &Command,
        settle: Duration,
        response_len: usize,
    ) -> Result<Vec<u8>, Error> {
        self.send(command, settle)?;
        let mut response = vec![0u8; response_len];
        self.read_exact(&mut response)?;
        Ok(response)
    }

    /// Fill `buffer` from the bus, treating any shorter count as a short
    /// read of the envelope.
    fn read_exact(&mut self, buffer: &mut [u8]) -> Result<(), Error> {
        let read = self.bus.receive(buffer)?;
        if read != buffer.len() {
            return Err(ProtocolError::ShortRead {
                expected: buffer.len(),
                actual: read,
            }
            .into());
        }
        Ok(())
    }

    // ========================================================================
    // Command catalog
    // ========================================================================

    /// Read the 9-byte device serial number.
    ///
    /// The serial is spread over three configuration words. The first two
    /// reads return full checksummed envelopes; the third is a short fixed
    /// read whose first payload byte supplies the final serial byte.
    pub fn read_serial_number(&mut self) -> Result<[u8; SERIAL_NUMBER_SIZE], Error> {
        let mut serial = [0u8; SERIAL_NUMBER_SIZE];

        let raw = self.transact(
            &Command::Read { address: SERIAL_WORDS[0] },
            DEFAULT_SETTLE,
            1 + CONFIG_READ_BYTES + 2,
        )?;
        serial[..4].copy_from_slice(parse_response(&raw, 4, true)?);

        let raw = self.transact(
            &Command::Read { address: SERIAL_WORDS[1] },
            DEFAULT_SETTLE,
            1 + CONFIG_READ_BYTES + 2,
        )?;
        serial[4..9].copy_from_slice(parse_response(&raw, 5, true)?);

        let raw = self.transact(
            &Command::Read { address: SERIAL_WORDS[2] },
            DEFAULT_SETTLE,
            3,
        )?;
        serial[8] = parse_response(&raw, 2, false)?[0];

        log::debug!(
            "serial number {}",
            serial.iter().map(|b| format!("{b:02X}")).collect::<String>()
        );
        Ok(serial)
    }

    /// Check the declared length byte of a 35-byte response envelope.
    fn expect_long_envelope(response: &[u8]) -> Result<(), Error> {
        if response[0] != LONG_RESPONSE_LEN {
            return Err(ProtocolError::UnexpectedResponseLength {
                expected: LONG_RESPONSE_LEN,
                actual: response[0],
            }
            .into());
        }
        Ok(())
    }

    /// Run the Random command and check the declared envelope length.
    fn random_response(&mut self) -> Result<Vec<u8>, Error> {
        let response = self.transact(&Command::Random, RANDOM_SETTLE, LONG_RESPONSE_SIZE)?;
        Self::expect_long_envelope(&response)?;
        Ok(response)
    }

    /// Generate a random value in the inclusive range `[min, max]`.
    ///
    /// Folds the first eight payload bytes of the chip's random output into
    /// a big-endian 64-bit value and reduces it into the range.
    pub fn random_in_range(&mut self, min: u64, max: u64) -> Result<u64, Error> {
        let response = self.random_response()?;
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&response[1..9]);
        Ok(map_to_range(u64::from_be_bytes(bytes), min, max))
    }

    /// Return `count` bytes of raw random material (at most 31).
    pub fn random_bytes(&mut self, count: usize) -> Result<Vec<u8>, Error> {
        let count = count.min(LONG_RESPONSE_SIZE - RANDOM_RAW_OFFSET);
        let response = self.random_response()?;
        Ok(response[RANDOM_RAW_OFFSET..RANDOM_RAW_OFFSET + count].to_vec())
    }

    /// Compute the SHA-256 digest of `message` on-chip.
    ///
    /// Streams the message through the chip's three-phase SHA engine: one
    /// Start, one Update per full 64-byte block, then End carrying the tail
    /// (empty when the message length is an exact multiple of the block
    /// size). Only the End phase returns an envelope.
    pub fn sha256(&mut self, message: &[u8]) -> Result<[u8; SHA_DIGEST_SIZE], Error> {
        self.send(&Command::ShaStart, DEFAULT_SETTLE)?;

        let mut chunks = message.chunks_exact(SHA_BLOCK_SIZE);
        for chunk in &mut chunks {
            let mut block = [0u8; SHA_BLOCK_SIZE];
            block.copy_from_slice(chunk);
            self.send(&Command::ShaUpdate { block }, DEFAULT_SETTLE)?;
        }

        let tail = chunks.remainder().to_vec();
        let response = self.transact(&Command::ShaEnd { tail }, DEFAULT_SETTLE, LONG_RESPONSE_SIZE)?;
        Self::expect_long_envelope(&response)?;

        let mut digest = [0u8; SHA_DIGEST_SIZE];
        digest.copy_from_slice(parse_response(&response, SHA_DIGEST_SIZE, true)?);
        Ok(digest)
    }

    /// Read the four configuration bytes for one slot.
    pub fn read_slot_config(&mut self, slot: u16) -> Result<[u8; CONFIG_READ_BYTES], Error> {
        let raw = self.transact(
            &Command::Read { address: slot },
            CONFIG_READ_SETTLE,
            CONFIG_READ_BYTES,
        )?;
        let mut config = [0u8; CONFIG_READ_BYTES];
        config.copy_from_slice(&raw);
        Ok(config)
    }

    /// Read the full 128-byte configuration zone.
    ///
    /// Issues 32 sequential 4-byte reads at increasing word addresses and
    /// concatenates the payloads; any failed sub-read aborts the whole zone
    /// read with that sub-read's error.
    pub fn read_config_zone(&mut self) -> Result<[u8; CONFIG_ZONE_SIZE], Error> {
        let mut zone = [0u8; CONFIG_ZONE_SIZE];
        for word in 0..CONFIG_ZONE_READS {
            let raw = self.transact(
                &Command::Read { address: word as u16 },
                CONFIG_READ_SETTLE,
                1 + CONFIG_READ_BYTES,
            )?;
            let payload = parse_response(&raw, CONFIG_READ_BYTES, false)?;
            zone[word * CONFIG_READ_BYTES..(word + 1) * CONFIG_READ_BYTES]
                .copy_from_slice(payload);
        }
        Ok(zone)
    }

    /// Read and classify the configuration- and data-zone lock bytes.
    pub fn lock_status(&mut self) -> Result<LockState, Error> {
        let raw = self.transact(
            &Command::Read { address: LOCK_STATUS_WORD },
            RANDOM_SETTLE,
            5,
        )?;
        log::debug!("lock status response {raw:02X?}");
        Ok(LockState::from_bytes(raw[3], raw[4])?)
    }

    /// Generate a random nonce, returning the 31 payload bytes of the
    /// fixed-length response.
    pub fn generate_nonce(&mut self) -> Result<[u8; NONCE_RESPONSE_SIZE - 1], Error> {
        let raw = self.transact(&Command::Nonce, DEFAULT_SETTLE, NONCE_RESPONSE_SIZE)?;
        let mut nonce = [0u8; NONCE_RESPONSE_SIZE - 1];
        nonce.copy_from_slice(parse_response(&raw, NONCE_RESPONSE_SIZE - 1, false)?);
        Ok(nonce)
    }

    /// Encrypt one 16-byte block with the AES-128 key in `key_slot`.
    pub fn aes_encrypt(
        &mut self,
        plaintext: &[u8; AES_BLOCK_SIZE],
        key_slot: u16,
    ) -> Result<[u8; AES_BLOCK_SIZE], Error> {
        self.aes_block(AesMode::Encrypt, key_slot, plaintext)
    }

    /// Decrypt one 16-byte block with the AES-128 key in `key_slot`.
    pub fn aes_decrypt(
        &mut self,
        ciphertext: &[u8; AES_BLOCK_SIZE],
        key_slot: u16,
    ) -> Result<[u8; AES_BLOCK_SIZE], Error> {
        self.aes_block(AesMode::Decrypt, key_slot, ciphertext)
    }

    /// Shared AES transaction. The chip is idled and re-woken first so that
    /// a stale pending operation cannot poison the block operation.
    fn aes_block(
        &mut self,
        mode: AesMode,
        key_slot: u16,
        input: &[u8; AES_BLOCK_SIZE],
    ) -> Result<[u8; AES_BLOCK_SIZE], Error> {
        self.idle()?;
        self.wake()?;
        thread::sleep(DEFAULT_SETTLE);

        let command = Command::Aes {
            mode,
            key_slot,
            block: *input,
        };
        let raw = self.transact(&command, DEFAULT_SETTLE, AES_RESPONSE_SIZE)?;

        let mut output = [0u8; AES_BLOCK_SIZE];
        output.copy_from_slice(parse_response(&raw, AES_BLOCK_SIZE, true)?);
        Ok(output)
    }
}
