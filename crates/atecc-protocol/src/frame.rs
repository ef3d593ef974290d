//! Command-frame encoding and response-envelope parsing.
//!
//! One shared code path builds every outbound frame and strips every inbound
//! envelope; the catalog never assembles wire bytes by hand.

use bytes::BufMut;

use crate::constants::*;
use crate::crc::crc16;
use crate::error::ProtocolError;

/// Build a complete command frame ready for transmission.
///
/// Layout: packet-type byte, length byte (`7 + payload.len()`), opcode,
/// param1, param2 little-endian, payload, then the CRC computed over every
/// byte from the length byte through the payload. The packet-type byte is
/// excluded from the CRC.
///
/// Payload size limits (64-byte SHA blocks, 16-byte AES blocks) are the
/// caller's responsibility; nothing here enforces them.
pub fn encode_command(opcode: u8, param1: u8, param2: u16, payload: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(1 + FRAME_OVERHEAD + payload.len());
    frame.push(PACKET_TYPE_COMMAND);
    frame.push((FRAME_OVERHEAD + payload.len()) as u8);
    frame.push(opcode);
    frame.push(param1);
    frame.put_u16_le(param2);
    frame.extend_from_slice(payload);
    let crc = crc16(&frame[1..]);
    frame.extend_from_slice(&crc);
    frame
}

/// Extract the payload from a response envelope.
///
/// Strips the leading length byte and returns the next
/// `expected_payload_len` bytes. When `validate_checksum` is set, the whole
/// buffer must additionally carry a valid trailing CRC; short intermediate
/// reads pass `false` because they truncate the envelope before the CRC.
pub fn parse_response(
    raw: &[u8],
    expected_payload_len: usize,
    validate_checksum: bool,
) -> Result<&[u8], ProtocolError> {
    if raw.len() < 1 + expected_payload_len {
        return Err(ProtocolError::ShortRead {
            expected: 1 + expected_payload_len,
            actual: raw.len(),
        });
    }
    if validate_checksum {
        if raw.len() < ENVELOPE_OVERHEAD {
            return Err(ProtocolError::ShortRead {
                expected: ENVELOPE_OVERHEAD,
                actual: raw.len(),
            });
        }
        let (body, trailer) = raw.split_at(raw.len() - 2);
        let computed = crc16(body);
        if computed != trailer {
            log::warn!("checksum mismatch on {}-byte envelope", raw.len());
            return Err(ProtocolError::ChecksumMismatch {
                computed,
                received: [trailer[0], trailer[1]],
            });
        }
    }
    Ok(&raw[1..1 + expected_payload_len])
}
