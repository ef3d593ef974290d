//! CRC-16 checksum engine.
//!
//! The ATECC608 authenticates every command and response with a bit-serial
//! CRC-16 over polynomial 0x8005, initial register 0, bits taken LSB-first
//! within each byte, result emitted little-endian. This is the exact
//! algorithm used by Microchip's CryptoAuthLib; table-driven CCITT variants
//! produce different values and must not be substituted.

const POLYNOMIAL: u16 = 0x8005;

/// Compute the CRC-16 of `data`, returned as two little-endian bytes.
pub fn crc16(data: &[u8]) -> [u8; 2] {
    let mut register: u16 = 0;
    for &byte in data {
        for bit in 0..8 {
            let data_bit = (byte >> bit) & 1;
            let crc_bit = (register >> 15) as u8;
            register <<= 1;
            if data_bit != crc_bit {
                register ^= POLYNOMIAL;
            }
        }
    }
    [(register & 0xFF) as u8, (register >> 8) as u8]
}

/// Check the trailing two-byte CRC of a response envelope.
///
/// Recomputes the CRC over `response[..len - 2]` and compares it to the last
/// two bytes. Returns `false` for inputs too short to carry a CRC at all.
pub fn validate(response: &[u8]) -> bool {
    if response.len() < 3 {
        return false;
    }
    let (body, trailer) = response.split_at(response.len() - 2);
    crc16(body) == trailer
}
