//! Decoding of variable-table reads.
//!
//! 32-bit variables are little-endian. Signed variables are recovered from
//! the unsigned reconstruction by two's-complement normalization: a value at
//! or above 2^31 has 2^32 subtracted from it.

use crate::error::{ProtocolError, ProtocolResult};
use crate::ids::variables::WORD_LEN;

/// Reconstruct `b0 | b1 << 8 | b2 << 16 | b3 << 24` from the first four bytes.
pub fn decode_u32_le(bytes: &[u8]) -> ProtocolResult<u32> {
    let Some(&[b0, b1, b2, b3]) = bytes.first_chunk::<WORD_LEN>() else {
        return Err(ProtocolError::ShortResponse {
            expected: WORD_LEN,
            actual: bytes.len(),
        });
    };

    Ok(u32::from(b0) | (u32::from(b1) << 8) | (u32::from(b2) << 16) | (u32::from(b3) << 24))
}

/// Decode a signed 32-bit variable.
pub fn decode_i32_le(bytes: &[u8]) -> ProtocolResult<i32> {
    decode_u32_le(bytes).map(normalize_i32)
}

/// Two's-complement normalization of an unsigned 32-bit reconstruction.
#[inline]
pub fn normalize_i32(raw: u32) -> i32 {
    let wide = i64::from(raw);
    let signed = if wide >= 1 << 31 { wide - (1 << 32) } else { wide };
    // In range by construction: [-2^31, 2^31).
    signed as i32
}

/// First byte of a single-byte variable read.
pub fn decode_u8(bytes: &[u8]) -> ProtocolResult<u8> {
    bytes
        .first()
        .copied()
        .ok_or(ProtocolError::ShortResponse {
            expected: 1,
            actual: 0,
        })
}
