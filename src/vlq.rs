//! MIDI variable-length quantities.
//!
//! Seven bits per byte, most significant group first. Every byte but the
//! last carries the 0x80 continuation flag.

use crate::error::VlqError;

/// Largest value a four-byte VLQ can hold (2^28 - 1).
pub const MAX_VALUE: u32 = 0x0FFF_FFFF;

/// Append the encoding of `value` to `out`, returning the number of bytes written.
pub fn write(value: u32, out: &mut Vec<u8>) -> Result<usize, VlqError> {
    if value > MAX_VALUE {
        return Err(VlqError::Overflow(value));
    }

    let mut groups = [0u8; 4];
    let mut len = 0;
    let mut rest = value;
    loop {
        groups[len] = (rest & 0x7F) as u8;
        len += 1;
        rest >>= 7;
        if rest == 0 {
            break;
        }
    }

    for i in (0..len).rev() {
        let flag = if i == 0 { 0x00 } else { 0x80 };
        out.push(groups[i] | flag);
    }
    Ok(len)
}

pub fn encode(value: u32) -> Result<Vec<u8>, VlqError> {
    let mut out = Vec::with_capacity(4);
    write(value, &mut out)?;
    Ok(out)
}

/// Decode one quantity from the front of `bytes`.
///
/// Returns the value and how many bytes it occupied.
pub fn decode(bytes: &[u8]) -> Result<(u32, usize), VlqError> {
    let mut value: u32 = 0;
    for (i, &b) in bytes.iter().enumerate() {
        if i == 4 {
            return Err(VlqError::TooLong);
        }
        value = (value << 7) | u32::from(b & 0x7F);
        if b & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }
    if bytes.len() >= 4 {
        Err(VlqError::TooLong)
    } else {
        Err(VlqError::Truncated)
    }
}
