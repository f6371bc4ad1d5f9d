//! Buffer form of the BER length codec

use super::{LONG_FORM_FLAG, OCTET_COUNT_MASK};
use crate::error::{KlvError, Result};

/// Lengths below this value use the one-byte short form
pub const SHORT_FORM_LIMIT: u64 = 128;

/// Most length octets a long form field may declare (a u64 holds 8 bytes)
pub const MAX_LENGTH_OCTETS: usize = 8;

/// Number of big-endian bytes needed to hold `length` in long form
fn octet_count(length: u64) -> usize {
    let significant_bits = u64::BITS - length.leading_zeros();
    (significant_bits as usize).div_ceil(8).max(1)
}

/// Encode a length into its minimal BER representation
///
/// Format: one byte for lengths under 128, otherwise `0x80 | N` followed by
/// the N big-endian bytes of the length.
pub fn encode_length(length: u64) -> Vec<u8> {
    if length < SHORT_FORM_LIMIT {
        return vec![length as u8];
    }

    let octets = octet_count(length);
    let mut field = Vec::with_capacity(1 + octets);
    field.push(LONG_FORM_FLAG | octets as u8);
    field.extend_from_slice(&length.to_be_bytes()[MAX_LENGTH_OCTETS - octets..]);
    field
}

/// Size in bytes of `encode_length(length)`
pub fn encoded_len(length: u64) -> usize {
    if length < SHORT_FORM_LIMIT {
        1
    } else {
        1 + octet_count(length)
    }
}

/// Decode a buffer holding exactly one BER length field
///
/// The buffer must contain the whole field and nothing else, for the short
/// form as well as the long form.
pub fn decode_length(input: &[u8]) -> Result<u64> {
    let first = *input.first().ok_or(KlvError::EmptyInput)?;

    if first & LONG_FORM_FLAG == 0 {
        if input.len() != 1 {
            return Err(KlvError::IncorrectInputLength {
                expected: 1,
                actual: input.len(),
            });
        }
        return Ok(u64::from(first));
    }

    let octets = usize::from(first & OCTET_COUNT_MASK);
    if octets + 1 != input.len() {
        return Err(KlvError::IncorrectInputLength {
            expected: octets + 1,
            actual: input.len(),
        });
    }
    if octets > MAX_LENGTH_OCTETS {
        return Err(KlvError::LengthOverflow { octets });
    }

    Ok(input[1..]
        .iter()
        .fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte)))
}
