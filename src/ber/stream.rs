//! Stream form of the BER length codec
//!
//! Reads a length field byte by byte so that nothing past the field is
//! consumed from the source.

use std::io::{ErrorKind, Read, Write};

use super::codec::{encode_length, MAX_LENGTH_OCTETS};
use super::{LONG_FORM_FLAG, OCTET_COUNT_MASK};
use crate::error::{KlvError, Result};

/// Read a single byte, retrying interrupted reads
fn read_byte<R: Read + ?Sized>(reader: &mut R) -> std::io::Result<u8> {
    let mut buf = [0u8; 1];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => return Err(ErrorKind::UnexpectedEof.into()),
            Ok(_) => return Ok(buf[0]),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

/// Read one BER length field from a stream
///
/// Returns the decoded length together with every byte consumed, so the
/// caller can reproduce the field exactly.
///
/// A failure on the first byte is returned as `KlvError::Io`. A failure once
/// the header byte is in hand is returned as `KlvError::TruncatedLength`,
/// which carries the bytes read so far.
pub fn read_length<R: Read + ?Sized>(reader: &mut R) -> Result<(u64, Vec<u8>)> {
    let first = read_byte(reader)?;

    if first & LONG_FORM_FLAG == 0 {
        return Ok((u64::from(first), vec![first]));
    }

    let octets = usize::from(first & OCTET_COUNT_MASK);
    if octets > MAX_LENGTH_OCTETS {
        tracing::warn!("Rejecting length field with {} octets", octets);
        return Err(KlvError::LengthOverflow { octets });
    }

    let mut consumed = Vec::with_capacity(1 + octets);
    consumed.push(first);

    let mut length = 0u64;
    for _ in 0..octets {
        let byte = match read_byte(reader) {
            Ok(byte) => byte,
            Err(source) => {
                tracing::debug!(
                    "Length field truncated after {} of {} bytes",
                    consumed.len(),
                    octets + 1
                );
                return Err(KlvError::TruncatedLength { consumed, source });
            }
        };
        consumed.push(byte);
        length = (length << 8) | u64::from(byte);
    }

    Ok((length, consumed))
}

/// Write the BER length field for `length` to a stream
pub fn write_length<W: Write + ?Sized>(writer: &mut W, length: u64) -> Result<()> {
    writer.write_all(&encode_length(length))?;
    Ok(())
}
