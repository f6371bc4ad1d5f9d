//! Chunk Module
//!
//! One KLV record and the ordered collection of records read from or written
//! to a stream.
//!
//! ## Record Layout
//! ```text
//! ┌──────────────────┬──────────────────┬──────────────────────┐
//! │ Key (key_width)  │ Length (BER)     │ Value (length bytes) │
//! └──────────────────┴──────────────────┴──────────────────────┘
//!  \___________________________ raw ___________________________/
//! ```

mod collection;

pub use collection::Chunks;

use std::fmt;

use bytes::Bytes;

use crate::ber;
use crate::error::Result;

/// Wire form of a decoded chunk
#[derive(Debug, Clone)]
struct Wire {
    /// key ++ length_field ++ value
    raw: Bytes,

    /// BER bytes that encoded the value length
    length_field: Bytes,
}

/// A single KLV record
///
/// Chunks built with [`Chunk::new`] carry only a key and a value. Chunks
/// produced by a [`Decoder`](crate::Decoder) also keep the exact bytes they
/// were read from, available through [`Chunk::raw`] and
/// [`Chunk::length_field`].
///
/// Equality looks at key and value only.
#[derive(Debug, Clone)]
pub struct Chunk {
    key: Bytes,
    value: Bytes,
    wire: Option<Wire>,
}

impl Chunk {
    /// Create a chunk from a key and a value
    pub fn new(key: impl Into<Bytes>, value: impl Into<Bytes>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            wire: None,
        }
    }

    /// Build a chunk over its raw record bytes.
    ///
    /// `raw` must hold exactly `key_width` key bytes, `length_width` BER
    /// bytes and the value.
    pub(crate) fn from_raw(raw: Bytes, key_width: usize, length_width: usize) -> Self {
        let value_start = key_width + length_width;
        Self {
            key: raw.slice(..key_width),
            value: raw.slice(value_start..),
            wire: Some(Wire {
                length_field: raw.slice(key_width..value_start),
                raw,
            }),
        }
    }

    pub fn key(&self) -> &[u8] {
        &self.key
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Length of the value in bytes
    pub fn value_len(&self) -> usize {
        self.value.len()
    }

    /// The complete record as read from the stream, if this chunk was decoded
    pub fn raw(&self) -> Option<&[u8]> {
        self.wire.as_ref().map(|w| w.raw.as_ref())
    }

    /// The BER length field as read from the stream, if this chunk was decoded
    pub fn length_field(&self) -> Option<&[u8]> {
        self.wire.as_ref().map(|w| w.length_field.as_ref())
    }

    /// Whether the chunk carries its wire form
    pub fn is_encoded(&self) -> bool {
        self.wire.is_some()
    }

    /// Number of bytes this chunk occupies in a stream with the given key width
    pub fn wire_len(&self, key_width: usize) -> usize {
        key_width + ber::encoded_len(self.value.len() as u64) + self.value.len()
    }

    /// Encode this chunk alone for a stream with the given key width
    pub fn to_wire(&self, key_width: usize) -> Result<Vec<u8>> {
        crate::encoder::frame_chunk(self, key_width)
    }

    /// Split into key and value
    pub fn into_parts(self) -> (Bytes, Bytes) {
        (self.key, self.value)
    }
}

impl PartialEq for Chunk {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.value == other.value
    }
}

impl Eq for Chunk {}

/// Writes bytes as space separated binary, e.g. `[1101000 1101001]`
fn write_bits(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    f.write_str("[")?;
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{:b}", byte)?;
    }
    f.write_str("]")
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_bits(f, &self.key)?;
        f.write_str(" - ")?;
        write_bits(f, &self.value)
    }
}
