//! BER Length Module
//!
//! Encodes and decodes the Length field of a KLV record.
//!
//! ## Length Encoding
//! ```text
//! Short form (0..=127):
//! ┌───────────────┐
//! │ 0 │ len (7)   │
//! └───────────────┘
//!
//! Long form (128..):
//! ┌───────────────┬──────────────────────────────┐
//! │ 1 │ N (7)     │ len, N bytes big-endian      │
//! └───────────────┴──────────────────────────────┘
//! ```
//!
//! The encoder always picks the fewest bytes: short form below 128, otherwise
//! the smallest N with `len < 256^N`. Decoders must not assume a fixed width.

mod codec;
mod stream;

pub use codec::{decode_length, encode_length, encoded_len, MAX_LENGTH_OCTETS, SHORT_FORM_LIMIT};
pub use stream::{read_length, write_length};

/// High bit of the first byte: set for long form
pub(crate) const LONG_FORM_FLAG: u8 = 0x80;

/// Low seven bits of a long form header: number of length octets
pub(crate) const OCTET_COUNT_MASK: u8 = 0x7F;
