//! KLV stream decoder
//!
//! Reads records from any `std::io::Read` source, one chunk per call.
//!
//! ## Decoding Process
//! 1. Read `key_width` key bytes (a clean end of stream here ends decoding)
//! 2. Read the BER length field
//! 3. Check the length against the configured maximum
//! 4. Read the value
//!
//! Short reads are re-issued until the requested bytes arrive or the source
//! reports end of stream, so pipes and sockets decode the same as files.

use std::io::{ErrorKind, Read};

use bytes::Bytes;
use thiserror::Error;

use crate::ber;
use crate::chunk::{Chunk, Chunks};
use crate::config::CodecConfig;
use crate::error::{KlvError, Result};

/// Error from [`Decoder::take_all`], keeping the chunks decoded before it
#[derive(Debug, Error)]
#[error("decoding stopped after {} chunks: {source}", .chunks.len())]
pub struct TakeAllError {
    /// Chunks decoded before the failure, in stream order
    pub chunks: Chunks,

    #[source]
    pub source: KlvError,
}

impl TakeAllError {
    pub fn into_parts(self) -> (Chunks, KlvError) {
        (self.chunks, self.source)
    }
}

impl From<TakeAllError> for KlvError {
    fn from(err: TakeAllError) -> Self {
        err.source
    }
}

/// Fill `buf` from the reader, stopping early only at end of stream.
///
/// Returns the number of bytes filled.
fn read_full<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Decodes chunks from a byte source
pub struct Decoder<R> {
    /// Byte source
    reader: R,

    /// Fixed key width of the stream
    key_width: usize,

    /// Declared lengths above this are rejected
    max_value_length: u64,

    /// Chunks successfully decoded so far
    chunks_read: u64,
}

impl<R: Read> Decoder<R> {
    /// Create a decoder with the given key width and default limits
    pub fn new(reader: R, key_width: usize) -> Result<Self> {
        Self::with_config(reader, &CodecConfig::new(key_width))
    }

    /// Create a decoder from a full config
    pub fn with_config(reader: R, config: &CodecConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            reader,
            key_width: config.key_width,
            max_value_length: config.max_value_length,
            chunks_read: 0,
        })
    }

    /// Read the next chunk
    ///
    /// Returns `Ok(None)` when the source ends cleanly between records.
    /// A source that ends inside a record is an error.
    pub fn take(&mut self) -> Result<Option<Chunk>> {
        let key_width = self.key_width;

        // Key
        let mut raw = vec![0u8; key_width];
        let filled = read_full(&mut self.reader, &mut raw)?;
        if filled == 0 {
            tracing::debug!("End of stream after {} chunks", self.chunks_read);
            return Ok(None);
        }
        if filled < key_width {
            return Err(KlvError::KeyLength {
                expected: key_width,
                actual: filled,
            });
        }

        // Length
        let (length, length_field) = ber::read_length(&mut self.reader)?;
        if length > self.max_value_length {
            tracing::warn!(
                "Rejecting value of {} bytes (max {})",
                length,
                self.max_value_length
            );
            return Err(KlvError::ValueTooLarge {
                length,
                max: self.max_value_length,
            });
        }
        let value_len = usize::try_from(length).map_err(|_| KlvError::ValueTooLarge {
            length,
            max: usize::MAX as u64,
        })?;

        // Value
        let value_start = key_width + length_field.len();
        raw.reserve_exact(length_field.len() + value_len);
        raw.extend_from_slice(&length_field);
        raw.resize(value_start + value_len, 0);

        let filled = read_full(&mut self.reader, &mut raw[value_start..])?;
        if filled < value_len {
            return Err(KlvError::ValueLength {
                expected: length,
                actual: filled as u64,
            });
        }

        self.chunks_read += 1;
        tracing::trace!(
            "Decoded chunk #{}: {} value bytes",
            self.chunks_read,
            value_len
        );

        Ok(Some(Chunk::from_raw(
            Bytes::from(raw),
            key_width,
            length_field.len(),
        )))
    }

    /// Read chunks until the source ends
    ///
    /// On failure the chunks decoded so far are returned inside the error.
    pub fn take_all(&mut self) -> std::result::Result<Chunks, TakeAllError> {
        let mut chunks = Chunks::new();
        loop {
            match self.take() {
                Ok(Some(chunk)) => chunks.push(chunk),
                Ok(None) => return Ok(chunks),
                Err(source) => {
                    tracing::debug!("Decoding stopped after {} chunks: {}", chunks.len(), source);
                    return Err(TakeAllError { chunks, source });
                }
            }
        }
    }

    /// Iterate over the remaining chunks
    pub fn iter(&mut self) -> ChunkIter<'_, R> {
        ChunkIter {
            decoder: self,
            done: false,
        }
    }

    /// Key width this decoder reads
    pub fn key_width(&self) -> usize {
        self.key_width
    }

    /// Number of chunks decoded so far
    pub fn chunks_read(&self) -> u64 {
        self.chunks_read
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Consume the decoder, returning the source
    pub fn into_inner(self) -> R {
        self.reader
    }
}

/// Iterator over the chunks of a [`Decoder`]
///
/// Stops after the end of the stream or after yielding the first error.
pub struct ChunkIter<'a, R> {
    decoder: &'a mut Decoder<R>,
    done: bool,
}

impl<R: Read> Iterator for ChunkIter<'_, R> {
    type Item = Result<Chunk>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.decoder.take() {
            Ok(Some(chunk)) => Some(Ok(chunk)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: Read> std::iter::FusedIterator for ChunkIter<'_, R> {}

impl<'a, R: Read> IntoIterator for &'a mut Decoder<R> {
    type Item = Result<Chunk>;
    type IntoIter = ChunkIter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Decode every chunk in an in-memory buffer
pub fn decode_chunks(bytes: &[u8], key_width: usize) -> std::result::Result<Chunks, TakeAllError> {
    let mut decoder = Decoder::new(bytes, key_width).map_err(|source| TakeAllError {
        chunks: Chunks::new(),
        source,
    })?;
    decoder.take_all()
}
