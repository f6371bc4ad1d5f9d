//! KLV stream encoder
//!
//! Writes chunks to any `std::io::Write` sink. Keys shorter than the key width
//! are padded with zero bytes on the right; longer keys are rejected.
//!
//! Each chunk is framed into one buffer and handed to the sink with a single
//! write. A sink that accepts only part of it fails the encode; chunks written
//! before a failure stay written.

use std::io::{ErrorKind, Write};

use crate::ber;
use crate::chunk::Chunk;
use crate::config::CodecConfig;
use crate::error::{KlvError, Result};

/// Build the wire bytes of one chunk: padded key ++ BER length ++ value
pub(crate) fn frame_chunk(chunk: &Chunk, key_width: usize) -> Result<Vec<u8>> {
    let key = chunk.key();
    if key.len() > key_width {
        return Err(KlvError::KeyTooLong {
            len: key.len(),
            max: key_width,
        });
    }

    let mut frame = Vec::with_capacity(chunk.wire_len(key_width));
    frame.extend_from_slice(key);
    frame.resize(key_width, 0);
    frame.extend_from_slice(&ber::encode_length(chunk.value_len() as u64));
    frame.extend_from_slice(chunk.value());
    Ok(frame)
}

/// Encodes chunks to a byte sink
pub struct Encoder<W> {
    /// Byte sink
    writer: W,

    /// Fixed key width of the stream
    key_width: usize,
}

impl<W: Write> Encoder<W> {
    /// Create an encoder with the given key width
    pub fn new(writer: W, key_width: usize) -> Result<Self> {
        Self::with_config(writer, &CodecConfig::new(key_width))
    }

    /// Create an encoder from a full config
    pub fn with_config(writer: W, config: &CodecConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            writer,
            key_width: config.key_width,
        })
    }

    /// Encode chunks in order, stopping at the first failure
    pub fn encode(&mut self, chunks: &[Chunk]) -> Result<()> {
        for chunk in chunks {
            self.encode_chunk(chunk)?;
        }
        Ok(())
    }

    /// Encode a single chunk, returning the number of bytes written
    pub fn encode_chunk(&mut self, chunk: &Chunk) -> Result<usize> {
        let frame = frame_chunk(chunk, self.key_width)?;

        let written = loop {
            match self.writer.write(&frame) {
                Ok(n) => break n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        };
        if written != frame.len() {
            tracing::debug!("Sink accepted {} of {} bytes", written, frame.len());
            return Err(KlvError::PartialWrite {
                written,
                expected: frame.len(),
            });
        }

        tracing::trace!(
            "Encoded chunk: {} key bytes, {} value bytes",
            chunk.key().len(),
            chunk.value_len()
        );
        Ok(written)
    }

    /// Flush the underlying sink
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Key width this encoder writes
    pub fn key_width(&self) -> usize {
        self.key_width
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Consume the encoder, returning the sink
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Encode chunks into a new buffer
pub fn encode_chunks(chunks: &[Chunk], key_width: usize) -> Result<Vec<u8>> {
    let mut encoder = Encoder::new(Vec::new(), key_width)?;
    encoder.encode(chunks)?;
    Ok(encoder.into_inner())
}
