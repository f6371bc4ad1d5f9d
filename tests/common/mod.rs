//! Shared test sources and sinks
//!
//! Readers and writers that misbehave in the ways real streams do.

#![allow(dead_code)]

use std::io::{self, Read, Write};

/// Hands out at most one byte per read call
pub struct OneByteReader<R> {
    inner: R,
}

impl<R: Read> OneByteReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: Read> Read for OneByteReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let len = buf.len().min(1);
        self.inner.read(&mut buf[..len])
    }
}

/// Fails every other read with `ErrorKind::Interrupted`
pub struct InterruptingReader<R> {
    inner: R,
    interrupt_next: bool,
}

impl<R: Read> InterruptingReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            interrupt_next: true,
        }
    }
}

impl<R: Read> Read for InterruptingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.interrupt_next {
            self.interrupt_next = false;
            return Err(io::ErrorKind::Interrupted.into());
        }
        self.interrupt_next = true;
        self.inner.read(buf)
    }
}

/// Serves `data`, then fails with `ErrorKind::Other`
pub struct FailingReader {
    data: io::Cursor<Vec<u8>>,
}

impl FailingReader {
    pub fn new(data: &[u8]) -> Self {
        Self {
            data: io::Cursor::new(data.to_vec()),
        }
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.data.read(buf)? {
            0 => Err(io::Error::new(io::ErrorKind::Other, "source broke")),
            n => Ok(n),
        }
    }
}

/// Accepts at most `limit` bytes per write call
pub struct ShortWriter {
    pub written: Vec<u8>,
    limit: usize,
}

impl ShortWriter {
    pub fn new(limit: usize) -> Self {
        Self {
            written: Vec::new(),
            limit,
        }
    }
}

impl Write for ShortWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = buf.len().min(self.limit);
        self.written.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Rejects every write
pub struct FailingWriter;

impl Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Build one record by hand: key ++ length field ++ value
pub fn record(key: &[u8], length_field: &[u8], value: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(key.len() + length_field.len() + value.len());
    bytes.extend_from_slice(key);
    bytes.extend_from_slice(length_field);
    bytes.extend_from_slice(value);
    bytes
}
