//! Tests for the Encoder
//!
//! These tests verify:
//! - Exact wire bytes, including key padding
//! - Key width enforcement
//! - Partial and failed writes
//! - Input chunks are left untouched

mod common;

use std::io::ErrorKind;

use klv::{encode_chunks, Chunk, CodecConfig, Encoder, KlvError};

use common::{record, FailingWriter, ShortWriter};

// =============================================================================
// Wire Format Tests
// =============================================================================

#[test]
fn test_encode_exact_width_key() {
    let bytes = encode_chunks(&[Chunk::new(&b"abc"[..], &b"xyz"[..])], 3).unwrap();
    assert_eq!(bytes, record(b"abc", &[0x03], b"xyz"));
}

#[test]
fn test_encode_pads_short_key() {
    let bytes = encode_chunks(&[Chunk::new(&b"ab"[..], &b"v"[..])], 5).unwrap();
    assert_eq!(bytes, record(b"ab\0\0\0", &[0x01], b"v"));
}

#[test]
fn test_encode_empty_value() {
    let bytes = encode_chunks(&[Chunk::new(&b"k"[..], &b""[..])], 1).unwrap();
    assert_eq!(bytes, vec![b'k', 0x00]);
}

#[test]
fn test_encode_long_form_value() {
    let value = vec![0xAB; 300];
    let bytes = encode_chunks(&[Chunk::new(&b"k"[..], value.clone())], 1).unwrap();
    assert_eq!(bytes, record(b"k", &[0x82, 0x01, 0x2C], &value));
}

#[test]
fn test_encode_multiple_chunks_in_order() {
    let chunks = vec![
        Chunk::new(&b"a"[..], &b"1"[..]),
        Chunk::new(&b"b"[..], &b"22"[..]),
        Chunk::new(&b"a"[..], &b"333"[..]),
    ];
    let bytes = encode_chunks(&chunks, 1).unwrap();

    let mut expected = record(b"a", &[0x01], b"1");
    expected.extend(record(b"b", &[0x02], b"22"));
    expected.extend(record(b"a", &[0x03], b"333"));
    assert_eq!(bytes, expected);
}

#[test]
fn test_encode_chunk_returns_bytes_written() {
    let mut encoder = Encoder::new(Vec::new(), 4).unwrap();
    let chunk = Chunk::new(&b"id"[..], vec![0u8; 200]);

    let written = encoder.encode_chunk(&chunk).unwrap();
    assert_eq!(written, 4 + 2 + 200);
    assert_eq!(written, chunk.wire_len(4));
    assert_eq!(encoder.get_ref().len(), written);
}

#[test]
fn test_to_wire_matches_encoder() {
    let chunk = Chunk::new(&b"key"[..], &b"value"[..]);
    let wire = chunk.to_wire(8).unwrap();
    assert_eq!(wire, encode_chunks(std::slice::from_ref(&chunk), 8).unwrap());
}

// =============================================================================
// Key Width Tests
// =============================================================================

#[test]
fn test_key_too_long_is_rejected() {
    let err = encode_chunks(&[Chunk::new(&b"abcdef"[..], &b"v"[..])], 4).unwrap_err();
    assert!(matches!(err, KlvError::KeyTooLong { len: 6, max: 4 }));
}

#[test]
fn test_key_too_long_stops_without_writing_that_chunk() {
    let chunks = vec![
        Chunk::new(&b"ok"[..], &b"1"[..]),
        Chunk::new(&b"toolong"[..], &b"2"[..]),
        Chunk::new(&b"ok"[..], &b"3"[..]),
    ];
    let mut encoder = Encoder::new(Vec::new(), 2).unwrap();

    let err = encoder.encode(&chunks).unwrap_err();
    assert!(matches!(err, KlvError::KeyTooLong { len: 7, max: 2 }));
    assert_eq!(encoder.into_inner(), record(b"ok", &[0x01], b"1"));
}

#[test]
fn test_encode_does_not_mutate_input() {
    let chunk = Chunk::new(&b"ab"[..], &b"v"[..]);
    let chunks = vec![chunk.clone()];

    encode_chunks(&chunks, 8).unwrap();

    assert_eq!(chunks[0].key(), b"ab");
    assert_eq!(chunks[0], chunk);
    assert!(!chunks[0].is_encoded());
}

#[test]
fn test_zero_key_width_is_rejected() {
    assert!(matches!(
        Encoder::new(Vec::new(), 0),
        Err(KlvError::Config(_))
    ));
    let config = CodecConfig::builder().key_width(0).build();
    assert!(Encoder::with_config(Vec::new(), &config).is_err());
}

// =============================================================================
// Sink Behaviour Tests
// =============================================================================

#[test]
fn test_partial_write_is_reported() {
    let mut encoder = Encoder::new(ShortWriter::new(4), 3).unwrap();
    let err = encoder
        .encode(&[Chunk::new(&b"abc"[..], &b"xyz"[..])])
        .unwrap_err();

    assert!(matches!(err, KlvError::PartialWrite { written: 4, expected: 7 }));
    assert_eq!(encoder.get_ref().written, b"abc\x03");
}

#[test]
fn test_partial_write_keeps_earlier_chunks() {
    let chunks = vec![
        Chunk::new(&b"a"[..], &b"1"[..]),
        Chunk::new(&b"b"[..], vec![0u8; 10]),
    ];
    let mut encoder = Encoder::new(ShortWriter::new(5), 1).unwrap();

    let err = encoder.encode(&chunks).unwrap_err();
    assert!(matches!(err, KlvError::PartialWrite { written: 5, expected: 12 }));
    assert_eq!(&encoder.get_ref().written[..3], &record(b"a", &[0x01], b"1")[..]);
}

#[test]
fn test_write_error_is_propagated() {
    let mut encoder = Encoder::new(FailingWriter, 1).unwrap();
    let err = encoder.encode(&[Chunk::new(&b"a"[..], &b"1"[..])]).unwrap_err();
    assert!(matches!(err, KlvError::Io(ref e) if e.kind() == ErrorKind::BrokenPipe));
}

#[test]
fn test_empty_input_writes_nothing() {
    let bytes = encode_chunks(&[], 4).unwrap();
    assert!(bytes.is_empty());
}
