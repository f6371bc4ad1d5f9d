//! # klv
//!
//! Streaming codec for Key-Length-Value records with BER encoded lengths,
//! the framing used by SMPTE 336M metadata, MISB telemetry and similar tagged
//! binary protocols.
//!
//! - Fixed-width keys (the width is agreed out of band)
//! - Minimal BER length fields, short and long form
//! - Decoding from any `std::io::Read`, encoding to any `std::io::Write`
//! - Bounded allocation for untrusted input
//!
//! ## Architecture Overview
//!
//! ```text
//!   ┌─────────────┐    bytes    ┌─────────────┐
//!   │   Encoder   │ ──────────▶ │   Decoder   │
//!   │  (Write)    │             │   (Read)    │
//!   └──────┬──────┘             └──────┬──────┘
//!          │                           │
//!          └────────────┬──────────────┘
//!                       ▼
//!               ┌──────────────┐
//!               │  BER Length  │
//!               └──────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use klv::{Chunk, Decoder, Encoder};
//!
//! let chunks = vec![
//!     Chunk::new(&b"hello"[..], &b"world"[..]),
//!     Chunk::new(&b"user"[..], &b"xprgv"[..]),
//! ];
//!
//! let mut buffer = Vec::new();
//! Encoder::new(&mut buffer, 5)?.encode(&chunks)?;
//!
//! let decoded = Decoder::new(buffer.as_slice(), 5)?.take_all()?;
//! assert_eq!(decoded.len(), 2);
//! assert_eq!(decoded[0].value(), b"world");
//! assert_eq!(decoded[1].key(), b"user\0");
//! # Ok::<(), klv::KlvError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod ber;
pub mod chunk;
pub mod decoder;
pub mod encoder;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{KlvError, Result};
pub use config::{CodecConfig, CodecConfigBuilder};
pub use chunk::{Chunk, Chunks};
pub use decoder::{decode_chunks, ChunkIter, Decoder, TakeAllError};
pub use encoder::{encode_chunks, Encoder};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
