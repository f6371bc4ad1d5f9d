//! KLV command line tool
//!
//! Encodes key/value pairs into a KLV stream and dumps existing streams.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use klv::config::{DEFAULT_KEY_WIDTH, DEFAULT_MAX_VALUE_LENGTH};
use klv::{Chunk, Chunks, CodecConfig, Decoder, Encoder, KlvError};
use tracing_subscriber::{fmt, EnvFilter};

/// KLV stream tool
#[derive(Parser, Debug)]
#[command(name = "klv")]
#[command(about = "Encode and inspect Key-Length-Value streams")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode KEY=VALUE pairs into a KLV stream
    Encode {
        /// Key width in bytes
        #[arg(short, long, default_value_t = DEFAULT_KEY_WIDTH)]
        key_width: usize,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Treat keys and values as hex strings
        #[arg(long)]
        hex: bool,

        /// Records to encode, in order
        #[arg(required = true)]
        pairs: Vec<String>,
    },

    /// Print the chunks of a KLV stream
    Decode {
        /// Key width in bytes
        #[arg(short, long, default_value_t = DEFAULT_KEY_WIDTH)]
        key_width: usize,

        /// Largest value accepted, in bytes
        #[arg(long, default_value_t = DEFAULT_MAX_VALUE_LENGTH)]
        max_value: u64,

        /// Input file (stdin if omitted)
        input: Option<PathBuf>,
    },

    /// Encode two sample records and decode them back
    Demo,
}

fn main() {
    // Logs go to stderr so stdout can carry the stream
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,klv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    tracing::debug!("klv v{}", klv::VERSION);

    let result = match args.command {
        Commands::Encode {
            key_width,
            output,
            hex,
            pairs,
        } => encode(key_width, output, hex, &pairs),
        Commands::Decode {
            key_width,
            max_value,
            input,
        } => decode(key_width, max_value, input),
        Commands::Demo => demo(),
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

// =============================================================================
// Commands
// =============================================================================

fn encode(key_width: usize, output: Option<PathBuf>, hex: bool, pairs: &[String]) -> klv::Result<()> {
    let chunks = pairs
        .iter()
        .map(|pair| parse_pair(pair, hex))
        .collect::<klv::Result<Vec<_>>>()?;

    let sink: Box<dyn Write> = match &output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };

    let mut encoder = Encoder::new(BufWriter::new(sink), key_width)?;
    encoder.encode(&chunks)?;
    encoder.flush()?;

    tracing::info!("Encoded {} chunks", chunks.len());
    Ok(())
}

fn decode(key_width: usize, max_value: u64, input: Option<PathBuf>) -> klv::Result<()> {
    let source: Box<dyn Read> = match &input {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin().lock()),
    };

    let config = CodecConfig::builder()
        .key_width(key_width)
        .max_value_length(max_value)
        .build();
    let mut decoder = Decoder::with_config(BufReader::new(source), &config)?;

    for (index, chunk) in decoder.iter().enumerate() {
        let chunk = chunk?;
        println!(
            "{}: key={} length={} value={}",
            index,
            render(chunk.key()),
            to_hex(chunk.length_field().unwrap_or_default()),
            render(chunk.value()),
        );
    }

    tracing::info!("Decoded {} chunks", decoder.chunks_read());
    Ok(())
}

fn demo() -> klv::Result<()> {
    let chunks = Chunks::from(vec![
        Chunk::new(&b"hello"[..], &b"world"[..]),
        Chunk::new(&b"user"[..], &b"xprgv"[..]),
    ]);

    for chunk in &chunks {
        println!("encoded: {} {}", render(chunk.key()), render(chunk.value()));
    }
    println!();

    let bytes = klv::encode_chunks(&chunks, 5)?;
    let decoded = klv::decode_chunks(&bytes, 5)?;

    for chunk in &decoded {
        println!("decoded: {} {}", render(chunk.key()), render(chunk.value()));
    }
    Ok(())
}

// =============================================================================
// Helpers
// =============================================================================

fn parse_pair(pair: &str, hex: bool) -> klv::Result<Chunk> {
    let (key, value) = pair
        .split_once('=')
        .ok_or_else(|| KlvError::Config(format!("expected KEY=VALUE, got {:?}", pair)))?;

    if hex {
        Ok(Chunk::new(from_hex(key)?, from_hex(value)?))
    } else {
        Ok(Chunk::new(key.as_bytes().to_vec(), value.as_bytes().to_vec()))
    }
}

fn from_hex(s: &str) -> klv::Result<Vec<u8>> {
    if s.len() % 2 != 0 || !s.is_ascii() {
        return Err(KlvError::Config(format!("invalid hex string {:?}", s)));
    }
    (0..s.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&s[i..i + 2], 16)
                .map_err(|_| KlvError::Config(format!("invalid hex string {:?}", s)))
        })
        .collect()
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Printable text as a quoted string, anything else as hex
fn render(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) if !s.chars().any(|c| c.is_control() && c != '\0') => {
            format!("{:?}", s.trim_end_matches('\0'))
        }
        _ => format!("0x{}", to_hex(bytes)),
    }
}
