//! Byte-exact RIFF/WAVE container encoding and decoding.
//!
//! The encoder always writes the canonical 44-byte header (RIFF, `fmt `,
//! `data`) followed by the little-endian PCM payload. It carries no
//! timestamps or variable metadata, so identical samples always produce
//! identical bytes. The decoder is more lenient: it walks the chunk list,
//! skipping chunks it does not understand.

mod container;
mod format;
mod pcm;
mod writer;


pub use container::ContainerBuffer;
pub use format::{validate_format, HeaderFields};
pub use pcm::{compute_pcm_hash, decode_container, extract_pcm_data, DecodedContainer};
pub use writer::{encode_container, write_wav};

/// Length of the canonical header in bytes.
pub const HEADER_LEN: usize = 44;

/// Header bytes counted by the RIFF chunk size (everything after "RIFF" and
/// the size field itself, minus the payload).
pub const RIFF_OVERHEAD: u32 = 36;

/// Most 16-bit mono frames whose payload still fits the 32-bit RIFF size.
pub const MAX_MONO_FRAMES: u64 = (u32::MAX as u64 - RIFF_OVERHEAD as u64) / 2;
