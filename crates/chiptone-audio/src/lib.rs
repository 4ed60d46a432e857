//! chiptone synthesizer and container encoder
//!
//! This crate turns tone and step-sequence parameters into byte-exact WAV
//! files. Two stages, both pure functions of their inputs:
//!
//! - **Synthesis** - single sine tones and looping two-voice step sequences,
//!   rendered to signed 16-bit mono samples
//! - **Encoding** - the canonical 44-byte RIFF/WAVE header plus the
//!   little-endian PCM payload
//!
//! # Determinism
//!
//! Given the same parameters, the output is bit-identical across runs. No
//! randomness, no timestamps, no shared state: every call allocates and
//! returns a fresh buffer, so renders can run concurrently.
//!
//! # Example
//!
//! ```
//! use chiptone_audio::{encode_container, synthesize_tone};
//! use chiptone_spec::AudioFormat;
//!
//! let samples = synthesize_tone(660.0, 90, 22050, 0.7).unwrap();
//! let container = encode_container(samples, &AudioFormat::mono(22050)).unwrap();
//!
//! assert_eq!(&container.as_bytes()[0..4], b"RIFF");
//! println!("PCM hash: {}", container.pcm_hash());
//! ```
//!
//! # Crate Structure
//!
//! - [`generate`] - Request rendering with silence fallback
//! - [`buffer`] - 16-bit sample buffers
//! - [`envelope`] - Per-step attack/release envelope
//! - [`synthesis`] - Tone and sequence synthesizers
//! - [`wav`] - Container encoder and decoder

pub mod buffer;
pub mod envelope;
pub mod error;
pub mod generate;
pub mod synthesis;
pub mod wav;

// Re-export main types at crate root
pub use buffer::SampleBuffer;
pub use error::{AudioError, AudioResult, DecodeError, EncodingError, SynthesisError};
pub use generate::{render, render_or_silence, LoopPoints, RenderResult};
pub use synthesis::{synthesize_sequence, synthesize_tone, Synthesizer};
pub use wav::{decode_container, encode_container, ContainerBuffer, DecodedContainer};
