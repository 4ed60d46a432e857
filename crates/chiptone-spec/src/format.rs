//! Audio format parameters.

use serde::{Deserialize, Serialize};

/// Default sample rate for rendered sounds, in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 22050;

/// Bit depth produced by the synthesizer.
pub const PCM_BITS_PER_SAMPLE: u16 = 16;

/// Sample rate, channel count and bit depth of a PCM buffer.
///
/// Immutable description supplied by the caller; the encoder copies these
/// values verbatim into the container header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AudioFormat {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of interleaved channels (1 = mono).
    #[serde(default = "default_channels")]
    pub channels: u16,
    /// Bits per sample (16 for everything the synthesizer produces).
    #[serde(default = "default_bits_per_sample")]
    pub bits_per_sample: u16,
}

fn default_channels() -> u16 {
    1
}

fn default_bits_per_sample() -> u16 {
    PCM_BITS_PER_SAMPLE
}

impl AudioFormat {
    /// Creates a 16-bit mono format.
    pub fn mono(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            channels: 1,
            bits_per_sample: PCM_BITS_PER_SAMPLE,
        }
    }

    /// Creates a format with explicit fields.
    pub fn new(sample_rate: u32, channels: u16, bits_per_sample: u16) -> Self {
        Self {
            sample_rate,
            channels,
            bits_per_sample,
        }
    }

    /// Bytes per sample (per channel).
    pub fn bytes_per_sample(&self) -> u16 {
        self.bits_per_sample / 8
    }

    /// Block align (bytes per frame across all channels).
    pub fn block_align(&self) -> u32 {
        self.channels as u32 * self.bytes_per_sample() as u32
    }

    /// Byte rate (bytes per second).
    pub fn byte_rate(&self) -> u64 {
        self.sample_rate as u64 * self.block_align() as u64
    }

    /// Returns true for single-channel formats.
    pub fn is_mono(&self) -> bool {
        self.channels == 1
    }
}

impl Default for AudioFormat {
    fn default() -> Self {
        Self::mono(DEFAULT_SAMPLE_RATE)
    }
}
