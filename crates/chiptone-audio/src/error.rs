//! Error types for synthesis, encoding and decoding.

use chiptone_spec::BackendError;
use thiserror::Error;

/// Result type for the render pipeline.
pub type AudioResult<T> = Result<T, AudioError>;

/// Invalid synthesis parameters, rejected before any sample is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SynthesisError {
    /// Sample rate of zero.
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: u32,
    },

    /// Frequency not finite or not positive.
    #[error("invalid frequency: {freq} Hz")]
    InvalidFrequency {
        /// The invalid frequency.
        freq: f64,
    },

    /// Amplitude not in [0, 1].
    #[error("invalid amplitude: {amplitude} (expected 0.0..=1.0)")]
    InvalidAmplitude {
        /// The invalid amplitude.
        amplitude: f64,
    },

    /// Note sequence without notes.
    #[error("note sequence is empty")]
    EmptySequence,

    /// Tempo not finite or not positive.
    #[error("invalid tempo: {bpm} bpm")]
    InvalidTempo {
        /// The invalid tempo.
        bpm: f64,
    },

    /// Subdivision not finite or not positive.
    #[error("invalid subdivision: {subdivision}")]
    InvalidSubdivision {
        /// The invalid subdivision.
        subdivision: f64,
    },

    /// A sequencer step rounds to zero frames.
    #[error("step of {subdivision} beat at {bpm} bpm rounds to zero frames at {rate} Hz")]
    StepTooShort {
        /// Tempo.
        bpm: f64,
        /// Subdivision.
        subdivision: f64,
        /// Sample rate.
        rate: u32,
    },

    /// Requested buffer cannot be represented in a container.
    #[error("buffer of {frames} frames exceeds the {max} frame limit")]
    TooLong {
        /// Requested frame count.
        frames: u64,
        /// Largest frame count the container can hold.
        max: u64,
    },
}

/// Inconsistent format parameters handed to the encoder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// Sample rate of zero.
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: u32,
    },

    /// Channel count of zero.
    #[error("invalid channel count: {channels}")]
    InvalidChannelCount {
        /// The invalid channel count.
        channels: u16,
    },

    /// Bit depth other than 16.
    #[error("unsupported bits per sample: {bits} (only 16-bit PCM is supported)")]
    UnsupportedBitDepth {
        /// The unsupported bit depth.
        bits: u16,
    },

    /// Sample count is not a whole number of frames.
    #[error("{samples} samples do not divide into frames of {channels} channels")]
    MisalignedFrames {
        /// Number of sample values.
        samples: usize,
        /// Channel count.
        channels: u16,
    },

    /// A header field would overflow its 32-bit slot.
    #[error("{field} overflows a 32-bit header field")]
    FieldOverflow {
        /// Name of the overflowing header field.
        field: &'static str,
    },
}

/// Malformed container bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Input shorter than a minimal header.
    #[error("container is {len} bytes, shorter than the 44-byte header")]
    TooShort {
        /// Input length.
        len: usize,
    },

    /// Missing "RIFF"/"WAVE" signature.
    #[error("missing RIFF/WAVE signature")]
    BadSignature,

    /// A required chunk was not found.
    #[error("missing '{0}' chunk")]
    MissingChunk(&'static str),

    /// The fmt chunk is shorter than 16 bytes.
    #[error("fmt chunk is {size} bytes, expected at least 16")]
    ShortFormatChunk {
        /// Declared fmt chunk size.
        size: u32,
    },

    /// Audio format tag other than uncompressed PCM.
    #[error("unsupported audio format tag {tag} (expected 1 = PCM)")]
    UnsupportedFormat {
        /// The format tag.
        tag: u16,
    },

    /// A chunk claims more bytes than the input holds.
    #[error("'{chunk}' chunk claims {claimed} bytes but only {available} remain")]
    Truncated {
        /// Chunk id.
        chunk: String,
        /// Declared size.
        claimed: u32,
        /// Bytes actually available.
        available: usize,
    },

    /// Header fields disagree with each other or with the payload.
    #[error("inconsistent header: {0}")]
    Inconsistent(String),

    /// The declared format itself is invalid.
    #[error(transparent)]
    Format(#[from] EncodingError),
}

/// Errors from the full render pipeline.
#[derive(Debug, Error)]
pub enum AudioError {
    /// Synthesis rejected its parameters.
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    /// Encoding rejected its format.
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// Container bytes could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AudioError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl BackendError for SynthesisError {
    fn code(&self) -> &'static str {
        match self {
            SynthesisError::InvalidSampleRate { .. } => "SYNTH_001",
            SynthesisError::InvalidFrequency { .. } => "SYNTH_002",
            SynthesisError::InvalidAmplitude { .. } => "SYNTH_003",
            SynthesisError::EmptySequence => "SYNTH_004",
            SynthesisError::InvalidTempo { .. } => "SYNTH_005",
            SynthesisError::InvalidSubdivision { .. } => "SYNTH_006",
            SynthesisError::StepTooShort { .. } => "SYNTH_007",
            SynthesisError::TooLong { .. } => "SYNTH_008",
        }
    }

    fn category(&self) -> &'static str {
        "synthesis"
    }
}

impl BackendError for EncodingError {
    fn code(&self) -> &'static str {
        match self {
            EncodingError::InvalidSampleRate { .. } => "ENCODE_001",
            EncodingError::InvalidChannelCount { .. } => "ENCODE_002",
            EncodingError::UnsupportedBitDepth { .. } => "ENCODE_003",
            EncodingError::MisalignedFrames { .. } => "ENCODE_004",
            EncodingError::FieldOverflow { .. } => "ENCODE_005",
        }
    }

    fn category(&self) -> &'static str {
        "encoding"
    }
}

impl BackendError for DecodeError {
    fn code(&self) -> &'static str {
        match self {
            DecodeError::TooShort { .. } => "DECODE_001",
            DecodeError::BadSignature => "DECODE_002",
            DecodeError::MissingChunk(_) => "DECODE_003",
            DecodeError::ShortFormatChunk { .. } => "DECODE_004",
            DecodeError::UnsupportedFormat { .. } => "DECODE_005",
            DecodeError::Truncated { .. } => "DECODE_006",
            DecodeError::Inconsistent(_) => "DECODE_007",
            DecodeError::Format(inner) => inner.code(),
        }
    }

    fn category(&self) -> &'static str {
        "decoding"
    }
}

impl BackendError for AudioError {
    fn code(&self) -> &'static str {
        match self {
            AudioError::Synthesis(e) => e.code(),
            AudioError::Encoding(e) => e.code(),
            AudioError::Decode(e) => e.code(),
            AudioError::InvalidParameter { .. } => "AUDIO_001",
            AudioError::Io(_) => "AUDIO_002",
        }
    }

    fn category(&self) -> &'static str {
        match self {
            AudioError::Synthesis(e) => e.category(),
            AudioError::Encoding(e) => e.category(),
            AudioError::Decode(e) => e.category(),
            AudioError::InvalidParameter { .. } | AudioError::Io(_) => "audio",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_param_helper() {
        let err = AudioError::invalid_param("channels", "synthesis renders mono audio");
        assert!(err.to_string().contains("channels"));
        assert!(err.to_string().contains("mono"));
        assert_eq!(err.code(), "AUDIO_001");
    }

    #[test]
    fn test_codes_pass_through_umbrella() {
        let err: AudioError = SynthesisError::EmptySequence.into();
        assert_eq!(err.code(), "SYNTH_004");
        assert_eq!(err.category(), "synthesis");

        let err: AudioError = EncodingError::InvalidSampleRate { rate: 0 }.into();
        assert_eq!(err.code(), "ENCODE_001");
        assert_eq!(err.to_string(), "invalid sample rate: 0");
    }

    #[test]
    fn test_decode_wraps_format_errors() {
        let err: DecodeError = EncodingError::UnsupportedBitDepth { bits: 24 }.into();
        assert_eq!(err.code(), "ENCODE_003");
        assert!(err.to_string().contains("24"));
    }
}
