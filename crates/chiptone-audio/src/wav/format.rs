//! Header field computation.

use chiptone_spec::format::PCM_BITS_PER_SAMPLE;
use chiptone_spec::AudioFormat;

use crate::error::EncodingError;

use super::RIFF_OVERHEAD;

/// Checks that a format can be written as 16-bit PCM.
pub fn validate_format(format: &AudioFormat) -> Result<(), EncodingError> {
    if format.sample_rate == 0 {
        return Err(EncodingError::InvalidSampleRate {
            rate: format.sample_rate,
        });
    }
    if format.channels == 0 {
        return Err(EncodingError::InvalidChannelCount {
            channels: format.channels,
        });
    }
    if format.bits_per_sample != PCM_BITS_PER_SAMPLE {
        return Err(EncodingError::UnsupportedBitDepth {
            bits: format.bits_per_sample,
        });
    }
    Ok(())
}

/// Every numeric field of the canonical header, already range-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderFields {
    /// RIFF chunk size: `36 + data_len`.
    pub riff_size: u32,
    /// Channel count.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bytes per second.
    pub byte_rate: u32,
    /// Bytes per frame.
    pub block_align: u16,
    /// Bits per sample.
    pub bits_per_sample: u16,
    /// Payload length in bytes.
    pub data_len: u32,
}

impl HeaderFields {
    /// Computes header fields for `sample_count` interleaved values.
    pub fn compute(format: &AudioFormat, sample_count: usize) -> Result<Self, EncodingError> {
        validate_format(format)?;
        if sample_count % format.channels as usize != 0 {
            return Err(EncodingError::MisalignedFrames {
                samples: sample_count,
                channels: format.channels,
            });
        }

        let block_align = u16::try_from(format.block_align())
            .map_err(|_| EncodingError::FieldOverflow { field: "block align" })?;
        let byte_rate = u32::try_from(format.byte_rate())
            .map_err(|_| EncodingError::FieldOverflow { field: "byte rate" })?;
        let data_len = (sample_count as u64)
            .checked_mul(format.bytes_per_sample() as u64)
            .and_then(|len| u32::try_from(len).ok())
            .ok_or(EncodingError::FieldOverflow { field: "data size" })?;
        let riff_size = data_len
            .checked_add(RIFF_OVERHEAD)
            .ok_or(EncodingError::FieldOverflow { field: "RIFF size" })?;

        Ok(Self {
            riff_size,
            channels: format.channels,
            sample_rate: format.sample_rate,
            byte_rate,
            block_align,
            bits_per_sample: format.bits_per_sample,
            data_len,
        })
    }
}
