//! Canonical container writer.

use std::io::Write;

use chiptone_spec::AudioFormat;
use tracing::debug;

use crate::buffer::SampleBuffer;
use crate::error::{AudioResult, EncodingError};

use super::container::ContainerBuffer;
use super::format::HeaderFields;
use super::HEADER_LEN;

/// PCM format tag.
const FORMAT_PCM: u16 = 1;

/// Size of the PCM `fmt ` chunk body.
const FMT_CHUNK_LEN: u32 = 16;

/// Wraps `samples` in a canonical WAV container.
///
/// Fails only if `format` is inconsistent (zero sample rate, zero channels,
/// bit depth other than 16) or the sample count does not fit the header.
///
/// # Example
/// ```
/// use chiptone_audio::buffer::SampleBuffer;
/// use chiptone_audio::wav::encode_container;
/// use chiptone_spec::AudioFormat;
///
/// let container = encode_container(SampleBuffer::silent(100), &AudioFormat::mono(22050)).unwrap();
/// assert_eq!(container.len(), 244);
/// ```
pub fn encode_container(
    samples: SampleBuffer,
    format: &AudioFormat,
) -> Result<ContainerBuffer, EncodingError> {
    let fields = HeaderFields::compute(format, samples.len())?;
    debug!(
        samples = samples.len(),
        sample_rate = fields.sample_rate,
        channels = fields.channels,
        data_len = fields.data_len,
        "encoding container"
    );

    let mut bytes = Vec::with_capacity(HEADER_LEN + fields.data_len as usize);
    put_header(&mut bytes, &fields);
    for sample in samples.iter() {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    Ok(ContainerBuffer::from_canonical(bytes))
}

/// Writes `samples` as a complete WAV file to `writer`.
pub fn write_wav<W: Write>(
    writer: &mut W,
    format: &AudioFormat,
    samples: &SampleBuffer,
) -> AudioResult<()> {
    let fields = HeaderFields::compute(format, samples.len())?;
    let mut header = Vec::with_capacity(HEADER_LEN);
    put_header(&mut header, &fields);
    writer.write_all(&header)?;
    writer.write_all(&samples.to_pcm_bytes())?;
    writer.flush()?;
    Ok(())
}

pub(super) fn put_header(out: &mut Vec<u8>, fields: &HeaderFields) {
    // RIFF header
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&fields.riff_size.to_le_bytes());
    out.extend_from_slice(b"WAVE");

    // fmt chunk
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&FMT_CHUNK_LEN.to_le_bytes());
    out.extend_from_slice(&FORMAT_PCM.to_le_bytes());
    out.extend_from_slice(&fields.channels.to_le_bytes());
    out.extend_from_slice(&fields.sample_rate.to_le_bytes());
    out.extend_from_slice(&fields.byte_rate.to_le_bytes());
    out.extend_from_slice(&fields.block_align.to_le_bytes());
    out.extend_from_slice(&fields.bits_per_sample.to_le_bytes());

    // data chunk
    out.extend_from_slice(b"data");
    out.extend_from_slice(&fields.data_len.to_le_bytes());
}
