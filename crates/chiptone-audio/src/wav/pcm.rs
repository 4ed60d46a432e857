//! Container decoding and PCM payload hashing.

use chiptone_spec::AudioFormat;

use crate::buffer::SampleBuffer;
use crate::error::DecodeError;

use super::format::validate_format;
use super::HEADER_LEN;

/// Samples and format read back from a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedContainer {
    /// Format declared by the `fmt ` chunk.
    pub format: AudioFormat,
    /// Interleaved samples from the `data` chunk.
    pub samples: SampleBuffer,
}

impl DecodedContainer {
    /// Number of frames (samples per channel).
    pub fn num_frames(&self) -> usize {
        self.samples.len() / self.format.channels.max(1) as usize
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.num_frames() as f64 / self.format.sample_rate as f64
    }
}

struct Chunk<'a> {
    id: [u8; 4],
    body: &'a [u8],
    claimed: u32,
}

impl Chunk<'_> {
    fn name(&self) -> String {
        String::from_utf8_lossy(&self.id).into_owned()
    }
}

/// Walks the chunk list after the RIFF/WAVE preamble. Odd-sized chunks are
/// followed by one pad byte.
fn chunks(bytes: &[u8]) -> impl Iterator<Item = Chunk<'_>> {
    let mut pos: usize = 12;
    std::iter::from_fn(move || {
        if pos.saturating_add(8) > bytes.len() {
            return None;
        }
        let mut id = [0u8; 4];
        id.copy_from_slice(&bytes[pos..pos + 4]);
        let claimed = read_u32(bytes, pos + 4);
        let start = pos + 8;
        let end = start.saturating_add(claimed as usize).min(bytes.len());
        let body = &bytes[start..end];

        pos = start
            .saturating_add(claimed as usize)
            .saturating_add(claimed as usize % 2);
        Some(Chunk { id, body, claimed })
    })
}

fn read_u16(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

fn check_preamble(bytes: &[u8]) -> Result<(), DecodeError> {
    if bytes.len() < HEADER_LEN {
        return Err(DecodeError::TooShort { len: bytes.len() });
    }
    if &bytes[0..4] != b"RIFF" || &bytes[8..12] != b"WAVE" {
        return Err(DecodeError::BadSignature);
    }
    Ok(())
}

fn complete<'a>(chunk: &Chunk<'a>) -> Result<&'a [u8], DecodeError> {
    if chunk.body.len() < chunk.claimed as usize {
        return Err(DecodeError::Truncated {
            chunk: chunk.name(),
            claimed: chunk.claimed,
            available: chunk.body.len(),
        });
    }
    Ok(chunk.body)
}

fn parse_fmt(body: &[u8], claimed: u32) -> Result<AudioFormat, DecodeError> {
    if body.len() < 16 {
        return Err(DecodeError::ShortFormatChunk { size: claimed });
    }
    let tag = read_u16(body, 0);
    if tag != 1 {
        return Err(DecodeError::UnsupportedFormat { tag });
    }
    let format = AudioFormat::new(read_u32(body, 4), read_u16(body, 2), read_u16(body, 14));
    validate_format(&format)?;

    let byte_rate = read_u32(body, 8) as u64;
    let block_align = read_u16(body, 12) as u32;
    if block_align != format.block_align() {
        return Err(DecodeError::Inconsistent(format!(
            "block align {} does not match {} channels of {} bits",
            block_align, format.channels, format.bits_per_sample
        )));
    }
    if byte_rate != format.byte_rate() {
        return Err(DecodeError::Inconsistent(format!(
            "byte rate {} does not match {} Hz x {} bytes per frame",
            byte_rate, format.sample_rate, block_align
        )));
    }
    Ok(format)
}

/// Parses a RIFF/WAVE container holding 16-bit PCM.
///
/// Unknown chunks are skipped. The `fmt ` chunk must precede `data`, and the
/// payload length must be a whole number of frames.
pub fn decode_container(bytes: &[u8]) -> Result<DecodedContainer, DecodeError> {
    check_preamble(bytes)?;

    let mut format = None;
    for chunk in chunks(bytes) {
        match &chunk.id {
            b"fmt " => {
                let body = complete(&chunk)?;
                format = Some(parse_fmt(body, chunk.claimed)?);
            }
            b"data" => {
                let format = format.ok_or(DecodeError::MissingChunk("fmt "))?;
                let body = complete(&chunk)?;
                if body.len() % format.block_align() as usize != 0 {
                    return Err(DecodeError::Inconsistent(format!(
                        "data size {} is not a multiple of block align {}",
                        body.len(),
                        format.block_align()
                    )));
                }
                let samples = body
                    .chunks_exact(2)
                    .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
                    .collect();
                return Ok(DecodedContainer {
                    format,
                    samples: SampleBuffer::new(samples),
                });
            }
            _ => {}
        }
    }

    Err(match format {
        None => DecodeError::MissingChunk("fmt "),
        Some(_) => DecodeError::MissingChunk("data"),
    })
}

/// Extracts the PCM payload from a WAV file buffer.
///
/// Used for comparing WAV files by their audio content only.
///
/// # Returns
/// The `data` chunk body, or None if the buffer is not a RIFF/WAVE file or
/// the chunk is missing or truncated
pub fn extract_pcm_data(wav_data: &[u8]) -> Option<&[u8]> {
    check_preamble(wav_data).ok()?;
    chunks(wav_data)
        .find(|chunk| &chunk.id == b"data")
        .and_then(|chunk| complete(&chunk).ok())
}

/// BLAKE3 hash (hex) of the PCM payload of a WAV file, or None if the
/// payload cannot be located.
pub fn compute_pcm_hash(wav_data: &[u8]) -> Option<String> {
    extract_pcm_data(wav_data).map(|pcm| blake3::hash(pcm).to_hex().to_string())
}
