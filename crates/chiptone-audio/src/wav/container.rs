//! Encoded container bytes.

use std::io::Write;

use chiptone_spec::AudioFormat;

use crate::buffer::SampleBuffer;
use crate::error::{DecodeError, EncodingError};

use super::format::HeaderFields;
use super::pcm::{decode_container, DecodedContainer};
use super::writer::{encode_container, put_header};
use super::{HEADER_LEN, RIFF_OVERHEAD};

/// A complete WAV file in canonical layout: the 44-byte header followed by
/// the PCM payload.
///
/// Terminal artifact: it is never mutated after encoding and can be written
/// verbatim to disk and read back bit-identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerBuffer(Vec<u8>);

impl ContainerBuffer {
    pub(super) fn from_canonical(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Parses `bytes` and re-encodes them canonically.
    ///
    /// Canonical input (anything this crate wrote) comes back byte-identical;
    /// files with extra chunks come back without them.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let decoded = decode_container(bytes)?;
        Ok(encode_container(decoded.samples, &decoded.format)?)
    }

    /// Header-only container: a valid, playable file with no frames.
    pub fn silence(format: &AudioFormat) -> Result<Self, EncodingError> {
        encode_container(SampleBuffer::default(), format)
    }

    /// Header-only container in the default format. Infallible.
    pub fn default_silence() -> Self {
        let format = AudioFormat::default();
        let fields = HeaderFields {
            riff_size: RIFF_OVERHEAD,
            channels: format.channels,
            sample_rate: format.sample_rate,
            byte_rate: format.byte_rate() as u32,
            block_align: format.block_align() as u16,
            bits_per_sample: format.bits_per_sample,
            data_len: 0,
        };
        let mut bytes = Vec::with_capacity(HEADER_LEN);
        put_header(&mut bytes, &fields);
        Self(bytes)
    }

    /// Borrows the file bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Unwraps the file bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Total length in bytes, header included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: even a silent container carries its header.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The PCM payload without the header.
    pub fn pcm_data(&self) -> &[u8] {
        &self.0[HEADER_LEN.min(self.0.len())..]
    }

    /// BLAKE3 hash (hex) of the PCM payload only.
    pub fn pcm_hash(&self) -> String {
        blake3::hash(self.pcm_data()).to_hex().to_string()
    }

    /// Writes the file bytes to `writer`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.0)
    }

    /// Reads the samples and format back.
    pub fn decode(&self) -> Result<DecodedContainer, DecodeError> {
        decode_container(&self.0)
    }
}

impl AsRef<[u8]> for ContainerBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
