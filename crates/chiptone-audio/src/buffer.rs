//! Signed 16-bit PCM sample buffers.

/// Full-scale multiplier used when converting unit-range signals to PCM.
pub const FULL_SCALE: f64 = 32767.0;

/// An owned sequence of signed 16-bit samples.
///
/// Values are one per frame for mono audio, or interleaved for
/// multi-channel audio. The `i16` element type enforces the
/// [-32768, 32767] range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SampleBuffer(Vec<i16>);

impl SampleBuffer {
    /// Wraps existing samples.
    pub fn new(samples: Vec<i16>) -> Self {
        Self(samples)
    }

    /// Creates `len` samples of silence.
    pub fn silent(len: usize) -> Self {
        Self(vec![0; len])
    }

    /// Number of sample values.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrows the samples.
    pub fn as_slice(&self) -> &[i16] {
        &self.0
    }

    /// Unwraps the samples.
    pub fn into_vec(self) -> Vec<i16> {
        self.0
    }

    /// Iterates over the samples.
    pub fn iter(&self) -> std::slice::Iter<'_, i16> {
        self.0.iter()
    }

    /// Largest absolute sample value (as `u16` so `-32768` fits).
    pub fn peak(&self) -> u16 {
        self.0.iter().map(|s| s.unsigned_abs()).max().unwrap_or(0)
    }

    /// Returns true if every sample is zero.
    pub fn is_silent(&self) -> bool {
        self.0.iter().all(|&s| s == 0)
    }

    /// Headerless little-endian PCM bytes, for sinks that accept raw PCM.
    pub fn to_pcm_bytes(&self) -> Vec<u8> {
        let mut pcm = Vec::with_capacity(self.0.len() * 2);
        for sample in &self.0 {
            pcm.extend_from_slice(&sample.to_le_bytes());
        }
        pcm
    }
}

impl From<Vec<i16>> for SampleBuffer {
    fn from(samples: Vec<i16>) -> Self {
        Self(samples)
    }
}

impl AsRef<[i16]> for SampleBuffer {
    fn as_ref(&self) -> &[i16] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a SampleBuffer {
    type Item = &'a i16;
    type IntoIter = std::slice::Iter<'a, i16>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Converts a unit-range value to a 16-bit sample: `round(value * 32767)`,
/// clipped to the `i16` range. NaN maps to 0.
pub fn to_pcm16(value: f64) -> i16 {
    (value * FULL_SCALE).round().clamp(i16::MIN as f64, i16::MAX as f64) as i16
}
