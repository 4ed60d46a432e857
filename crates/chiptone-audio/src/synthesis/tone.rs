//! Single fixed-frequency tone.

use chiptone_spec::params::tone_frame_count;
use chiptone_spec::ToneParams;
use tracing::debug;

use crate::buffer::{to_pcm16, SampleBuffer};
use crate::error::SynthesisError;

use super::{check_frame_count, check_frequency, check_sample_rate, TWO_PI};

/// Sine tone parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ToneSynth {
    /// Frequency in Hz.
    pub frequency_hz: f64,
    /// Duration in milliseconds.
    pub duration_ms: u32,
    /// Amplitude scale in [0, 1].
    pub amplitude: f64,
}

impl ToneSynth {
    /// Creates a full-amplitude tone.
    pub fn new(frequency_hz: f64, duration_ms: u32) -> Self {
        Self {
            frequency_hz,
            duration_ms,
            amplitude: 1.0,
        }
    }

    /// Sets the amplitude scale.
    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Renders the tone at `sample_rate`.
    ///
    /// `sample[i] = round(sin(2π·f·i/rate) · amplitude · 32767)`, for
    /// `round(duration_ms / 1000 · rate)` frames. A zero duration yields an
    /// empty buffer and a zero amplitude yields silence of full length.
    pub fn synthesize(&self, sample_rate: u32) -> Result<SampleBuffer, SynthesisError> {
        check_sample_rate(sample_rate)?;
        check_frequency(self.frequency_hz)?;
        if !(0.0..=1.0).contains(&self.amplitude) {
            return Err(SynthesisError::InvalidAmplitude {
                amplitude: self.amplitude,
            });
        }

        let frames = check_frame_count(tone_frame_count(self.duration_ms, sample_rate))?;
        debug!(
            frequency_hz = self.frequency_hz,
            duration_ms = self.duration_ms,
            sample_rate,
            frames,
            "synthesizing tone"
        );

        if self.amplitude == 0.0 {
            return Ok(SampleBuffer::silent(frames));
        }

        let rate = sample_rate as f64;
        let samples = (0..frames)
            .map(|i| {
                let phase = TWO_PI * self.frequency_hz * i as f64 / rate;
                to_pcm16(phase.sin() * self.amplitude)
            })
            .collect();

        Ok(SampleBuffer::new(samples))
    }
}

impl From<&ToneParams> for ToneSynth {
    fn from(params: &ToneParams) -> Self {
        Self {
            frequency_hz: params.frequency_hz,
            duration_ms: params.duration_ms,
            amplitude: params.amplitude,
        }
    }
}

/// Synthesizes a single sine tone.
///
/// # Arguments
/// * `frequency_hz` - Tone frequency, must be finite and positive
/// * `duration_ms` - Duration in milliseconds (0 yields an empty buffer)
/// * `sample_rate` - Sample rate in Hz, must be positive
/// * `amplitude` - Amplitude scale in [0, 1] (0 yields silence)
///
/// # Example
/// ```
/// use chiptone_audio::synthesis::synthesize_tone;
///
/// let samples = synthesize_tone(440.0, 100, 22050, 0.8).unwrap();
/// assert_eq!(samples.len(), 2205);
/// ```
pub fn synthesize_tone(
    frequency_hz: f64,
    duration_ms: u32,
    sample_rate: u32,
    amplitude: f64,
) -> Result<SampleBuffer, SynthesisError> {
    ToneSynth::new(frequency_hz, duration_ms)
        .with_amplitude(amplitude)
        .synthesize(sample_rate)
}
