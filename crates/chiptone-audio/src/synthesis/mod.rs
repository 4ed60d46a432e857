//! Signal synthesis.
//!
//! - `tone` - Single fixed-frequency sine tone
//! - `sequence` - Looping step sequencer with a lead and sub-octave voice
//!
//! Both synthesizers are pure functions of their arguments: they allocate a
//! fresh [`SampleBuffer`](crate::buffer::SampleBuffer), share no state and
//! can run concurrently from any number of threads.

pub mod sequence;
pub mod tone;

pub use chiptone_spec::midi_to_frequency;
pub use sequence::{synthesize_sequence, SequenceSynth};
pub use tone::{synthesize_tone, ToneSynth};

use crate::buffer::SampleBuffer;
use crate::error::SynthesisError;
use crate::wav::MAX_MONO_FRAMES;

/// 2π.
pub const TWO_PI: f64 = std::f64::consts::TAU;

/// Common trait for the synthesizers.
pub trait Synthesizer {
    /// Renders the full buffer at `sample_rate`.
    fn synthesize(&self, sample_rate: u32) -> Result<SampleBuffer, SynthesisError>;

    /// Whether the buffer is meant to be looped by the playback layer.
    fn is_looping(&self) -> bool {
        false
    }
}

impl Synthesizer for ToneSynth {
    fn synthesize(&self, sample_rate: u32) -> Result<SampleBuffer, SynthesisError> {
        ToneSynth::synthesize(self, sample_rate)
    }
}

impl Synthesizer for SequenceSynth {
    fn synthesize(&self, sample_rate: u32) -> Result<SampleBuffer, SynthesisError> {
        SequenceSynth::synthesize(self, sample_rate)
    }

    fn is_looping(&self) -> bool {
        true
    }
}

fn check_sample_rate(sample_rate: u32) -> Result<(), SynthesisError> {
    if sample_rate == 0 {
        return Err(SynthesisError::InvalidSampleRate { rate: sample_rate });
    }
    Ok(())
}

fn check_frequency(freq: f64) -> Result<(), SynthesisError> {
    if !freq.is_finite() || freq <= 0.0 {
        return Err(SynthesisError::InvalidFrequency { freq });
    }
    Ok(())
}

/// Rejects buffers too long for a 16-bit mono container.
fn check_frame_count(frames: u64) -> Result<usize, SynthesisError> {
    if frames > MAX_MONO_FRAMES {
        return Err(SynthesisError::TooLong {
            frames,
            max: MAX_MONO_FRAMES,
        });
    }
    usize::try_from(frames).map_err(|_| SynthesisError::TooLong {
        frames,
        max: MAX_MONO_FRAMES,
    })
}
