//! Sound parameters: tones, step sequences and envelopes.

use serde::{Deserialize, Serialize};

use crate::note::Note;

/// Default amplitude scale for tones.
pub const DEFAULT_AMPLITUDE: f64 = 1.0;

/// Default step subdivision (one sixteenth note per step at 4/4).
pub const DEFAULT_SUBDIVISION: f64 = 0.25;

/// The attack window never exceeds `frames_per_step / ATTACK_CAP_DIVISOR`.
pub const ATTACK_CAP_DIVISOR: usize = 10;

/// The release window never exceeds `frames_per_step / RELEASE_CAP_DIVISOR`.
pub const RELEASE_CAP_DIVISOR: usize = 6;

/// Per-step fade-in/fade-out shape, in frames.
///
/// Sustain is always 1.0 between the two ramps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvelopeSpec {
    /// Requested length of the 0 to 1 ramp at the start of each step.
    #[serde(default)]
    pub attack_frames: u32,
    /// Requested length of the 1 to 0 ramp at the end of each step.
    #[serde(default)]
    pub release_frames: u32,
}

impl EnvelopeSpec {
    /// Creates an envelope spec.
    pub fn new(attack_frames: u32, release_frames: u32) -> Self {
        Self {
            attack_frames,
            release_frames,
        }
    }

    /// Attack and release windows actually applied to a step of
    /// `frames_per_step` frames.
    ///
    /// Both windows are capped to a fraction of the step, so they never
    /// overlap and never exceed half of the step each.
    pub fn effective_windows(&self, frames_per_step: usize) -> (usize, usize) {
        let attack = (self.attack_frames as usize).min(frames_per_step / ATTACK_CAP_DIVISOR);
        let release = (self.release_frames as usize).min(frames_per_step / RELEASE_CAP_DIVISOR);
        (attack, release)
    }

    /// Returns true if either requested window is larger than its cap.
    pub fn is_clamped(&self, frames_per_step: usize) -> bool {
        let (attack, release) = self.effective_windows(frames_per_step);
        attack < self.attack_frames as usize || release < self.release_frames as usize
    }
}

/// A single fixed-frequency tone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToneParams {
    /// Tone frequency in Hz.
    pub frequency_hz: f64,
    /// Tone duration in milliseconds.
    pub duration_ms: u32,
    /// Amplitude scale in [0, 1].
    #[serde(default = "default_amplitude")]
    pub amplitude: f64,
}

fn default_amplitude() -> f64 {
    DEFAULT_AMPLITUDE
}

impl ToneParams {
    /// Creates tone parameters at full amplitude.
    pub fn new(frequency_hz: f64, duration_ms: u32) -> Self {
        Self {
            frequency_hz,
            duration_ms,
            amplitude: DEFAULT_AMPLITUDE,
        }
    }

    /// Sets the amplitude scale.
    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Number of frames this tone renders to at `sample_rate`.
    pub fn frame_count(&self, sample_rate: u32) -> u64 {
        tone_frame_count(self.duration_ms, sample_rate)
    }
}

/// A looping step sequence: one note per fixed-length step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SequenceParams {
    /// Notes in playback order.
    pub notes: Vec<Note>,
    /// Tempo in beats per minute.
    pub bpm: f64,
    /// Step length as a fraction of a beat.
    #[serde(default = "default_subdivision")]
    pub subdivision: f64,
    /// Per-step envelope.
    #[serde(default)]
    pub envelope: EnvelopeSpec,
}

fn default_subdivision() -> f64 {
    DEFAULT_SUBDIVISION
}

impl SequenceParams {
    /// Creates sequence parameters with the default subdivision and a flat
    /// envelope.
    pub fn new(notes: impl IntoIterator<Item = Note>, bpm: f64) -> Self {
        Self {
            notes: notes.into_iter().collect(),
            bpm,
            subdivision: DEFAULT_SUBDIVISION,
            envelope: EnvelopeSpec::default(),
        }
    }

    /// Sets the step subdivision.
    pub fn with_subdivision(mut self, subdivision: f64) -> Self {
        self.subdivision = subdivision;
        self
    }

    /// Sets the per-step envelope.
    pub fn with_envelope(mut self, envelope: EnvelopeSpec) -> Self {
        self.envelope = envelope;
        self
    }

    /// Frames per step at `sample_rate`.
    pub fn frames_per_step(&self, sample_rate: u32) -> u64 {
        frames_per_step(sample_rate, self.bpm, self.subdivision)
    }
}

/// The sound a request renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Sound {
    /// Single fixed-frequency tone.
    Tone(ToneParams),
    /// Looping step sequence.
    Sequence(SequenceParams),
}

impl Sound {
    /// Returns the kind name used in JSON.
    pub fn kind(&self) -> &'static str {
        match self {
            Sound::Tone(_) => "tone",
            Sound::Sequence(_) => "sequence",
        }
    }

    /// Returns true if the rendered buffer is meant to loop.
    pub fn is_looping(&self) -> bool {
        matches!(self, Sound::Sequence(_))
    }
}

/// Frames for a tone of `duration_ms` at `sample_rate`: `round(ms / 1000 * rate)`.
pub fn tone_frame_count(duration_ms: u32, sample_rate: u32) -> u64 {
    (duration_ms as f64 / 1000.0 * sample_rate as f64).round() as u64
}

/// Frames per sequencer step: `round(rate * 60 / bpm * subdivision)`.
///
/// Non-finite intermediate values saturate (`as` casts), so callers must
/// validate `bpm` and `subdivision` first.
pub fn frames_per_step(sample_rate: u32, bpm: f64, subdivision: f64) -> u64 {
    (sample_rate as f64 * 60.0 / bpm * subdivision).round() as u64
}
