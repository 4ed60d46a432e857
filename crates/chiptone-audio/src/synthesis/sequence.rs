//! Looping step sequencer.
//!
//! Plays one note per fixed-length step, once through the whole note list.
//! Each frame mixes a lead sine with a sub-octave voice derived from the
//! same phase:
//!
//! ```text
//! sample = round(env(pos) · (0.6·sin(φ) + 0.4·sin(φ/2)) · 32767)
//! ```
//!
//! The phase φ runs continuously across the whole buffer and is wrapped to
//! [0, 2π); it is never reset at step boundaries, so consecutive notes join
//! without a phase jump in the lead voice.

use chiptone_spec::params::frames_per_step;
use chiptone_spec::{EnvelopeSpec, Note, SequenceParams};
use tracing::debug;

use crate::buffer::{to_pcm16, SampleBuffer};
use crate::envelope::StepEnvelope;
use crate::error::SynthesisError;

use super::{check_frame_count, check_sample_rate, TWO_PI};

/// Mix level of the lead voice.
pub const LEAD_MIX: f64 = 0.6;

/// Mix level of the sub-octave voice.
pub const BASS_MIX: f64 = 0.4;

/// Step sequencer parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceSynth {
    /// Notes in playback order.
    pub notes: Vec<Note>,
    /// Tempo in beats per minute.
    pub bpm: f64,
    /// Step length as a fraction of a beat.
    pub subdivision: f64,
    /// Per-step envelope.
    pub envelope: EnvelopeSpec,
}

impl SequenceSynth {
    /// Creates a sequencer with a flat envelope.
    pub fn new(notes: impl IntoIterator<Item = Note>, bpm: f64, subdivision: f64) -> Self {
        Self {
            notes: notes.into_iter().collect(),
            bpm,
            subdivision,
            envelope: EnvelopeSpec::default(),
        }
    }

    /// Sets the per-step envelope.
    pub fn with_envelope(mut self, envelope: EnvelopeSpec) -> Self {
        self.envelope = envelope;
        self
    }

    /// Frames per step at `sample_rate`, after validating the timing
    /// parameters.
    pub fn frames_per_step(&self, sample_rate: u32) -> Result<usize, SynthesisError> {
        check_sample_rate(sample_rate)?;
        if !self.bpm.is_finite() || self.bpm <= 0.0 {
            return Err(SynthesisError::InvalidTempo { bpm: self.bpm });
        }
        if !self.subdivision.is_finite() || self.subdivision <= 0.0 {
            return Err(SynthesisError::InvalidSubdivision {
                subdivision: self.subdivision,
            });
        }

        let frames = frames_per_step(sample_rate, self.bpm, self.subdivision);
        if frames == 0 {
            return Err(SynthesisError::StepTooShort {
                bpm: self.bpm,
                subdivision: self.subdivision,
                rate: sample_rate,
            });
        }
        check_frame_count(frames)
    }

    /// Renders one pass through the note list at `sample_rate`.
    ///
    /// The buffer holds `notes.len() · frames_per_step` frames and is meant
    /// to be looped by the playback layer.
    pub fn synthesize(&self, sample_rate: u32) -> Result<SampleBuffer, SynthesisError> {
        check_sample_rate(sample_rate)?;
        if self.notes.is_empty() {
            return Err(SynthesisError::EmptySequence);
        }
        let step_len = self.frames_per_step(sample_rate)?;
        let total = (step_len as u64)
            .checked_mul(self.notes.len() as u64)
            .unwrap_or(u64::MAX);
        let total = check_frame_count(total)?;

        let envelope = StepEnvelope::fit(&self.envelope, step_len);
        debug!(
            steps = self.notes.len(),
            frames_per_step = step_len,
            attack = envelope.attack_frames(),
            release = envelope.release_frames(),
            frames = total,
            "synthesizing sequence"
        );

        let rate = sample_rate as f64;
        let increments: Vec<f64> = self
            .notes
            .iter()
            .map(|note| TWO_PI * note.frequency() / rate)
            .collect();

        let mut samples = Vec::with_capacity(total);
        let mut phase = 0.0_f64;
        for frame in 0..total {
            let step = (frame / step_len) % self.notes.len();
            let pos = frame % step_len;

            let voice = LEAD_MIX * phase.sin() + BASS_MIX * (phase / 2.0).sin();
            samples.push(to_pcm16(envelope.gain(pos) * voice));

            phase = (phase + increments[step]) % TWO_PI;
        }

        Ok(SampleBuffer::new(samples))
    }
}

impl From<&SequenceParams> for SequenceSynth {
    fn from(params: &SequenceParams) -> Self {
        Self {
            notes: params.notes.clone(),
            bpm: params.bpm,
            subdivision: params.subdivision,
            envelope: params.envelope,
        }
    }
}

/// Synthesizes one loop of a step sequence.
///
/// # Arguments
/// * `notes` - Notes in playback order, must not be empty
/// * `bpm` - Tempo, must be finite and positive
/// * `subdivision` - Step length as a fraction of a beat
/// * `envelope` - Per-step attack/release
/// * `sample_rate` - Sample rate in Hz, must be positive
///
/// # Example
/// ```
/// use chiptone_audio::synthesis::synthesize_sequence;
/// use chiptone_spec::{EnvelopeSpec, Note};
///
/// let notes = [Note(60), Note(64), Note(67)];
/// let samples =
///     synthesize_sequence(&notes, 120.0, 0.25, &EnvelopeSpec::new(64, 256), 22050).unwrap();
/// assert_eq!(samples.len(), 3 * 2756);
/// ```
pub fn synthesize_sequence(
    notes: &[Note],
    bpm: f64,
    subdivision: f64,
    envelope: &EnvelopeSpec,
    sample_rate: u32,
) -> Result<SampleBuffer, SynthesisError> {
    SequenceSynth::new(notes.iter().copied(), bpm, subdivision)
        .with_envelope(*envelope)
        .synthesize(sample_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat() -> EnvelopeSpec {
        EnvelopeSpec::default()
    }

    #[test]
    fn test_length_is_steps_times_step_frames() {
        let notes = [Note(60), Note(62), Note(64), Note(65)];
        let samples = synthesize_sequence(&notes, 120.0, 0.25, &flat(), 22050).unwrap();
        assert_eq!(samples.len(), 4 * 2756);
    }

    #[test]
    fn test_first_frame_is_zero() {
        let samples = synthesize_sequence(&[Note(69)], 120.0, 0.25, &flat(), 22050).unwrap();
        assert_eq!(samples.as_slice()[0], 0);
    }

    #[test]
    fn test_matches_reference_formula() {
        let notes = [Note(69), Note(76)];
        let rate = 8000u32;
        let samples = synthesize_sequence(&notes, 240.0, 0.25, &flat(), rate).unwrap();
        let step_len = 500;
        assert_eq!(samples.len(), 2 * step_len);

        let mut phase = 0.0_f64;
        for (frame, &actual) in samples.iter().enumerate() {
            let note = notes[frame / step_len];
            let expected = to_pcm16(0.6 * phase.sin() + 0.4 * (phase / 2.0).sin());
            assert_eq!(actual, expected, "frame {}", frame);
            phase = (phase + TWO_PI * note.frequency() / rate as f64) % TWO_PI;
        }
    }

    #[test]
    fn test_phase_not_reset_at_step_boundary() {
        let rate = 8000u32;
        let step_len = 500;
        // A reset phase would start the second step at exactly 0.
        // 440 Hz for 500 frames is 27.5 cycles, leaving the phase near pi.
        let samples =
            synthesize_sequence(&[Note(69), Note(72)], 240.0, 0.25, &flat(), rate).unwrap();
        let boundary = samples.as_slice()[step_len];
        assert!((13000..=13200).contains(&boundary), "got {}", boundary);

        let samples =
            synthesize_sequence(&[Note(70), Note(72)], 240.0, 0.25, &flat(), rate).unwrap();
        assert_ne!(samples.as_slice()[step_len], 0);
    }

    #[test]
    fn test_envelope_shapes_each_step() {
        let env = EnvelopeSpec::new(50, 80);
        let samples = synthesize_sequence(&[Note(70), Note(74)], 240.0, 0.25, &env, 8000).unwrap();
        let step_len = 500;
        // Attack starts from silence and release ends in silence, every step
        for step in 0..2 {
            assert_eq!(samples.as_slice()[step * step_len], 0);
            assert_eq!(samples.as_slice()[step * step_len + step_len - 1], 0);
        }
    }

    #[test]
    fn test_samples_stay_in_range_at_full_mix() {
        let notes: Vec<Note> = (20..110).map(Note).collect();
        let samples = synthesize_sequence(&notes, 600.0, 0.25, &flat(), 22050).unwrap();
        assert!(samples.peak() <= 32767);
    }

    #[test]
    fn test_invalid_parameters() {
        assert_eq!(
            synthesize_sequence(&[], 120.0, 0.25, &flat(), 22050),
            Err(SynthesisError::EmptySequence)
        );
        assert_eq!(
            synthesize_sequence(&[Note(60)], 120.0, 0.25, &flat(), 0),
            Err(SynthesisError::InvalidSampleRate { rate: 0 })
        );
        assert_eq!(
            synthesize_sequence(&[Note(60)], 0.0, 0.25, &flat(), 22050),
            Err(SynthesisError::InvalidTempo { bpm: 0.0 })
        );
        assert_eq!(
            synthesize_sequence(&[Note(60)], 120.0, -1.0, &flat(), 22050),
            Err(SynthesisError::InvalidSubdivision { subdivision: -1.0 })
        );
        assert!(matches!(
            synthesize_sequence(&[Note(60)], 120.0, 1e-9, &flat(), 22050),
            Err(SynthesisError::StepTooShort { .. })
        ));
    }

    #[test]
    fn test_deterministic() {
        let notes = [Note(60), Note(67), Note(64)];
        let env = EnvelopeSpec::new(64, 256);
        let a = synthesize_sequence(&notes, 140.0, 0.25, &env, 22050).unwrap();
        let b = synthesize_sequence(&notes, 140.0, 0.25, &env, 22050).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_params() {
        let params = SequenceParams::new([Note(60), Note(64)], 150.0)
            .with_envelope(EnvelopeSpec::new(10, 20));
        let synth = SequenceSynth::from(&params);
        assert_eq!(synth.notes, params.notes);
        assert_eq!(synth.envelope, params.envelope);
        assert_eq!(synth.subdivision, 0.25);
    }
}
