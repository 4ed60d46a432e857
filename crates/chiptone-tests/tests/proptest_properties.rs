//! Property-based tests for the synthesizer and container codec.
//!
//! These tests check length, range, pitch and header invariants for
//! arbitrary parameters, and that decoding arbitrary bytes never panics.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p chiptone-tests --test proptest_properties
//! ```

use proptest::prelude::*;

use chiptone_audio::envelope::StepEnvelope;
use chiptone_audio::{
    decode_container, encode_container, synthesize_sequence, synthesize_tone, SampleBuffer,
};
use chiptone_spec::params::{frames_per_step, tone_frame_count};
use chiptone_spec::{midi_to_frequency, AudioFormat, EnvelopeSpec, Note};

// ============================================================================
// 1. Tone Synthesis
// ============================================================================

fn sample_rate() -> impl Strategy<Value = u32> {
    prop_oneof![
        Just(8000u32),
        Just(11025),
        Just(22050),
        Just(44100),
        Just(48000),
        8000u32..=48000,
    ]
}

proptest! {
    /// Tone length is exactly round(ms / 1000 * rate).
    #[test]
    fn tone_length_matches_duration(
        freq in 1.0f64..20000.0,
        duration_ms in 0u32..2000,
        rate in sample_rate(),
        amplitude in 0.0f64..=1.0,
    ) {
        let samples = synthesize_tone(freq, duration_ms, rate, amplitude).unwrap();
        prop_assert_eq!(samples.len() as u64, tone_frame_count(duration_ms, rate));
    }

    /// Tone samples never exceed the amplitude envelope.
    #[test]
    fn tone_samples_bounded_by_amplitude(
        freq in 1.0f64..20000.0,
        duration_ms in 1u32..200,
        rate in sample_rate(),
        amplitude in 0.0f64..=1.0,
    ) {
        let samples = synthesize_tone(freq, duration_ms, rate, amplitude).unwrap();
        let limit = (amplitude * 32767.0).round() as u16;
        prop_assert!(samples.peak() <= limit);
        if let Some(&first) = samples.as_slice().first() {
            prop_assert_eq!(first, 0);
        }
    }

    /// Zero duration yields an empty buffer, never an error.
    #[test]
    fn zero_duration_is_empty(
        freq in 1.0f64..20000.0,
        rate in sample_rate(),
        amplitude in 0.0f64..=1.0,
    ) {
        let samples = synthesize_tone(freq, 0, rate, amplitude).unwrap();
        prop_assert!(samples.is_empty());
    }

    /// Zero amplitude yields a full-length silent buffer.
    #[test]
    fn zero_amplitude_is_silent(
        freq in 1.0f64..20000.0,
        duration_ms in 1u32..500,
        rate in sample_rate(),
    ) {
        let samples = synthesize_tone(freq, duration_ms, rate, 0.0).unwrap();
        prop_assert_eq!(samples.len() as u64, tone_frame_count(duration_ms, rate));
        prop_assert!(samples.is_silent());
    }

    /// Non-positive frequencies are rejected.
    #[test]
    fn non_positive_frequency_rejected(
        freq in -20000.0f64..=0.0,
        rate in sample_rate(),
    ) {
        prop_assert!(synthesize_tone(freq, 100, rate, 1.0).is_err());
    }
}

// ============================================================================
// 2. Pitch Mapping
// ============================================================================

#[test]
fn equal_temperament_reference_points() {
    assert!((midi_to_frequency(69) - 440.0).abs() < 1e-6);
    assert!((midi_to_frequency(81) - 880.0).abs() < 1e-6);
    assert!((midi_to_frequency(57) - 220.0).abs() < 1e-6);
}

proptest! {
    /// One semitone up multiplies the frequency by 2^(1/12).
    #[test]
    fn semitone_ratio(note in 0u8..127) {
        let ratio = midi_to_frequency(note + 1) / midi_to_frequency(note);
        prop_assert!((ratio - 2f64.powf(1.0 / 12.0)).abs() < 1e-9);
    }

    /// Twelve semitones double the frequency.
    #[test]
    fn octave_doubles(note in 0u8..=115) {
        let ratio = Note(note + 12).frequency() / Note(note).frequency();
        prop_assert!((ratio - 2.0).abs() < 1e-9);
    }
}

// ============================================================================
// 3. Sequence Synthesis
// ============================================================================

fn note_sequence() -> impl Strategy<Value = Vec<Note>> {
    prop::collection::vec((0u8..=127).prop_map(Note), 1..8)
}

fn subdivision() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.125f64), Just(0.25), Just(0.5), Just(1.0)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Sequence length is notes * frames per step, and output is repeatable.
    #[test]
    fn sequence_length_and_idempotence(
        notes in note_sequence(),
        bpm in 60.0f64..300.0,
        sub in subdivision(),
        attack in 0u32..2000,
        release in 0u32..2000,
        rate in prop_oneof![Just(8000u32), Just(22050)],
    ) {
        let envelope = EnvelopeSpec::new(attack, release);
        let a = synthesize_sequence(&notes, bpm, sub, &envelope, rate).unwrap();
        let b = synthesize_sequence(&notes, bpm, sub, &envelope, rate).unwrap();

        let fps = frames_per_step(rate, bpm, sub);
        prop_assert_eq!(a.len() as u64, notes.len() as u64 * fps);
        prop_assert_eq!(a, b);
    }

    /// With an attack window every step starts from silence.
    #[test]
    fn sequence_steps_start_silent(
        notes in note_sequence(),
        bpm in 60.0f64..300.0,
        sub in subdivision(),
        attack in 1u32..2000,
    ) {
        let envelope = EnvelopeSpec::new(attack, 0);
        let samples = synthesize_sequence(&notes, bpm, sub, &envelope, 8000).unwrap();
        let fps = frames_per_step(8000, bpm, sub) as usize;
        // Steps shorter than ten frames get no attack window at all
        prop_assume!(fps >= 10);
        for step in 0..notes.len() {
            prop_assert_eq!(samples.as_slice()[step * fps], 0);
        }
    }

    /// Attack and release windows respect their caps and never overlap.
    #[test]
    fn envelope_windows_never_overlap(
        fps in 1usize..10000,
        attack in 0u32..20000,
        release in 0u32..20000,
    ) {
        let env = StepEnvelope::fit(&EnvelopeSpec::new(attack, release), fps);
        prop_assert!(env.attack_frames() <= fps / 10);
        prop_assert!(env.release_frames() <= fps / 6);
        prop_assert!(env.attack_frames() + env.release_frames() <= fps);
        for pos in 0..fps.min(64) {
            let gain = env.gain(pos);
            prop_assert!((0.0..=1.0).contains(&gain));
        }
    }
}

#[test]
fn envelope_clamps_tiny_step() {
    let env = StepEnvelope::fit(&EnvelopeSpec::new(90, 90), 10);
    assert!(env.attack_frames() <= 5);
    assert!(env.release_frames() <= 5);
    assert!(env.attack_frames() + env.release_frames() <= 10);
}

// ============================================================================
// 4. Container Codec
// ============================================================================

proptest! {
    /// Header fields follow the sample count exactly.
    #[test]
    fn header_fields_follow_sample_count(
        samples in prop::collection::vec(any::<i16>(), 0..2000),
        rate in 1u32..=192_000,
    ) {
        let n = samples.len();
        let container = encode_container(SampleBuffer::new(samples), &AudioFormat::mono(rate)).unwrap();
        let bytes = container.as_bytes();

        prop_assert_eq!(bytes.len(), 44 + 2 * n);
        prop_assert_eq!(&bytes[0..4], b"RIFF");
        prop_assert_eq!(u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]) as usize, 36 + 2 * n);
        prop_assert_eq!(u32::from_le_bytes([bytes[24], bytes[25], bytes[26], bytes[27]]), rate);
        prop_assert_eq!(u32::from_le_bytes([bytes[40], bytes[41], bytes[42], bytes[43]]) as usize, 2 * n);
    }

    /// Encoding then decoding returns the same samples and format.
    #[test]
    fn encode_decode_round_trip(
        samples in prop::collection::vec(any::<i16>(), 1..2000),
        rate in 1u32..=192_000,
        channels in 1u16..=2,
    ) {
        let mut samples = samples;
        samples.truncate(samples.len() / channels as usize * channels as usize);
        prop_assume!(!samples.is_empty());

        let format = AudioFormat::new(rate, channels, 16);
        let buffer = SampleBuffer::new(samples);
        let container = encode_container(buffer.clone(), &format).unwrap();
        let decoded = decode_container(container.as_bytes()).unwrap();

        prop_assert_eq!(decoded.format, format);
        prop_assert_eq!(decoded.samples, buffer);
    }

    /// Arbitrary bytes never panic the decoder.
    #[test]
    fn decoder_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = decode_container(&bytes);
    }

    /// Arbitrary bytes behind a valid signature never panic the decoder.
    #[test]
    fn decoder_never_panics_on_riff_prefix(tail in prop::collection::vec(any::<u8>(), 0..256)) {
        let mut bytes = b"RIFF\x00\x00\x00\x00WAVE".to_vec();
        bytes.extend(tail);
        let _ = decode_container(&bytes);
    }
}
