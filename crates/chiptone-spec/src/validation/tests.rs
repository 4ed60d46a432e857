//! Tests for request validation.

use super::*;
use crate::note::Note;
use crate::params::EnvelopeSpec;

fn tone_request(params: ToneParams) -> Request {
    Request::tone("test-tone", params).with_description("test")
}

fn sequence_request(params: SequenceParams) -> Request {
    Request::sequence("test-track", params).with_description("test")
}

// =========================================================================
// Contract
// =========================================================================

#[test]
fn test_valid_tone_passes() {
    let result = validate_request(&tone_request(ToneParams::new(440.0, 250)));
    assert!(result.is_ok(), "{:?}", result.errors);
    assert!(result.warnings.is_empty(), "{:?}", result.warnings);
}

#[test]
fn test_request_id_rules() {
    assert!(is_valid_request_id("coin"));
    assert!(is_valid_request_id("theme-loop_2"));
    assert!(!is_valid_request_id("ab"));
    assert!(!is_valid_request_id("Coin"));
    assert!(!is_valid_request_id("1up"));
    assert!(!is_valid_request_id("has space"));
    assert!(!is_valid_request_id(&"a".repeat(65)));
}

#[test]
fn test_bad_version_and_id_both_reported() {
    let mut request = tone_request(ToneParams::new(440.0, 250));
    request.request_version = 7;
    request.id = "X".to_string();

    let result = validate_request(&request);
    assert!(result.has_error(ErrorCode::UnsupportedRequestVersion));
    assert!(result.has_error(ErrorCode::InvalidRequestId));
    assert_eq!(result.errors.len(), 2);
}

#[test]
fn test_missing_description_warns() {
    let request = Request::tone("blip", ToneParams::new(440.0, 50));
    let result = validate_request(&request);
    assert!(result.is_ok());
    assert!(result.has_warning(WarningCode::MissingDescription));
}

// =========================================================================
// Format
// =========================================================================

#[test]
fn test_format_errors() {
    let request =
        tone_request(ToneParams::new(440.0, 250)).with_format(AudioFormat::new(0, 2, 8));
    let result = validate_request(&request);
    assert!(result.has_error(ErrorCode::InvalidSampleRate));
    assert!(result.has_error(ErrorCode::UnsupportedChannelCount));
    assert!(result.has_error(ErrorCode::UnsupportedBitDepth));
}

#[test]
fn test_sample_rate_bounds() {
    for rate in [MIN_SAMPLE_RATE, 22050, 44100, MAX_SAMPLE_RATE] {
        let request =
            tone_request(ToneParams::new(100.0, 10)).with_format(AudioFormat::mono(rate));
        assert!(validate_request(&request).is_ok(), "rate {}", rate);
    }
    let request =
        tone_request(ToneParams::new(100.0, 10)).with_format(AudioFormat::mono(MAX_SAMPLE_RATE + 1));
    assert!(validate_request(&request).has_error(ErrorCode::InvalidSampleRate));
}

// =========================================================================
// Tone
// =========================================================================

#[test]
fn test_tone_frequency_errors() {
    for freq in [0.0, -440.0, f64::NAN, f64::INFINITY] {
        let result = validate_request(&tone_request(ToneParams::new(freq, 100)));
        assert!(result.has_error(ErrorCode::InvalidFrequency), "freq {}", freq);
    }
}

#[test]
fn test_tone_above_nyquist_warns() {
    let result = validate_request(&tone_request(ToneParams::new(15000.0, 100)));
    assert!(result.is_ok());
    assert!(result.has_warning(WarningCode::AboveNyquist));
}

#[test]
fn test_tone_duration() {
    let result = validate_request(&tone_request(ToneParams::new(440.0, 0)));
    assert!(result.is_ok());
    assert!(result.has_warning(WarningCode::ZeroDuration));

    let result = validate_request(&tone_request(ToneParams::new(440.0, MAX_DURATION_MS + 1)));
    assert!(result.has_error(ErrorCode::DurationTooLong));
}

#[test]
fn test_tone_amplitude() {
    let result = validate_request(&tone_request(ToneParams::new(440.0, 10).with_amplitude(0.0)));
    assert!(result.is_ok());
    assert!(result.has_warning(WarningCode::ZeroAmplitude));

    let result = validate_request(&tone_request(ToneParams::new(440.0, 10).with_amplitude(1.2)));
    assert!(result.has_error(ErrorCode::InvalidAmplitude));
}

// =========================================================================
// Sequence
// =========================================================================

#[test]
fn test_valid_sequence_passes() {
    let params = SequenceParams::new([Note(60), Note(64), Note(67)], 120.0)
        .with_envelope(EnvelopeSpec::new(100, 200));
    let result = validate_request(&sequence_request(params));
    assert!(result.is_ok(), "{:?}", result.errors);
    assert!(result.warnings.is_empty(), "{:?}", result.warnings);
}

#[test]
fn test_empty_sequence_rejected() {
    let result = validate_request(&sequence_request(SequenceParams::new([], 120.0)));
    assert!(result.has_error(ErrorCode::EmptyNoteSequence));
}

#[test]
fn test_note_out_of_range_has_path() {
    let params = SequenceParams::new([Note(60), Note(200)], 120.0);
    let result = validate_request(&sequence_request(params));
    let err = result
        .errors
        .iter()
        .find(|e| e.code == ErrorCode::NoteOutOfRange)
        .expect("note error");
    assert_eq!(err.path.as_deref(), Some("sound.notes[1]"));
}

#[test]
fn test_tempo_and_subdivision_errors() {
    let params = SequenceParams::new([Note(60)], 0.0).with_subdivision(-1.0);
    let result = validate_request(&sequence_request(params));
    assert!(result.has_error(ErrorCode::InvalidTempo));
    assert!(result.has_error(ErrorCode::InvalidSubdivision));
    assert!(!result.has_error(ErrorCode::StepTooShort));
}

#[test]
fn test_step_too_short() {
    let params = SequenceParams::new([Note(60)], 120.0).with_subdivision(1e-9);
    let result = validate_request(&sequence_request(params));
    assert!(result.has_error(ErrorCode::StepTooShort));
}

#[test]
fn test_track_too_long() {
    // One beat per step at 1 bpm is a full minute per note
    let params = SequenceParams::new([Note(60), Note(62)], 1.0).with_subdivision(1.0);
    let result = validate_request(&sequence_request(params));
    assert!(result.has_error(ErrorCode::TrackTooLong));
}

#[test]
fn test_envelope_clamp_warns() {
    let params = SequenceParams::new([Note(60)], 120.0).with_envelope(EnvelopeSpec::new(5000, 0));
    let result = validate_request(&sequence_request(params));
    assert!(result.is_ok());
    assert!(result.has_warning(WarningCode::EnvelopeClamped));
}
