//! Request validation.
//!
//! Validation collects every problem in a request instead of stopping at the
//! first one, so the CLI can report them all at once. The synthesizer repeats
//! the checks it needs for its own invariants; this layer adds budgets and
//! warnings on top.

pub mod common;

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};
use crate::format::{AudioFormat, PCM_BITS_PER_SAMPLE};
use crate::note::MAX_NOTE;
use crate::params::{SequenceParams, Sound, ToneParams};
use crate::request::{Request, REQUEST_VERSION};

use common::{validate_positive, validate_range, validate_unit_interval};

/// Lowest accepted sample rate, in Hz.
pub const MIN_SAMPLE_RATE: u32 = 8000;

/// Highest accepted sample rate, in Hz.
pub const MAX_SAMPLE_RATE: u32 = 192_000;

/// Longest tone or track that may be rendered, in milliseconds.
pub const MAX_DURATION_MS: u32 = 60_000;

/// Request id pattern: lowercase, starts with a letter, 3 to 64 characters.
pub const REQUEST_ID_PATTERN: &str = r"^[a-z][a-z0-9_-]{2,63}$";

static REQUEST_ID_REGEX: OnceLock<Regex> = OnceLock::new();

fn request_id_regex() -> &'static Regex {
    REQUEST_ID_REGEX.get_or_init(|| Regex::new(REQUEST_ID_PATTERN).expect("invalid regex pattern"))
}

/// Checks whether a request id matches [`REQUEST_ID_PATTERN`].
pub fn is_valid_request_id(id: &str) -> bool {
    request_id_regex().is_match(id)
}

/// Validates a request and returns every error and warning found.
///
/// # Example
/// ```
/// use chiptone_spec::{Request, ToneParams};
/// use chiptone_spec::validation::validate_request;
///
/// let ok = Request::tone("jump", ToneParams::new(660.0, 90)).with_description("jump");
/// assert!(validate_request(&ok).is_ok());
///
/// let bad = Request::tone("jump", ToneParams::new(-1.0, 90));
/// assert!(!validate_request(&bad).is_ok());
/// ```
pub fn validate_request(request: &Request) -> ValidationResult {
    let mut result = ValidationResult::success();

    validate_contract(request, &mut result);
    let format_ok = validate_format(&request.format, &mut result);

    match &request.sound {
        Sound::Tone(tone) => validate_tone(tone, &request.format, format_ok, &mut result),
        Sound::Sequence(seq) => validate_sequence(seq, &request.format, format_ok, &mut result),
    }

    result
}

fn validate_contract(request: &Request, result: &mut ValidationResult) {
    if request.request_version != REQUEST_VERSION {
        result.add_error(ValidationError::with_path(
            ErrorCode::UnsupportedRequestVersion,
            format!(
                "request_version must be {}, got {}",
                REQUEST_VERSION, request.request_version
            ),
            "request_version",
        ));
    }

    if !is_valid_request_id(&request.id) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidRequestId,
            format!(
                "id '{}' must match {} (lowercase, 3-64 characters)",
                request.id, REQUEST_ID_PATTERN
            ),
            "id",
        ));
    }

    if request
        .description
        .as_deref()
        .map_or(true, |d| d.trim().is_empty())
    {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::MissingDescription,
            "request has no description",
            "description",
        ));
    }
}

/// Returns true if the sample rate is usable for frame-count checks.
fn validate_format(format: &AudioFormat, result: &mut ValidationResult) -> bool {
    let mut rate_ok = true;
    if let Err(e) = validate_range(
        "sample_rate",
        format.sample_rate as f64,
        MIN_SAMPLE_RATE as f64,
        MAX_SAMPLE_RATE as f64,
    ) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidSampleRate,
            e.message,
            "format.sample_rate",
        ));
        rate_ok = false;
    }

    if !format.is_mono() {
        result.add_error(ValidationError::with_path(
            ErrorCode::UnsupportedChannelCount,
            format!(
                "synthesis renders mono audio, channels must be 1, got {}",
                format.channels
            ),
            "format.channels",
        ));
    }

    if format.bits_per_sample != PCM_BITS_PER_SAMPLE {
        result.add_error(ValidationError::with_path(
            ErrorCode::UnsupportedBitDepth,
            format!(
                "bits_per_sample must be {}, got {}",
                PCM_BITS_PER_SAMPLE, format.bits_per_sample
            ),
            "format.bits_per_sample",
        ));
    }

    rate_ok
}

fn nyquist(format: &AudioFormat) -> f64 {
    format.sample_rate as f64 / 2.0
}

fn validate_tone(
    tone: &ToneParams,
    format: &AudioFormat,
    format_ok: bool,
    result: &mut ValidationResult,
) {
    match validate_positive("frequency_hz", tone.frequency_hz) {
        Err(e) => result.add_error(ValidationError::with_path(
            ErrorCode::InvalidFrequency,
            e.message,
            "sound.frequency_hz",
        )),
        Ok(()) if format_ok && tone.frequency_hz > nyquist(format) => {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::AboveNyquist,
                format!(
                    "frequency {} Hz is above the Nyquist limit of {} Hz and will alias",
                    tone.frequency_hz,
                    nyquist(format)
                ),
                "sound.frequency_hz",
            ))
        }
        Ok(()) => {}
    }

    if tone.duration_ms > MAX_DURATION_MS {
        result.add_error(ValidationError::with_path(
            ErrorCode::DurationTooLong,
            format!(
                "duration_ms must be at most {}, got {}",
                MAX_DURATION_MS, tone.duration_ms
            ),
            "sound.duration_ms",
        ));
    } else if tone.duration_ms == 0 {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::ZeroDuration,
            "duration_ms is 0, the tone renders as an empty buffer",
            "sound.duration_ms",
        ));
    }

    match validate_unit_interval("amplitude", tone.amplitude) {
        Err(e) => result.add_error(ValidationError::with_path(
            ErrorCode::InvalidAmplitude,
            e.message,
            "sound.amplitude",
        )),
        Ok(()) if tone.amplitude == 0.0 => result.add_warning(ValidationWarning::with_path(
            WarningCode::ZeroAmplitude,
            "amplitude is 0, the tone renders as silence",
            "sound.amplitude",
        )),
        Ok(()) => {}
    }
}

fn validate_sequence(
    seq: &SequenceParams,
    format: &AudioFormat,
    format_ok: bool,
    result: &mut ValidationResult,
) {
    if seq.notes.is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::EmptyNoteSequence,
            "notes must contain at least one note",
            "sound.notes",
        ));
    }

    for (i, note) in seq.notes.iter().enumerate() {
        if note.0 > MAX_NOTE {
            result.add_error(ValidationError::with_path(
                ErrorCode::NoteOutOfRange,
                format!("note {} is above {}", note.0, MAX_NOTE),
                format!("sound.notes[{}]", i),
            ));
        } else if format_ok && note.frequency() > nyquist(format) {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::AboveNyquist,
                format!(
                    "note {} ({:.1} Hz) is above the Nyquist limit of {} Hz",
                    note.0,
                    note.frequency(),
                    nyquist(format)
                ),
                format!("sound.notes[{}]", i),
            ));
        }
    }

    let mut timing_ok = true;
    if let Err(e) = validate_positive("bpm", seq.bpm) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidTempo,
            e.message,
            "sound.bpm",
        ));
        timing_ok = false;
    }
    if let Err(e) = validate_positive("subdivision", seq.subdivision) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidSubdivision,
            e.message,
            "sound.subdivision",
        ));
        timing_ok = false;
    }

    if !(timing_ok && format_ok) {
        return;
    }

    let frames_per_step = seq.frames_per_step(format.sample_rate);
    if frames_per_step == 0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::StepTooShort,
            format!(
                "a step at {} bpm with subdivision {} rounds to zero frames at {} Hz",
                seq.bpm, seq.subdivision, format.sample_rate
            ),
            "sound.subdivision",
        ));
        return;
    }

    let max_frames = MAX_DURATION_MS as u64 * format.sample_rate as u64 / 1000;
    let total_frames = frames_per_step.saturating_mul(seq.notes.len() as u64);
    if total_frames > max_frames {
        result.add_error(ValidationError::with_path(
            ErrorCode::TrackTooLong,
            format!(
                "track renders {} frames, more than {} ms allows ({} frames)",
                total_frames, MAX_DURATION_MS, max_frames
            ),
            "sound",
        ));
        return;
    }

    if seq.envelope.is_clamped(frames_per_step as usize) {
        let (attack, release) = seq.envelope.effective_windows(frames_per_step as usize);
        result.add_warning(ValidationWarning::with_path(
            WarningCode::EnvelopeClamped,
            format!(
                "envelope ({} / {} frames) is clamped to {} / {} frames for {}-frame steps",
                seq.envelope.attack_frames,
                seq.envelope.release_frames,
                attack,
                release,
                frames_per_step
            ),
            "sound.envelope",
        ));
    }
}

#[cfg(test)]
mod tests;
