//! Request fixtures shared by the end-to-end tests.

use chiptone_spec::{AudioFormat, EnvelopeSpec, Note, Request, SequenceParams, ToneParams};

/// A short mono tone at the default rate.
pub fn tone_request() -> Request {
    Request::tone("laser-zap", ToneParams::new(1760.0, 50).with_amplitude(0.5))
        .with_description("Short bright zap")
}

/// A tone at 8000 Hz whose sample count is easy to reason about.
pub fn low_rate_tone_request() -> Request {
    Request::tone("beep-low", ToneParams::new(440.0, 1000))
        .with_format(AudioFormat::mono(8000))
        .with_description("One second of A4 at 8 kHz")
}

/// A looping four-step arpeggio with an envelope.
pub fn sequence_request() -> Request {
    Request::sequence(
        "arp-loop",
        SequenceParams::new([60, 64, 67, 72].map(Note), 150.0)
            .with_subdivision(0.25)
            .with_envelope(EnvelopeSpec::new(32, 128)),
    )
    .with_description("Four step arpeggio")
}

/// A tone request with every field spelled out.
pub const TONE_JSON: &str = r#"{
    "request_version": 1,
    "id": "coin-pickup",
    "description": "Bright ping for pickups",
    "format": { "sample_rate": 22050, "channels": 1, "bits_per_sample": 16 },
    "sound": { "kind": "tone", "frequency_hz": 1320.0, "duration_ms": 80, "amplitude": 0.6 }
}"#;

/// The same sound as [`TONE_JSON`] with keys reordered and defaults left out.
pub const TONE_JSON_REORDERED: &str = r#"{
    "sound": { "amplitude": 0.6, "duration_ms": 80, "frequency_hz": 1320.0, "kind": "tone" },
    "format": { "sample_rate": 22050 },
    "id": "coin-pickup",
    "description": "Bright ping for pickups",
    "request_version": 1
}"#;

/// A sequence request in JSON form.
pub const SEQUENCE_JSON: &str = r#"{
    "request_version": 1,
    "id": "bass-walk",
    "description": "Walking bass loop",
    "sound": {
        "kind": "sequence",
        "notes": [36, 38, 40, 43],
        "bpm": 120.0,
        "subdivision": 0.5,
        "envelope": { "attack_frames": 16, "release_frames": 64 }
    }
}"#;

/// A request with several validation errors at once.
pub const INVALID_JSON: &str = r#"{
    "request_version": 1,
    "id": "Bad Id",
    "sound": { "kind": "tone", "frequency_hz": -5.0, "duration_ms": 80, "amplitude": 2.0 }
}"#;
