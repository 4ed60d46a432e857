//! Built-in arcade sound bank.
//!
//! Each preset is an ordinary [`Request`], so presets go through the same
//! validation, hashing, caching and rendering paths as user documents.

use crate::note::Note;
use crate::params::{EnvelopeSpec, SequenceParams, ToneParams};
use crate::request::Request;

/// Names of all built-in presets, in listing order.
pub const PRESET_NAMES: &[&str] = &[
    "jump",
    "coin",
    "hit",
    "bounce",
    "power-up",
    "game-over",
    "theme-loop",
];

/// Returns the preset names.
pub fn names() -> &'static [&'static str] {
    PRESET_NAMES
}

/// Looks up a preset by name.
pub fn find(name: &str) -> Option<Request> {
    let request = match name {
        "jump" => tone(name, 660.0, 90, 0.7, "Short rising blip for jumps"),
        "coin" => tone(name, 1320.0, 80, 0.6, "Bright ping for pickups"),
        "hit" => tone(name, 220.0, 120, 0.9, "Low thud for collisions"),
        "bounce" => tone(name, 440.0, 60, 0.7, "Mid blip for wall bounces"),
        "power-up" => tone(name, 880.0, 200, 0.6, "Sustained high tone for power-ups"),
        "game-over" => tone(name, 110.0, 600, 0.8, "Long low tone for game over"),
        "theme-loop" => Request::sequence(
            name,
            SequenceParams::new(
                [60, 64, 67, 72, 67, 64, 60, 55].map(Note),
                140.0,
            )
            .with_subdivision(0.25)
            .with_envelope(EnvelopeSpec::new(64, 256)),
        )
        .with_description("Looping arpeggio background track"),
        _ => return None,
    };
    Some(request)
}

/// Returns every preset, in listing order.
pub fn all() -> Vec<Request> {
    PRESET_NAMES.iter().filter_map(|name| find(name)).collect()
}

fn tone(name: &str, frequency_hz: f64, duration_ms: u32, amplitude: f64, description: &str) -> Request {
    Request::tone(
        name,
        ToneParams::new(frequency_hz, duration_ms).with_amplitude(amplitude),
    )
    .with_description(description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_request;

    #[test]
    fn test_every_name_resolves() {
        for name in names() {
            let request = find(name).unwrap_or_else(|| panic!("missing preset {}", name));
            assert_eq!(request.id, *name);
        }
        assert_eq!(all().len(), PRESET_NAMES.len());
    }

    #[test]
    fn test_unknown_preset() {
        assert!(find("explosion").is_none());
    }

    #[test]
    fn test_presets_validate_cleanly() {
        for request in all() {
            let result = validate_request(&request);
            assert!(result.is_ok(), "{}: {:?}", request.id, result.errors);
            assert!(result.warnings.is_empty(), "{}: {:?}", request.id, result.warnings);
        }
    }

    #[test]
    fn test_theme_loops() {
        let theme = find("theme-loop").unwrap();
        assert!(theme.sound.is_looping());
    }
}
