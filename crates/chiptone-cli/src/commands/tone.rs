//! Tone command implementation
//!
//! Renders a single sine tone from command-line parameters.

use anyhow::Result;
use chiptone_spec::{AudioFormat, Request, ToneParams};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use super::render::render_to_file;

/// Request id given to tones built from flags.
pub const TONE_ID: &str = "cli-tone";

/// Parameters of the `tone` command.
#[derive(Debug, Clone, PartialEq)]
pub struct ToneArgs {
    /// Tone frequency in Hz
    pub frequency_hz: f64,
    /// Duration in milliseconds
    pub duration_ms: u32,
    /// Amplitude in [0, 1]
    pub amplitude: f64,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl ToneArgs {
    /// Builds the equivalent request document.
    pub fn to_request(&self) -> Request {
        Request::tone(
            TONE_ID,
            ToneParams::new(self.frequency_hz, self.duration_ms).with_amplitude(self.amplitude),
        )
        .with_format(AudioFormat::mono(self.sample_rate))
        .with_description(format!("{} Hz tone", self.frequency_hz))
    }
}

/// Run the tone command
///
/// # Returns
/// Exit code: 0 success, 1 invalid parameters, 2 generation failure
pub fn run(args: &ToneArgs, output: &str, raw: bool, json: bool) -> Result<ExitCode> {
    if !json {
        println!(
            "{} {} Hz for {} ms",
            "Tone:".cyan().bold(),
            args.frequency_hz,
            args.duration_ms
        );
    }
    render_to_file(&args.to_request(), Path::new(output), raw, json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chiptone_audio::decode_container;

    fn args() -> ToneArgs {
        ToneArgs {
            frequency_hz: 440.0,
            duration_ms: 100,
            amplitude: 0.5,
            sample_rate: 8000,
        }
    }

    #[test]
    fn test_tone_request_validates() {
        let request = args().to_request();
        assert!(chiptone_spec::validate_request(&request).is_ok());
        assert_eq!(request.format.sample_rate, 8000);
    }

    #[test]
    fn test_tone_writes_wav() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("a4.wav");
        let code = run(&args(), path.to_str().unwrap(), false, true).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);

        let decoded = decode_container(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(decoded.num_frames(), 800);
        assert_eq!(decoded.format.sample_rate, 8000);
    }

    #[test]
    fn test_tone_writes_raw_pcm() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("a4.pcm");
        let code = run(&args(), path.to_str().unwrap(), true, true).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(std::fs::read(&path).unwrap().len(), 1600);
    }

    #[test]
    fn test_tone_rejects_bad_amplitude() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("loud.wav");
        let bad = ToneArgs {
            amplitude: 1.5,
            ..args()
        };
        let code = run(&bad, path.to_str().unwrap(), false, true).unwrap();
        assert_eq!(code, ExitCode::from(1));
        assert!(!path.exists());
    }
}
