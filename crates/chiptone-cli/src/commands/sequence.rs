//! Sequence command implementation
//!
//! Renders a looping step sequence from command-line parameters.

use anyhow::Result;
use chiptone_spec::{AudioFormat, EnvelopeSpec, Note, Request, SequenceParams};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use super::render::render_to_file;

/// Request id given to sequences built from flags.
pub const SEQUENCE_ID: &str = "cli-sequence";

/// Parameters of the `sequence` command.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceArgs {
    /// MIDI note numbers in playback order
    pub notes: Vec<u8>,
    /// Tempo in beats per minute
    pub bpm: f64,
    /// Step length as a fraction of a beat
    pub subdivision: f64,
    /// Requested attack window in frames
    pub attack_frames: u32,
    /// Requested release window in frames
    pub release_frames: u32,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl SequenceArgs {
    /// Builds the equivalent request document.
    pub fn to_request(&self) -> Request {
        let params = SequenceParams::new(self.notes.iter().copied().map(Note), self.bpm)
            .with_subdivision(self.subdivision)
            .with_envelope(EnvelopeSpec::new(self.attack_frames, self.release_frames));
        Request::sequence(SEQUENCE_ID, params)
            .with_format(AudioFormat::mono(self.sample_rate))
            .with_description(format!("{} step loop at {} bpm", self.notes.len(), self.bpm))
    }
}

/// Run the sequence command
///
/// # Returns
/// Exit code: 0 success, 1 invalid parameters, 2 generation failure
pub fn run(args: &SequenceArgs, output: &str, raw: bool, json: bool) -> Result<ExitCode> {
    if !json {
        println!(
            "{} {} notes at {} bpm",
            "Sequence:".cyan().bold(),
            args.notes.len(),
            args.bpm
        );
    }
    render_to_file(&args.to_request(), Path::new(output), raw, json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chiptone_audio::decode_container;

    fn args() -> SequenceArgs {
        SequenceArgs {
            notes: vec![60, 64, 67],
            bpm: 240.0,
            subdivision: 1.0,
            attack_frames: 10,
            release_frames: 20,
            sample_rate: 8000,
        }
    }

    #[test]
    fn test_sequence_request_fields() {
        let request = args().to_request();
        assert!(chiptone_spec::validate_request(&request).is_ok());
        assert!(request.sound.is_looping());
    }

    #[test]
    fn test_sequence_writes_wav() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("loop.wav");
        let code = run(&args(), path.to_str().unwrap(), false, true).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);

        // 8000 * 60 / 240 = 2000 frames per step
        let decoded = decode_container(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(decoded.num_frames(), 3 * 2000);
    }

    #[test]
    fn test_sequence_rejects_empty_notes() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("empty.wav");
        let empty = SequenceArgs {
            notes: Vec::new(),
            ..args()
        };
        let code = run(&empty, path.to_str().unwrap(), false, true).unwrap();
        assert_eq!(code, ExitCode::from(1));
    }
}
