//! Inspect command implementation
//!
//! Decodes a WAV file and reports its format and payload.

use anyhow::Result;
use chiptone_audio::{decode_container, DecodedContainer};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::process::ExitCode;

use super::json_output::{
    decode_error_to_json, error_codes, print_json, CommandOutput, JsonError,
};

/// Payload of `inspect --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InspectSummary {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Channel count
    pub channels: u16,
    /// Bits per sample
    pub bits_per_sample: u16,
    /// Number of frames
    pub num_frames: usize,
    /// Duration in seconds
    pub duration_seconds: f64,
    /// Largest absolute sample value
    pub peak: u16,
    /// BLAKE3 hash of the PCM payload
    pub pcm_hash: String,
}

impl InspectSummary {
    /// Summarizes a decoded container.
    pub fn new(decoded: &DecodedContainer) -> Self {
        Self {
            sample_rate: decoded.format.sample_rate,
            channels: decoded.format.channels,
            bits_per_sample: decoded.format.bits_per_sample,
            num_frames: decoded.num_frames(),
            duration_seconds: decoded.duration_seconds(),
            peak: decoded.samples.peak(),
            pcm_hash: blake3::hash(&decoded.samples.to_pcm_bytes())
                .to_hex()
                .to_string(),
        }
    }
}

/// Run the inspect command
///
/// # Returns
/// Exit code: 0 success, 1 unreadable or malformed file
pub fn run(input: &str, json: bool) -> Result<ExitCode> {
    let bytes = match std::fs::read(input) {
        Ok(bytes) => bytes,
        Err(e) => {
            let message = format!("failed to read file '{}': {}", input, e);
            if json {
                let error = JsonError::new(error_codes::FILE_READ, message).with_file(input);
                print_json(&CommandOutput::<InspectSummary>::failure(vec![error], vec![]))?;
            } else {
                println!("{} {}", "FAILED".red().bold(), message);
            }
            return Ok(ExitCode::from(1));
        }
    };

    let decoded = match decode_container(&bytes) {
        Ok(decoded) => decoded,
        Err(e) => {
            if json {
                let error = decode_error_to_json(&e, Some(input));
                print_json(&CommandOutput::<InspectSummary>::failure(vec![error], vec![]))?;
            } else {
                println!("{} {}", "FAILED".red().bold(), e);
            }
            return Ok(ExitCode::from(1));
        }
    };

    let summary = InspectSummary::new(&decoded);
    if json {
        print_json(&CommandOutput::success(summary, vec![]))?;
    } else {
        println!("{} {}", "Inspecting:".cyan().bold(), input);
        println!(
            "  {}: {} Hz, {} ch, {}-bit",
            "Format".dimmed(),
            summary.sample_rate,
            summary.channels,
            summary.bits_per_sample
        );
        println!(
            "  {}: {} ({:.3} s)",
            "Frames".dimmed(),
            summary.num_frames,
            summary.duration_seconds
        );
        println!("  {}: {}", "Peak".dimmed(), summary.peak);
        println!("  {}: {}", "PCM hash".dimmed(), summary.pcm_hash);
    }

    Ok(ExitCode::SUCCESS)
}
