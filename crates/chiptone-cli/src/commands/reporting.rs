//! Human-readable output shared by several commands.

use anyhow::{Context, Result};
use chiptone_audio::RenderResult;
use chiptone_spec::ValidationResult;
use colored::Colorize;
use std::fs;
use std::path::Path;

/// Prints validation errors and warnings, one per line.
pub(crate) fn print_validation_results(result: &ValidationResult) {
    for error in &result.errors {
        let path = error
            .path
            .as_ref()
            .map(|p| format!(" at {}", p))
            .unwrap_or_default();
        println!(
            "  {} [{}]{}: {}",
            "x".red(),
            error.code,
            path.dimmed(),
            error.message
        );
    }

    for warning in &result.warnings {
        let path = warning
            .path
            .as_ref()
            .map(|p| format!(" at {}", p))
            .unwrap_or_default();
        println!(
            "  {} [{}]{}: {}",
            "!".yellow(),
            warning.code,
            path.dimmed(),
            warning.message
        );
    }
}

/// Prints the metadata of a finished render.
pub(crate) fn print_render_summary(result: &RenderResult) {
    println!(
        "  {}: {} Hz, {} ch, {}-bit",
        "Format".dimmed(),
        result.format.sample_rate,
        result.format.channels,
        result.format.bits_per_sample
    );
    println!(
        "  {}: {} ({:.3} s)",
        "Frames".dimmed(),
        result.num_frames,
        result.duration_seconds()
    );
    if let Some(lp) = result.loop_points {
        println!(
            "  {}: {}..{}",
            "Loop".dimmed(),
            lp.start_frame,
            lp.end_frame
        );
    }
    println!("  {}: {}", "PCM hash".dimmed(), &result.pcm_hash[..16]);
}

/// Writes bytes to `path`, creating parent directories as needed.
pub(crate) fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(path, bytes)
        .with_context(|| format!("Failed to write output file: {}", path.display()))
}
