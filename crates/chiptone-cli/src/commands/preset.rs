//! Preset commands
//!
//! Lists, shows and renders the built-in sound bank.

use anyhow::{Context, Result};
use chiptone_spec::{presets, Request, Sound};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::process::ExitCode;

use super::json_output::{error_codes, print_json, CommandOutput, JsonError, RenderSummary};
use super::render::{render_to_dir, RenderOptions, EXIT_INVALID};

/// One entry of `preset list --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PresetEntry {
    /// Preset name (also the request id)
    pub name: String,
    /// Sound kind ("tone" or "sequence")
    pub kind: String,
    /// Preset description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&Request> for PresetEntry {
    fn from(request: &Request) -> Self {
        Self {
            name: request.id.clone(),
            kind: request.sound.kind().to_string(),
            description: request.description.clone(),
        }
    }
}

/// List all presets
pub fn list(json: bool) -> Result<ExitCode> {
    let entries: Vec<PresetEntry> = presets::all().iter().map(PresetEntry::from).collect();

    if json {
        print_json(&CommandOutput::success(entries, vec![]))?;
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", "Presets".cyan().bold());
    for request in presets::all() {
        let detail = match &request.sound {
            Sound::Tone(t) => format!("{} Hz, {} ms", t.frequency_hz, t.duration_ms),
            Sound::Sequence(s) => format!("{} steps at {} bpm, looping", s.notes.len(), s.bpm),
        };
        println!(
            "  {:<12} {:<9} {}",
            request.id.green(),
            request.sound.kind(),
            detail.dimmed()
        );
    }

    Ok(ExitCode::SUCCESS)
}

/// Print a preset as a request document
pub fn show(name: &str) -> Result<ExitCode> {
    let Some(request) = presets::find(name) else {
        print_unknown(name);
        return Ok(ExitCode::from(EXIT_INVALID));
    };

    let json = request
        .to_json_pretty()
        .context("Failed to serialize preset")?;
    println!("{}", json);
    Ok(ExitCode::SUCCESS)
}

/// Render a preset into `<out_root>/<name>.wav`
pub fn render(name: &str, options: &RenderOptions) -> Result<ExitCode> {
    let Some(request) = presets::find(name) else {
        if options.json {
            let error = unknown_preset_error(name);
            print_json(&CommandOutput::<RenderSummary>::failure(vec![error], vec![]))?;
        } else {
            print_unknown(name);
        }
        return Ok(ExitCode::from(EXIT_INVALID));
    };

    if !options.json {
        println!("{} {}", "Rendering preset:".cyan().bold(), name);
    }
    render_to_dir(&request, options)
}

fn unknown_preset_error(name: &str) -> JsonError {
    JsonError::new(
        error_codes::UNKNOWN_PRESET,
        format!(
            "unknown preset '{}' (expected one of: {})",
            name,
            presets::names().join(", ")
        ),
    )
}

fn print_unknown(name: &str) {
    println!(
        "{} unknown preset '{}' (expected one of: {})",
        "FAILED".red().bold(),
        name,
        presets::names().join(", ")
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_preset_entries() {
        let entries: Vec<PresetEntry> = presets::all().iter().map(PresetEntry::from).collect();
        assert_eq!(entries.len(), presets::names().len());
        assert!(entries
            .iter()
            .any(|e| e.name == "theme-loop" && e.kind == "sequence"));
    }

    #[test]
    fn test_show_unknown_preset() {
        assert_eq!(show("no-such-sound").unwrap(), ExitCode::from(EXIT_INVALID));
        assert_eq!(show("coin").unwrap(), ExitCode::SUCCESS);
    }

    #[test]
    fn test_render_preset() {
        let tmp = TempDir::new().unwrap();
        let options = RenderOptions {
            out_root: tmp.path().to_path_buf(),
            no_cache: true,
            cache_dir: None,
            json: true,
        };

        assert_eq!(render("coin", &options).unwrap(), ExitCode::SUCCESS);
        assert!(tmp.path().join("coin.wav").exists());

        assert_eq!(
            render("no-such-sound", &options).unwrap(),
            ExitCode::from(EXIT_INVALID)
        );
    }

    #[test]
    fn test_unknown_preset_error_code() {
        assert_eq!(unknown_preset_error("x").code, "CLI_006");
    }
}
