//! Validate command implementation
//!
//! Checks a request document without rendering it.

use anyhow::Result;
use chiptone_spec::{canonical_request_hash, validate_request};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{
    input_error_to_json, print_json, validation_to_json, CommandOutput, JsonError,
};
use super::reporting;
use crate::input::{load_request, LoadResult};

/// Payload of `validate --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidateSummary {
    /// Request id
    pub id: String,
    /// Sound kind ("tone" or "sequence")
    pub kind: String,
    /// Canonical request hash
    pub request_hash: String,
    /// BLAKE3 hash of the file content
    pub source_hash: String,
}

/// Run the validate command
///
/// # Arguments
/// * `request_path` - Path to the request file
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(request_path: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(request_path)
    } else {
        run_human(request_path)
    }
}

/// Run validate with human-readable (colored) output
fn run_human(request_path: &str) -> Result<ExitCode> {
    println!("{} {}", "Validating:".cyan().bold(), request_path);

    let LoadResult {
        request,
        source_hash,
    } = match load_request(Path::new(request_path)) {
        Ok(loaded) => loaded,
        Err(e) => {
            println!("\n{} {}", "FAILED".red().bold(), e);
            return Ok(ExitCode::from(1));
        }
    };

    let request_hash = canonical_request_hash(&request).unwrap_or_else(|_| "unknown".to_string());
    println!(
        "{} {} ({})",
        "Source:".dimmed(),
        request.sound.kind(),
        &source_hash[..16]
    );
    println!("{} {}", "Request hash:".dimmed(), request_hash);

    let validation_result = validate_request(&request);
    reporting::print_validation_results(&validation_result);

    if validation_result.is_ok() {
        println!("\n{} Request is valid", "SUCCESS".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "\n{} Request has {} error(s)",
            "FAILED".red().bold(),
            validation_result.errors.len()
        );
        Ok(ExitCode::from(1))
    }
}

/// Run validate with machine-readable JSON output
fn run_json(request_path: &str) -> Result<ExitCode> {
    let LoadResult {
        request,
        source_hash,
    } = match load_request(Path::new(request_path)) {
        Ok(loaded) => loaded,
        Err(e) => {
            let error = input_error_to_json(&e, Some(request_path));
            print_json(&CommandOutput::<ValidateSummary>::failure(vec![error], vec![]))?;
            return Ok(ExitCode::from(1));
        }
    };

    let request_hash = canonical_request_hash(&request).unwrap_or_else(|_| "unknown".to_string());
    let summary = ValidateSummary {
        id: request.id.clone(),
        kind: request.sound.kind().to_string(),
        request_hash,
        source_hash,
    };

    let validation_result = validate_request(&request);
    let (errors, warnings) = validation_to_json(&validation_result);

    if validation_result.is_ok() {
        print_json(&CommandOutput::success(summary, warnings))?;
        Ok(ExitCode::SUCCESS)
    } else {
        let errors: Vec<JsonError> = errors
            .into_iter()
            .map(|e| e.with_file(request_path))
            .collect();
        print_json(&CommandOutput::failure(errors, warnings).with_result(summary))?;
        Ok(ExitCode::from(1))
    }
}
