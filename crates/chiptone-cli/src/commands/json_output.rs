//! JSON output types for machine-readable CLI output.
//!
//! Every command that takes `--json` prints exactly one [`CommandOutput`]
//! document to stdout, so scripts can parse results without scraping the
//! colored human output.

use anyhow::Result;
use chiptone_audio::{AudioError, DecodeError, RenderResult};
use chiptone_spec::{BackendError, ValidationError, ValidationResult, ValidationWarning};
use serde::{Deserialize, Serialize};

use crate::input::InputError;

/// Error codes for CLI operations.
///
/// These codes are stable and can be used for programmatic error handling.
/// Validation and library errors pass their own codes through.
pub mod error_codes {
    /// File could not be read (or written)
    pub const FILE_READ: &str = "CLI_001";
    /// JSON parse error or unknown file extension
    pub const JSON_PARSE: &str = "CLI_002";
    /// Request failed validation
    pub const INVALID_REQUEST: &str = "CLI_003";
    /// Generation error (wraps synthesis and encoding errors)
    pub const GENERATION_ERROR: &str = "CLI_004";
    /// Container could not be decoded
    pub const DECODE_ERROR: &str = "CLI_005";
    /// No preset with the given name
    pub const UNKNOWN_PRESET: &str = "CLI_006";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "E020", "SYNTH_004")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// JSON path to the problematic field (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Underlying library error code (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause_code: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
            file: None,
            cause_code: None,
        }
    }

    /// Sets the JSON path for this error.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Sets the underlying library error code.
    pub fn with_cause_code(mut self, code: impl Into<String>) -> Self {
        self.cause_code = Some(code.into());
        self
    }
}

/// A structured warning in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonWarning {
    /// Stable warning code (e.g., "W001")
    pub code: String,
    /// Human-readable warning message
    pub message: String,
    /// JSON path to the problematic field (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl JsonWarning {
    /// Creates a new warning with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
        }
    }

    /// Sets the JSON path for this warning.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Top-level JSON document printed by every command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandOutput<T> {
    /// Whether the command succeeded
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Warnings encountered
    pub warnings: Vec<JsonWarning>,
    /// Command-specific payload (on success, sometimes on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T> CommandOutput<T> {
    /// Creates a successful output.
    pub fn success(result: T, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            warnings,
            result: Some(result),
        }
    }

    /// Creates a failed output.
    pub fn failure(errors: Vec<JsonError>, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: false,
            errors,
            warnings,
            result: None,
        }
    }

    /// Attaches a payload to a failed output.
    pub fn with_result(mut self, result: T) -> Self {
        self.result = Some(result);
        self
    }
}

/// Details of a rendered sound.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderSummary {
    /// Request id (output file stem)
    pub id: String,
    /// Where the file was written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of frames
    pub num_frames: usize,
    /// Duration in seconds
    pub duration_seconds: f64,
    /// Bytes written
    pub bytes: usize,
    /// BLAKE3 hash of the PCM payload
    pub pcm_hash: String,
    /// Loop region `[start, end)` for looping sounds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loop_points: Option<[usize; 2]>,
    /// Whether the result came from the cache
    pub cache_hit: bool,
}

impl RenderSummary {
    /// Summarizes a render result.
    pub fn new(id: impl Into<String>, result: &RenderResult, cache_hit: bool) -> Self {
        Self {
            id: id.into(),
            output_path: None,
            sample_rate: result.format.sample_rate,
            num_frames: result.num_frames,
            duration_seconds: result.duration_seconds(),
            bytes: result.container.len(),
            pcm_hash: result.pcm_hash.clone(),
            loop_points: result.loop_points.map(|lp| [lp.start_frame, lp.end_frame]),
            cache_hit,
        }
    }

    /// Records the output path.
    pub fn with_output_path(mut self, path: impl Into<String>) -> Self {
        self.output_path = Some(path.into());
        self
    }
}

/// Converts a validation error to JSON.
pub fn validation_error_to_json(error: &ValidationError) -> JsonError {
    let json = JsonError::new(error.code.code(), &error.message);
    match &error.path {
        Some(path) => json.with_path(path),
        None => json,
    }
}

/// Converts a validation warning to JSON.
pub fn validation_warning_to_json(warning: &ValidationWarning) -> JsonWarning {
    let json = JsonWarning::new(warning.code.code(), &warning.message);
    match &warning.path {
        Some(path) => json.with_path(path),
        None => json,
    }
}

/// Splits a validation result into JSON errors and warnings.
pub fn validation_to_json(result: &ValidationResult) -> (Vec<JsonError>, Vec<JsonWarning>) {
    (
        result.errors.iter().map(validation_error_to_json).collect(),
        result.warnings.iter().map(validation_warning_to_json).collect(),
    )
}

/// Converts an input error to JSON.
pub fn input_error_to_json(error: &InputError, file: Option<&str>) -> JsonError {
    let code = match error {
        InputError::FileRead { .. } => error_codes::FILE_READ,
        InputError::UnknownExtension { .. } | InputError::JsonParse { .. } => {
            error_codes::JSON_PARSE
        }
    };

    let json = JsonError::new(code, error.to_string());
    match file {
        Some(f) => json.with_file(f),
        None => json,
    }
}

/// Converts a render error to JSON, keeping the library code as the cause.
pub fn audio_error_to_json(error: &AudioError) -> JsonError {
    JsonError::new(error_codes::GENERATION_ERROR, error.to_string()).with_cause_code(error.code())
}

/// Converts a decode error to JSON, keeping the library code as the cause.
pub fn decode_error_to_json(error: &DecodeError, file: Option<&str>) -> JsonError {
    let json =
        JsonError::new(error_codes::DECODE_ERROR, error.to_string()).with_cause_code(error.code());
    match file {
        Some(f) => json.with_file(f),
        None => json,
    }
}

/// Prints an output document as pretty JSON on stdout.
pub fn print_json<T: Serialize>(output: &CommandOutput<T>) -> Result<()> {
    let json = serde_json::to_string_pretty(output)?;
    println!("{}", json);
    Ok(())
}
