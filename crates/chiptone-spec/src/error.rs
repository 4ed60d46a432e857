//! Error types for request validation and processing.

use thiserror::Error;

/// Error codes for request validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Contract errors (E001-E009)
    /// E001: Unsupported request_version
    UnsupportedRequestVersion,
    /// E002: Invalid request id format
    InvalidRequestId,

    // Format errors (E010-E019)
    /// E010: Sample rate outside the supported range
    InvalidSampleRate,
    /// E011: Channel count other than mono
    UnsupportedChannelCount,
    /// E012: Bit depth other than 16
    UnsupportedBitDepth,

    // Tone errors (E020-E029)
    /// E020: Frequency not finite or not positive
    InvalidFrequency,
    /// E021: Duration over the render budget
    DurationTooLong,
    /// E022: Amplitude outside [0, 1]
    InvalidAmplitude,

    // Sequence errors (E030-E039)
    /// E030: Note sequence has no notes
    EmptyNoteSequence,
    /// E031: Note index above the MIDI range
    NoteOutOfRange,
    /// E032: Tempo not finite or not positive
    InvalidTempo,
    /// E033: Subdivision not finite or not positive
    InvalidSubdivision,
    /// E034: Step length rounds to zero frames
    StepTooShort,
    /// E035: Rendered track over the render budget
    TrackTooLong,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::UnsupportedRequestVersion => "E001",
            ErrorCode::InvalidRequestId => "E002",
            ErrorCode::InvalidSampleRate => "E010",
            ErrorCode::UnsupportedChannelCount => "E011",
            ErrorCode::UnsupportedBitDepth => "E012",
            ErrorCode::InvalidFrequency => "E020",
            ErrorCode::DurationTooLong => "E021",
            ErrorCode::InvalidAmplitude => "E022",
            ErrorCode::EmptyNoteSequence => "E030",
            ErrorCode::NoteOutOfRange => "E031",
            ErrorCode::InvalidTempo => "E032",
            ErrorCode::InvalidSubdivision => "E033",
            ErrorCode::StepTooShort => "E034",
            ErrorCode::TrackTooLong => "E035",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes for request validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// W001: Frequency above the Nyquist limit (will alias)
    AboveNyquist,
    /// W002: Zero duration renders an empty buffer
    ZeroDuration,
    /// W003: Zero amplitude renders silence
    ZeroAmplitude,
    /// W004: Envelope window larger than its per-step cap
    EnvelopeClamped,
    /// W005: Missing description
    MissingDescription,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::AboveNyquist => "W001",
            WarningCode::ZeroDuration => "W002",
            WarningCode::ZeroAmplitude => "W003",
            WarningCode::EnvelopeClamped => "W004",
            WarningCode::MissingDescription => "W005",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// JSON path to the problematic field (e.g., "sound.notes\[2\]").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error with a JSON path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validation warning with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable warning message.
    pub message: String,
    /// JSON path to the problematic field.
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Creates a new validation warning.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation warning with a JSON path.
    pub fn with_path(
        code: WarningCode,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/// Top-level error type for request operations.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Request validation failed with one or more errors.
    #[error("request validation failed with {0} error(s)")]
    ValidationFailed(usize),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of request validation.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether validation passed (no errors).
    pub ok: bool,
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of validation warnings.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Creates a successful validation result.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
        self.ok = false;
    }

    /// Adds a warning to the result.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Returns true if any error carries the given code.
    pub fn has_error(&self, code: ErrorCode) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }

    /// Returns true if any warning carries the given code.
    pub fn has_warning(&self, code: WarningCode) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }

    /// Converts to a Result, returning Err if there are errors.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, Vec<ValidationError>> {
        if self.ok {
            Ok(self.warnings)
        } else {
            Err(self.errors)
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

/// Common trait for library errors.
///
/// Gives every error type in the workspace a stable code and a category so
/// the CLI can report failures uniformly.
///
/// # Example
///
/// ```ignore
/// use chiptone_spec::error::BackendError;
///
/// fn handle_error<E: BackendError>(err: E) {
///     eprintln!("[{}] {}", err.code(), err.message());
/// }
/// ```
pub trait BackendError: std::error::Error {
    /// Get the error code for reporting.
    ///
    /// Returns a static string like "SYNTH_001" or "ENCODE_002". These codes
    /// are stable and can be used for programmatic error handling.
    fn code(&self) -> &'static str;

    /// Get a human-readable message describing the error.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Get the error category for grouping related errors.
    ///
    /// Returns a category like "synthesis", "encoding" or "decoding".
    fn category(&self) -> &'static str;
}
