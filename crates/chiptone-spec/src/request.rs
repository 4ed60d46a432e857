//! Request document type.

use serde::{Deserialize, Serialize};

use crate::format::AudioFormat;
use crate::params::{SequenceParams, Sound, ToneParams};

/// Current request document version.
pub const REQUEST_VERSION: u32 = 1;

/// A request to render one sound.
///
/// Requests are plain JSON documents; the render pipeline is a pure function
/// of `format` and `sound`, while `id` and `description` only label the output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Request {
    /// Document version (must equal [`REQUEST_VERSION`]).
    pub request_version: u32,
    /// Stable identifier, also used as the output file stem.
    pub id: String,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Output format.
    #[serde(default)]
    pub format: AudioFormat,
    /// What to render.
    pub sound: Sound,
}

impl Request {
    /// Creates a request for any sound in the default format.
    pub fn new(id: impl Into<String>, sound: Sound) -> Self {
        Self {
            request_version: REQUEST_VERSION,
            id: id.into(),
            description: None,
            format: AudioFormat::default(),
            sound,
        }
    }

    /// Creates a single-tone request.
    pub fn tone(id: impl Into<String>, params: ToneParams) -> Self {
        Self::new(id, Sound::Tone(params))
    }

    /// Creates a step-sequence request.
    pub fn sequence(id: impl Into<String>, params: SequenceParams) -> Self {
        Self::new(id, Sound::Sequence(params))
    }

    /// Sets the output format.
    pub fn with_format(mut self, format: AudioFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Parses a request from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the request to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the request to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Serializes the request to a JSON value.
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Output file name for this request.
    pub fn file_name(&self) -> String {
        format!("{}.wav", self.id)
    }
}
