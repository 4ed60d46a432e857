//! chiptone request library
//!
//! This crate provides the data model shared by the chiptone synthesizer, the
//! container encoder and the CLI: audio formats, notes, envelopes, request
//! documents, validation, canonical hashing and the built-in preset bank.
//!
//! # Overview
//!
//! A [`Request`] is a JSON document describing one sound:
//!
//! - **Contract fields**: `request_version`, `id`, optional `description`
//! - **Format**: sample rate, channel count and bit depth of the rendered file
//! - **Sound**: either a single fixed-frequency tone or a looping step sequence
//!
//! # Example
//!
//! ```
//! use chiptone_spec::{Request, ToneParams};
//! use chiptone_spec::validation::validate_request;
//! use chiptone_spec::hash::canonical_request_hash;
//!
//! let request = Request::tone("coin-pickup", ToneParams::new(1320.0, 80))
//!     .with_description("Short bright ping");
//!
//! assert!(validate_request(&request).is_ok());
//!
//! let hash = canonical_request_hash(&request).unwrap();
//! assert_eq!(hash.len(), 64);
//! ```
//!
//! # Modules
//!
//! - [`error`]: Error and warning types for validation
//! - [`format`]: Audio format description
//! - [`note`]: Equal-tempered pitch mapping
//! - [`params`]: Tone, sequence and envelope parameters
//! - [`request`]: Request document type
//! - [`validation`]: Request validation functions
//! - [`hash`]: Canonical hashing
//! - [`presets`]: Built-in arcade sound bank

pub mod error;
pub mod format;
pub mod hash;
pub mod note;
pub mod params;
pub mod presets;
pub mod request;
pub mod validation;

// Re-export commonly used types at the crate root
pub use error::{
    BackendError, ErrorCode, SpecError, ValidationError, ValidationResult, ValidationWarning,
    WarningCode,
};
pub use format::AudioFormat;
pub use hash::{canonical_request_hash, canonical_sound_hash};
pub use note::{midi_to_frequency, Note};
pub use params::{EnvelopeSpec, SequenceParams, Sound, ToneParams};
pub use request::{Request, REQUEST_VERSION};
pub use validation::{is_valid_request_id, validate_request};
