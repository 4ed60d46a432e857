//! CLI command implementations

pub mod cache;
pub mod inspect;
pub mod json_output;
pub mod preset;
pub mod render;
pub mod sequence;
pub mod tone;
pub mod validate;

mod reporting;
