//! chiptone End-to-End Test Infrastructure
//!
//! This crate provides integration tests for the render pipeline:
//!
//! - Rendering: request document -> WAV file on disk
//! - Validation: written files decode with an independent WAV reader
//! - **Determinism**: byte-identical output across runs and threads
//! - Properties: length, range, pitch and header invariants under proptest
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p chiptone-tests
//! ```

pub mod determinism;
pub mod fixtures;
pub mod harness;

// Re-export commonly used items
pub use determinism::{compute_hash, verify_determinism, DeterminismResult, DiffInfo};
pub use harness::{TestHarness, WavInfo};
