//! chiptone CLI library.
//!
//! This crate provides the core functionality for the `chiptone` binary:
//! request loading, the render cache, logging setup and the command
//! implementations.

pub mod cache;
pub mod commands;
pub mod input;
pub mod logging;
