//! Test harness utilities for running CLI commands and validating outputs.
//!
//! Commands run as library calls against a private temporary directory, so
//! tests never touch the user's cache.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chiptone_cli::commands::render::RenderOptions;
use chiptone_spec::Request;
use tempfile::TempDir;

/// Header fields and samples read back with `hound`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavInfo {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Channel count.
    pub channels: u16,
    /// Bits per sample.
    pub bits_per_sample: u16,
    /// All samples, interleaved.
    pub samples: Vec<i16>,
}

impl WavInfo {
    /// Reads a WAV file from memory with an independent decoder.
    pub fn read(bytes: &[u8]) -> Result<Self, hound::Error> {
        let mut reader = hound::WavReader::new(std::io::Cursor::new(bytes))?;
        let spec = reader.spec();
        let samples = reader.samples::<i16>().collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            sample_rate: spec.sample_rate,
            channels: spec.channels,
            bits_per_sample: spec.bits_per_sample,
            samples,
        })
    }

    /// Reads a WAV file from disk.
    pub fn read_file(path: &Path) -> Result<Self, hound::Error> {
        let bytes = fs::read(path)?;
        Self::read(&bytes)
    }
}

/// A test harness for running chiptone commands.
pub struct TestHarness {
    /// Working directory for test outputs.
    pub work_dir: TempDir,
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHarness {
    /// Create a new test harness.
    pub fn new() -> Self {
        Self {
            work_dir: TempDir::new().expect("Failed to create work dir"),
        }
    }

    /// Get the working directory path.
    pub fn path(&self) -> &Path {
        self.work_dir.path()
    }

    /// Directory rendered files land in.
    pub fn out_root(&self) -> PathBuf {
        self.path().join("out")
    }

    /// Directory used as the render cache.
    pub fn cache_dir(&self) -> PathBuf {
        self.path().join("cache")
    }

    /// Render options pointing at this harness's directories.
    pub fn render_options(&self, no_cache: bool) -> RenderOptions {
        RenderOptions {
            out_root: self.out_root(),
            no_cache,
            cache_dir: Some(self.cache_dir()),
            json: true,
        }
    }

    /// Writes raw JSON to `<work_dir>/<name>` and returns the path.
    pub fn write_json(&self, name: &str, json: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, json).expect("Failed to write request file");
        path
    }

    /// Serializes a request to `<work_dir>/<id>.json` and returns the path.
    pub fn write_request(&self, request: &Request) -> PathBuf {
        let json = request
            .to_json_pretty()
            .expect("Failed to serialize request");
        self.write_json(&format!("{}.json", request.id), &json)
    }

    /// Runs the `render` command on a request file.
    pub fn render_file(&self, request_path: &Path, no_cache: bool) -> ExitCode {
        chiptone_cli::commands::render::run(
            request_path.to_str().expect("non-UTF-8 temp path"),
            &self.render_options(no_cache),
        )
        .expect("render command errored")
    }

    /// Runs the `validate` command on a request file.
    pub fn validate_file(&self, request_path: &Path) -> ExitCode {
        chiptone_cli::commands::validate::run(
            request_path.to_str().expect("non-UTF-8 temp path"),
            true,
        )
        .expect("validate command errored")
    }

    /// Path a rendered request is written to.
    pub fn output_path(&self, id: &str) -> PathBuf {
        self.out_root().join(format!("{}.wav", id))
    }

    /// Reads a rendered file.
    pub fn read_output(&self, id: &str) -> Vec<u8> {
        fs::read(self.output_path(id)).expect("Failed to read rendered file")
    }
}
