//! Determinism testing utilities.
//!
//! Rendering is a pure function of its parameters, so repeated runs must
//! produce byte-identical containers.
//!
//! # Example
//!
//! ```
//! use chiptone_audio::render;
//! use chiptone_spec::presets;
//! use chiptone_tests::determinism::verify_determinism;
//!
//! let request = presets::find("coin").unwrap();
//! let result = verify_determinism(|| render(&request).unwrap().container, 3);
//! result.assert_deterministic();
//! ```

use std::fmt;

/// Result of a determinism verification.
#[derive(Debug, Clone)]
pub struct DeterminismResult {
    /// Whether all runs produced identical output.
    pub is_deterministic: bool,
    /// Number of runs performed.
    pub runs: usize,
    /// Size of the output in bytes.
    pub output_size: usize,
    /// BLAKE3 hash of the first run's output.
    pub hash: String,
    /// If non-deterministic, the first difference found.
    pub diff_info: Option<DiffInfo>,
}

/// The first difference found between two runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffInfo {
    /// Byte offset of the difference (the shorter length on a size mismatch).
    pub offset: usize,
    /// Byte from the first run, if it has one at `offset`.
    pub expected: Option<u8>,
    /// Byte from the differing run, if it has one at `offset`.
    pub actual: Option<u8>,
    /// Which run (0-indexed) produced the differing output.
    pub run_index: usize,
}

impl fmt::Display for DiffInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |b: Option<u8>| match b {
            Some(b) => format!("0x{:02X}", b),
            None => "end of output".to_string(),
        };
        write!(
            f,
            "Difference at byte {}: expected {}, got {} (run {})",
            self.offset,
            show(self.expected),
            show(self.actual),
            self.run_index
        )
    }
}

impl DeterminismResult {
    /// Panic with a detailed message if not deterministic.
    pub fn assert_deterministic(&self) {
        if let Some(diff) = &self.diff_info {
            panic!(
                "Non-deterministic output detected!\n\
                 Runs: {}\n\
                 Output size: {} bytes\n\
                 Hash: {}\n\
                 {}",
                self.runs, self.output_size, self.hash, diff
            );
        }
    }
}

/// Run generation `runs` times and verify all outputs are identical.
///
/// # Panics
///
/// Panics if `runs` is less than 2.
pub fn verify_determinism<F, O>(generate_fn: F, runs: usize) -> DeterminismResult
where
    F: Fn() -> O,
    O: AsRef<[u8]>,
{
    assert!(runs >= 2, "Must run at least 2 times to verify determinism");

    let reference = generate_fn();
    let reference_bytes = reference.as_ref();
    let hash = compute_hash(reference_bytes);

    for run_index in 1..runs {
        let output = generate_fn();
        if let Some(diff) = first_difference(reference_bytes, output.as_ref(), run_index) {
            return DeterminismResult {
                is_deterministic: false,
                runs,
                output_size: reference_bytes.len(),
                hash,
                diff_info: Some(diff),
            };
        }
    }

    DeterminismResult {
        is_deterministic: true,
        runs,
        output_size: reference_bytes.len(),
        hash,
        diff_info: None,
    }
}

/// Find the first difference between two outputs, including a length mismatch.
pub fn first_difference(expected: &[u8], actual: &[u8], run_index: usize) -> Option<DiffInfo> {
    let offset = expected
        .iter()
        .zip(actual)
        .position(|(e, a)| e != a)
        .or_else(|| (expected.len() != actual.len()).then(|| expected.len().min(actual.len())))?;

    Some(DiffInfo {
        offset,
        expected: expected.get(offset).copied(),
        actual: actual.get(offset).copied(),
        run_index,
    })
}

/// Compute BLAKE3 hash of data.
pub fn compute_hash(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_identical_outputs() {
        let result = verify_determinism(|| vec![1u8, 2, 3], 4);
        assert!(result.is_deterministic);
        assert_eq!(result.output_size, 3);
        assert_eq!(result.hash, compute_hash(&[1, 2, 3]));
    }

    #[test]
    fn test_detects_changed_byte() {
        let counter = Cell::new(0u8);
        let result = verify_determinism(
            || {
                counter.set(counter.get() + 1);
                vec![0u8, counter.get()]
            },
            2,
        );
        assert!(!result.is_deterministic);
        let diff = result.diff_info.unwrap();
        assert_eq!(diff.offset, 1);
        assert_eq!(diff.expected, Some(1));
        assert_eq!(diff.actual, Some(2));
    }

    #[test]
    fn test_detects_length_mismatch() {
        let diff = first_difference(&[1, 2, 3], &[1, 2], 1).unwrap();
        assert_eq!(diff.offset, 2);
        assert_eq!(diff.expected, Some(3));
        assert_eq!(diff.actual, None);
        assert!(diff.to_string().contains("end of output"));

        assert_eq!(first_difference(&[1, 2], &[1, 2], 1), None);
    }

    #[test]
    #[should_panic(expected = "Non-deterministic")]
    fn test_assert_deterministic_panics() {
        let counter = Cell::new(0u8);
        verify_determinism(
            || {
                counter.set(counter.get() + 1);
                [counter.get()]
            },
            2,
        )
        .assert_deterministic();
    }
}
