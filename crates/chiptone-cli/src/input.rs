//! Request document loading.

use chiptone_spec::Request;
use std::path::{Path, PathBuf};

/// Recognized request file extensions.
pub const REQUEST_EXTENSIONS: &[&str] = &["json"];

/// Result of loading a request file.
#[derive(Debug)]
pub struct LoadResult {
    /// The parsed request.
    pub request: Request,
    /// BLAKE3 hash of the file content (hex string).
    pub source_hash: String,
}

/// Errors that can occur during request loading.
#[derive(Debug)]
pub enum InputError {
    /// File could not be read.
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Unknown file extension.
    UnknownExtension { extension: Option<String> },

    /// JSON parsing failed.
    JsonParse { message: String },
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::FileRead { path, source } => {
                write!(f, "failed to read file '{}': {}", path.display(), source)
            }
            InputError::UnknownExtension { extension } => match extension {
                Some(ext) => write!(f, "unknown file extension '.{}' (expected .json)", ext),
                None => write!(f, "file has no extension (expected .json)"),
            },
            InputError::JsonParse { message } => {
                write!(f, "JSON parse error: {}", message)
            }
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::FileRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Loads a request from a `.json` file.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use chiptone_cli::input::load_request;
///
/// let loaded = load_request(Path::new("coin.json")).unwrap();
/// println!("Loaded request {}", loaded.request.id);
/// ```
pub fn load_request(path: &Path) -> Result<LoadResult, InputError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase());

    match extension.as_deref() {
        Some(ext) if REQUEST_EXTENSIONS.contains(&ext) => {}
        _ => return Err(InputError::UnknownExtension { extension }),
    }

    let content = std::fs::read_to_string(path).map_err(|e| InputError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let source_hash = blake3::hash(content.as_bytes()).to_hex().to_string();

    let request = Request::from_json(&content).map_err(|e| InputError::JsonParse {
        message: e.to_string(),
    })?;

    Ok(LoadResult {
        request,
        source_hash,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_request() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("coin.json");
        std::fs::write(
            &path,
            r#"{
                "request_version": 1,
                "id": "coin-pickup",
                "sound": { "kind": "tone", "frequency_hz": 1320.0, "duration_ms": 80 }
            }"#,
        )
        .unwrap();

        let result = load_request(&path).unwrap();
        assert_eq!(result.request.id, "coin-pickup");
        assert_eq!(result.source_hash.len(), 64);
    }

    #[test]
    fn test_load_unknown_extension() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("coin.yaml");
        std::fs::write(&path, "id: coin").unwrap();

        assert!(matches!(
            load_request(&path),
            Err(InputError::UnknownExtension { extension: Some(ref ext) }) if ext == "yaml"
        ));
    }

    #[test]
    fn test_load_file_not_found() {
        let result = load_request(Path::new("/nonexistent/request.json"));
        assert!(matches!(result, Err(InputError::FileRead { .. })));
    }

    #[test]
    fn test_load_invalid_json() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("broken.json");
        std::fs::write(&path, "{ invalid json }").unwrap();

        assert!(matches!(load_request(&path), Err(InputError::JsonParse { .. })));
    }

    #[test]
    fn test_load_rejects_unknown_fields() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("extra.json");
        std::fs::write(
            &path,
            r#"{
                "request_version": 1,
                "id": "coin-pickup",
                "seed": 42,
                "sound": { "kind": "tone", "frequency_hz": 1320.0, "duration_ms": 80 }
            }"#,
        )
        .unwrap();

        assert!(matches!(load_request(&path), Err(InputError::JsonParse { .. })));
    }
}
