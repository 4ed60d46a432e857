//! Render cache keyed by synthesis parameters.
//!
//! This module implements a local cache keyed by:
//! - Canonical hash of the request's `format` and `sound`
//! - Backend version string
//!
//! Ids and descriptions do not take part in the key, so two requests that
//! differ only in labelling share an entry. Entries are stored in an
//! XDG-compatible directory structure.

use anyhow::{Context, Result};
use chiptone_audio::{ContainerBuffer, LoopPoints, RenderResult};
use chiptone_spec::{canonical_sound_hash, AudioFormat, Request};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Version string stored in every key; bumping it invalidates old entries.
pub const BACKEND_VERSION: &str = concat!("chiptone v", env!("CARGO_PKG_VERSION"));

const MANIFEST_FILE: &str = "manifest.json";
const SOUND_FILE: &str = "sound.wav";

/// Cache key components for deterministic cache lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheKey {
    /// BLAKE3 hash of the canonical format + sound
    pub sound_hash: String,
    /// Backend version string
    pub backend_version: String,
}

impl CacheKey {
    /// Create a cache key for a request
    pub fn new(request: &Request, backend_version: impl Into<String>) -> Result<Self> {
        let sound_hash = canonical_sound_hash(&request.format, &request.sound)
            .context("Failed to compute canonical sound hash")?;
        Ok(Self {
            sound_hash,
            backend_version: backend_version.into(),
        })
    }

    /// Create a cache key tagged with this build's version
    pub fn for_request(request: &Request) -> Result<Self> {
        Self::new(request, BACKEND_VERSION)
    }

    /// Compute the cache entry hash (deterministic cache directory name)
    pub fn compute_hash(&self) -> String {
        let canonical = format!("sound:{},backend:{}", self.sound_hash, self.backend_version);
        blake3::hash(canonical.as_bytes()).to_hex().to_string()
    }
}

/// Cache manifest stored alongside the cached container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheManifest {
    /// Cache key components
    pub key: CacheKey,
    /// Timestamp when this entry was created (RFC 3339)
    pub created_at: String,
    /// BLAKE3 hash of the PCM payload
    pub pcm_hash: String,
    /// Number of frames in the payload
    pub num_frames: usize,
    /// Container format
    pub format: AudioFormat,
    /// Whether the sound loops over the whole buffer
    pub looping: bool,
}

/// Cache manager for reading/writing rendered containers
#[derive(Debug, Clone)]
pub struct CacheManager {
    cache_dir: PathBuf,
}

impl CacheManager {
    /// Create a new cache manager using the default XDG cache directory
    pub fn new() -> Result<Self> {
        let cache_dir = Self::default_cache_dir().context("Failed to determine cache directory")?;
        Ok(Self { cache_dir })
    }

    /// Create a cache manager rooted at `cache_dir`
    pub fn with_dir(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// Use `cache_dir` if given, the default directory otherwise
    pub fn open(cache_dir: Option<&Path>) -> Result<Self> {
        match cache_dir {
            Some(dir) => Ok(Self::with_dir(dir)),
            None => Self::new(),
        }
    }

    /// Get the default cache directory (XDG-compatible)
    pub fn default_cache_dir() -> Option<PathBuf> {
        dirs::cache_dir().map(|d| d.join("chiptone").join("render"))
    }

    /// Cache root directory
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Get the path to a cache entry directory
    pub fn entry_path(&self, key: &CacheKey) -> PathBuf {
        let hash = key.compute_hash();
        self.cache_dir.join(format!("{}.cache", hash))
    }

    /// Check if a cache entry exists
    pub fn has_entry(&self, key: &CacheKey) -> bool {
        self.entry_path(key).join(MANIFEST_FILE).exists()
    }

    /// Retrieve a cached render (returns None on a miss)
    ///
    /// An entry whose payload no longer matches its manifest hash, or whose
    /// container no longer decodes, counts as a miss.
    pub fn get(&self, key: &CacheKey) -> Result<Option<RenderResult>> {
        let entry_path = self.entry_path(key);
        let manifest_path = entry_path.join(MANIFEST_FILE);

        if !manifest_path.exists() {
            return Ok(None);
        }

        let manifest_json =
            fs::read_to_string(&manifest_path).context("Failed to read cache manifest")?;
        let manifest: CacheManifest =
            serde_json::from_str(&manifest_json).context("Failed to parse cache manifest")?;

        let sound_path = entry_path.join(SOUND_FILE);
        let bytes = fs::read(&sound_path)
            .with_context(|| format!("Failed to read cached file: {}", sound_path.display()))?;

        let container = match ContainerBuffer::from_bytes(&bytes) {
            Ok(container) => container,
            Err(e) => {
                warn!(entry = %entry_path.display(), error = %e, "cached container is corrupt");
                return Ok(None);
            }
        };
        let pcm_hash = container.pcm_hash();
        if pcm_hash != manifest.pcm_hash {
            warn!(entry = %entry_path.display(), "cached payload hash mismatch");
            return Ok(None);
        }

        debug!(entry = %entry_path.display(), "cache hit");
        Ok(Some(RenderResult {
            container,
            pcm_hash,
            format: manifest.format,
            num_frames: manifest.num_frames,
            loop_points: manifest
                .looping
                .then(|| LoopPoints::whole(manifest.num_frames)),
        }))
    }

    /// Store a render in the cache
    pub fn put(&self, key: &CacheKey, result: &RenderResult) -> Result<()> {
        let entry_path = self.entry_path(key);

        fs::create_dir_all(&entry_path).with_context(|| {
            format!(
                "Failed to create cache entry directory: {}",
                entry_path.display()
            )
        })?;

        fs::write(entry_path.join(SOUND_FILE), result.container.as_bytes())
            .context("Failed to write cached container")?;

        let manifest = CacheManifest {
            key: key.clone(),
            created_at: chrono::Utc::now().to_rfc3339(),
            pcm_hash: result.pcm_hash.clone(),
            num_frames: result.num_frames,
            format: result.format,
            looping: result.loop_points.is_some(),
        };

        let manifest_json = serde_json::to_string_pretty(&manifest)
            .context("Failed to serialize cache manifest")?;
        fs::write(entry_path.join(MANIFEST_FILE), manifest_json)
            .context("Failed to write cache manifest")?;

        debug!(entry = %entry_path.display(), "cache store");
        Ok(())
    }

    /// Clear all cache entries
    pub fn clear(&self) -> Result<u64> {
        if !self.cache_dir.exists() {
            return Ok(0);
        }

        let mut count = 0u64;
        for path in self.entry_dirs()? {
            fs::remove_dir_all(&path)
                .with_context(|| format!("Failed to remove cache entry: {}", path.display()))?;
            count += 1;
        }

        Ok(count)
    }

    /// Get cache info (total entries, total size)
    pub fn info(&self) -> Result<CacheInfo> {
        let mut info = CacheInfo {
            cache_dir: self.cache_dir.clone(),
            entry_count: 0,
            total_size_bytes: 0,
        };
        if !self.cache_dir.exists() {
            return Ok(info);
        }

        for path in self.entry_dirs()? {
            info.entry_count += 1;
            info.total_size_bytes += Self::dir_size(&path)?;
        }

        Ok(info)
    }

    fn entry_dirs(&self) -> Result<Vec<PathBuf>> {
        let mut dirs = Vec::new();
        for entry in fs::read_dir(&self.cache_dir).context("Failed to read cache directory")? {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_dir() && path.extension().and_then(|s| s.to_str()) == Some("cache") {
                dirs.push(path);
            }
        }
        Ok(dirs)
    }

    /// Compute total size of a directory (recursive)
    fn dir_size(path: &Path) -> Result<u64> {
        let mut total = 0u64;

        for entry in walkdir::WalkDir::new(path) {
            let entry = entry.context("Failed to walk directory")?;
            if entry.file_type().is_file() {
                total += entry.metadata()?.len();
            }
        }

        Ok(total)
    }
}

/// Cache information
#[derive(Debug, Clone)]
pub struct CacheInfo {
    /// Cache directory path
    pub cache_dir: PathBuf,
    /// Number of cache entries
    pub entry_count: u64,
    /// Total size in bytes
    pub total_size_bytes: u64,
}
