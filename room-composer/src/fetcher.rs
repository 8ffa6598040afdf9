/// Image reference resolution seam
use std::fs;
use std::path::{Path, PathBuf};

/// Failure to resolve an image reference to encoded bytes.
#[derive(Debug)]
pub struct FetchError {
    pub image_ref: String,
    pub reason: String,
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to fetch '{}': {}", self.image_ref, self.reason)
    }
}

impl std::error::Error for FetchError {}

/// Resolves an opaque image reference to its encoded bytes. The upload
/// collaborator hands out references; what they point at (remote URL,
/// data URI, local path) is the fetcher's concern, never the core's.
/// Implementations must be shareable across the per-group compositing
/// workers.
pub trait ImageFetcher: Sync {
    fn fetch(&self, image_ref: &str) -> Result<Vec<u8>, FetchError>;
}

/// Fetcher resolving references as file paths, optionally relative to a
/// base directory. This is the offline counterpart of the browser's
/// texture loader.
#[derive(Debug, Default)]
pub struct FileFetcher {
    base_dir: Option<PathBuf>,
}

impl FileFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_dir(base_dir: &Path) -> Self {
        Self {
            base_dir: Some(base_dir.to_path_buf()),
        }
    }
}

impl ImageFetcher for FileFetcher {
    fn fetch(&self, image_ref: &str) -> Result<Vec<u8>, FetchError> {
        let path = match &self.base_dir {
            Some(base) => base.join(image_ref),
            None => PathBuf::from(image_ref),
        };

        fs::read(&path).map_err(|e| FetchError {
            image_ref: image_ref.to_string(),
            reason: e.to_string(),
        })
    }
}
