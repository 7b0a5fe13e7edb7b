//! On-disk layout for generated media.
//!
//! Images, audio, and exports each live in their own directory under one
//! root, created lazily on first write. Stored records reference files by
//! path; deletes go through [`remove_if_exists`] so an already-absent
//! file is a no-op rather than an error.

use std::io;
use std::path::{Path, PathBuf};

/// The three media directories under a common root (default `static/`).
#[derive(Debug, Clone)]
pub struct MediaDirs {
    root: PathBuf,
}

impl MediaDirs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Generated panel images.
    pub fn images(&self) -> PathBuf {
        self.root.join("images")
    }

    /// Synthesized narration audio.
    pub fn audio(&self) -> PathBuf {
        self.root.join("audio")
    }

    /// Exported PDFs.
    pub fn exports(&self) -> PathBuf {
        self.root.join("exports")
    }
}

/// Create `dir` (and parents) if it does not exist yet.
pub fn ensure_dir(dir: &Path) -> io::Result<()> {
    std::fs::create_dir_all(dir)
}

/// Delete the file at `path` if it exists.
///
/// Returns `Ok(true)` when a file was removed, `Ok(false)` when there was
/// nothing to remove. Only unexpected I/O failures are errors.
pub fn remove_if_exists(path: &str) -> io::Result<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}
