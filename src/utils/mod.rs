//! Utility functions and data structures.
//!
//! ## Modules
//!
//! - [`app_data`] - Configuration file in the app data directory
//! - [`progress`] - Progress bar (no-op without the `progress` feature)
//!
//! [`TextSource`] loads the text to index: files are memory-mapped so the
//! tree can borrow the mapping instead of a copy.

pub mod app_data;
pub mod progress;

pub use app_data::*;
pub use progress::*;

use anyhow::{Context, Result};
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

/// Text to index, owned for as long as a tree borrows it
#[derive(Debug)]
pub enum TextSource {
    /// Memory-mapped file contents
    Mapped(Mmap),
    /// Text held in memory (command-line text, empty files)
    Owned(Vec<u8>),
}

impl TextSource {
    /// Memory-map a file
    ///
    /// Empty files cannot be mapped on every platform, so they are held as
    /// an empty buffer instead.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let len = file
            .metadata()
            .with_context(|| format!("Failed to stat {}", path.display()))?
            .len();

        if len == 0 {
            return Ok(TextSource::Owned(Vec::new()));
        }

        // SAFETY: the map is read-only; concurrent modification of the
        // file by another process is outside our control, as with any mmap
        let mmap = unsafe { Mmap::map(&file) }
            .with_context(|| format!("Failed to map {}", path.display()))?;
        Ok(TextSource::Mapped(mmap))
    }

    pub fn from_text(text: &str) -> Self {
        TextSource::Owned(text.as_bytes().to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            TextSource::Mapped(mmap) => &mmap[..],
            TextSource::Owned(bytes) => bytes.as_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}
