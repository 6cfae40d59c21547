//! Corpus access for captured page content
//!
//! The corpus is the crawl's content source: a mapping from URL to
//! previously captured page bytes. The crawl core never talks to the
//! network; a URL either resolves to captured content or it does not.

use crate::{Result, TraplineError};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A single fetched page, produced once per crawl step.
///
/// `content` is `None` when the corpus has no capture for the URL; that is
/// an ordinary outcome, not an error.
#[derive(Debug, Clone)]
pub struct PageFetch {
    /// The URL this content was fetched for
    pub url: String,
    /// Raw page bytes, absent if the corpus has no capture
    pub content: Option<Vec<u8>>,
    /// Content size in bytes (0 when absent)
    pub size: u64,
}

/// Read access to captured page content
pub trait Corpus {
    /// Returns true if the corpus holds content for the URL
    fn contains(&self, url: &str) -> bool;

    /// Resolves a URL to its captured content, or `None` if uncaptured
    fn resolve(&self, url: &str) -> Result<Option<Vec<u8>>>;

    /// Returns the captured content size in bytes, or `None` if uncaptured
    fn content_size(&self, url: &str) -> Result<Option<u64>>;

    /// Fetches a URL into a [`PageFetch`] record
    fn fetch(&self, url: &str) -> Result<PageFetch> {
        let content = self.resolve(url)?;
        let size = content.as_ref().map(|c| c.len() as u64).unwrap_or(0);
        Ok(PageFetch {
            url: url.to_string(),
            content,
            size,
        })
    }
}

/// File-backed corpus.
///
/// Content is addressed by the hex SHA-256 of the URL string: the capture
/// for `url` lives at `<content_dir>/<sha256(url)>`. Tooling that populates
/// the directory uses the same addressing.
pub struct FileCorpus {
    content_dir: PathBuf,
}

impl FileCorpus {
    /// Opens a corpus rooted at the given content directory
    ///
    /// # Arguments
    ///
    /// * `content_dir` - Directory holding one capture file per URL
    ///
    /// # Returns
    ///
    /// * `Ok(FileCorpus)` - The directory exists
    /// * `Err(TraplineError)` - The directory is missing
    pub fn open(content_dir: &Path) -> Result<Self> {
        if !content_dir.is_dir() {
            return Err(TraplineError::CorpusMissing(
                content_dir.display().to_string(),
            ));
        }
        Ok(Self {
            content_dir: content_dir.to_path_buf(),
        })
    }

    /// Maps a URL to its capture file path
    fn capture_path(&self, url: &str) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        self.content_dir.join(hex::encode(hasher.finalize()))
    }
}

impl Corpus for FileCorpus {
    fn contains(&self, url: &str) -> bool {
        self.capture_path(url).is_file()
    }

    fn resolve(&self, url: &str) -> Result<Option<Vec<u8>>> {
        let path = self.capture_path(url);
        if !path.is_file() {
            return Ok(None);
        }
        let bytes = std::fs::read(&path).map_err(|e| TraplineError::Corpus {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        Ok(Some(bytes))
    }

    fn content_size(&self, url: &str) -> Result<Option<u64>> {
        let path = self.capture_path(url);
        if !path.is_file() {
            return Ok(None);
        }
        let meta = std::fs::metadata(&path).map_err(|e| TraplineError::Corpus {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        Ok(Some(meta.len()))
    }
}

/// In-memory corpus, for tests and small hand-built captures
#[derive(Debug, Clone, Default)]
pub struct MemoryCorpus {
    pages: HashMap<String, Vec<u8>>,
}

impl MemoryCorpus {
    /// Creates an empty corpus
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a capture for the given URL, replacing any previous one
    pub fn insert(&mut self, url: &str, content: &[u8]) {
        self.pages.insert(url.to_string(), content.to_vec());
    }
}

impl Corpus for MemoryCorpus {
    fn contains(&self, url: &str) -> bool {
        self.pages.contains_key(url)
    }

    fn resolve(&self, url: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.pages.get(url).cloned())
    }

    fn content_size(&self, url: &str) -> Result<Option<u64>> {
        Ok(self.pages.get(url).map(|c| c.len() as u64))
    }
}
