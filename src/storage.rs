//! The storage boundary.
//!
//! The core only needs one capability: check existence of, read, and write
//! raw bytes addressed by a logical name. [`DirStorage`] provides the fixed
//! default convention (a configurable root directory joined with the name)
//! and may be swapped for any other [`Storage`] implementation.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// The default root directory for [`DirStorage`].
pub const DEFAULT_ROOT: &str = "data";

/// Byte-level access to stored documents, addressed by logical name.
pub trait Storage: fmt::Debug {
    /// Returns true if a document exists under this name.
    fn exists(&self, name: &str) -> bool;

    /// Reads the document stored under this name.
    fn read(&self, name: &str) -> Result<Vec<u8>>;

    /// Writes a document under this name, replacing any previous content.
    fn write(&self, name: &str, bytes: &[u8]) -> Result<()>;
}

/// Filesystem storage: logical names resolve to files under a root
/// directory.
#[derive(Debug, Clone)]
pub struct DirStorage {
    root: PathBuf,
}

impl DirStorage {
    /// Creates a storage rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a logical name to its physical path.
    pub fn resolve(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl Default for DirStorage {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT)
    }
}

impl Storage for DirStorage {
    fn exists(&self, name: &str) -> bool {
        self.resolve(name).exists()
    }

    fn read(&self, name: &str) -> Result<Vec<u8>> {
        Ok(fs::read(self.resolve(name))?)
    }

    fn write(&self, name: &str, bytes: &[u8]) -> Result<()> {
        let path = self.resolve(name);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, bytes)?;
        Ok(())
    }
}
