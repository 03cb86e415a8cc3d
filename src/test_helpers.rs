//! Test helpers for creating hermetic site directories
//!
//! # Usage
//!
//! ```rust,ignore
//! use post_stubs::test_helpers::TestSite;
//!
//! let site = TestSite::with_posts_dir()?;
//! let report = site.generator().generate("Mon 1-29: Lecture", &mut std::io::sink())?;
//! assert_eq!(site.read_stub("2024-01-29.md")?, post_stubs::FRONT_MATTER);
//! # Ok::<(), post_stubs::StubError>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::{Result, StubError, StubGenerator};

/// A temporary site root with an optional `_posts` directory.
pub struct TestSite {
    temp_dir: TempDir,
    posts_dir: PathBuf,
}

impl TestSite {
    /// Create a site root without a posts directory
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new().map_err(|e| StubError::io(std::env::temp_dir(), e))?;
        let posts_dir = temp_dir.path().join("_posts");

        Ok(Self {
            temp_dir,
            posts_dir,
        })
    }

    /// Create a site root with an empty `_posts` directory
    pub fn with_posts_dir() -> Result<Self> {
        let site = Self::new()?;
        fs::create_dir_all(&site.posts_dir).map_err(|e| StubError::io(&site.posts_dir, e))?;
        Ok(site)
    }

    /// Write a schedule file relative to the site root
    pub fn add_schedule(&self, relative_path: &str, content: &str) -> Result<PathBuf> {
        let path = self.root().join(relative_path);
        fs::write(&path, content).map_err(|e| StubError::io(&path, e))?;
        Ok(path)
    }

    /// Generator targeting this site's posts directory
    pub fn generator(&self) -> StubGenerator {
        StubGenerator::new(&self.posts_dir)
    }

    pub fn read_stub(&self, file_name: &str) -> Result<String> {
        let path = self.posts_dir.join(file_name);
        fs::read_to_string(&path).map_err(|e| StubError::io(&path, e))
    }

    /// Sorted file names currently in the posts directory
    pub fn stub_names(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.posts_dir).map_err(|e| StubError::io(&self.posts_dir, e))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StubError::io(&self.posts_dir, e))?;
            names.push(entry.file_name().to_string_lossy().to_string());
        }
        names.sort();
        Ok(names)
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn posts_dir(&self) -> &Path {
        &self.posts_dir
    }
}
