//! Content directory management: page id allocation, page and cover
//! writes, and the landing-page card append.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::page::{self, PageError};
use crate::persist;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("page already exists: {0}")]
    PageExists(PathBuf),
    #[error("content directory missing or not writable: {0}")]
    ContentDir(String),
    #[error(transparent)]
    Template(#[from] PageError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Manages the site's content directory.
///
/// Single-writer only: id allocation scans the directory and the page
/// write relies on exclusive file creation to detect a lost race, but
/// nothing here locks the directory. Concurrent runs against the same
/// site must be excluded by the caller.
pub struct ContentStore {
    content_dir: PathBuf,
}

impl ContentStore {
    pub fn new(content_dir: PathBuf) -> Self {
        Self { content_dir }
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// File name for a page id.
    pub fn page_file_name(id: u32) -> String {
        format!("{id}.html")
    }

    /// Ensure the content directory exists; create it if missing.
    pub fn ensure_content_dir(&self) -> Result<(), StoreError> {
        if self.content_dir.exists() {
            let meta = fs::metadata(&self.content_dir)
                .map_err(|e| StoreError::ContentDir(e.to_string()))?;
            if !meta.is_dir() {
                return Err(StoreError::ContentDir("path is not a directory".into()));
            }
        } else {
            fs::create_dir_all(&self.content_dir)
                .map_err(|e| StoreError::ContentDir(e.to_string()))?;
        }
        Ok(())
    }

    /// Allocate the next page id: 1 + the highest numeric `N.html` id.
    ///
    /// Non-numeric `.html` files (the card template) never skew the
    /// allocation, and ids stay strictly increasing even after a page
    /// file is deleted by hand.
    pub fn next_page_id(&self) -> Result<u32, StoreError> {
        if !self.content_dir.exists() {
            return Ok(1);
        }
        let mut max_id = 0u32;
        for entry in fs::read_dir(&self.content_dir)? {
            let path = entry?.path();
            let is_html = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("html"));
            if !is_html {
                continue;
            }
            if let Some(id) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.parse::<u32>().ok())
            {
                max_id = max_id.max(id);
            }
        }
        Ok(max_id + 1)
    }

    /// Write `{id}.html` with exclusive creation.
    ///
    /// A concurrent run that allocated the same id loses here with
    /// [`StoreError::PageExists`]; the existing file is left untouched.
    pub fn write_page(&self, id: u32, html: &str) -> Result<PathBuf, StoreError> {
        self.ensure_content_dir()?;
        let target = self.content_dir.join(Self::page_file_name(id));
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&target) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                return Err(StoreError::PageExists(target));
            }
            Err(err) => return Err(err.into()),
        };
        file.write_all(html.as_bytes())?;
        file.sync_all()?;
        Ok(target)
    }

    /// Write the cover image bytes under a fixed per-run name.
    ///
    /// Unlike pages, the cover file carries no uniqueness: each run
    /// overwrites it.
    pub fn stage_cover(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, StoreError> {
        self.ensure_content_dir()?;
        let target = self.content_dir.join(file_name);
        persist::write_atomic(&target, bytes)?;
        Ok(target)
    }

    /// Insert `card` into the landing template page, keeping the
    /// placeholder token so the next run appends before the same marker.
    ///
    /// A template without the token fails loudly; the file is never
    /// rewritten unchanged.
    pub fn append_card(
        &self,
        template_file_name: &str,
        token: &str,
        card: &str,
    ) -> Result<(), StoreError> {
        let path = self.content_dir.join(template_file_name);
        let template = fs::read_to_string(&path)?;
        let replacement = format!("{card}\n{token}");
        let updated = page::substitute_placeholder(&template, token, &replacement)?;
        persist::write_atomic(&path, updated.as_bytes())?;
        Ok(())
    }
}
