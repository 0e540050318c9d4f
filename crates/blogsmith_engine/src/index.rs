//! Index page parsing and link insertion.
//!
//! The index is the site's landing list of anchors, one per post. A new
//! link goes immediately after the last anchor in document order; an
//! index without anchors gets the link as the first child appended
//! inside `<body>`.

use std::fs;
use std::path::Path;

use scraper::{Html, Selector};
use thiserror::Error;

use crate::page::escape_html;
use crate::persist;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("index already links {0}")]
    DuplicateLink(String),
    #[error("index page has no <body> element")]
    MissingBody,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// In-memory copy of the index page. Mutations touch only this copy;
/// nothing reaches disk until [`IndexPage::save`].
pub struct IndexPage {
    raw: String,
}

impl IndexPage {
    pub fn load(path: &Path) -> Result<Self, IndexError> {
        Ok(Self {
            raw: fs::read_to_string(path)?,
        })
    }

    pub fn from_html(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn html(&self) -> &str {
        &self.raw
    }

    /// Hrefs of all anchors, in document order.
    pub fn links(&self) -> Vec<String> {
        let doc = Html::parse_document(&self.raw);
        let Ok(selector) = Selector::parse("a") else {
            return Vec::new();
        };
        doc.select(&selector)
            .filter_map(|anchor| anchor.value().attr("href").map(str::to_string))
            .collect()
    }

    /// Exact-href duplicate check.
    pub fn contains_link(&self, href: &str) -> bool {
        self.links().iter().any(|existing| existing == href)
    }

    /// Insert a new anchor after the last existing anchor.
    ///
    /// Markup inside comments and script elements never anchors the
    /// insertion; the new link must land where the parser (and the
    /// browser) will see it.
    ///
    /// Fails with [`IndexError::DuplicateLink`] when the href is already
    /// present, leaving the in-memory copy unchanged.
    pub fn append_link(&mut self, href: &str, text: &str) -> Result<(), IndexError> {
        if self.contains_link(href) {
            return Err(IndexError::DuplicateLink(href.to_string()));
        }

        let anchor = format!(
            "<a href=\"{}\">{}</a>",
            escape_html(href),
            escape_html(text)
        );

        let lowered = self.raw.to_ascii_lowercase();
        let opaque = opaque_ranges(&lowered);
        if let Some(idx) = rfind_outside(&lowered, "</a>", &opaque) {
            let insert_at = idx + "</a>".len();
            self.raw.insert_str(insert_at, &format!("\n{anchor}"));
            return Ok(());
        }

        // No anchors yet: append as the first link, at the end of <body>.
        let Some(idx) = rfind_outside(&lowered, "</body>", &opaque) else {
            return Err(IndexError::MissingBody);
        };
        self.raw.insert_str(idx, &format!("{anchor}\n"));
        Ok(())
    }

    /// Atomically rewrite the index file.
    pub fn save(&self, path: &Path) -> Result<(), IndexError> {
        persist::write_atomic(path, self.raw.as_bytes())?;
        Ok(())
    }
}

/// Byte ranges of comments and script elements in the lowercased page.
/// Text inside them may look like markup without being any.
fn opaque_ranges(lowered: &str) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    for (open, close) in [("<!--", "-->"), ("<script", "</script>")] {
        let mut from = 0;
        while let Some(offset) = lowered[from..].find(open) {
            let start = from + offset;
            let end = match lowered[start..].find(close) {
                Some(offset) => start + offset + close.len(),
                // Unterminated region runs to the end of the document.
                None => lowered.len(),
            };
            ranges.push((start, end));
            from = end;
        }
    }
    ranges
}

/// Rightmost occurrence of `needle` outside every opaque range.
fn rfind_outside(lowered: &str, needle: &str, opaque: &[(usize, usize)]) -> Option<usize> {
    let mut end = lowered.len();
    while let Some(idx) = lowered[..end].rfind(needle) {
        if !opaque.iter().any(|&(start, stop)| idx >= start && idx < stop) {
            return Some(idx);
        }
        end = idx;
    }
    None
}
