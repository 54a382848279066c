// src/lib.rs
//
// bodytext — main-text extraction by tag/word span optimization.
//
// The document is scanned into a stream of tag tokens and word tokens, the
// stream is run-length encoded into alternating tag runs and word runs, and an
// exhaustive search over pairs of word runs picks the span that leaves out the
// most markup while keeping the most words.
//
//   scan → tokenizer → runs → span → render
//
// ```
// let html = "<html><body><div><div><p>Some text here</p></div></div></body></html>";
// assert_eq!(bodytext::extract_body_text(html, &bodytext::Config::default()), "Some text here");
// ```

pub mod entities;
pub mod error;
pub mod extractor;
pub mod render;
pub mod runs;
pub mod sanitize;
pub mod scan;
pub mod span;
pub mod tokenizer;

use std::fs;
use std::path::Path;

pub use error::{Error, Result};
pub use extractor::{Extraction, Extractor};
pub use span::Span;
pub use tokenizer::{TagKind, Token};

/// Extraction options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct Config {
    /// Start a new output line after block-level elements.
    pub line_breaks: bool,
    /// Drop head, script and style elements before tokenizing.
    pub strip_unreadable: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            line_breaks: true,
            strip_unreadable: true,
        }
    }
}

impl Config {
    pub fn with_line_breaks(mut self, on: bool) -> Self {
        self.line_breaks = on;
        self
    }

    pub fn with_strip_unreadable(mut self, on: bool) -> Self {
        self.strip_unreadable = on;
        self
    }
}

fn closed(html: &str, config: &Config) -> Extraction {
    let mut extractor = Extractor::new(*config);
    extractor.feed(html);
    extractor.close()
}

/// Main text of `html`.
pub fn extract_body_text(html: &str, config: &Config) -> String {
    closed(html, config).body_text()
}

/// All text of `html`, space-joined.
pub fn extract_full_text(html: &str, config: &Config) -> String {
    closed(html, config).full_text()
}

/// Read a document from disk as UTF-8 text.
pub fn load_document(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|_| Error::InvalidUtf8 {
        path: path.to_path_buf(),
    })
}
