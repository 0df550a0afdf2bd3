//! Corpus loading for string synthesis.
//!
//! The corpus is a large reference text loaded once at startup and
//! used only as a source of natural-language-like substrings. An empty
//! corpus is a configuration error: generation must not start with one.

use std::path::Path;

/// Error type for corpus operations.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    /// Error reading the corpus file
    #[error("Failed to read corpus file: {0}")]
    IoError(#[from] std::io::Error),

    /// Corpus contains no usable text
    #[error("Corpus is empty")]
    Empty,
}

/// An immutable loaded reference text.
#[derive(Debug, Clone)]
pub struct Corpus {
    text: String,
}

impl Corpus {
    /// Create a corpus from an already-loaded text body.
    ///
    /// Returns [`CorpusError::Empty`] if the text holds nothing but
    /// whitespace.
    pub fn new(text: impl Into<String>) -> Result<Self, CorpusError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(CorpusError::Empty);
        }
        Ok(Self { text })
    }

    /// Load a corpus from a UTF-8 text file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CorpusError> {
        let text = std::fs::read_to_string(path)?;
        Self::new(text)
    }

    /// The full corpus text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Corpus length in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Always false: the constructors reject empty text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
