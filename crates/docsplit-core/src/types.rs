//! Core domain types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata attached uniformly to every chunk of a document.
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// A source document to be chunked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Raw document text.
    pub text: String,

    /// Metadata copied onto every chunk.
    #[serde(default)]
    pub metadata: Metadata,
}

impl Document {
    /// Create a document without metadata.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metadata: Metadata::new(),
        }
    }

    /// Attach a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// A bounded-size piece of a document.
///
/// `content` is always a contiguous substring of the source text: the
/// leading `overlap` bytes repeat the tail of the previous chunk and the
/// rest is new text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk text, including any overlap prefix.
    pub content: String,

    /// Copy of the document metadata.
    pub metadata: Metadata,

    /// Byte offset of `content` in the source text.
    pub start: usize,

    /// Byte length of the prefix shared with the previous chunk.
    pub overlap: usize,
}

impl Chunk {
    /// The part of the chunk not shared with the previous chunk.
    pub fn core(&self) -> &str {
        &self.content[self.overlap..]
    }

    /// The overlap prefix.
    pub fn overlap_text(&self) -> &str {
        &self.content[..self.overlap]
    }

    /// Byte offset just past the end of the chunk in the source text.
    pub fn end(&self) -> usize {
        self.start + self.content.len()
    }
}
