//! Core traits defining the interfaces between components.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Chunk, Document};

/// Chunking strategy trait.
pub trait Chunker: Send + Sync {
    /// Split a document into ordered chunks carrying its metadata.
    fn chunk(&self, document: &Document) -> Result<Vec<Chunk>>;
}

/// Provider of raw document text by identifier.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetch the text of a document.
    ///
    /// Fails with `DocumentNotFound` when the identifier is unknown and
    /// `FetchFailed` when the document exists but cannot be read.
    async fn fetch(&self, id: &str) -> Result<String>;
}

/// Step that populates a document source before it is read.
#[async_trait]
pub trait Acquirer: Send + Sync {
    /// Make the document available, failing with `AcquisitionFailed`.
    async fn acquire(&self, id: &str) -> Result<()>;
}
