//! In-memory document source.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use docsplit_core::{DocsplitError, DocumentSource, Result};

/// Document source backed by a map, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryDocumentSource {
    documents: RwLock<HashMap<String, String>>,
}

impl MemoryDocumentSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store or replace a document.
    pub fn insert(&self, id: impl Into<String>, text: impl Into<String>) -> Result<()> {
        let mut documents = self
            .documents
            .write()
            .map_err(|_| DocsplitError::internal("document map lock poisoned"))?;
        documents.insert(id.into(), text.into());
        Ok(())
    }

    /// Remove a document, returning whether it existed.
    pub fn remove(&self, id: &str) -> Result<bool> {
        let mut documents = self
            .documents
            .write()
            .map_err(|_| DocsplitError::internal("document map lock poisoned"))?;
        Ok(documents.remove(id).is_some())
    }
}

impl<K, V> FromIterator<(K, V)> for MemoryDocumentSource
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            documents: RwLock::new(
                iter.into_iter()
                    .map(|(id, text)| (id.into(), text.into()))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl DocumentSource for MemoryDocumentSource {
    async fn fetch(&self, id: &str) -> Result<String> {
        let documents = self
            .documents
            .read()
            .map_err(|_| DocsplitError::fetch_failed(id, "document map lock poisoned"))?;
        documents
            .get(id)
            .cloned()
            .ok_or_else(|| DocsplitError::DocumentNotFound { id: id.to_string() })
    }
}
