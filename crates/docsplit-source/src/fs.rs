//! Filesystem-backed document source.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, warn};

use docsplit_core::{DocsplitError, DocumentSource, Result, SourceConfig};

/// Reads documents stored as files under `root/folder`.
///
/// An identifier such as `https://example.com/docs/api/accounts` maps to
/// `api-accounts.md` when `base_url` is `https://example.com/docs`.
#[derive(Debug, Clone)]
pub struct FsDocumentSource {
    dir: PathBuf,
    base_url: Option<String>,
    extension: String,
}

impl FsDocumentSource {
    /// Create a source reading `<dir>/<key>.<extension>`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            base_url: None,
            extension: "md".to_string(),
        }
    }

    /// Create a source from configuration.
    pub fn from_config(config: &SourceConfig) -> Self {
        Self {
            dir: config.root.join(&config.folder),
            base_url: config.base_url.clone(),
            extension: config.extension.clone(),
        }
    }

    /// Strip this prefix from identifiers before deriving file names.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Directory documents are read from.
    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    /// File name for an identifier.
    pub fn object_key(&self, id: &str) -> String {
        let relative = self
            .base_url
            .as_deref()
            .map(|base| base.trim_end_matches('/'))
            .and_then(|base| id.strip_prefix(base))
            .map(|rest| rest.trim_start_matches('/'))
            .unwrap_or(id);

        format!("{}.{}", relative.replace('/', "-"), self.extension)
    }

    /// Full path for an identifier.
    pub fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(self.object_key(id))
    }
}

#[async_trait]
impl DocumentSource for FsDocumentSource {
    async fn fetch(&self, id: &str) -> Result<String> {
        let path = self.path_for(id);
        debug!("Fetching {} from {:?}", id, path);

        match tokio::fs::read_to_string(&path).await {
            Ok(text) => {
                debug!("Fetched {} bytes for {}", text.len(), id);
                Ok(text)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Document {} not found at {:?}", id, path);
                Err(DocsplitError::DocumentNotFound { id: id.to_string() })
            }
            Err(e) => {
                warn!("Failed to read {:?}: {}", path, e);
                Err(DocsplitError::fetch_failed(id, e.to_string()))
            }
        }
    }
}
