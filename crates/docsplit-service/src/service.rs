//! Load pipeline: acquire, fetch, chunk, respond.

use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info, warn};

use docsplit_chunk::RecursiveChunker;
use docsplit_core::{
    Acquirer, Chunk, Chunker, DocsplitConfig, DocsplitError, Document, DocumentSource, Result,
};

use crate::envelope::{LoadOutcome, LoadRequest, LoadResponse, FETCH_FAILED, PROCESSING_FAILED};

/// Loads documents by identifier and returns their chunks.
pub struct LoadService<S: ?Sized, A: ?Sized> {
    /// Where document text is read from.
    source: Arc<S>,

    /// Step run before each fetch.
    acquirer: Arc<A>,

    /// Chunker, validated at construction.
    chunker: RecursiveChunker,

    /// Serialize full chunks instead of bare texts.
    include_metadata: bool,
}

impl<S, A> LoadService<S, A>
where
    S: DocumentSource + ?Sized,
    A: Acquirer + ?Sized,
{
    /// Create a service with an already validated chunker.
    pub fn new(source: Arc<S>, acquirer: Arc<A>, chunker: RecursiveChunker) -> Self {
        Self {
            source,
            acquirer,
            chunker,
            include_metadata: false,
        }
    }

    /// Create a service from configuration, failing fast on invalid
    /// chunking parameters.
    pub fn from_config(config: &DocsplitConfig, source: Arc<S>, acquirer: Arc<A>) -> Result<Self> {
        let chunker = RecursiveChunker::from_config(&config.chunking)?;
        info!(
            "Initializing load service (max_size={}, overlap={})",
            chunker.max_size(),
            chunker.overlap()
        );

        Ok(Self::new(source, acquirer, chunker).with_include_metadata(config.service.include_metadata))
    }

    /// Serialize full chunks (content and metadata) in responses.
    pub fn with_include_metadata(mut self, include_metadata: bool) -> Self {
        self.include_metadata = include_metadata;
        self
    }

    pub fn chunker(&self) -> &RecursiveChunker {
        &self.chunker
    }

    /// Acquire, fetch and chunk one document.
    ///
    /// Every chunk carries `{"url": url}` as metadata.
    pub async fn load(&self, url: &str) -> Result<Vec<Chunk>> {
        let start = Instant::now();

        self.acquirer.acquire(url).await?;

        let text = self.source.fetch(url).await?;
        if text.is_empty() {
            return Err(DocsplitError::fetch_failed(url, "document is empty"));
        }
        info!("Fetched {} bytes for {}", text.len(), url);

        let document = Document::new(text).with_metadata("url", url);

        let chunks = self.chunker.chunk(&document)?;
        if chunks.is_empty() {
            return Err(DocsplitError::processing(format!(
                "no chunks produced for {}",
                url
            )));
        }

        info!(
            "Chunked {} into {} chunks in {}ms",
            url,
            chunks.len(),
            start.elapsed().as_millis()
        );
        Ok(chunks)
    }

    /// Run a request to its outcome.
    pub async fn outcome(&self, request: LoadRequest) -> LoadOutcome {
        let url = match request.url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => {
                warn!("Load request without url");
                return LoadOutcome::BadRequest;
            }
        };

        match self.load(url).await {
            Ok(chunks) => LoadOutcome::Success(chunks),
            Err(e) if e.is_acquisition() => {
                warn!("Failed to fetch {}: {}", url, e);
                LoadOutcome::FetchFailure
            }
            Err(e) => {
                error!("Failed to process {}: {} ({})", url, e, e.error_code());
                LoadOutcome::ProcessingFailure
            }
        }
    }

    /// Handle a request and serialize the response.
    pub async fn handle(&self, request: LoadRequest) -> LoadResponse {
        match self.outcome(request).await.into_response(self.include_metadata) {
            Ok(response) => response,
            Err(e) => {
                error!("Failed to serialize chunks: {}", e);
                LoadResponse::server_error(PROCESSING_FAILED)
            }
        }
    }

    /// Handle a raw JSON event such as `{"url": "..."}`.
    ///
    /// Events without a `url` key, or with a null `url`, are bad requests.
    /// A `url` that is not a string cannot be fetched.
    pub async fn handle_event(&self, event: serde_json::Value) -> LoadResponse {
        match event.get("url") {
            None | Some(serde_json::Value::Null) => self.handle(LoadRequest::default()).await,
            Some(serde_json::Value::String(url)) => self.handle(LoadRequest::new(url.as_str())).await,
            Some(other) => {
                warn!("Load event with non-string url: {}", other);
                LoadResponse::server_error(FETCH_FAILED)
            }
        }
    }
}
