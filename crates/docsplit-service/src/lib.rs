//! docsplit-service - Document load pipeline
//!
//! Wraps the chunker in the caller-facing flow: validate the request,
//! run the acquisition step, fetch the document, chunk it and serialize the
//! chunks into a response.
//!
//! | outcome | status | body |
//! |---|---|---|
//! | missing `url` | 400 | `URL is required` |
//! | acquisition or fetch failure, empty document | 500 | `Failed to fetch markdown data` |
//! | no chunks produced | 500 | `Failed to preprocess data` |
//! | success | 200 | JSON array of chunks |
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use docsplit_service::{LoadRequest, LoadService};
//! use docsplit_source::{FsDocumentSource, NoopAcquirer};
//!
//! let source = Arc::new(FsDocumentSource::from_config(&config.source));
//! let service = LoadService::from_config(&config, source, Arc::new(NoopAcquirer))?;
//! let response = service.handle(LoadRequest::new("https://example.com/docs/intro")).await;
//! ```

mod envelope;
mod service;

pub use envelope::{
    LoadOutcome, LoadRequest, LoadResponse, FETCH_FAILED, MISSING_URL, PROCESSING_FAILED,
};
pub use service::LoadService;
