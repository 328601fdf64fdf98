//! Request and response envelope.

use serde::{Deserialize, Serialize};

use docsplit_core::{Chunk, Result};

/// Load request parameters.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LoadRequest {
    /// Identifier of the document to load.
    #[serde(default)]
    pub url: Option<String>,
}

impl LoadRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
        }
    }
}

/// Response returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadResponse {
    /// HTTP-style status code.
    #[serde(rename = "statusCode")]
    pub status_code: u16,

    /// Error message, or the serialized chunks on success.
    pub body: String,
}

impl LoadResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status_code: 200,
            body: body.into(),
        }
    }

    pub fn bad_request(body: impl Into<String>) -> Self {
        Self {
            status_code: 400,
            body: body.into(),
        }
    }

    pub fn server_error(body: impl Into<String>) -> Self {
        Self {
            status_code: 500,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}

pub const MISSING_URL: &str = "URL is required";
pub const FETCH_FAILED: &str = "Failed to fetch markdown data";
pub const PROCESSING_FAILED: &str = "Failed to preprocess data";

/// Result of one load, before serialization.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The request carried no identifier.
    BadRequest,
    /// Acquisition or fetch failed, or the document was empty.
    FetchFailure,
    /// Chunking produced no chunks.
    ProcessingFailure,
    /// Chunks in document order.
    Success(Vec<Chunk>),
}

impl LoadOutcome {
    /// Serialize into a response. With `include_metadata` the body holds
    /// full chunk objects, otherwise only chunk texts.
    pub fn into_response(self, include_metadata: bool) -> Result<LoadResponse> {
        Ok(match self {
            Self::BadRequest => LoadResponse::bad_request(MISSING_URL),
            Self::FetchFailure => LoadResponse::server_error(FETCH_FAILED),
            Self::ProcessingFailure => LoadResponse::server_error(PROCESSING_FAILED),
            Self::Success(chunks) if include_metadata => {
                LoadResponse::ok(serde_json::to_string(&chunks)?)
            }
            Self::Success(chunks) => {
                let texts: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
                LoadResponse::ok(serde_json::to_string(&texts)?)
            }
        })
    }
}
