//! docsplit-chunk - Recursive, boundary-aware chunking
//!
//! Splits long documents into ordered, bounded-size chunks for indexing.
//! Splitting runs in two phases:
//!
//! - **Leaves**: recursive descent over a [`SeparatorSet`], trying coarse
//!   separators (headings, paragraphs) before finer ones (lines, words) and
//!   finally single characters. Leaves tile the input exactly.
//! - **Packing**: leaves are packed greedily into chunks of at most
//!   `max_size` units, each new chunk seeded with the trailing `overlap`
//!   units of the previous one.
//!
//! A leaf that no separator can shrink below `max_size` is emitted whole,
//! so such a chunk may exceed the limit.
//!
//! # Example
//!
//! ```rust
//! use docsplit_chunk::{chunk, Metadata, SeparatorSet};
//!
//! let mut metadata = Metadata::new();
//! metadata.insert("url".into(), "https://example.com/docs/intro".into());
//!
//! let chunks = chunk("Hello world", 500, 0, &SeparatorSet::text(), &metadata).unwrap();
//! assert_eq!(chunks.len(), 1);
//! assert_eq!(chunks[0].metadata, metadata);
//! ```

mod leaves;
mod length;
mod pack;
mod recursive;
mod separators;

pub use leaves::{Leaf, Leaves};
pub use length::LengthFunction;
pub use pack::{Packed, Span};
pub use recursive::RecursiveChunker;
pub use separators::{split_keeping, SeparatorSet};

// Re-export types for convenience
pub use docsplit_core::{Chunk, Chunker, ChunkingConfig, Document, Metadata, Placement, Result};

/// Chunk `text` with character-based sizing.
///
/// Fails with a configuration error unless `max_size > 0` and
/// `overlap < max_size`; empty text yields no chunks.
pub fn chunk(
    text: &str,
    max_size: usize,
    overlap: usize,
    separators: &SeparatorSet,
    metadata: &Metadata,
) -> Result<Vec<Chunk>> {
    let chunker = RecursiveChunker::new(max_size, overlap, separators.clone())?;
    Ok(chunker.chunk_text(text, metadata))
}
