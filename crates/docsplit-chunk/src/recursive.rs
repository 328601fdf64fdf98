//! Recursive text chunker.
//!
//! Splits text by trying progressively finer separators until every piece
//! fits, then packs the pieces greedily into chunks with optional overlap.

use tracing::debug;

use docsplit_core::{
    validate_sizes, Chunk, ChunkingConfig, Chunker, DocsplitError, Document, Metadata, Result,
};

use crate::leaves::Leaves;
use crate::length::LengthFunction;
use crate::pack::{Packed, Span};
use crate::separators::SeparatorSet;

/// Recursive chunker over a separator hierarchy.
///
/// With [`SeparatorSet::text`] it tries, in order:
/// 1. Double newline (paragraph breaks)
/// 2. Single newline
/// 3. Sentence boundaries (`". "`)
/// 4. Word boundaries (space)
/// 5. Character (last resort)
///
/// The chunker holds no mutable state; one instance can be shared across
/// threads.
#[derive(Debug, Clone)]
pub struct RecursiveChunker {
    max_size: usize,
    overlap: usize,
    separators: SeparatorSet,
    length: LengthFunction,
}

impl RecursiveChunker {
    /// Create a chunker measuring size in characters.
    ///
    /// Fails with a configuration error unless `max_size > 0`,
    /// `overlap < max_size` and `separators` is not empty.
    pub fn new(max_size: usize, overlap: usize, separators: SeparatorSet) -> Result<Self> {
        validate_sizes(max_size, overlap)?;
        check_separators(&separators)?;
        Ok(Self {
            max_size,
            overlap,
            separators,
            length: LengthFunction::Chars,
        })
    }

    /// Create a chunker from configuration.
    ///
    /// An explicit `separators` list uses the configured placement, or the
    /// preset's placement when none is set.
    pub fn from_config(config: &ChunkingConfig) -> Result<Self> {
        config.validate()?;
        let separators = match &config.separators {
            Some(list) => SeparatorSet::new(list.iter().cloned()),
            None => SeparatorSet::from_preset(config.preset),
        };
        Self::new(
            config.max_size,
            config.overlap,
            separators.with_placement(config.effective_placement()),
        )
    }

    /// Replace the separator hierarchy.
    pub fn with_separators(mut self, separators: SeparatorSet) -> Result<Self> {
        check_separators(&separators)?;
        self.separators = separators;
        Ok(self)
    }

    /// Measure `max_size` and `overlap` with a custom function, e.g. a
    /// token counter.
    pub fn with_length_function<F>(mut self, measure: F) -> Self
    where
        F: Fn(&str) -> usize + Send + Sync + 'static,
    {
        self.length = LengthFunction::custom(measure);
        self
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    pub fn separators(&self) -> &SeparatorSet {
        &self.separators
    }

    /// Leaf segments of `text`, in order. Joining them yields `text`.
    pub fn leaves<'a>(&'a self, text: &'a str) -> Leaves<'a, 'a> {
        Leaves::new(text, &self.separators, &self.length, self.max_size)
    }

    /// Packed chunk ranges of `text`, in order.
    pub fn spans<'a>(&'a self, text: &'a str) -> Packed<'a, 'a, Leaves<'a, 'a>> {
        Packed::new(
            text,
            self.leaves(text),
            &self.length,
            self.max_size,
            self.overlap,
        )
    }

    /// Lazily produce chunks of `text`, each carrying a copy of `metadata`.
    pub fn chunks<'a>(
        &'a self,
        text: &'a str,
        metadata: &'a Metadata,
    ) -> impl Iterator<Item = Chunk> + 'a {
        self.spans(text)
            .map(move |span| to_chunk(text, span, metadata))
    }

    /// Chunk `text`, attaching `metadata` to every chunk.
    pub fn chunk_text(&self, text: &str, metadata: &Metadata) -> Vec<Chunk> {
        let chunks: Vec<Chunk> = self.chunks(text, metadata).collect();

        debug!(
            bytes = text.len(),
            chunks = chunks.len(),
            max_size = self.max_size,
            overlap = self.overlap,
            "Chunked text"
        );

        chunks
    }
}

fn check_separators(separators: &SeparatorSet) -> Result<()> {
    if separators.is_empty() {
        return Err(DocsplitError::config("separators must not be empty"));
    }
    Ok(())
}

fn to_chunk(text: &str, span: Span, metadata: &Metadata) -> Chunk {
    Chunk {
        content: text[span.start..span.end].to_string(),
        metadata: metadata.clone(),
        start: span.start,
        overlap: span.overlap(),
    }
}

impl Chunker for RecursiveChunker {
    fn chunk(&self, document: &Document) -> Result<Vec<Chunk>> {
        if document.text.is_empty() {
            return Ok(Vec::new());
        }

        Ok(self.chunk_text(&document.text, &document.metadata))
    }
}
