//! Greedy packing of leaves into chunks, with overlap.

use crate::leaves::Leaf;
use crate::length::LengthFunction;

/// Byte range of a packed chunk in the source text.
///
/// `start..core_start` is the overlap copied from the previous chunk,
/// `core_start..end` is new text. Core ranges of consecutive spans tile the
/// source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub core_start: usize,
    pub end: usize,
}

impl Span {
    /// Byte length of the overlap prefix.
    pub fn overlap(&self) -> usize {
        self.core_start - self.start
    }
}

/// Iterator packing leaves greedily into spans no larger than `max_size`.
pub struct Packed<'a, 'c, I> {
    text: &'a str,
    leaves: I,
    length: &'c LengthFunction,
    max_size: usize,
    overlap: usize,
    start: usize,
    core_start: usize,
    end: usize,
}

impl<'a, 'c, I> Packed<'a, 'c, I>
where
    I: Iterator<Item = Leaf<'a>>,
{
    pub(crate) fn new(
        text: &'a str,
        leaves: I,
        length: &'c LengthFunction,
        max_size: usize,
        overlap: usize,
    ) -> Self {
        Self {
            text,
            leaves,
            length,
            max_size,
            overlap,
            start: 0,
            core_start: 0,
            end: 0,
        }
    }

    fn measure(&self, start: usize, end: usize) -> usize {
        self.length.measure(&self.text[start..end])
    }

    /// Start of the overlap seed for the chunk following `prev_start..boundary`.
    ///
    /// The seed is the longest suffix of the previous chunk that is at most
    /// `overlap` units and still lets the seed plus the next leaf (ending at
    /// `next_end`) fit in `max_size`.
    fn seed_start(&self, prev_start: usize, boundary: usize, next_end: usize) -> usize {
        if self.overlap == 0 {
            return boundary;
        }

        let mut start = boundary;
        for (idx, _) in self.text[prev_start..boundary].char_indices().rev() {
            let candidate = prev_start + idx;
            if self.measure(candidate, boundary) > self.overlap
                || self.measure(candidate, next_end) > self.max_size
            {
                break;
            }
            start = candidate;
        }
        start
    }

    fn take_current(&mut self) -> Span {
        Span {
            start: self.start,
            core_start: self.core_start,
            end: self.end,
        }
    }
}

impl<'a, I> Iterator for Packed<'a, '_, I>
where
    I: Iterator<Item = Leaf<'a>>,
{
    type Item = Span;

    fn next(&mut self) -> Option<Self::Item> {
        // `while let` so the leaf iterator is not borrowed across `measure`.
        while let Some(leaf) = self.leaves.next() {
            let leaf_end = leaf.end();
            let has_core = self.end > self.core_start;

            if has_core && self.measure(self.start, leaf_end) > self.max_size {
                let span = self.take_current();
                self.start = self.seed_start(span.start, span.end, leaf_end);
                self.core_start = span.end;
                self.end = leaf_end;
                return Some(span);
            }

            self.end = leaf_end;
        }

        if self.end > self.core_start {
            let span = self.take_current();
            self.start = self.end;
            self.core_start = self.end;
            return Some(span);
        }

        None
    }
}
