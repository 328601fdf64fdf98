//! Recursive descent over a separator hierarchy.
//!
//! Produces leaf segments lazily. Each leaf is a slice of the input and
//! the leaves, in order, tile the input exactly.

use tracing::trace;

use crate::length::LengthFunction;
use crate::separators::{split_keeping, SeparatorSet};

/// Smallest unit produced by the splitting phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leaf<'a> {
    /// Byte offset of the leaf in the input.
    pub offset: usize,

    /// Leaf text.
    pub text: &'a str,
}

impl Leaf<'_> {
    /// Byte offset just past the leaf.
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }
}

/// Pending piece and the first separator it may still be split on.
struct Frame<'a> {
    offset: usize,
    text: &'a str,
    depth: usize,
}

/// Iterator over the leaf segments of a text.
///
/// Uses an explicit work stack instead of call recursion; pieces are pushed
/// in reverse so they pop in text order.
pub struct Leaves<'a, 'c> {
    separators: &'c SeparatorSet,
    length: &'c LengthFunction,
    max_size: usize,
    stack: Vec<Frame<'a>>,
}

impl<'a, 'c> Leaves<'a, 'c> {
    pub(crate) fn new(
        text: &'a str,
        separators: &'c SeparatorSet,
        length: &'c LengthFunction,
        max_size: usize,
    ) -> Self {
        Self {
            separators,
            length,
            max_size,
            stack: vec![Frame {
                offset: 0,
                text,
                depth: 0,
            }],
        }
    }

    /// Split on the first separator at or after `depth` that yields more
    /// than one piece. Returns the depth for the pieces and the pieces.
    fn split_first(&self, text: &'a str, depth: usize) -> Option<(usize, Vec<&'a str>)> {
        let placement = self.separators.placement();
        self.separators
            .as_slice()
            .iter()
            .enumerate()
            .skip(depth)
            .find_map(|(idx, separator)| {
                let pieces = split_keeping(text, separator, placement);
                (pieces.len() > 1).then_some((idx + 1, pieces))
            })
    }
}

impl<'a> Iterator for Leaves<'a, '_> {
    type Item = Leaf<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(frame) = self.stack.pop() {
            if frame.text.is_empty() {
                continue;
            }

            let leaf = Leaf {
                offset: frame.offset,
                text: frame.text,
            };

            if self.length.measure(frame.text) <= self.max_size {
                return Some(leaf);
            }

            let Some((depth, pieces)) = self.split_first(frame.text, frame.depth) else {
                // Indivisible: emitted whole, over the limit.
                trace!(
                    offset = frame.offset,
                    bytes = frame.text.len(),
                    "No separator left to split oversized segment"
                );
                return Some(leaf);
            };

            let mut offset = frame.offset + frame.text.len();
            for piece in pieces.into_iter().rev() {
                offset -= piece.len();
                self.stack.push(Frame {
                    offset,
                    text: piece,
                    depth,
                });
            }
        }

        None
    }
}
